//! Property-based tests for arbitrary and malformed source units.
//!
//! The pipeline never fails on content: whatever the text, `upgrade()`
//! returns `Ok`, and text none of the passes recognize comes back unchanged.
//! Declarations built from random names and types are checked against the
//! exact class-based form they must produce.

use graphql_upgrader_core::{is_eligible, upgrade, UpgradeOptions};
use proptest::prelude::*;

fn default_opts() -> UpgradeOptions {
    UpgradeOptions::default()
}

// ===========================================================================
// 1. Deterministic malformed units
// ===========================================================================

#[test]
fn malformed_declarations_do_not_fail() {
    for source in [
        "field",
        "field :",
        "field :x,",
        "field :x, ",
        "field :, types.String",
        "argument :x, , required",
        "connection :c do",
        "field :x do\n  type\nend",
        "field :x do\n  type ",
        "interfaces []",
        "interfaces [A,]",
        "name '",
        "X = GraphQL::ObjectType.define do",
        "class X < Types::BaseObject\n  name 'X",
        "field :é, types.Straße\n  argument :ü, !types[types.ß]",
    ] {
        let result = upgrade(source, &default_opts());
        assert!(result.is_ok(), "upgrade failed on {source:?}");
    }
}

// ===========================================================================
// 2. Property tests
// ===========================================================================

/// Legacy scalar types and their class-based names.
fn arb_scalar() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("String"),
        Just("Int"),
        Just("Float"),
        Just("Boolean"),
        Just("ID"),
    ]
}

proptest! {
    #[test]
    fn upgrade_never_fails(source in "\\PC{0,300}") {
        prop_assert!(upgrade(&source, &default_opts()).is_ok());
        prop_assert!(is_eligible(&source, &default_opts()).is_ok());
    }

    #[test]
    fn unrecognized_text_passes_through(source in "[0-9 \\n=<>_.(){}]{0,300}") {
        let result = upgrade(&source, &default_opts()).unwrap();
        prop_assert_eq!(result.source, source);
        prop_assert_eq!(result.report.rewritten(), 0);
    }

    #[test]
    fn field_nullability_follows_marker(
        name in "[a-z_][a-z0-9_]{0,15}",
        scalar in arb_scalar(),
        non_null in any::<bool>(),
    ) {
        let bang = if non_null { "!" } else { "" };
        let source = format!("  field :{name}, {bang}types.{scalar}\n");
        let expected = format!("  field :{name}, {scalar}, null: {}\n", !non_null);
        prop_assert_eq!(upgrade(&source, &default_opts()).unwrap().source, expected);
    }

    #[test]
    fn argument_required_follows_marker(
        name in "[a-z_][a-z0-9_]{0,15}",
        scalar in arb_scalar(),
        non_null in any::<bool>(),
        input_field in any::<bool>(),
    ) {
        let keyword = if input_field { "input_field" } else { "argument" };
        let bang = if non_null { "!" } else { "" };
        let source = format!("  {keyword} :{name}, types.{scalar}{bang}\n");
        let expected = format!("  argument :{name}, {scalar}, required: {non_null}\n");
        prop_assert_eq!(upgrade(&source, &default_opts()).unwrap().source, expected);
    }

    #[test]
    fn interface_order_is_preserved(names in prop::collection::vec("[A-Z][a-zA-Z0-9]{0,10}", 1..6)) {
        let source = format!("  interfaces [{}]\n", names.join(", "));
        let expected: String = names
            .iter()
            .map(|name| format!("  implements {name}\n"))
            .collect();
        prop_assert_eq!(upgrade(&source, &default_opts()).unwrap().source, expected);
    }
}
