//! Upgrade legacy GraphQL-Ruby `.define do` type definitions to class-based
//! declarations.
//!
//! A source unit is one type definition held in memory. [`is_eligible`]
//! tells whether it is still in legacy shape; [`upgrade`] runs the rewrite
//! passes over it and returns the new text with a report of what changed.
//! Finding files, reading and writing them, and showing diffs are left to
//! the caller.
//!
//! ```
//! use graphql_upgrader_core::{is_eligible, upgrade, UpgradeOptions};
//!
//! let source = "FooType = GraphQL::ObjectType.define do\n  name 'Foo'\n  field :bar, types.String\nend\n";
//! let options = UpgradeOptions::default();
//!
//! assert!(is_eligible(source, &options).unwrap());
//! let result = upgrade(source, &options).unwrap();
//! assert_eq!(
//!     result.source,
//!     "class FooType < Types::BaseObject\n  field :bar, String, null: true\nend\n"
//! );
//! ```

pub mod config;
pub mod declaration;
pub mod error;
pub mod passes;
pub mod report;
pub mod type_ref;

use serde::{Deserialize, Serialize};

pub use config::UpgradeOptions;
pub use error::UpgradeError;
pub use report::{SkipReason, SkippedDeclaration, Stage, StageReport, UpgradeReport};

use passes::{
    p0_eligibility, p1_class_form, p2_name_directive, p3_normalize_lines, p4_hoist_block_type,
    p5_binding_method, p6_interfaces, p7_field_signatures,
};

/// Upgraded text plus the report describing how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeResult {
    /// The rewritten source unit.
    pub source: String,
    pub report: UpgradeReport,
}

/// Whether `source` is a legacy unit the pipeline may be applied to.
///
/// Callers should skip units for which this returns `false`; upgrading
/// class-based code corrupts it.
pub fn is_eligible(source: &str, options: &UpgradeOptions) -> Result<bool, UpgradeError> {
    options.validate()?;
    p0_eligibility::is_eligible(source, options)
}

/// Run every rewrite pass over `source`.
///
/// Fails only on invalid `options`. Declarations that cannot be rewritten
/// are left as written and listed in `report.skipped`.
pub fn upgrade(source: &str, options: &UpgradeOptions) -> Result<UpgradeResult, UpgradeError> {
    options.validate()?;
    let mut report = UpgradeReport::default();

    // Pass 1: `X = GraphQL::<Kind>Type.define do` -> `class X < Types::Base<Kind>`
    let text = p1_class_form::rewrite_class_form(source, options)?
        .merge_into_report(Stage::ClassForm, &mut report);

    // Pass 2: drop or rename the `name` directive (needs the class header)
    let text = p2_name_directive::resolve_name_directive(&text, options)?
        .merge_into_report(Stage::NameDirective, &mut report);

    // Pass 3: one declaration per line
    let text = p3_normalize_lines::normalize_declaration_lines(&text, options)?
        .merge_into_report(Stage::NormalizeLines, &mut report);

    // Pass 4: `type X` inside a block -> positional return type
    let text = p4_hoist_block_type::hoist_block_types(&text, options)?
        .merge_into_report(Stage::HoistBlockType, &mut report);

    // Pass 5: `property:` -> `method:`
    let text = p5_binding_method::rename_property_to_method(&text, options)?
        .merge_into_report(Stage::BindingMethod, &mut report);

    // Pass 6: `interfaces [A, B]` -> `implements A` / `implements B`
    let text = p6_interfaces::expand_interfaces(&text, options)?
        .merge_into_report(Stage::Interfaces, &mut report);

    // Pass 7: regenerate declarations (needs passes 3 and 4)
    let text = p7_field_signatures::rewrite_field_signatures(&text, options)?
        .merge_into_report(Stage::FieldSignatures, &mut report);

    tracing::debug!(
        rewrites = report.rewritten(),
        skipped = report.skipped.len(),
        "upgrade complete"
    );

    Ok(UpgradeResult {
        source: text,
        report,
    })
}
