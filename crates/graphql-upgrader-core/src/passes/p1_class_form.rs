//! Pass 1: Class-Form Rewriter
//!
//! `FooType = GraphQL::ObjectType.define do` becomes
//! `class FooType < Types::BaseObject`. The `do` is dropped; the block's
//! closing `end` now closes the class body. Only the first assignment in a
//! unit is rewritten.

use regex::Regex;

use crate::config::UpgradeOptions;
use crate::declaration::TypeKind;
use crate::error::UpgradeError;

use super::pass_result::PassResult;

/// Rewrite the first legacy `.define do` assignment into a class header.
pub fn rewrite_class_form(text: &str, config: &UpgradeOptions) -> Result<PassResult, UpgradeError> {
    let define = Regex::new(&format!(
        r"(?P<class_name>[a-zA-Z_0-9:]+) = {}::(?P<kind>{})Type\.define do",
        regex::escape(&config.legacy_namespace),
        TypeKind::alternation()
    ))?;

    let Some(caps) = define.captures(text) else {
        return Ok(PassResult::unchanged(text));
    };
    let (Some(whole), Some(class_name), Some(kind)) =
        (caps.get(0), caps.name("class_name"), caps.name("kind"))
    else {
        return Ok(PassResult::unchanged(text));
    };

    let header = format!(
        "class {} < {}::Base{}",
        class_name.as_str(),
        config.base_namespace,
        kind.as_str()
    );
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..whole.start()]);
    out.push_str(&header);
    out.push_str(&text[whole.end()..]);

    Ok(PassResult::rewritten(out, 1))
}
