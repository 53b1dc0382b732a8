//! Pass 0: Eligibility Gate
//!
//! Decides whether a unit is still in legacy `.define do` shape. Units that
//! already subclass a `<legacy>::Schema::` class, or one of the configured
//! `<base>::Base<Kind>` classes, are rejected: every later pass assumes
//! legacy input and would corrupt class-based code.

use regex::Regex;

use crate::config::UpgradeOptions;
use crate::declaration::TypeKind;
use crate::error::UpgradeError;

/// Return `true` when `source` is a migration candidate.
pub fn is_eligible(source: &str, config: &UpgradeOptions) -> Result<bool, UpgradeError> {
    let schema_superclass = format!("< {}::Schema::", config.legacy_namespace);
    if source.contains(&schema_superclass) {
        return Ok(false);
    }

    let base_superclass = Regex::new(&format!(
        r"< {}::Base{}",
        regex::escape(&config.base_namespace),
        TypeKind::alternation()
    ))?;
    Ok(!base_superclass.is_match(source))
}
