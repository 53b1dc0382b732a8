//! Pass 5: Binding-Method Renamer
//!
//! `property:` (legacy) becomes `method:` (class-based) everywhere in the
//! unit. Only whole-word occurrences are renamed.

use regex::Regex;

use crate::config::UpgradeOptions;
use crate::error::UpgradeError;

use super::pass_result::PassResult;

pub fn rename_property_to_method(
    text: &str,
    _config: &UpgradeOptions,
) -> Result<PassResult, UpgradeError> {
    let property = Regex::new(r"\bproperty:")?;

    let rewrites = property.find_iter(text).count();
    if rewrites == 0 {
        return Ok(PassResult::unchanged(text));
    }
    let out = property.replace_all(text, "method:").into_owned();
    Ok(PassResult::rewritten(out, rewrites))
}
