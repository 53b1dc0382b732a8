//! Pass 3: Declaration Line Normalizer
//!
//! Joins a declaration whose argument list ends in a trailing comma with
//! its continuation line when that line opens a string (a wrapped
//! description or deprecation reason) or another `field` keyword. Pass 7
//! reads one declaration per line and depends on this. A CRLF break is
//! consumed whole; the continuation's own line ending is kept.

use regex::Regex;

use crate::config::UpgradeOptions;
use crate::error::UpgradeError;

use super::pass_result::PassResult;

/// Merge comma-continued declaration lines.
pub fn normalize_declaration_lines(
    text: &str,
    _config: &UpgradeOptions,
) -> Result<PassResult, UpgradeError> {
    let continued = Regex::new(
        r#"(?P<field>(?:field|connection|argument).*?,)\r?\n\s*(?P<next_line>(?::?["']|field).*)"#,
    )?;

    let mut rewrites = 0;
    let out = continued.replace_all(text, |caps: &regex::Captures<'_>| {
        rewrites += 1;
        format!("{} {}", &caps["field"], &caps["next_line"])
    });

    if rewrites == 0 {
        return Ok(PassResult::unchanged(text));
    }
    Ok(PassResult::rewritten(out.into_owned(), rewrites))
}
