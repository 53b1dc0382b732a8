//! Pass 6: Interface-List Expander
//!
//! `interfaces [Node, Timestamped]` becomes one `implements` line per
//! interface, in list order, at the directive's indentation.

use regex::Regex;

use crate::config::UpgradeOptions;
use crate::error::UpgradeError;

use super::pass_result::PassResult;

pub fn expand_interfaces(text: &str, _config: &UpgradeOptions) -> Result<PassResult, UpgradeError> {
    let interfaces = Regex::new(
        r"(?P<indent>\s*)\binterfaces \[(?P<interfaces>[a-zA-Z_0-9:]+(?:,\s*[a-zA-Z_0-9:]+)*)\]",
    )?;

    let mut rewrites = 0;
    let out = interfaces.replace_all(text, |caps: &regex::Captures<'_>| {
        rewrites += 1;
        let leading = &caps["indent"];
        // Indentation of the directive's own line, for the lines we add.
        let line_indent = leading.rsplit('\n').next().unwrap_or(leading);

        let mut expanded = String::from(leading);
        let names = caps["interfaces"]
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty());
        for (i, name) in names.enumerate() {
            if i > 0 {
                expanded.push('\n');
                expanded.push_str(line_indent);
            }
            expanded.push_str("implements ");
            expanded.push_str(name);
        }
        expanded
    });

    if rewrites == 0 {
        return Ok(PassResult::unchanged(text));
    }
    Ok(PassResult::rewritten(out.into_owned(), rewrites))
}
