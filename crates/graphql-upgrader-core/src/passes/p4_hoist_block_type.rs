//! Pass 4: Block-Type Hoister
//!
//! ```text
//! field :x do              field :x, types.String do
//!   type types.String  =>    description "..."
//!   description "..."      end
//! end
//! ```
//!
//! Class-based declarations take the return type positionally, so the first
//! `type` statement directly inside a declaration's block moves onto the
//! declaration line and its own line is removed. The block ends at the `end`
//! matching its header, or at a dedent past the header. Bodies written at
//! the header's own indentation still count as the block. `type` lines
//! belonging to nested blocks are left for their own declaration.

use regex::Regex;

use crate::config::UpgradeOptions;
use crate::error::UpgradeError;

use super::pass_result::PassResult;
use super::pass_utils::{apply_edits, indent_width, line_end_inclusive, line_start};

/// Compiled patterns for one run of the pass.
struct Patterns {
    block_header: Regex,
    type_statement: Regex,
    /// A body line that opens a nested `do ... end` block.
    nested_opener: Regex,
    /// A body line that closes a block.
    block_end: Regex,
}

impl Patterns {
    fn new() -> Result<Self, UpgradeError> {
        Ok(Self {
            block_header: Regex::new(
                r"(?P<field>(?:field|connection|argument) :[a-zA-Z_0-9]*) do\b",
            )?,
            type_statement: Regex::new(r"^[ \t]*type (?P<return_type>.*)$")?,
            nested_opener: Regex::new(r"\bdo(?:\s*\|[^|]*\|)?$")?,
            block_end: Regex::new(r"^end\b")?,
        })
    }
}

/// Move `type X` statements out of declaration blocks.
pub fn hoist_block_types(text: &str, _config: &UpgradeOptions) -> Result<PassResult, UpgradeError> {
    let patterns = Patterns::new()?;

    let mut edits: Vec<(usize, usize, String)> = Vec::new();
    for caps in patterns.block_header.captures_iter(text) {
        let Some(field) = caps.name("field") else {
            continue;
        };
        if let Some((type_line, return_type)) = find_block_type(text, field.end(), &patterns) {
            edits.push((field.end(), field.end(), format!(", {return_type}")));
            edits.push((type_line.0, type_line.1, String::new()));
        }
    }

    if edits.is_empty() {
        return Ok(PassResult::unchanged(text));
    }

    let rewrites = edits.len() / 2;
    edits.sort_by_key(|(start, _, _)| *start);
    Ok(PassResult::rewritten(apply_edits(text, &edits), rewrites))
}

/// Locate the first `type` statement at the top level of the block opened
/// on the line containing `header_end`. Returns the byte range of that
/// whole line (newline included) and the declared return type.
fn find_block_type(
    text: &str,
    header_end: usize,
    patterns: &Patterns,
) -> Option<((usize, usize), String)> {
    let header_line_start = line_start(text, header_end);
    let header_indent = indent_width(&text[header_line_start..]);

    let mut cursor = line_end_inclusive(text, header_end);
    let mut body_indent: Option<usize> = None;
    // Open nested blocks at the body's indentation.
    let mut nested = 0usize;

    while cursor < text.len() {
        let next = line_end_inclusive(text, cursor);
        let line = text[cursor..next].trim_end_matches(['\n', '\r']);
        let trimmed = line.trim();
        let indent = indent_width(line);

        if trimmed.is_empty() {
            cursor = next;
            continue;
        }
        let closes = patterns.block_end.is_match(trimmed);
        if indent < header_indent || (indent == header_indent && closes && nested == 0) {
            return None;
        }

        let depth = *body_indent.get_or_insert(indent);
        if indent < depth {
            return None;
        }
        if indent == depth {
            if nested == 0 {
                if let Some(caps) = patterns.type_statement.captures(line) {
                    let return_type = caps.name("return_type")?.as_str().trim_end();
                    if !return_type.is_empty() {
                        return Some(((cursor, next), return_type.to_string()));
                    }
                }
            }
            if closes {
                nested = nested.saturating_sub(1);
            } else if patterns.nested_opener.is_match(trimmed) {
                nested += 1;
            }
        }
        cursor = next;
    }

    None
}
