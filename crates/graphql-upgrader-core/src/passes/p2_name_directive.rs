//! Pass 2: Name Directive Resolver
//!
//! Class-based types derive their GraphQL name from the class name minus a
//! trailing `Type`. A `name 'Foo'` directive that repeats that default is
//! removed along with its line; one that differs becomes `graphql_name`.
//!
//! Only a directive at the class body's own indentation is considered, so a
//! `name` inside a member's block is never mistaken for the type's.
//!
//! Requires Pass 1 output: the class header is what supplies the default.

use regex::Regex;

use crate::config::UpgradeOptions;
use crate::declaration::{TypeDeclaration, TypeKind};
use crate::error::UpgradeError;

use super::pass_result::PassResult;
use super::pass_utils::{indent_width, line_end_inclusive};

const EXPLICIT_NAME_KEYWORD: &str = "graphql_name";

/// Remove or rename the unit's `name` directive.
pub fn resolve_name_directive(
    text: &str,
    config: &UpgradeOptions,
) -> Result<PassResult, UpgradeError> {
    let class_header = Regex::new(&format!(
        r"class (?P<class_name>[a-zA-Z_0-9:]+) < {}::Base(?P<kind>{})",
        regex::escape(&config.base_namespace),
        TypeKind::alternation()
    ))?;
    let directive =
        Regex::new(r#"(?m)^(?P<indent>[ \t]*)(?P<keyword>name) ['"](?P<value>.*)['"]"#)?;

    let Some(header) = class_header.captures(text) else {
        return Ok(PassResult::unchanged(text));
    };
    let (Some(header_match), Some(class_name), Some(kind)) = (
        header.get(0),
        header.name("class_name"),
        header.name("kind").and_then(|k| TypeKind::from_name(k.as_str())),
    ) else {
        return Ok(PassResult::unchanged(text));
    };

    let Some(body_indent) = body_indent(text, header_match.end()) else {
        return Ok(PassResult::unchanged(text));
    };
    let Some(found) = directive
        .captures_iter(text)
        .filter(|caps| caps.get(0).is_some_and(|m| m.start() >= header_match.end()))
        .find(|caps| caps.name("indent").is_some_and(|m| m.len() == body_indent))
    else {
        return Ok(PassResult::unchanged(text));
    };
    let (Some(whole), Some(keyword), Some(value)) =
        (found.get(0), found.name("keyword"), found.name("value"))
    else {
        return Ok(PassResult::unchanged(text));
    };

    let decl = TypeDeclaration {
        class_name: class_name.as_str().to_string(),
        kind,
        explicit_name: Some(value.as_str().to_string()),
    };

    let out = if decl.name_is_redundant() {
        tracing::debug!(
            class = %decl.class_name,
            kind = %decl.kind,
            "removing redundant name directive"
        );
        // Swallow the whitespace (and newline) leading up to the directive.
        let start = text[..whole.start()].trim_end().len();
        format!("{}{}", &text[..start], &text[whole.end()..])
    } else {
        tracing::debug!(
            class = %decl.class_name,
            kind = %decl.kind,
            name = value.as_str(),
            "keeping explicit graphql name"
        );
        format!(
            "{}{}{}",
            &text[..keyword.start()],
            EXPLICIT_NAME_KEYWORD,
            &text[keyword.end()..]
        )
    };

    Ok(PassResult::rewritten(out, 1))
}

/// Indentation of the first non-blank line after the class header.
fn body_indent(text: &str, header_end: usize) -> Option<usize> {
    let body = &text[line_end_inclusive(text, header_end)..];
    body.lines()
        .find(|line| !line.trim().is_empty())
        .map(indent_width)
}
