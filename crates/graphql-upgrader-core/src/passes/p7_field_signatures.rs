//! Pass 7: Field-Signature Rewriter
//!
//! Re-reads every `field`, `input_field`, `argument` and `connection`
//! declaration and regenerates it in class-based syntax:
//!
//! ```text
//! field :bar, types.String               field :bar, String, null: true
//! argument :id, !types.ID            =>  argument :id, ID, required: true
//! connection :posts, PostType.connection_type
//!                                        field :posts, PostType.connection_type, null: true, connection: true
//! ```
//!
//! Expects Passes 3 and 4 to have run: one declaration per line, return
//! types on the declaration line. Whatever follows the return type is
//! carried over verbatim, and a trailing ` do` is re-appended so the block
//! body stays attached.
//!
//! A declaration that cannot be decomposed is left as written and recorded
//! in the pass's `skipped` list. So is one that already carries a `null:`
//! or `required:` flag outside its string literals, which keeps a second
//! run over upgraded text from stacking flags.

use regex::Regex;

use crate::config::UpgradeOptions;
use crate::declaration::{MemberDeclaration, MemberKind};
use crate::error::UpgradeError;
use crate::report::{SkipReason, SkippedDeclaration};
use crate::type_ref::{strip_legacy_markers, TypeRef};

use super::pass_result::PassResult;
use super::pass_utils::line_number_at;

/// Compiled patterns for one run of the pass.
struct Patterns {
    /// A declaration keyword through the end of its line.
    candidate: Regex,
    /// `<kw> :<name>, <return_type><remainder>`.
    signature: Regex,
    /// Start of something that is unmistakably a declaration.
    declaration_head: Regex,
    /// A nullability flag in class-based syntax.
    explicit_flag: Regex,
    /// A single- or double-quoted Ruby string literal.
    string_literal: Regex,
}

impl Patterns {
    fn new() -> Result<Self, UpgradeError> {
        Ok(Self {
            candidate: Regex::new(r"(?mR)\b(?:input_field|field|connection|argument) .*$")?,
            signature: Regex::new(
                r"(?P<field_type>input_field|field|connection|argument) :(?P<name>[a-zA-Z_0-9]+), (?P<return_type>.*?(?:,|$|\}))(?P<remainder>.*)",
            )?,
            declaration_head: Regex::new(r"^(?:input_field|field|connection|argument) :\w")?,
            explicit_flag: Regex::new(r"\b(?:null|required):")?,
            string_literal: Regex::new(r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'"#)?,
        })
    }
}

enum Outcome {
    /// `offset` is where the declaration starts within the candidate line.
    Rewritten {
        offset: usize,
        declaration: MemberDeclaration,
    },
    Skipped(SkipReason),
    /// The keyword appeared, but not as a declaration (e.g. inside prose).
    NotADeclaration,
}

/// Regenerate every member declaration in class-based syntax.
pub fn rewrite_field_signatures(
    text: &str,
    _config: &UpgradeOptions,
) -> Result<PassResult, UpgradeError> {
    let patterns = Patterns::new()?;

    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut cursor = 0;
    let mut rewrites = 0;
    let mut skipped = Vec::new();

    for candidate in patterns.candidate.find_iter(text) {
        match decompose(candidate.as_str(), &patterns) {
            Outcome::Rewritten {
                offset,
                declaration,
            } => {
                tracing::trace!(
                    keyword = declaration.kind.keyword(),
                    name = %declaration.name,
                    "regenerating declaration"
                );
                out.push_str(&text[cursor..candidate.start() + offset]);
                out.push_str(&declaration.render());
                cursor = candidate.end();
                rewrites += 1;
            }
            Outcome::Skipped(reason) => {
                let line = line_number_at(text, candidate.start());
                let declaration = candidate.as_str().trim_end().to_string();
                tracing::debug!(line, %declaration, %reason, "left declaration unchanged");
                skipped.push(SkippedDeclaration {
                    line,
                    text: declaration,
                    reason,
                });
            }
            Outcome::NotADeclaration => {}
        }
    }
    out.push_str(&text[cursor..]);

    if rewrites == 0 && skipped.is_empty() {
        return Ok(PassResult::unchanged(text));
    }
    Ok(PassResult::with_skipped(out, rewrites, skipped))
}

/// Split one candidate line into a `MemberDeclaration`.
fn decompose(line: &str, patterns: &Patterns) -> Outcome {
    let Some(caps) = patterns.signature.captures(line) else {
        return unrecognized(line, patterns);
    };
    let (Some(whole), Some(kind), Some(name), Some(return_type), Some(remainder)) = (
        caps.get(0),
        caps.name("field_type")
            .and_then(|m| MemberKind::from_keyword(m.as_str())),
        caps.name("name"),
        caps.name("return_type"),
        caps.name("remainder"),
    ) else {
        return unrecognized(line, patterns);
    };

    // A trailing ` do` lands in the remainder, or in the return type when
    // nothing follows the type.
    let mut return_type = return_type.as_str();
    let mut remainder = remainder.as_str().trim_end();
    let mut is_block_form = false;
    if let Some(rest) = remainder.strip_suffix(" do") {
        remainder = rest;
        is_block_form = true;
    } else if let Some(rest) = return_type.trim_end().strip_suffix(" do") {
        return_type = rest;
        is_block_form = true;
    }

    let remainder = remainder.trim_end();
    let remainder = remainder.strip_suffix(',').unwrap_or(remainder).trim_end();
    let remainder = remainder.strip_prefix(',').unwrap_or(remainder);

    let options = patterns.string_literal.replace_all(remainder, "");
    if patterns.explicit_flag.is_match(&options) {
        return Outcome::Skipped(SkipReason::AlreadyUpgraded);
    }

    let legacy_type = return_type.trim_end().trim_end_matches(',').trim();
    if legacy_type.is_empty() {
        return unrecognized(line, patterns);
    }
    let (class_type, had_bang) = match TypeRef::parse(legacy_type) {
        Some(parsed) => (parsed.to_class_syntax(), parsed.is_non_null()),
        None => strip_legacy_markers(legacy_type),
    };

    Outcome::Rewritten {
        offset: whole.start(),
        declaration: MemberDeclaration {
            kind,
            name: name.as_str().to_string(),
            return_type: class_type,
            is_block_form,
            trailing_modifiers: remainder.to_string(),
            had_bang,
        },
    }
}

fn unrecognized(line: &str, patterns: &Patterns) -> Outcome {
    if patterns.declaration_head.is_match(line) {
        Outcome::Skipped(SkipReason::UnrecognizedShape)
    } else {
        Outcome::NotADeclaration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(text: &str) -> PassResult {
        rewrite_field_signatures(text, &UpgradeOptions::default()).unwrap()
    }

    fn rewrite(line: &str) -> String {
        run(line).text
    }

    #[test]
    fn test_field_nullability() {
        assert_eq!(rewrite("field :bar, types.String"), "field :bar, String, null: true");
        assert_eq!(rewrite("field :bar, types.String!"), "field :bar, String, null: false");
        assert_eq!(rewrite("field :bar, !types.String"), "field :bar, String, null: false");
    }

    #[test]
    fn test_argument_required() {
        assert_eq!(rewrite("argument :id, types.ID"), "argument :id, ID, required: false");
        assert_eq!(rewrite("argument :id, types.ID!"), "argument :id, ID, required: true");
    }

    #[test]
    fn test_input_field_becomes_argument() {
        assert_eq!(
            rewrite("  input_field :email, !types.String"),
            "  argument :email, String, required: true"
        );
    }

    #[test]
    fn test_connection_marked() {
        assert_eq!(
            rewrite("connection :posts, PostType.connection_type"),
            "field :posts, PostType.connection_type, null: true, connection: true"
        );
        assert_eq!(
            rewrite("connection :posts, !PostType.connection_type, max_page_size: 20"),
            "field :posts, PostType.connection_type, max_page_size: 20, null: false, connection: true"
        );
    }

    #[test]
    fn test_trailing_modifiers_preserved() {
        assert_eq!(
            rewrite("  field :name, types.String, \"The name\", method: :full_name"),
            "  field :name, String, \"The name\", method: :full_name, null: true"
        );
    }

    #[test]
    fn test_block_opener_reattached() {
        assert_eq!(
            rewrite("  field :bar, types.String do\n    description 'x'\n  end\n"),
            "  field :bar, String, null: true do\n    description 'x'\n  end\n"
        );
        assert_eq!(
            rewrite("  field :bar, types.String, \"Bar\" do\n  end\n"),
            "  field :bar, String, \"Bar\", null: true do\n  end\n"
        );
    }

    #[test]
    fn test_lambda_return_type() {
        assert_eq!(
            rewrite("field :owner, -> { UserType }, \"Owner\""),
            "field :owner, -> { UserType }, \"Owner\", null: true"
        );
    }

    #[test]
    fn test_list_types() {
        assert_eq!(
            rewrite("field :tags, types[types.String]"),
            "field :tags, [String, null: true], null: true"
        );
        assert_eq!(
            rewrite("field :tags, types[String]!"),
            "field :tags, [String, null: true], null: false"
        );
        assert_eq!(
            rewrite("field :tags, types[String!]"),
            "field :tags, [String], null: true"
        );
        assert_eq!(
            rewrite("argument :ids, !types[!types.ID]"),
            "argument :ids, [ID], required: true"
        );
    }

    #[test]
    fn test_every_declaration_in_unit() {
        let input = concat!(
            "class FooType < Types::BaseObject\n",
            "  field :a, types.Int\n",
            "  field :b, !types.Int\n",
            "  field :a, types.Int\n",
            "end\n",
        );
        let result = run(input);
        assert_eq!(
            result.text,
            concat!(
                "class FooType < Types::BaseObject\n",
                "  field :a, Int, null: true\n",
                "  field :b, Int, null: false\n",
                "  field :a, Int, null: true\n",
                "end\n",
            )
        );
        assert_eq!(result.rewrites, 3);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_unrecognized_shape_skipped() {
        let input = "  field :a, types.Int\n  field :b do\n    resolve ->(o, a, c) { 1 }\n  end\n";
        let result = run(input);
        assert_eq!(
            result.text,
            "  field :a, Int, null: true\n  field :b do\n    resolve ->(o, a, c) { 1 }\n  end\n"
        );
        assert_eq!(result.rewrites, 1);
        assert_eq!(
            result.skipped,
            vec![SkippedDeclaration {
                line: 2,
                text: "field :b do".to_string(),
                reason: SkipReason::UnrecognizedShape,
            }]
        );
    }

    #[test]
    fn test_already_upgraded_skipped() {
        let input = "  field :a, String, null: true\n  argument :b, ID, required: false\n";
        let result = run(input);
        assert_eq!(result.text, input);
        assert_eq!(result.rewrites, 0);
        assert_eq!(result.skipped.len(), 2);
        assert!(result
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::AlreadyUpgraded));
    }

    #[test]
    fn test_flag_text_inside_description_is_not_a_flag() {
        let result = run("  field :x, types.String, \"returns null: when missing\"\n");
        assert_eq!(
            result.text,
            "  field :x, String, \"returns null: when missing\", null: true\n"
        );
        assert!(result.skipped.is_empty());
        assert_eq!(
            rewrite("  argument :id, !types.ID, 'required: always'"),
            "  argument :id, ID, 'required: always', required: true"
        );
    }

    #[test]
    fn test_flag_after_description_still_detected() {
        let result = run("  field :x, String, \"maybe null: here\", null: true\n");
        assert_eq!(result.rewrites, 0);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].reason, SkipReason::AlreadyUpgraded);
    }

    #[test]
    fn test_prose_is_not_a_declaration() {
        let input = "  description 'This field is computed'\n  my_field :x, types.Int\n";
        let result = run(input);
        assert_eq!(result.text, input);
        assert!(result.skipped.is_empty());
    }
}
