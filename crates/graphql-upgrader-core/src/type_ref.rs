//! Legacy type expressions (`types.String`, `!types[types.ID]`, ...).
//!
//! The legacy DSL marks non-null with a `!`, either prefix (`!types.ID`) or
//! postfix (`types.ID!`), and builds lists with `types[...]`. Class-based
//! declarations instead carry the outer nullability as a keyword flag and
//! treat list elements as non-null unless they say `null: true`.

use crate::declaration::is_constant_path;

/// A parsed legacy type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named { name: String, non_null: bool },
    List { of: Box<TypeRef>, non_null: bool },
}

impl TypeRef {
    /// Parse a legacy type expression. Returns `None` for anything outside
    /// the `types.X` / `types[...]` / constant grammar (lambdas, method
    /// calls such as `FooType.connection_type`, ...).
    pub fn parse(expr: &str) -> Option<TypeRef> {
        let expr = expr.trim();
        let (prefix_bang, expr) = match expr.strip_prefix('!') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, expr),
        };
        let (expr, postfix_bang) = match expr.strip_suffix('!') {
            Some(rest) => (rest.trim_end(), true),
            None => (expr, false),
        };
        let non_null = prefix_bang || postfix_bang;

        let list_body = expr
            .strip_prefix("types[")
            .or_else(|| expr.strip_prefix('['))
            .and_then(|rest| rest.strip_suffix(']'));
        if let Some(inner) = list_body {
            let of = TypeRef::parse(inner)?;
            return Some(TypeRef::List {
                of: Box::new(of),
                non_null,
            });
        }

        let name = expr.strip_prefix("types.").unwrap_or(expr);
        is_constant_path(name).then(|| TypeRef::Named {
            name: name.to_string(),
            non_null,
        })
    }

    pub fn is_non_null(&self) -> bool {
        match self {
            TypeRef::Named { non_null, .. } | TypeRef::List { non_null, .. } => *non_null,
        }
    }

    /// Class-based type argument. Outer nullability is not included; it
    /// becomes the declaration's `null:` / `required:` flag.
    pub fn to_class_syntax(&self) -> String {
        match self {
            TypeRef::Named { name, .. } => name.clone(),
            TypeRef::List { of, .. } => {
                if of.is_non_null() {
                    format!("[{}]", of.to_class_syntax())
                } else {
                    format!("[{}, null: true]", of.to_class_syntax())
                }
            }
        }
    }
}

/// Textual fallback for expressions `TypeRef::parse` rejects: drop every
/// non-null marker, the `types.` prefix and stray commas. Returns the
/// cleaned text and whether a marker was present.
pub fn strip_legacy_markers(expr: &str) -> (String, bool) {
    let had_bang = expr.contains('!');
    let cleaned = expr
        .replace('!', "")
        .replace("types.", "")
        .replace("types[", "[")
        .replace(',', "");
    (cleaned, had_bang)
}
