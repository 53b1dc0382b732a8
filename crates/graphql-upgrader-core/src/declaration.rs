//! Transient entities extracted from a source unit while it is rewritten.
//!
//! Nothing here is persisted: each value is built from one pattern match and
//! dropped once its replacement text has been rendered.

use std::fmt;

/// The six type kinds a legacy `<Kind>Type.define` block can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Object,
    InputObject,
    Interface,
    Enum,
    Scalar,
    Union,
}

impl TypeKind {
    pub const ALL: [TypeKind; 6] = [
        TypeKind::Object,
        TypeKind::InputObject,
        TypeKind::Interface,
        TypeKind::Enum,
        TypeKind::Scalar,
        TypeKind::Union,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Object => "Object",
            TypeKind::InputObject => "InputObject",
            TypeKind::Interface => "Interface",
            TypeKind::Enum => "Enum",
            TypeKind::Scalar => "Scalar",
            TypeKind::Union => "Union",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Regex alternation over every kind, e.g. `(?:Object|InputObject|...)`.
    pub(crate) fn alternation() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|kind| kind.as_str()).collect();
        format!("(?:{})", names.join("|"))
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A class-form type header plus its `name` directive, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    /// Full constant path of the class, e.g. `Types::FooType`.
    pub class_name: String,
    pub kind: TypeKind,
    /// Quoted value of the `name` directive, when one is present.
    pub explicit_name: Option<String>,
}

impl TypeDeclaration {
    /// GraphQL name implied by the class name: last path segment with a
    /// trailing `Type` removed (`Types::FooType` -> `Foo`).
    pub fn default_graphql_name(&self) -> &str {
        let last = self.class_name.rsplit("::").next().unwrap_or(&self.class_name);
        last.strip_suffix("Type").unwrap_or(last)
    }

    /// True when the explicit name adds nothing over the class name.
    pub fn name_is_redundant(&self) -> bool {
        self.explicit_name
            .as_deref()
            .is_some_and(|name| name == self.default_graphql_name())
    }
}

/// Keyword a member declaration was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    InputField,
    Argument,
    Connection,
}

/// Output grammar a member is regenerated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberFamily {
    /// `field :x, T, null: <bool>`
    Field,
    /// `argument :x, T, required: <bool>`
    Argument,
}

impl MemberKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "field" => Some(MemberKind::Field),
            "input_field" => Some(MemberKind::InputField),
            "argument" => Some(MemberKind::Argument),
            "connection" => Some(MemberKind::Connection),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            MemberKind::Field => "field",
            MemberKind::InputField => "input_field",
            MemberKind::Argument => "argument",
            MemberKind::Connection => "connection",
        }
    }

    pub fn family(self) -> MemberFamily {
        match self {
            MemberKind::Argument | MemberKind::InputField => MemberFamily::Argument,
            MemberKind::Field | MemberKind::Connection => MemberFamily::Field,
        }
    }
}

impl MemberFamily {
    pub fn keyword(self) -> &'static str {
        match self {
            MemberFamily::Field => "field",
            MemberFamily::Argument => "argument",
        }
    }
}

/// One field, input field, argument or connection, decomposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDeclaration {
    pub kind: MemberKind,
    pub name: String,
    /// Return type already in class syntax (`String`, `[ID]`, `FooType`).
    pub return_type: String,
    /// Declaration opened a `do ... end` block.
    pub is_block_form: bool,
    /// Everything after the return type, without surrounding commas.
    /// Emitted verbatim.
    pub trailing_modifiers: String,
    /// The legacy type carried a non-null marker.
    pub had_bang: bool,
}

impl MemberDeclaration {
    /// Render in class-based syntax with an explicit nullability flag.
    pub fn render(&self) -> String {
        let family = self.kind.family();
        let mut out = format!("{} :{}, {}", family.keyword(), self.name, self.return_type);

        if !self.trailing_modifiers.is_empty() {
            out.push(',');
            out.push_str(&self.trailing_modifiers);
        }

        let flag = match (family, self.had_bang) {
            (MemberFamily::Argument, true) => ", required: true",
            (MemberFamily::Argument, false) => ", required: false",
            (MemberFamily::Field, true) => ", null: false",
            (MemberFamily::Field, false) => ", null: true",
        };
        out.push_str(flag);

        if self.kind == MemberKind::Connection {
            out.push_str(", connection: true");
        }
        if self.is_block_form {
            out.push_str(" do");
        }
        out
    }
}

/// True for a Ruby constant path such as `Foo`, `Types::FooType`.
pub(crate) fn is_constant_path(value: &str) -> bool {
    !value.is_empty()
        && value.split("::").all(|segment| {
            let mut chars = segment.chars();
            chars.next().is_some_and(|c| c.is_ascii_uppercase())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn member(kind: MemberKind, had_bang: bool) -> MemberDeclaration {
        MemberDeclaration {
            kind,
            name: "id".to_string(),
            return_type: "ID".to_string(),
            is_block_form: false,
            trailing_modifiers: String::new(),
            had_bang,
        }
    }

    #[test]
    fn test_family_is_total() {
        assert_eq!(MemberKind::Field.family(), MemberFamily::Field);
        assert_eq!(MemberKind::Connection.family(), MemberFamily::Field);
        assert_eq!(MemberKind::Argument.family(), MemberFamily::Argument);
        assert_eq!(MemberKind::InputField.family(), MemberFamily::Argument);
    }

    #[test]
    fn test_keyword_round_trip() {
        for kind in [
            MemberKind::Field,
            MemberKind::InputField,
            MemberKind::Argument,
            MemberKind::Connection,
        ] {
            assert_eq!(MemberKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(MemberKind::from_keyword("fields"), None);
    }

    #[test]
    fn test_render_nullability_flags() {
        assert_eq!(member(MemberKind::Field, false).render(), "field :id, ID, null: true");
        assert_eq!(member(MemberKind::Field, true).render(), "field :id, ID, null: false");
        assert_eq!(
            member(MemberKind::Argument, false).render(),
            "argument :id, ID, required: false"
        );
        assert_eq!(
            member(MemberKind::InputField, true).render(),
            "argument :id, ID, required: true"
        );
    }

    #[test]
    fn test_render_connection_with_block_and_modifiers() {
        let decl = MemberDeclaration {
            kind: MemberKind::Connection,
            name: "posts".to_string(),
            return_type: "PostType.connection_type".to_string(),
            is_block_form: true,
            trailing_modifiers: " max_page_size: 50".to_string(),
            had_bang: false,
        };
        assert_eq!(
            decl.render(),
            "field :posts, PostType.connection_type, max_page_size: 50, null: true, connection: true do"
        );
    }

    #[test]
    fn test_default_graphql_name() {
        let decl = TypeDeclaration {
            class_name: "Types::Admin::UserType".to_string(),
            kind: TypeKind::Object,
            explicit_name: Some("User".to_string()),
        };
        assert_eq!(decl.default_graphql_name(), "User");
        assert!(decl.name_is_redundant());

        let decl = TypeDeclaration {
            class_name: "Viewer".to_string(),
            kind: TypeKind::Object,
            explicit_name: Some("CurrentUser".to_string()),
        };
        assert_eq!(decl.default_graphql_name(), "Viewer");
        assert!(!decl.name_is_redundant());
    }

    #[test]
    fn test_type_kind_lookup() {
        assert_eq!(TypeKind::from_name("InputObject"), Some(TypeKind::InputObject));
        assert_eq!(TypeKind::from_name("List"), None);
        assert_eq!(
            TypeKind::alternation(),
            "(?:Object|InputObject|Interface|Enum|Scalar|Union)"
        );
    }

    #[test]
    fn test_is_constant_path() {
        assert!(is_constant_path("Types::FooType"));
        assert!(is_constant_path("ID"));
        assert!(!is_constant_path("types.String"));
        assert!(!is_constant_path("Types::"));
        assert!(!is_constant_path("-> { Foo }"));
    }
}
