//! Name transforms from kebab-case spec names to Rust identifiers and
//! protocol constant paths.

use heck::{ToSnakeCase, ToUpperCamelCase};
use std::fmt;

/// Single-shot request or set-wide enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Do,
    Dump,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Do, Variant::Dump];

    /// Prefix of generated type names.
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Do => "Do",
            Variant::Dump => "Dump",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which half of an exchange a record type carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Request,
    Reply,
}

impl Direction {
    /// Suffix of generated type names.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Request => "Request",
            Direction::Reply => "Reply",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `"family-id"` (or `"family id"`) to `"FamilyId"`.
pub fn type_ident(name: &str) -> String {
    name.to_upper_camel_case()
}

/// `"family-id"` to `"family_id"`; keywords come back raw (`r#type`).
pub fn field_ident(name: &str) -> String {
    let snake = name.to_snake_case();
    match snake.as_str() {
        // Not allowed as raw identifiers.
        "self" | "Self" | "super" | "crate" | "_" => format!("{}_", snake),
        s if is_keyword(s) => format!("r#{}", s),
        s if s.starts_with(|c: char| c.is_ascii_digit()) => format!("_{}", s),
        _ => snake,
    }
}

/// `DoGetfamily`, the stem shared by the request and reply type names.
pub fn operation_ident(variant: Variant, op: &str) -> String {
    format!("{}{}", variant, type_ident(op))
}

/// `DoGetfamilyRequest` / `DumpGetfamilyReply`.
pub fn record_ident(variant: Variant, op: &str, direction: Direction) -> String {
    format!("{}{}", operation_ident(variant, op), direction)
}

/// `do_getfamily` / `dump_getfamily`.
pub fn method_ident(variant: Variant, op: &str) -> String {
    operation_ident(variant, op).to_snake_case()
}

/// `("ctrl-attr-", "family-id")` to `"CTRL_ATTR_FAMILY_ID"`.
pub fn constant_name(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name).replace('-', "_").to_uppercase()
}

/// Fully qualified constant reference inside the `namespace` module,
/// e.g. `libc::CTRL_ATTR_FAMILY_ID`.
pub fn constant_path(namespace: &str, prefix: &str, name: &str) -> String {
    let constant = constant_name(prefix, name);
    if namespace.is_empty() {
        constant
    } else {
        format!("{}::{}", namespace, constant)
    }
}

fn is_keyword(s: &str) -> bool {
    matches!(
        s,
        "as" | "break"
            | "const"
            | "continue"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "static"
            | "struct"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "async"
            | "await"
            | "dyn"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "macro"
            | "override"
            | "priv"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
            | "try"
            | "gen"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_ident_from_kebab_and_spaces() {
        assert_eq!(type_ident("family-id"), "FamilyId");
        assert_eq!(type_ident("family id"), "FamilyId");
        assert_eq!(type_ident("getfamily"), "Getfamily");
        assert_eq!(type_ident("newmcast-grp"), "NewmcastGrp");
    }

    #[test]
    fn field_ident_escapes_keywords() {
        assert_eq!(field_ident("family-name"), "family_name");
        assert_eq!(field_ident("type"), "r#type");
        assert_eq!(field_ident("do"), "r#do");
        assert_eq!(field_ident("dump"), "dump");
        assert_eq!(field_ident("self"), "self_");
    }

    #[test]
    fn record_and_method_names() {
        assert_eq!(
            record_ident(Variant::Do, "getfamily", Direction::Request),
            "DoGetfamilyRequest"
        );
        assert_eq!(
            record_ident(Variant::Dump, "getpolicy", Direction::Reply),
            "DumpGetpolicyReply"
        );
        assert_eq!(method_ident(Variant::Do, "getfamily"), "do_getfamily");
        assert_eq!(method_ident(Variant::Dump, "strset-get"), "dump_strset_get");
    }

    #[test]
    fn constants() {
        assert_eq!(constant_name("ctrl-attr-", "family-id"), "CTRL_ATTR_FAMILY_ID");
        assert_eq!(constant_name("ctrl-cmd-", "getpolicy"), "CTRL_CMD_GETPOLICY");
        assert_eq!(
            constant_path("libc", "ctrl-attr-", "family-id"),
            "libc::CTRL_ATTR_FAMILY_ID"
        );
        assert_eq!(constant_path("", "ctrl-cmd-", "getfamily"), "CTRL_CMD_GETFAMILY");
    }

    #[test]
    fn variant_and_direction_names() {
        assert_eq!(Variant::Do.to_string(), "Do");
        assert_eq!(Variant::Dump.to_string(), "Dump");
        assert_eq!(Direction::Request.to_string(), "Request");
        assert_eq!(Direction::Reply.to_string(), "Reply");
    }
}
