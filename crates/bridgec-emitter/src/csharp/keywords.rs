//! C# reserved words.

/// Reserved keywords of C#; contextual keywords (`get`, `value`, ...) are legal identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class", "const",
    "continue", "decimal", "default", "delegate", "do", "double", "else", "enum", "event", "explicit", "extern",
    "false", "finally", "fixed", "float", "for", "foreach", "goto", "if", "implicit", "in", "int", "interface",
    "internal", "is", "lock", "long", "namespace", "new", "null", "object", "operator", "out", "override",
    "params", "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true", "try", "typeof",
    "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

pub fn is_keyword(identifier: &str) -> bool {
    KEYWORDS.contains(&identifier)
}

/// Prefix `@` when `identifier` is a keyword, so it can be used as a name.
pub fn escape_identifier(identifier: &str) -> String {
    if is_keyword(identifier) {
        format!("@{identifier}")
    } else {
        identifier.to_string()
    }
}
