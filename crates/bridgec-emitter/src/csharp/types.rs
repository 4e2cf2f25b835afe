//! Target-side type names.
//!
//! A [`TargetType`] is either a plain class-shaped name or a parameterized
//! one. Bridge attributes (`NullAllowed`, `BindAs`) ride on the class-shaped
//! name; for a parameterized type they live on the raw type.

pub const SYSTEM_NAMESPACE: &str = "System";
pub const FOUNDATION_NAMESPACE: &str = "Foundation";
pub const OBJC_RUNTIME_NAMESPACE: &str = "ObjCRuntime";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassName {
    pub simple_name: String,
    /// Dotted namespace; empty for keywords and local aliases.
    pub namespace: String,
    pub nullable: bool,
    pub attributes: Vec<String>,
}

impl ClassName {
    pub fn new(namespace: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            simple_name: simple_name.into(),
            namespace: namespace.into(),
            nullable: false,
            attributes: Vec::new(),
        }
    }

    /// A C# keyword type such as `int` or `string`.
    pub fn keyword(name: &str) -> Self {
        Self::new("", name)
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Same namespace and simple name, ignoring nullability and attributes.
    pub fn same_name(&self, other: &ClassName) -> bool {
        self.simple_name == other.simple_name && self.namespace == other.namespace
    }

    fn write_name(&self, out: &mut String) {
        if !self.namespace.is_empty() {
            out.push_str(&self.namespace);
            out.push('.');
        }
        out.push_str(&self.simple_name);
    }
}

// =============================================================================
// Well-known target names
// =============================================================================

pub fn ns_number() -> ClassName {
    ClassName::new(FOUNDATION_NAMESPACE, "NSNumber")
}

pub fn ns_string() -> ClassName {
    ClassName::new(FOUNDATION_NAMESPACE, "NSString")
}

pub fn ns_object() -> ClassName {
    ClassName::new(FOUNDATION_NAMESPACE, "NSObject")
}

pub fn ns_array() -> ClassName {
    ClassName::new(FOUNDATION_NAMESPACE, "NSArray")
}

pub fn ns_dictionary() -> ClassName {
    ClassName::new(FOUNDATION_NAMESPACE, "NSDictionary")
}

/// Placeholder raw type for native arrays; rendered as `T[]`.
pub fn system_array() -> ClassName {
    ClassName::new(SYSTEM_NAMESPACE, "Array")
}

pub fn system_func() -> ClassName {
    ClassName::new(SYSTEM_NAMESPACE, "Func")
}

pub fn system_action() -> ClassName {
    ClassName::new(SYSTEM_NAMESPACE, "Action")
}

pub fn native_object() -> ClassName {
    ClassName::new(OBJC_RUNTIME_NAMESPACE, "INativeObject")
}

pub fn native_handle() -> ClassName {
    ClassName::new(OBJC_RUNTIME_NAMESPACE, "NativeHandle")
}

// =============================================================================
// TargetType
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TargetType {
    Class(ClassName),
    Parameterized { raw: ClassName, arguments: Vec<TargetType> },
}

impl From<ClassName> for TargetType {
    fn from(name: ClassName) -> Self {
        TargetType::Class(name)
    }
}

impl TargetType {
    pub fn parameterized(raw: ClassName, arguments: Vec<TargetType>) -> Self {
        TargetType::Parameterized { raw, arguments }
    }

    /// The class-shaped part: the name itself or the raw type.
    pub fn head(&self) -> &ClassName {
        match self {
            TargetType::Class(name) => name,
            TargetType::Parameterized { raw, .. } => raw,
        }
    }

    pub fn head_mut(&mut self) -> &mut ClassName {
        match self {
            TargetType::Class(name) => name,
            TargetType::Parameterized { raw, .. } => raw,
        }
    }

    pub fn attributes(&self) -> &[String] {
        &self.head().attributes
    }

    pub fn is_nullable(&self) -> bool {
        self.head().nullable
    }

    pub fn arguments(&self) -> &[TargetType] {
        match self {
            TargetType::Class(_) => &[],
            TargetType::Parameterized { arguments, .. } => arguments,
        }
    }

    pub fn is_array(&self) -> bool {
        match self {
            TargetType::Parameterized { raw, arguments } => {
                arguments.len() == 1 && (raw.same_name(&ns_array()) || raw.same_name(&system_array()))
            }
            TargetType::Class(_) => false,
        }
    }

    /// Render as C# source, optionally prefixed with its attribute group.
    pub fn render(&self, with_attributes: bool) -> String {
        let mut out = String::new();
        self.write_to(&mut out, with_attributes);
        out
    }

    pub fn write_to(&self, out: &mut String, with_attributes: bool) {
        if with_attributes && !self.attributes().is_empty() {
            out.push_str(&attribute_list(self.attributes()));
            out.push(' ');
        }
        match self {
            TargetType::Class(name) => {
                name.write_name(out);
                if name.nullable {
                    out.push('?');
                }
            }
            TargetType::Parameterized { arguments, .. } if self.is_array() => {
                // Array nullability is carried by `NullAllowed`, never by `[]?`.
                arguments[0].write_to(out, false);
                out.push_str("[]");
            }
            TargetType::Parameterized { raw, arguments } => {
                raw.write_name(out);
                if !arguments.is_empty() {
                    out.push('<');
                    for (index, argument) in arguments.iter().enumerate() {
                        if index > 0 {
                            out.push_str(", ");
                        }
                        argument.write_to(out, false);
                    }
                    out.push('>');
                }
                if raw.nullable {
                    out.push('?');
                }
            }
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// `[A, B]`, or the empty string for no attributes.
pub fn attribute_list(attributes: &[String]) -> String {
    if attributes.is_empty() {
        return String::new();
    }
    let mut out = String::from("[");
    for (index, attribute) in attributes.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(attribute);
    }
    out.push(']');
    out
}

#[cfg(test)]
#[path = "../tests/csharp_types_tests.rs"]
mod tests;
