//! Binding identifiers and Objective-C export names.
//!
//! Export names are part of the interop ABI and must stay stable:
//!
//! | Declaration | Export name |
//! |-------------|-------------|
//! | function `load(id, force)` | `loadId:force:` |
//! | constructor `(name, age)` | `initWithName:age:` |
//! | constructor `()` | `init` |
//! | property `description` | `description_` |
//! | function `initialize()` | `doInitialize` |
//! | enum entry `OPTION_3` | `option3` |
//!
//! Reserved-word rewriting applies to the bare name only, never to the
//! parameter suffix.

use crate::csharp::ClassName;
use crate::options::GeneratorOptions;
use bridgec_common::BindingResult;
use bridgec_model::{DeclId, Declaration, DeclarationOracle, FunctionDecl};
use std::path::Path;

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Objective-C selector base for a declaration, after reserved-word rewriting.
pub fn objc_name(decl: &Declaration) -> String {
    let name = decl.name.as_str();
    let lowercase = name.to_lowercase();
    if lowercase == "default" && !decl.is_function_or_property() {
        format!("{name}_")
    } else if lowercase == "description" {
        format!("{name}_")
    } else if lowercase.starts_with("init") {
        format!("do{}", capitalize(name))
    } else {
        name.to_string()
    }
}

/// Export name of a function or constructor: base name plus `param:` per parameter.
pub fn export_name(decl: &Declaration, function: &FunctionDecl) -> String {
    let base = if function.is_constructor {
        if function.parameters.is_empty() { "init".to_string() } else { "initWith".to_string() }
    } else {
        objc_name(decl)
    };
    let suffix: String = function
        .parameters
        .iter()
        .map(|param| format!("{}:", param.name))
        .collect();
    base + &capitalize(&suffix)
}

/// Export name of the accessor returning a singleton object.
pub fn object_accessor_export_name(decl: &Declaration) -> String {
    decapitalize(&objc_name(decl))
}

/// Export name of an enum entry: `UPPER_SNAKE` and `Mixed` become `lowerCamel`.
///
/// A single underscore upper-cases the next character; a doubled underscore
/// keeps one literal `_`; a trailing underscore is kept.
pub fn enum_entry_export_name(decl: &Declaration) -> String {
    let mut text = String::new();
    let mut upper = false;
    for c in objc_name(decl).to_lowercase().chars() {
        if c == '_' {
            if upper {
                text.push('_');
            }
            upper = true;
        } else if upper {
            text.extend(c.to_uppercase());
            upper = false;
        } else {
            text.push(c);
        }
    }
    if upper {
        text.push('_');
    }
    text
}

/// Container name for top-level members of `file`: `E2ETest.kt` becomes `E2ETestKt`.
pub fn file_container_name(file: &str) -> String {
    let file_name = Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file);
    let mut out = String::with_capacity(file_name.len());
    let mut upper = false;
    for c in file_name.chars() {
        if c == '.' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    capitalize(&out)
}

// =============================================================================
// BindingNames
// =============================================================================

/// Naming context derived from [`GeneratorOptions`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingNames {
    pub prefix: String,
    pub namespace: String,
}

impl BindingNames {
    pub fn new(prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            namespace: namespace.into(),
        }
    }

    pub fn from_options(options: &GeneratorOptions) -> Self {
        Self::new(options.binding_prefix.clone(), options.binding_namespace.clone())
    }

    /// `<prefix><suffix>`, e.g. `SharedKotlinUnit`.
    pub fn prefixed(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.prefix)
    }

    /// Non-nullable class name in the binding namespace.
    pub fn class_name(&self, simple_name: impl Into<String>) -> ClassName {
        ClassName::new(self.namespace.clone(), simple_name)
    }

    /// The universal root object type.
    pub fn base(&self) -> ClassName {
        self.class_name(self.prefixed("Base"))
    }

    pub fn unit(&self) -> ClassName {
        self.class_name(self.prefixed("KotlinUnit"))
    }

    /// Binding identifier: prefix plus the capitalized names of every
    /// enclosing declaration and the declaration itself.
    pub fn identifier(&self, oracle: &impl DeclarationOracle, id: DeclId) -> BindingResult<String> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let decl = oracle.get(id)?;
            chain.push(capitalize(&decl.name));
            current = decl.parent;
        }
        chain.reverse();
        Ok(self.prefix.clone() + &chain.concat())
    }

    pub fn file_container(&self, file: &str) -> String {
        self.prefixed(&file_container_name(file))
    }
}

#[cfg(test)]
#[path = "tests/naming_tests.rs"]
mod tests;
