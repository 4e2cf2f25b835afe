//! Declaration-level IR for the generated API definition file.
//!
//! The emitter builds these values; [`CSharpPrinter`](super::CSharpPrinter)
//! turns them into text. Nothing here knows about source declarations.

use super::keywords::escape_identifier;
use super::types::{TargetType, attribute_list, native_handle};

/// One bracketed attribute line, e.g. `[Static, Export ("new")]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeList(pub Vec<String>);

impl AttributeList {
    pub fn new<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(attributes.into_iter().map(Into::into).collect())
    }

    pub fn extended(mut self, more: &[String]) -> Self {
        self.0.extend_from_slice(more);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn render(&self) -> String {
        attribute_list(&self.0)
    }
}

/// `Export ("name")`.
pub fn export_attribute(export_name: &str) -> String {
    format!("Export (\"{export_name}\")")
}

/// `BaseType (typeof(Name))`.
pub fn base_type_attribute(base: &str) -> String {
    format!("BaseType (typeof({base}))")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: TargetType,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, ty: TargetType) -> Self {
        Self { name: name.into(), ty }
    }

    /// `[attrs] Type name`, with keyword names escaped.
    pub fn render(&self) -> String {
        format!("{} {}", self.ty.render(true), escape_identifier(&self.name))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberSignature {
    /// `ObjCRuntime.NativeHandle Constructor (params);`
    Constructor { parameters: Vec<ParameterSpec> },
    /// `Type Name ();`, a parameterless static factory or singleton accessor.
    Factory { ty: String, name: String },
    /// `Return Name (params);`
    Method {
        return_type: TargetType,
        name: String,
        parameters: Vec<ParameterSpec>,
    },
    /// `Type Name { get; }` or `{ get; set; }`.
    Property { ty: TargetType, name: String, mutable: bool },
    /// `Type Companion { [Bind ("companion")] get; }`
    Companion { ty: String },
}

impl MemberSignature {
    pub fn render(&self) -> String {
        match self {
            MemberSignature::Constructor { parameters } => {
                let handle = TargetType::from(native_handle());
                format!("{handle} Constructor ({});", render_parameters(parameters))
            }
            MemberSignature::Factory { ty, name } => format!("{ty} {name} ();"),
            MemberSignature::Method {
                return_type,
                name,
                parameters,
            } => format!("{} {name} ({});", return_type.render(false), render_parameters(parameters)),
            MemberSignature::Property { ty, name, mutable } => {
                let accessors = if *mutable { "get; set; " } else { "get; " };
                format!("{} {name} {{ {accessors}}}", ty.render(false))
            }
            MemberSignature::Companion { ty } => format!("{ty} Companion {{ [Bind (\"companion\")] get; }}"),
        }
    }
}

fn render_parameters(parameters: &[ParameterSpec]) -> String {
    parameters
        .iter()
        .map(ParameterSpec::render)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberSpec {
    /// Attribute lines, printed one per line above the signature.
    pub attributes: Vec<AttributeList>,
    pub signature: MemberSignature,
}

impl MemberSpec {
    pub fn new(attributes: AttributeList, signature: MemberSignature) -> Self {
        Self {
            attributes: vec![attributes],
            signature,
        }
    }

    pub fn with_attribute_lines(attributes: Vec<AttributeList>, signature: MemberSignature) -> Self {
        Self { attributes, signature }
    }
}

/// Blank-line policy between members of one interface body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyLayout {
    #[default]
    Spaced,
    Compact,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceDeclarationSpec {
    pub attributes: AttributeList,
    pub identifier: String,
    /// Rendered without attributes after `:`.
    pub interfaces: Vec<TargetType>,
    pub members: Vec<MemberSpec>,
    pub layout: BodyLayout,
}

impl InterfaceDeclarationSpec {
    pub fn new(attributes: AttributeList, identifier: impl Into<String>) -> Self {
        Self {
            attributes,
            identifier: identifier.into(),
            interfaces: Vec::new(),
            members: Vec::new(),
            layout: BodyLayout::Spaced,
        }
    }

    pub fn implementing(mut self, interface: TargetType) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn compact(mut self) -> Self {
        self.layout = BodyLayout::Compact;
        self
    }

    pub fn push(&mut self, member: MemberSpec) {
        self.members.push(member);
    }
}

/// `using Identifier = Target;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasUsingDirectiveSpec {
    pub identifier: String,
    pub target: TargetType,
}

/// A namespace block: alias directives first, then interface declarations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceSpec {
    pub name: String,
    pub aliases: Vec<AliasUsingDirectiveSpec>,
    pub interfaces: Vec<InterfaceDeclarationSpec>,
}

impl NamespaceSpec {
    pub fn builder(name: impl Into<String>) -> NamespaceSpecBuilder {
        NamespaceSpecBuilder {
            spec: NamespaceSpec {
                name: name.into(),
                ..NamespaceSpec::default()
            },
        }
    }

    pub fn interface(&self, identifier: &str) -> Option<&InterfaceDeclarationSpec> {
        self.interfaces.iter().find(|spec| spec.identifier == identifier)
    }

    pub fn alias(&self, identifier: &str) -> Option<&AliasUsingDirectiveSpec> {
        self.aliases.iter().find(|spec| spec.identifier == identifier)
    }
}

pub struct NamespaceSpecBuilder {
    spec: NamespaceSpec,
}

impl NamespaceSpecBuilder {
    pub fn add_alias(&mut self, alias: AliasUsingDirectiveSpec) -> &mut Self {
        self.spec.aliases.push(alias);
        self
    }

    pub fn add_interface(&mut self, interface: InterfaceDeclarationSpec) -> &mut Self {
        self.spec.interfaces.push(interface);
        self
    }

    pub fn build(self) -> NamespaceSpec {
        self.spec
    }
}
