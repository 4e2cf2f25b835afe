//! Declarations and declaration identifiers.
//!
//! A [`Declaration`] is one named entity reported by the host compiler:
//! a class-like type, a type alias, a function or constructor, a property,
//! or a generic type parameter. Declarations live in a store owned by the
//! oracle and are addressed by [`DeclId`]; the pipeline only ever borrows
//! them for the duration of one invocation.
//!
//! ## Kinds
//!
//! | Source construct | `DeclKind` | `ClassKind` |
//! |------------------|------------|-------------|
//! | `class Foo` / `data class Foo` | `Class` | `Class` |
//! | `sealed class Root` (tagged-union root) | `Class` + `SEALED` | `Class` |
//! | `sealed interface Root` | `Class` + `SEALED` | `Interface` |
//! | `object Option3 : Root()` (singleton variant) | `Class` | `Object` |
//! | `enum class Mode` | `Class` | `EnumClass` |
//! | `Mode.OPTION_1` | `Class` | `EnumEntry` |
//! | `typealias Alias = Concrete<T>` | `TypeAlias` | |
//! | `fun foo()` / constructors | `Function` | |
//! | `val bar` / `var bar` | `Property` | |
//! | `<T : Bound>` | `TypeParameter` | |

use crate::types::TypeRef;
use bitflags::bitflags;
use bridgec_common::Location;
use std::fmt;

// =============================================================================
// DeclId - Declaration Identifier
// =============================================================================

/// Identifier of a declaration inside a [`DeclarationOracle`](crate::DeclarationOracle).
///
/// `DeclId::INVALID` doubles as the host compiler's "error type": a type
/// reference pointing at it failed to resolve.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u32);

impl DeclId {
    /// Sentinel value for an unresolved declaration.
    pub const INVALID: Self = Self(0);

    /// First valid `DeclId`.
    pub const FIRST_VALID: u32 = 1;

    /// Check if this `DeclId` is valid.
    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Modifiers and origin
// =============================================================================

bitflags! {
    /// Source modifiers relevant to binding generation.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u16 {
        const INTERNAL = 1 << 0;
        const PRIVATE = 1 << 1;
        const SEALED = 1 << 2;
        const DATA = 1 << 3;
        const COMPANION = 1 << 4;
        const SUSPEND = 1 << 5;
    }
}

impl Modifiers {
    /// Parse a modifier keyword as written in source.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "internal" => Some(Self::INTERNAL),
            "private" => Some(Self::PRIVATE),
            "sealed" => Some(Self::SEALED),
            "data" => Some(Self::DATA),
            "companion" => Some(Self::COMPANION),
            "suspend" => Some(Self::SUSPEND),
            _ => None,
        }
    }
}

/// Where a declaration was authored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Authored in the project being compiled.
    #[default]
    Source,
    /// Provided by the platform, the runtime or a dependency.
    Library,
}

// =============================================================================
// Declaration kinds
// =============================================================================

/// Flavor of a class-like declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Object,
    EnumClass,
    EnumEntry,
    Annotation,
}

impl ClassKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Object => "object",
            ClassKind::EnumClass => "enum class",
            ClassKind::EnumEntry => "enum entry",
            ClassKind::Annotation => "annotation class",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDecl {
    pub class_kind: ClassKind,
    /// Declared super-types, in source order.
    pub super_types: Vec<TypeRef>,
    /// Declared members: constructors, functions, properties, nested classes.
    pub members: Vec<DeclId>,
    pub type_parameters: Vec<DeclId>,
    pub primary_constructor: Option<DeclId>,
    /// Variants of a sealed root.
    pub sealed_subclasses: Vec<DeclId>,
}

impl ClassDecl {
    pub fn new(class_kind: ClassKind) -> Self {
        Self {
            class_kind,
            super_types: Vec::new(),
            members: Vec::new(),
            type_parameters: Vec::new(),
            primary_constructor: None,
            sealed_subclasses: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAliasDecl {
    pub target: TypeRef,
    pub type_parameters: Vec<DeclId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDecl {
    pub is_constructor: bool,
    pub parameters: Vec<Parameter>,
    /// `None` when the host compiler could not resolve the return type.
    pub return_type: Option<TypeRef>,
    pub type_parameters: Vec<DeclId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDecl {
    pub ty: TypeRef,
    pub mutable: bool,
    pub type_parameters: Vec<DeclId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParameterDecl {
    /// Upper bounds in declaration order. Only the first one is used for mapping.
    pub bounds: Vec<TypeRef>,
}

/// Closed set of declaration kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Class(ClassDecl),
    TypeAlias(TypeAliasDecl),
    Function(FunctionDecl),
    Property(PropertyDecl),
    TypeParameter(TypeParameterDecl),
}

impl DeclKind {
    /// Human-readable kind name for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            DeclKind::Class(class) => class.class_kind.as_str(),
            DeclKind::TypeAlias(_) => "type alias",
            DeclKind::Function(function) if function.is_constructor => "constructor",
            DeclKind::Function(_) => "function",
            DeclKind::Property(_) => "property",
            DeclKind::TypeParameter(_) => "type parameter",
        }
    }
}

// =============================================================================
// Declaration
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub id: DeclId,
    /// Simple name as written in source.
    pub name: String,
    /// Dotted path; `None` for local or anonymous declarations.
    pub qualified_name: Option<String>,
    pub package: String,
    pub kind: DeclKind,
    pub modifiers: Modifiers,
    /// Qualified names of the annotations attached to the declaration.
    pub annotations: Vec<String>,
    pub origin: Origin,
    pub parent: Option<DeclId>,
    /// File name of the originating source file.
    pub containing_file: Option<String>,
    pub location: Location,
}

impl Declaration {
    fn with_kind(name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            id: DeclId::INVALID,
            name: name.into(),
            qualified_name: None,
            package: String::new(),
            kind,
            modifiers: Modifiers::empty(),
            annotations: Vec::new(),
            origin: Origin::Source,
            parent: None,
            containing_file: None,
            location: Location::unknown(),
        }
    }

    /// A top-level declaration named by its dotted path.
    fn top_level(qualified_name: &str, kind: DeclKind) -> Self {
        let (package, name) = match qualified_name.rsplit_once('.') {
            Some((package, name)) => (package, name),
            None => ("", qualified_name),
        };
        let mut decl = Self::with_kind(name, kind);
        decl.package = package.to_string();
        decl.qualified_name = Some(qualified_name.to_string());
        decl
    }

    pub fn class(qualified_name: &str, class_kind: ClassKind) -> Self {
        Self::top_level(qualified_name, DeclKind::Class(ClassDecl::new(class_kind)))
    }

    pub fn type_alias(qualified_name: &str, target: TypeRef) -> Self {
        Self::top_level(
            qualified_name,
            DeclKind::TypeAlias(TypeAliasDecl {
                target,
                type_parameters: Vec::new(),
            }),
        )
    }

    /// A top-level function.
    pub fn top_level_function(
        qualified_name: &str,
        parameters: Vec<Parameter>,
        return_type: TypeRef,
    ) -> Self {
        Self::top_level(
            qualified_name,
            DeclKind::Function(FunctionDecl {
                is_constructor: false,
                parameters,
                return_type: Some(return_type),
                type_parameters: Vec::new(),
            }),
        )
    }

    /// A top-level property.
    pub fn top_level_property(qualified_name: &str, ty: TypeRef, mutable: bool) -> Self {
        Self::top_level(
            qualified_name,
            DeclKind::Property(PropertyDecl {
                ty,
                mutable,
                type_parameters: Vec::new(),
            }),
        )
    }

    /// A member function; attach it with [`DeclarationGraph::add_member`](crate::DeclarationGraph::add_member).
    pub fn function(name: &str, parameters: Vec<Parameter>, return_type: TypeRef) -> Self {
        Self::with_kind(
            name,
            DeclKind::Function(FunctionDecl {
                is_constructor: false,
                parameters,
                return_type: Some(return_type),
                type_parameters: Vec::new(),
            }),
        )
    }

    pub fn constructor(parameters: Vec<Parameter>) -> Self {
        Self::with_kind(
            "<init>",
            DeclKind::Function(FunctionDecl {
                is_constructor: true,
                parameters,
                return_type: None,
                type_parameters: Vec::new(),
            }),
        )
    }

    pub fn property(name: &str, ty: TypeRef, mutable: bool) -> Self {
        Self::with_kind(
            name,
            DeclKind::Property(PropertyDecl {
                ty,
                mutable,
                type_parameters: Vec::new(),
            }),
        )
    }

    /// A nested class-like member (companion, enum entry, inner class).
    pub fn nested_class(name: &str, class_kind: ClassKind) -> Self {
        Self::with_kind(name, DeclKind::Class(ClassDecl::new(class_kind)))
    }

    pub fn type_parameter(name: &str, bounds: Vec<TypeRef>) -> Self {
        Self::with_kind(name, DeclKind::TypeParameter(TypeParameterDecl { bounds }))
    }

    // -------------------------------------------------------------------------
    // Chained setters
    // -------------------------------------------------------------------------

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    pub fn annotated(mut self, annotation: &str) -> Self {
        self.annotations.push(annotation.to_string());
        self
    }

    pub fn in_file(mut self, file: &str) -> Self {
        self.containing_file = Some(file.to_string());
        self
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn library(mut self) -> Self {
        self.origin = Origin::Library;
        self
    }

    pub fn with_super_types(mut self, super_types: Vec<TypeRef>) -> Self {
        if let DeclKind::Class(class) = &mut self.kind {
            class.super_types = super_types;
        }
        self
    }

    pub fn without_qualified_name(mut self) -> Self {
        self.qualified_name = None;
        self
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Qualified name when present, otherwise the simple name.
    pub fn display_name(&self) -> &str {
        self.qualified_name.as_deref().unwrap_or(&self.name)
    }

    pub fn has_annotation(&self, annotation: &str) -> bool {
        self.annotations.iter().any(|a| a == annotation)
    }

    pub fn as_class(&self) -> Option<&ClassDecl> {
        match &self.kind {
            DeclKind::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDecl> {
        match &self.kind {
            DeclKind::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn class_kind(&self) -> Option<ClassKind> {
        self.as_class().map(|class| class.class_kind)
    }

    pub fn is_constructor(&self) -> bool {
        matches!(&self.kind, DeclKind::Function(f) if f.is_constructor)
    }

    pub fn is_function_or_property(&self) -> bool {
        matches!(self.kind, DeclKind::Function(_) | DeclKind::Property(_))
    }

    pub fn is_companion(&self) -> bool {
        self.class_kind() == Some(ClassKind::Object) && self.modifiers.contains(Modifiers::COMPANION)
    }
}
