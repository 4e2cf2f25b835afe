//! JSON declaration-graph loader.
//!
//! The host integration serializes its view of the source model into one
//! JSON document; this module turns it into a [`DeclarationGraph`] that
//! starts from the builtins.
//!
//! ## Format
//!
//! ```json
//! {
//!   "declarations": [
//!     {
//!       "kind": "class",
//!       "qualifiedName": "com.example.Test",
//!       "classKind": "class",
//!       "modifiers": ["data"],
//!       "annotations": ["bridgec.annotation.Binding"],
//!       "file": "Test.kt",
//!       "superTypes": ["com.example.Base"],
//!       "typeParameters": [{ "name": "T", "bounds": ["kotlin.Any?"] }],
//!       "members": [
//!         { "kind": "constructor", "parameters": [{ "name": "id", "type": "kotlin.Int" }] },
//!         { "kind": "function", "name": "load", "returnType": { "type": "kotlin.collections.List", "arguments": ["T"] } },
//!         { "kind": "property", "name": "label", "type": "kotlin.String?", "mutable": true }
//!       ]
//!     },
//!     { "kind": "typeAlias", "qualifiedName": "com.example.Ids", "target": "kotlin.collections.List<kotlin.Int>" }
//!   ]
//! }
//! ```
//!
//! Type references are either a string (`"kotlin.Int?"`, `"*"`, or a
//! generic spelled inline as `"kotlin.collections.Map<kotlin.String, T>"`)
//! or an object with `type`, `nullable` and `arguments`. Names are resolved
//! against the enclosing type parameters first, then by qualified name.
//! Unknown names load as the error type so the collector reports them.
//!
//! Variants of a sealed root are derived from super-types; `sealedSubclasses`
//! can list additional ones explicitly.

use crate::decl::{ClassKind, DeclId, DeclKind, Declaration, Modifiers, Parameter};
use crate::graph::DeclarationGraph;
use crate::names;
use crate::oracle::DeclarationOracle;
use crate::types::{TypeArg, TypeRef};
use bridgec_common::Location;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read declaration graph {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid declaration graph JSON")]
    Json(#[from] serde_json::Error),

    #[error("Declaration #{index} has neither a name nor a qualified name")]
    MissingName { index: usize },

    #[error("Unknown modifier '{modifier}' on '{declaration}'")]
    UnknownModifier { modifier: String, declaration: String },

    #[error("Malformed type reference '{text}'")]
    MalformedType { text: String },

    #[error("Unknown sealed subclass '{name}' of '{declaration}'")]
    UnknownSealedSubclass { name: String, declaration: String },
}

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphRecord {
    #[serde(default)]
    declarations: Vec<DeclarationRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommonRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    qualified_name: Option<String>,
    #[serde(default)]
    modifiers: Vec<String>,
    #[serde(default)]
    annotations: Vec<String>,
    #[serde(default)]
    library: bool,
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    location: Option<Location>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum DeclarationRecord {
    Class(ClassRecord),
    TypeAlias(TypeAliasRecord),
    Function(FunctionRecord),
    Constructor(FunctionRecord),
    Property(PropertyRecord),
}

impl DeclarationRecord {
    fn common(&self) -> &CommonRecord {
        match self {
            DeclarationRecord::Class(r) => &r.common,
            DeclarationRecord::TypeAlias(r) => &r.common,
            DeclarationRecord::Function(r) | DeclarationRecord::Constructor(r) => &r.common,
            DeclarationRecord::Property(r) => &r.common,
        }
    }

    fn type_parameters(&self) -> &[TypeParameterRecord] {
        match self {
            DeclarationRecord::Class(r) => &r.type_parameters,
            DeclarationRecord::TypeAlias(r) => &r.type_parameters,
            DeclarationRecord::Function(r) | DeclarationRecord::Constructor(r) => &r.type_parameters,
            DeclarationRecord::Property(r) => &r.type_parameters,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
enum ClassKindRecord {
    #[default]
    Class,
    Interface,
    Object,
    EnumClass,
    EnumEntry,
    Annotation,
}

impl From<ClassKindRecord> for ClassKind {
    fn from(kind: ClassKindRecord) -> Self {
        match kind {
            ClassKindRecord::Class => ClassKind::Class,
            ClassKindRecord::Interface => ClassKind::Interface,
            ClassKindRecord::Object => ClassKind::Object,
            ClassKindRecord::EnumClass => ClassKind::EnumClass,
            ClassKindRecord::EnumEntry => ClassKind::EnumEntry,
            ClassKindRecord::Annotation => ClassKind::Annotation,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassRecord {
    #[serde(flatten)]
    common: CommonRecord,
    #[serde(default)]
    class_kind: ClassKindRecord,
    #[serde(default)]
    super_types: Vec<TypeRefRecord>,
    #[serde(default)]
    type_parameters: Vec<TypeParameterRecord>,
    #[serde(default)]
    members: Vec<DeclarationRecord>,
    #[serde(default)]
    sealed_subclasses: Vec<String>,
    /// Enum entry shorthand.
    #[serde(default)]
    entries: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypeAliasRecord {
    #[serde(flatten)]
    common: CommonRecord,
    target: TypeRefRecord,
    #[serde(default)]
    type_parameters: Vec<TypeParameterRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FunctionRecord {
    #[serde(flatten)]
    common: CommonRecord,
    #[serde(default)]
    parameters: Vec<ParameterRecord>,
    #[serde(default)]
    return_type: Option<TypeRefRecord>,
    #[serde(default)]
    type_parameters: Vec<TypeParameterRecord>,
    /// Constructors only; `false` marks a secondary constructor.
    #[serde(default)]
    primary: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertyRecord {
    #[serde(flatten)]
    common: CommonRecord,
    #[serde(rename = "type")]
    ty: TypeRefRecord,
    #[serde(default)]
    mutable: bool,
    #[serde(default)]
    type_parameters: Vec<TypeParameterRecord>,
}

#[derive(Debug, Deserialize)]
struct TypeParameterRecord {
    name: String,
    #[serde(default)]
    bounds: Vec<TypeRefRecord>,
}

#[derive(Debug, Deserialize)]
struct ParameterRecord {
    name: String,
    #[serde(rename = "type")]
    ty: TypeRefRecord,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TypeRefRecord {
    Text(String),
    Full {
        #[serde(rename = "type")]
        name: String,
        #[serde(default)]
        nullable: bool,
        #[serde(default)]
        arguments: Vec<TypeRefRecord>,
    },
}

// =============================================================================
// Loading
// =============================================================================

/// Load a declaration graph from a JSON file.
pub fn load_graph(path: &Path) -> Result<DeclarationGraph, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_graph_from_str(&text)
}

/// Load a declaration graph from JSON text.
pub fn load_graph_from_str(text: &str) -> Result<DeclarationGraph, LoadError> {
    let record: GraphRecord = serde_json::from_str(text)?;
    let mut loader = Loader {
        graph: DeclarationGraph::with_builtins(),
        pending: Vec::new(),
    };
    for (index, decl) in record.declarations.iter().enumerate() {
        loader.declare(index, decl, None, &[])?;
    }
    loader.resolve()?;
    debug!(
        declarations = loader.graph.len(),
        records = record.declarations.len(),
        "loaded declaration graph"
    );
    Ok(loader.graph)
}

struct Pending<'a> {
    id: DeclId,
    record: &'a DeclarationRecord,
    /// Visible type parameters, outermost first.
    scope: Vec<DeclId>,
    own_type_parameters: Vec<DeclId>,
}

struct Loader<'a> {
    graph: DeclarationGraph,
    pending: Vec<Pending<'a>>,
}

impl<'a> Loader<'a> {
    /// First pass: allocate every declaration so forward references resolve.
    fn declare(
        &mut self,
        index: usize,
        record: &'a DeclarationRecord,
        parent: Option<DeclId>,
        scope: &[DeclId],
    ) -> Result<DeclId, LoadError> {
        let decl = skeleton(index, record, parent.is_some())?;
        let id = match (parent, record) {
            (Some(owner), DeclarationRecord::Constructor(FunctionRecord { primary: Some(false), .. })) => {
                self.graph.add_secondary_constructor(owner, decl)
            }
            (Some(owner), _) => self.graph.add_member(owner, decl),
            (None, _) => self.graph.add(decl),
        };

        let own_type_parameters: Vec<DeclId> = record
            .type_parameters()
            .iter()
            .map(|param| self.graph.add_type_parameter(id, &param.name, Vec::new()))
            .collect();
        let mut inner_scope = scope.to_vec();
        inner_scope.extend(&own_type_parameters);

        if let DeclarationRecord::Class(class) = record {
            for entry in &class.entries {
                self.graph
                    .add_member(id, Declaration::nested_class(entry, ClassKind::EnumEntry));
            }
            for member in &class.members {
                self.declare(index, member, Some(id), &inner_scope)?;
            }
        }

        self.pending.push(Pending {
            id,
            record,
            scope: inner_scope,
            own_type_parameters,
        });
        Ok(id)
    }

    /// Second pass: resolve every type reference now that all names exist.
    fn resolve(&mut self) -> Result<(), LoadError> {
        let pending = std::mem::take(&mut self.pending);
        for item in &pending {
            for (param_id, param) in item
                .own_type_parameters
                .iter()
                .zip(item.record.type_parameters())
            {
                let bounds = self.resolve_all(&param.bounds, &item.scope)?;
                if let Some(DeclKind::TypeParameter(decl)) =
                    self.graph.get_mut(*param_id).map(|d| &mut d.kind)
                {
                    decl.bounds = bounds;
                }
            }
            self.resolve_record(item)?;
        }
        self.derive_sealed_subclasses();
        Ok(())
    }

    fn resolve_record(&mut self, item: &Pending<'a>) -> Result<(), LoadError> {
        match item.record {
            DeclarationRecord::Class(class) => {
                let super_types = self.resolve_all(&class.super_types, &item.scope)?;
                let mut variants = Vec::with_capacity(class.sealed_subclasses.len());
                for name in &class.sealed_subclasses {
                    let variant = self.graph.lookup(name).ok_or_else(|| {
                        LoadError::UnknownSealedSubclass {
                            name: name.clone(),
                            declaration: self.display_name(item.id),
                        }
                    })?;
                    variants.push(variant);
                }
                if let Some(DeclKind::Class(decl)) = self.graph.get_mut(item.id).map(|d| &mut d.kind) {
                    decl.super_types = super_types;
                    decl.sealed_subclasses.extend(variants);
                }
            }
            DeclarationRecord::TypeAlias(alias) => {
                let target = self.resolve_type(&alias.target, &item.scope)?;
                if let Some(DeclKind::TypeAlias(decl)) = self.graph.get_mut(item.id).map(|d| &mut d.kind) {
                    decl.target = target;
                }
            }
            DeclarationRecord::Function(function) | DeclarationRecord::Constructor(function) => {
                let mut parameters = Vec::with_capacity(function.parameters.len());
                for param in &function.parameters {
                    parameters.push(Parameter::new(
                        param.name.clone(),
                        self.resolve_type(&param.ty, &item.scope)?,
                    ));
                }
                let is_constructor = matches!(item.record, DeclarationRecord::Constructor(_));
                let return_type = match (&function.return_type, is_constructor) {
                    (_, true) => None,
                    (Some(ty), false) => Some(self.resolve_type(ty, &item.scope)?),
                    (None, false) => Some(self.graph.type_ref(names::UNIT)),
                };
                if let Some(DeclKind::Function(decl)) = self.graph.get_mut(item.id).map(|d| &mut d.kind) {
                    decl.parameters = parameters;
                    decl.return_type = return_type;
                }
            }
            DeclarationRecord::Property(property) => {
                let ty = self.resolve_type(&property.ty, &item.scope)?;
                if let Some(DeclKind::Property(decl)) = self.graph.get_mut(item.id).map(|d| &mut d.kind) {
                    decl.ty = ty;
                }
            }
        }
        Ok(())
    }

    /// Register every source class extending a sealed root as one of its variants.
    fn derive_sealed_subclasses(&mut self) {
        let mut links = Vec::new();
        for decl in self.graph.iter() {
            let Some(class) = decl.as_class() else { continue };
            for super_type in &class.super_types {
                let Some(root) = self.graph.declaration(super_type.decl) else { continue };
                if !root.modifiers.contains(Modifiers::SEALED) {
                    continue;
                }
                if root
                    .as_class()
                    .is_some_and(|root_class| !root_class.sealed_subclasses.contains(&decl.id))
                {
                    links.push((root.id, decl.id));
                }
            }
        }
        for (root, variant) in links {
            self.graph.add_sealed_subclass(root, variant);
        }
    }

    fn display_name(&self, id: DeclId) -> String {
        self.graph
            .declaration(id)
            .map(|decl| decl.display_name().to_string())
            .unwrap_or_default()
    }

    fn resolve_all(&self, records: &[TypeRefRecord], scope: &[DeclId]) -> Result<Vec<TypeRef>, LoadError> {
        records.iter().map(|r| self.resolve_type(r, scope)).collect()
    }

    fn resolve_type(&self, record: &TypeRefRecord, scope: &[DeclId]) -> Result<TypeRef, LoadError> {
        match self.resolve_arg(record, scope)? {
            TypeArg::Type(ty) => Ok(ty),
            TypeArg::Star => Err(LoadError::MalformedType {
                text: "*".to_string(),
            }),
        }
    }

    fn resolve_arg(&self, record: &TypeRefRecord, scope: &[DeclId]) -> Result<TypeArg, LoadError> {
        match record {
            TypeRefRecord::Text(text) => {
                let mut parser = TypeTextParser { text, pos: 0 };
                let parsed = parser.parse()?;
                if parser.pos != text.len() {
                    return Err(LoadError::MalformedType { text: text.clone() });
                }
                Ok(self.resolve_parsed(&parsed, scope))
            }
            TypeRefRecord::Full {
                name,
                nullable,
                arguments,
            } => {
                if name == "*" {
                    return Ok(TypeArg::Star);
                }
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.resolve_arg(argument, scope)?);
                }
                Ok(TypeArg::Type(
                    TypeRef::new(self.resolve_name(name, scope))
                        .with_nullable(*nullable)
                        .with_args(args),
                ))
            }
        }
    }

    fn resolve_parsed(&self, parsed: &ParsedType, scope: &[DeclId]) -> TypeArg {
        match parsed {
            ParsedType::Star => TypeArg::Star,
            ParsedType::Named {
                name,
                nullable,
                arguments,
            } => TypeArg::Type(
                TypeRef::new(self.resolve_name(name, scope))
                    .with_nullable(*nullable)
                    .with_args(arguments.iter().map(|arg| self.resolve_parsed(arg, scope))),
            ),
        }
    }

    /// Innermost type parameter with this name, else the qualified name.
    fn resolve_name(&self, name: &str, scope: &[DeclId]) -> DeclId {
        scope
            .iter()
            .rev()
            .copied()
            .find(|id| self.graph.declaration(*id).is_some_and(|decl| decl.name == name))
            .or_else(|| self.graph.lookup(name))
            .unwrap_or(DeclId::INVALID)
    }
}

/// Declaration with names, modifiers and placeholder types filled in.
fn skeleton(index: usize, record: &DeclarationRecord, is_member: bool) -> Result<Declaration, LoadError> {
    let common = record.common();
    let placeholder = TypeRef::error;
    let mut decl = match record {
        DeclarationRecord::Class(class) => {
            if is_member {
                Declaration::nested_class(common.name.as_deref().unwrap_or_default(), class.class_kind.into())
            } else {
                Declaration::class(common.qualified_name.as_deref().unwrap_or_default(), class.class_kind.into())
            }
        }
        DeclarationRecord::TypeAlias(_) => {
            Declaration::type_alias(common.qualified_name.as_deref().unwrap_or_default(), placeholder())
        }
        DeclarationRecord::Function(_) if is_member => {
            Declaration::function(common.name.as_deref().unwrap_or_default(), Vec::new(), placeholder())
        }
        DeclarationRecord::Function(_) => Declaration::top_level_function(
            common.qualified_name.as_deref().unwrap_or_default(),
            Vec::new(),
            placeholder(),
        ),
        DeclarationRecord::Constructor(_) => Declaration::constructor(Vec::new()),
        DeclarationRecord::Property(property) if is_member => Declaration::property(
            common.name.as_deref().unwrap_or_default(),
            placeholder(),
            property.mutable,
        ),
        DeclarationRecord::Property(property) => Declaration::top_level_property(
            common.qualified_name.as_deref().unwrap_or_default(),
            placeholder(),
            property.mutable,
        ),
    };

    if !is_member {
        match (&common.qualified_name, &common.name) {
            (Some(_), Some(name)) => decl.name = name.clone(),
            (Some(_), None) => {}
            // Local or anonymous declaration: keep the name, drop the path.
            (None, Some(name)) => {
                decl.name = name.clone();
                decl = decl.without_qualified_name();
            }
            (None, None) => return Err(LoadError::MissingName { index }),
        }
    } else if common.name.is_none() && !matches!(record, DeclarationRecord::Constructor(_)) {
        return Err(LoadError::MissingName { index });
    }

    for keyword in &common.modifiers {
        let modifier = Modifiers::from_keyword(keyword).ok_or_else(|| LoadError::UnknownModifier {
            modifier: keyword.clone(),
            declaration: decl.display_name().to_string(),
        })?;
        decl.modifiers |= modifier;
    }
    decl.annotations = common.annotations.clone();
    if common.library {
        decl = decl.library();
    }
    decl.containing_file = common.file.clone();
    decl.location = match (&common.location, &common.file) {
        (Some(location), _) => location.clone(),
        (None, Some(file)) => Location::new(file.clone(), 0, 0),
        (None, None) => Location::unknown(),
    };
    Ok(decl)
}

// =============================================================================
// Inline type syntax
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
enum ParsedType {
    Star,
    Named {
        name: String,
        nullable: bool,
        arguments: Vec<ParsedType>,
    },
}

/// Parser for `Name<Arg, Arg>?` and `*`.
struct TypeTextParser<'t> {
    text: &'t str,
    pos: usize,
}

impl TypeTextParser<'_> {
    fn malformed(&self) -> LoadError {
        LoadError::MalformedType {
            text: self.text.to_string(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.text[self.pos..].starts_with(' ') {
            self.pos += 1;
        }
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.text[self.pos..].starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn parse(&mut self) -> Result<ParsedType, LoadError> {
        if self.eat('*') {
            return Ok(ParsedType::Star);
        }
        self.skip_whitespace();
        let rest = &self.text[self.pos..];
        let len = rest
            .find(|c: char| matches!(c, '<' | '>' | ',' | '?' | ' '))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.malformed());
        }
        let name = rest[..len].to_string();
        self.pos += len;

        let mut arguments = Vec::new();
        if self.eat('<') {
            loop {
                arguments.push(self.parse()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.malformed());
            }
        }
        let nullable = self.eat('?');
        self.skip_whitespace();
        Ok(ParsedType::Named {
            name,
            nullable,
            arguments,
        })
    }
}

#[cfg(test)]
#[path = "tests/loader_parse_tests.rs"]
mod tests;
