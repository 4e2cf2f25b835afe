//! Declaration emitter.
//!
//! Walks the namespace tree and renders one C# interface per filtered
//! declaration, flattening every namespace node into the single binding
//! namespace:
//!
//! | Declaration | Output |
//! |-------------|--------|
//! | class, interface, object | interface with constructors, methods, properties, companion accessor |
//! | enum class | interface extending the enum marker, one static accessor per entry |
//! | type alias | `using` directive |
//! | top-level functions and properties | one static container per source file |
//!
//! Within a node, declarations are emitted first, then file containers, then
//! child nodes. Every failure is wrapped with the declaration being emitted.

use crate::csharp::types::native_object;
use crate::csharp::{
    AliasUsingDirectiveSpec, AttributeList, ClassName, InterfaceDeclarationSpec, MemberSignature, MemberSpec,
    NamespaceSpec, NamespaceSpecBuilder, ParameterSpec, base_type_attribute, export_attribute,
};
use crate::foundation::add_foundation_declarations;
use crate::naming::{
    BindingNames, capitalize, enum_entry_export_name, export_name, object_accessor_export_name, objc_name,
};
use crate::projection::{MemberKind, MemberProjection, ProjectedDeclaration, ProjectedKind, ProjectedMember};
use crate::type_mapping::{MappingContext, TypeMapper};
use bridgec_common::{BindingError, BindingResult};
use bridgec_graph::{NamespaceNode, WellKnownTypes, eligible_functions_and_constructors, eligible_properties};
use bridgec_model::{
    ClassDecl, ClassKind, DeclId, DeclKind, Declaration, DeclarationOracle, FunctionDecl, Modifiers, PropertyDecl,
    TypeAliasDecl, TypeRef,
};
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};
use tracing::debug;

/// Result of emitting one namespace tree.
#[derive(Clone, Debug)]
pub struct EmittedBindings {
    pub namespace: NamespaceSpec,
    pub projection: MemberProjection,
}

pub struct DeclarationEmitter<'a, O: DeclarationOracle> {
    oracle: &'a O,
    well_known: &'a WellKnownTypes,
    names: &'a BindingNames,
    mapper: TypeMapper<'a, O>,
    builder: NamespaceSpecBuilder,
    projected: Vec<ProjectedDeclaration>,
}

impl<'a, O: DeclarationOracle> DeclarationEmitter<'a, O> {
    pub fn new(oracle: &'a O, well_known: &'a WellKnownTypes, names: &'a BindingNames) -> Self {
        let mut builder = NamespaceSpec::builder(names.namespace.clone());
        add_foundation_declarations(&mut builder, names);
        Self {
            oracle,
            well_known,
            names,
            mapper: TypeMapper::new(oracle, names),
            builder,
            projected: Vec::new(),
        }
    }

    pub fn emit(mut self, root: &NamespaceNode) -> BindingResult<EmittedBindings> {
        self.emit_node(root)?;
        debug!(declarations = self.projected.len(), "emitted binding declarations");
        Ok(EmittedBindings {
            namespace: self.builder.build(),
            projection: MemberProjection {
                namespace: self.names.namespace.clone(),
                declarations: self.projected,
            },
        })
    }

    fn emit_node(&mut self, node: &NamespaceNode) -> BindingResult<()> {
        let oracle = self.oracle;
        let mut by_file: IndexMap<&'a str, Vec<&'a Declaration>, FxBuildHasher> = IndexMap::default();

        for &id in &node.declarations {
            let decl = oracle.get(id)?;
            if decl.is_function_or_property() {
                let file = decl
                    .containing_file
                    .as_deref()
                    .ok_or_else(|| BindingError::MissingContainingFile {
                        declaration: decl.display_name().to_string(),
                        location: decl.location.clone(),
                    })?;
                by_file.entry(file).or_default().push(decl);
            } else {
                self.emit_declaration(decl)
                    .map_err(|err| err.in_declaration(decl.display_name(), decl.location.clone()))?;
            }
        }

        for (file, members) in by_file {
            self.emit_file_container(file, &members)?;
        }
        for child in &node.children {
            self.emit_node(child)?;
        }
        Ok(())
    }

    /// Render one non-top-level declaration.
    pub fn emit_declaration(&mut self, decl: &'a Declaration) -> BindingResult<()> {
        match &decl.kind {
            DeclKind::Class(class) => match class.class_kind {
                ClassKind::Class | ClassKind::Interface | ClassKind::Object => self.emit_class(decl, class),
                ClassKind::EnumClass => self.emit_enum(decl, class),
                ClassKind::EnumEntry | ClassKind::Annotation => {
                    Err(unexpected(decl, "only classes, objects and enums get a binding interface"))
                }
            },
            DeclKind::TypeAlias(alias) => self.emit_alias(decl, alias),
            DeclKind::Function(_) | DeclKind::Property(_) => Err(BindingError::TopLevelOnly {
                declaration: decl.display_name().to_string(),
                location: decl.location.clone(),
            }),
            DeclKind::TypeParameter(_) => Err(unexpected(decl, "type parameters are replaced by their bound")),
        }
    }

    // =========================================================================
    // Classes
    // =========================================================================

    fn emit_class(&mut self, decl: &'a Declaration, class: &'a ClassDecl) -> BindingResult<()> {
        let oracle = self.oracle;
        let identifier = self.names.identifier(oracle, decl.id)?;
        let superclass = self.superclass(class)?;
        let base = self
            .mapper
            .map_type(&TypeRef::new(superclass), MappingContext::PLAIN)?
            .render(false);

        let mut spec = InterfaceDeclarationSpec::new(AttributeList::new([base_type_attribute(&base)]), &identifier)
            .implementing(native_object().into());
        let mut projected = ProjectedDeclaration {
            identifier: identifier.clone(),
            qualified_name: decl.qualified_name.clone(),
            kind: match class.class_kind {
                ClassKind::Object => ProjectedKind::Object,
                ClassKind::Interface => ProjectedKind::Interface,
                _ => ProjectedKind::Class,
            },
            base: Some(base),
            members: Vec::new(),
        };

        let mut constructors = Vec::new();
        let mut methods = Vec::new();
        for id in eligible_functions_and_constructors(oracle, decl.id, self.well_known)? {
            let member = oracle.get(id)?;
            if member.is_constructor() {
                constructors.push(member);
            } else {
                methods.push(member);
            }
        }

        if class.class_kind == ClassKind::Object && !decl.is_companion() {
            let name = capitalize(&decl.name);
            let export = object_accessor_export_name(decl);
            spec.push(MemberSpec::new(
                AttributeList::new(["Static".to_string(), export_attribute(&export)]),
                MemberSignature::Factory {
                    ty: identifier.clone(),
                    name: name.clone(),
                },
            ));
            projected
                .members
                .push(ProjectedMember::new(MemberKind::SingletonAccessor, name, export).static_member());
        } else {
            for constructor in constructors {
                let is_primary = class.primary_constructor == Some(constructor.id);
                self.emit_constructor(&identifier, constructor, is_primary, &mut spec, &mut projected)
                    .map_err(|err| err.in_declaration(constructor.display_name(), constructor.location.clone()))?;
            }
        }

        for method in methods {
            let (member, projection) = self
                .method_member(method, false)
                .map_err(|err| err.in_declaration(method.display_name(), method.location.clone()))?;
            spec.push(member);
            projected.members.push(projection);
        }

        for id in eligible_properties(oracle, decl.id, self.well_known)? {
            let property = oracle.get(id)?;
            let (member, projection) = self
                .property_member(property, false)
                .map_err(|err| err.in_declaration(property.display_name(), property.location.clone()))?;
            spec.push(member);
            projected.members.push(projection);
        }

        for &id in &class.members {
            let member = oracle.get(id)?;
            if member.is_companion() && member.has_annotation(&self.well_known.binding_annotation) {
                let companion = self.names.identifier(oracle, id)?;
                spec.push(MemberSpec::new(
                    AttributeList::new(["Static".to_string(), export_attribute("companion")]),
                    MemberSignature::Companion { ty: companion },
                ));
                projected
                    .members
                    .push(ProjectedMember::new(MemberKind::Companion, "Companion", "companion").static_member());
            }
        }

        self.builder.add_interface(spec);
        self.projected.push(projected);
        Ok(())
    }

    /// First class-like super-type after alias resolution, else the first
    /// sealed interface, else the universal root.
    fn superclass(&self, class: &ClassDecl) -> BindingResult<DeclId> {
        let mut sealed_interface = None;
        for super_type in &class.super_types {
            let resolved = self.oracle.resolve_type_aliases(super_type.decl)?;
            let super_decl = self.oracle.get(resolved)?;
            match super_decl.class_kind() {
                Some(ClassKind::Interface) => {
                    if sealed_interface.is_none() && super_decl.modifiers.contains(Modifiers::SEALED) {
                        sealed_interface = Some(resolved);
                    }
                }
                Some(_) => return Ok(resolved),
                None => {}
            }
        }
        Ok(sealed_interface.unwrap_or(self.well_known.any))
    }

    fn emit_constructor(
        &self,
        identifier: &str,
        constructor: &Declaration,
        is_primary: bool,
        spec: &mut InterfaceDeclarationSpec,
        projected: &mut ProjectedDeclaration,
    ) -> BindingResult<()> {
        let function = expect_function(constructor)?;
        let parameters = self.parameters(function)?;
        let designated = is_primary.then(|| "DesignatedInitializer".to_string());

        if parameters.is_empty() {
            let attributes = ["Static".to_string(), export_attribute("new")]
                .into_iter()
                .chain(designated);
            spec.push(MemberSpec::new(
                AttributeList::new(attributes),
                MemberSignature::Factory {
                    ty: identifier.to_string(),
                    name: "New".to_string(),
                },
            ));
            projected
                .members
                .push(ProjectedMember::new(MemberKind::Factory, "New", "new").static_member());
        } else {
            let export = export_name(constructor, function);
            let attributes = std::iter::once(export_attribute(&export)).chain(designated);
            projected.members.push(
                ProjectedMember::new(MemberKind::Constructor, "Constructor", export).with_parameters(&parameters),
            );
            spec.push(MemberSpec::new(
                AttributeList::new(attributes),
                MemberSignature::Constructor { parameters },
            ));
        }
        Ok(())
    }

    fn parameters(&self, function: &FunctionDecl) -> BindingResult<Vec<ParameterSpec>> {
        function
            .parameters
            .iter()
            .map(|param| {
                let ty = self.mapper.map_type(&param.ty, MappingContext::BINDING)?;
                Ok(ParameterSpec::new(param.name.clone(), ty))
            })
            .collect()
    }

    fn method_member(&self, decl: &Declaration, is_static: bool) -> BindingResult<(MemberSpec, ProjectedMember)> {
        let function = expect_function(decl)?;
        let return_type = function
            .return_type
            .as_ref()
            .ok_or_else(|| BindingError::Unresolved {
                what: "return type".to_string(),
                declaration: decl.display_name().to_string(),
                location: decl.location.clone(),
            })?;
        let return_type = self.mapper.map_type(return_type, MappingContext::BINDING)?;
        let parameters = self.parameters(function)?;
        let export = export_name(decl, function);
        let name = capitalize(&decl.name);

        let mut projection = ProjectedMember::new(MemberKind::Method, name.clone(), export.clone())
            .with_parameters(&parameters)
            .returning(&return_type);
        let mut attributes = Vec::with_capacity(2);
        if is_static {
            attributes.push("Static".to_string());
            projection = projection.static_member();
        }
        attributes.push(export_attribute(&export));
        let attributes = AttributeList::new(attributes).extended(return_type.attributes());

        let member = MemberSpec::new(
            attributes,
            MemberSignature::Method {
                return_type,
                name,
                parameters,
            },
        );
        Ok((member, projection))
    }

    fn property_member(&self, decl: &Declaration, is_static: bool) -> BindingResult<(MemberSpec, ProjectedMember)> {
        let property = expect_property(decl)?;
        let ty = self.mapper.map_type(&property.ty, MappingContext::BINDING)?;
        let export = objc_name(decl);
        let name = capitalize(&decl.name);

        let mut projection = ProjectedMember::new(MemberKind::Property, name.clone(), export.clone())
            .returning(&ty)
            .mutable(property.mutable);
        let mut attributes = Vec::with_capacity(2);
        if is_static {
            attributes.push("Static".to_string());
            projection = projection.static_member();
        }
        attributes.push(export_attribute(&export));
        let attributes = AttributeList::new(attributes).extended(ty.attributes());

        let member = MemberSpec::new(
            attributes,
            MemberSignature::Property {
                ty,
                name,
                mutable: property.mutable,
            },
        );
        Ok((member, projection))
    }

    // =========================================================================
    // Enums and aliases
    // =========================================================================

    fn emit_enum(&mut self, decl: &'a Declaration, class: &'a ClassDecl) -> BindingResult<()> {
        let oracle = self.oracle;
        let identifier = self.names.identifier(oracle, decl.id)?;
        let marker = self.names.prefixed("KotlinEnum");
        let mut spec = InterfaceDeclarationSpec::new(AttributeList::new([base_type_attribute(&marker)]), &identifier)
            .implementing(native_object().into())
            .compact();
        let mut projected = ProjectedDeclaration {
            identifier: identifier.clone(),
            qualified_name: decl.qualified_name.clone(),
            kind: ProjectedKind::Enum,
            base: Some(marker),
            members: Vec::new(),
        };

        let mut used = FxHashSet::default();
        for &id in &class.members {
            let entry = oracle.get(id)?;
            if entry.class_kind() != Some(ClassKind::EnumEntry) {
                continue;
            }
            let mut export = enum_entry_export_name(entry);
            while used.contains(&export) {
                export.push('_');
            }
            used.insert(export.clone());

            let name = capitalize(&entry.name);
            spec.push(MemberSpec::with_attribute_lines(
                vec![
                    AttributeList::new(["Static"]),
                    AttributeList::new([export_attribute(&export)]),
                ],
                MemberSignature::Property {
                    ty: ClassName::keyword(&identifier).into(),
                    name: name.clone(),
                    mutable: false,
                },
            ));
            projected
                .members
                .push(ProjectedMember::new(MemberKind::EnumEntry, name, export).static_member());
        }

        self.builder.add_interface(spec);
        self.projected.push(projected);
        Ok(())
    }

    fn emit_alias(&mut self, decl: &Declaration, alias: &TypeAliasDecl) -> BindingResult<()> {
        let identifier = capitalize(&decl.name);
        let target = self.mapper.map_type(&alias.target, MappingContext::PLAIN)?;
        self.projected.push(ProjectedDeclaration {
            identifier: identifier.clone(),
            qualified_name: decl.qualified_name.clone(),
            kind: ProjectedKind::TypeAlias,
            base: Some(target.render(false)),
            members: Vec::new(),
        });
        self.builder.add_alias(AliasUsingDirectiveSpec { identifier, target });
        Ok(())
    }

    // =========================================================================
    // Top-level members
    // =========================================================================

    fn emit_file_container(&mut self, file: &str, members: &[&'a Declaration]) -> BindingResult<()> {
        let identifier = self.names.file_container(file);
        let base = self.names.prefixed("Base");
        let mut spec = InterfaceDeclarationSpec::new(AttributeList::new([base_type_attribute(&base)]), &identifier);
        let mut projected = ProjectedDeclaration {
            identifier: identifier.clone(),
            qualified_name: None,
            kind: ProjectedKind::FileContainer,
            base: Some(base),
            members: Vec::new(),
        };

        for decl in members {
            let rendered = match &decl.kind {
                DeclKind::Function(_) => self.method_member(decl, true),
                DeclKind::Property(_) => self.property_member(decl, true),
                _ => Err(unexpected(decl, "file containers hold only functions and properties")),
            };
            let (member, projection) =
                rendered.map_err(|err| err.in_declaration(decl.display_name(), decl.location.clone()))?;
            spec.push(member);
            projected.members.push(projection);
        }

        self.builder.add_interface(spec);
        self.projected.push(projected);
        Ok(())
    }
}

fn unexpected(decl: &Declaration, reason: &str) -> BindingError {
    BindingError::UnexpectedDeclaration {
        kind: decl.kind.describe().to_string(),
        declaration: decl.display_name().to_string(),
        location: decl.location.clone(),
        reason: reason.to_string(),
    }
}

fn expect_function(decl: &Declaration) -> BindingResult<&FunctionDecl> {
    decl.as_function()
        .ok_or_else(|| unexpected(decl, "expected a function or constructor"))
}

fn expect_property(decl: &Declaration) -> BindingResult<&PropertyDecl> {
    match &decl.kind {
        DeclKind::Property(property) => Ok(property),
        _ => Err(unexpected(decl, "expected a property")),
    }
}

#[cfg(test)]
#[path = "tests/declarations_tests.rs"]
mod tests;
