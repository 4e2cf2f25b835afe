//! Member projection for the platform wrapper generators.
//!
//! For every emitted binding declaration the wrapper generators need the
//! exported member list: selector, mapped parameter and return types,
//! mutability. The projection is built alongside the C# declarations and
//! serialized to `<stem>.members.json`.

use crate::csharp::{ParameterSpec, TargetType};
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProjection {
    pub namespace: String,
    pub declarations: Vec<ProjectedDeclaration>,
}

impl MemberProjection {
    pub fn declaration(&self, identifier: &str) -> Option<&ProjectedDeclaration> {
        self.declarations.iter().find(|decl| decl.identifier == identifier)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectedKind {
    Class,
    Object,
    Interface,
    Enum,
    TypeAlias,
    /// Synthesized container for the top-level members of one source file.
    FileContainer,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedDeclaration {
    pub identifier: String,
    /// Source qualified name; absent for file containers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    pub kind: ProjectedKind,
    /// Base type for classes, aliased type for aliases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    pub members: Vec<ProjectedMember>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberKind {
    Constructor,
    Factory,
    SingletonAccessor,
    Method,
    Property,
    EnumEntry,
    Companion,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedMember {
    pub kind: MemberKind,
    /// C# member name.
    pub name: String,
    /// Objective-C selector.
    pub export: String,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ProjectedParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<ProjectedType>,
    pub mutable: bool,
}

impl ProjectedMember {
    pub fn new(kind: MemberKind, name: impl Into<String>, export: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            export: export.into(),
            is_static: false,
            parameters: Vec::new(),
            return_type: None,
            mutable: false,
        }
    }

    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_parameters(mut self, parameters: &[ParameterSpec]) -> Self {
        self.parameters = parameters
            .iter()
            .map(|param| ProjectedParameter {
                name: param.name.clone(),
                ty: ProjectedType::from(&param.ty),
            })
            .collect();
        self
    }

    pub fn returning(mut self, ty: &TargetType) -> Self {
        self.return_type = Some(ProjectedType::from(ty));
        self
    }

    pub fn mutable(mut self, mutable: bool) -> Self {
        self.mutable = mutable;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ProjectedType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedType {
    /// C# spelling without attributes.
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
}

impl From<&TargetType> for ProjectedType {
    fn from(ty: &TargetType) -> Self {
        Self {
            name: ty.render(false),
            attributes: ty.attributes().to_vec(),
        }
    }
}
