//! Resolved type references.
//!
//! A [`TypeRef`] is the host compiler's resolved type: the declaration it
//! points at, its nullability, and its ordered generic arguments. Equality
//! and hashing are structural over that tuple, so two independently resolved
//! references to `List<Int?>` compare equal.

use crate::decl::DeclId;

/// One generic argument of a [`TypeRef`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeArg {
    Type(TypeRef),
    /// Star projection (`List<*>`).
    Star,
}

impl TypeArg {
    pub fn as_type(&self) -> Option<&TypeRef> {
        match self {
            TypeArg::Type(ty) => Some(ty),
            TypeArg::Star => None,
        }
    }
}

impl From<TypeRef> for TypeArg {
    fn from(ty: TypeRef) -> Self {
        TypeArg::Type(ty)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub decl: DeclId,
    pub nullable: bool,
    pub arguments: Vec<TypeArg>,
}

impl TypeRef {
    pub fn new(decl: DeclId) -> Self {
        Self {
            decl,
            nullable: false,
            arguments: Vec::new(),
        }
    }

    /// The host compiler's error type.
    pub fn error() -> Self {
        Self::new(DeclId::INVALID)
    }

    pub fn is_error(&self) -> bool {
        !self.decl.is_valid()
    }

    /// Same reference, marked nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_args<I>(mut self, arguments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TypeArg>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Resolved (non-star) generic arguments, in order.
    pub fn type_arguments(&self) -> impl Iterator<Item = &TypeRef> {
        self.arguments.iter().filter_map(TypeArg::as_type)
    }
}
