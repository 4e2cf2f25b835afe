//! Declaration model for the bridgec binding compiler.
//!
//! This crate provides:
//! - Declarations and their kinds (`Declaration`, `DeclKind`, `DeclId`)
//! - Resolved type references (`TypeRef`, `TypeArg`)
//! - The read-only oracle interface the pipeline consumes (`DeclarationOracle`)
//! - An in-memory oracle (`DeclarationGraph`) with the platform builtins
//! - A JSON loader producing a `DeclarationGraph`

pub mod decl;
pub use decl::{
    ClassDecl, ClassKind, DeclId, DeclKind, Declaration, FunctionDecl, Modifiers, Origin,
    Parameter, PropertyDecl, TypeAliasDecl, TypeParameterDecl,
};

pub mod types;
pub use types::{TypeArg, TypeRef};

pub mod oracle;
pub use oracle::DeclarationOracle;

pub mod builtins;
pub mod names;

pub mod graph;
pub use graph::DeclarationGraph;

pub mod loader;
pub use loader::{LoadError, load_graph, load_graph_from_str};
