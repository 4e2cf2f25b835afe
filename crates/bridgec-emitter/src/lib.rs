//! C# binding emission for the bridgec binding compiler.
//!
//! | Module | Contents |
//! |--------|----------|
//! | `csharp` | target type model, declaration IR and text printer |
//! | `type_mapping` | source type to C# type mapping |
//! | `naming` | binding identifiers and Objective-C export names |
//! | `foundation` | declarations present in every output file |
//! | `declarations` | namespace tree to C# declarations |
//! | `projection` | per-member export data for wrapper generators |
//! | `generator` | the end-to-end invocation |

pub mod csharp;

pub mod options;
pub use options::GeneratorOptions;

pub mod naming;
pub use naming::BindingNames;

pub mod type_mapping;
pub use type_mapping::{MappingContext, TypeMapper};

pub mod foundation;

pub mod declarations;
pub use declarations::{DeclarationEmitter, EmittedBindings};

pub mod projection;
pub use projection::MemberProjection;

mod generator;
pub use generator::{GenerateError, GenerationResult, OutputUnit, generate};
