//! C# API-definition model and printer.
//!
//! | Module | Contents |
//! |--------|----------|
//! | `types` | [`ClassName`], [`TargetType`] and well-known target names |
//! | `spec` | interface, member, alias and namespace declarations |
//! | `printer` | [`CSharpPrinter`], text output |
//! | `keywords` | reserved-word escaping for parameter names |

pub mod keywords;
pub mod printer;
pub mod spec;
pub mod types;

pub use printer::CSharpPrinter;
pub use spec::{
    AliasUsingDirectiveSpec, AttributeList, BodyLayout, InterfaceDeclarationSpec, MemberSignature, MemberSpec,
    NamespaceSpec, NamespaceSpecBuilder, ParameterSpec, base_type_attribute, export_attribute,
};
pub use types::{ClassName, TargetType};
