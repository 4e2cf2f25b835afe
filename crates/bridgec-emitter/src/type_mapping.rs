//! Type-mapping engine.
//!
//! Maps a source [`TypeRef`] to a C# [`TargetType`]. Tiers are tried in a
//! fixed order and the first match wins:
//!
//! | Tier | Applies to | Result |
//! |------|------------|--------|
//! | boxed primitive | wrapped, or nullable in a binding position | `Foundation.NSNumber`, `NSString`/`string`, unit wrapper/`void` |
//! | bare primitive | every other primitive | `bool`, `int`, `long`, ... |
//! | runtime value | throwable and calendar types | fixed `<Prefix>Kotlin...` declarations |
//! | platform passthrough | packages under `platform.` | the native class, prefix stripped |
//! | collection | `List`, `Set`, `Map` | `T[]` / `NSArray`, `NSDictionary<K, V>` |
//! | custom | aliases, function types, classes, type parameters | local alias, `System.Func`/`Action`, binding class, mapped bound |
//!
//! In a binding position (method parameter, return or property type) the
//! result's own nullability is cleared and moved into attributes:
//! `NullAllowed` when the source type is nullable, plus
//! `ObjCRuntime.BindAs` for Foundation boxes so the bridge can unbox to the
//! original primitive.
//!
//! Known limitation: a type parameter maps through its first upper bound only.

use crate::csharp::TargetType;
use crate::csharp::types::{
    ClassName, FOUNDATION_NAMESPACE, OBJC_RUNTIME_NAMESPACE, ns_array, ns_dictionary, ns_number, ns_object,
    ns_string, system_action, system_array, system_func,
};
use crate::naming::{BindingNames, capitalize};
use bridgec_common::limits::MAX_TYPE_MAPPING_DEPTH;
use bridgec_common::{BindingError, BindingResult};
use bridgec_model::{DeclKind, Declaration, DeclarationOracle, TypeArg, TypeParameterDecl, TypeRef, names};
use tracing::{trace, warn};

pub const NULL_ALLOWED: &str = "NullAllowed";

/// Context flags for one mapping call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MappingContext {
    /// The type is a generic argument of another type.
    pub wrapped: bool,
    /// The type is a binding parameter, return or property type.
    pub binding_position: bool,
    pub depth: u32,
}

impl MappingContext {
    pub const PLAIN: Self = Self {
        wrapped: false,
        binding_position: false,
        depth: 0,
    };

    pub const BINDING: Self = Self {
        wrapped: false,
        binding_position: true,
        depth: 0,
    };

    pub const WRAPPED: Self = Self {
        wrapped: true,
        binding_position: false,
        depth: 0,
    };

    /// Context for a generic argument of the current type.
    const fn argument(self) -> Self {
        Self {
            wrapped: true,
            binding_position: false,
            depth: self.depth + 1,
        }
    }

    const fn deeper(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }
}

pub struct TypeMapper<'a, O: DeclarationOracle> {
    oracle: &'a O,
    names: &'a BindingNames,
}

impl<'a, O: DeclarationOracle> TypeMapper<'a, O> {
    pub fn new(oracle: &'a O, names: &'a BindingNames) -> Self {
        Self { oracle, names }
    }

    /// Map `ty` under `ctx`. Deterministic for identical inputs.
    pub fn map_type(&self, ty: &TypeRef, ctx: MappingContext) -> BindingResult<TargetType> {
        if ctx.depth >= MAX_TYPE_MAPPING_DEPTH {
            return Err(BindingError::DepthLimitExceeded {
                ty: self.oracle.describe_type(ty),
                limit: MAX_TYPE_MAPPING_DEPTH,
            });
        }
        let decl = self.oracle.get(ty.decl)?;

        if let DeclKind::TypeParameter(param) = &decl.kind {
            return self.map_type_parameter(decl, param, ty, ctx);
        }

        let mapped = self.map_by_tier(decl, ty, ctx)?;
        trace!(ty = %self.oracle.describe_type(ty), target = %mapped, ?ctx, "mapped type");
        Ok(if ctx.binding_position {
            adjust_for_binding_position(mapped, decl.qualified_name.as_deref(), ty.nullable)
        } else {
            mapped
        })
    }

    fn map_by_tier(&self, decl: &Declaration, ty: &TypeRef, ctx: MappingContext) -> BindingResult<TargetType> {
        let qualified_name = decl.qualified_name.as_deref().unwrap_or_default();

        let primitive = if ctx.wrapped || (ctx.binding_position && ty.nullable) {
            self.boxed_primitive(qualified_name, ctx.wrapped)
        } else {
            self.bare_primitive(qualified_name)
        };
        if let Some(name) = primitive {
            return Ok(name.with_nullable(ty.nullable).into());
        }

        if let Some(name) = self.runtime_value(qualified_name) {
            return Ok(name.with_nullable(ty.nullable).into());
        }

        if let Some(namespace) = decl.package.strip_prefix(names::PLATFORM_PACKAGE_PREFIX) {
            return Ok(ClassName::new(namespace, decl.name.clone())
                .with_nullable(ty.nullable)
                .into());
        }

        match qualified_name {
            names::LIST | names::SET => {
                let raw = if ctx.wrapped { ns_array() } else { system_array() };
                let element = self.map_argument(decl, ty, 0, ctx)?;
                return Ok(TargetType::parameterized(raw.with_nullable(ty.nullable), vec![element]));
            }
            names::MAP => {
                let key = self.map_argument(decl, ty, 0, ctx)?;
                let value = self.map_argument(decl, ty, 1, ctx)?;
                return Ok(TargetType::parameterized(
                    ns_dictionary().with_nullable(ty.nullable),
                    vec![key, value],
                ));
            }
            _ => {}
        }

        self.map_custom(decl, ty, ctx)
    }

    // =========================================================================
    // Primitive and fixed tables
    // =========================================================================

    fn boxed_primitive(&self, qualified_name: &str, wrapped: bool) -> Option<ClassName> {
        Some(match qualified_name {
            names::ANY => self.names.base(),
            names::BOOLEAN
            | names::BYTE
            | names::CHAR
            | names::DOUBLE
            | names::FLOAT
            | names::INT
            | names::LONG
            | names::NUMBER
            | names::SHORT
            | names::DURATION => ns_number(),
            // Binding parameters keep the native string.
            names::STRING if wrapped => ns_string(),
            names::STRING => ClassName::keyword("string"),
            names::UNIT if wrapped => self.names.unit(),
            names::UNIT => ClassName::keyword("void"),
            _ => return None,
        })
    }

    fn bare_primitive(&self, qualified_name: &str) -> Option<ClassName> {
        Some(match qualified_name {
            names::ANY => self.names.base(),
            names::NUMBER => ns_number(),
            names::DURATION => ClassName::keyword("long"),
            names::UNIT => ClassName::keyword("void"),
            other => ClassName::keyword(csharp_primitive(other)?),
        })
    }

    fn runtime_value(&self, qualified_name: &str) -> Option<ClassName> {
        let suffix = match qualified_name {
            names::THROWABLE => "KotlinThrowable",
            names::LOCAL_DATE_TIME => "Kotlinx_datetimeLocalDateTime",
            names::LOCAL_DATE => "Kotlinx_datetimeLocalDate",
            names::LOCAL_TIME => "Kotlinx_datetimeLocalTime",
            names::INSTANT => "Kotlinx_datetimeInstant",
            _ => return None,
        };
        Some(self.names.class_name(self.names.prefixed(suffix)))
    }

    // =========================================================================
    // Generic arguments
    // =========================================================================

    fn map_argument(
        &self,
        owner: &Declaration,
        ty: &TypeRef,
        index: usize,
        ctx: MappingContext,
    ) -> BindingResult<TargetType> {
        match ty.arguments.get(index) {
            Some(argument) => self.map_type_argument(argument, ctx),
            None => Err(BindingError::Unsupported {
                construct: format!("{} without type argument {index}", owner.name),
                declaration: self.oracle.describe_type(ty),
                location: owner.location.clone(),
            }),
        }
    }

    fn map_type_argument(&self, argument: &TypeArg, ctx: MappingContext) -> BindingResult<TargetType> {
        match argument {
            TypeArg::Type(inner) => self.map_type(inner, ctx.argument()),
            TypeArg::Star => {
                warn!("star-projected type argument mapped to the root object type");
                Ok(self.names.base().into())
            }
        }
    }

    // =========================================================================
    // Custom tier
    // =========================================================================

    fn map_custom(&self, decl: &Declaration, ty: &TypeRef, ctx: MappingContext) -> BindingResult<TargetType> {
        let arguments = ty
            .arguments
            .iter()
            .map(|argument| self.map_type_argument(argument, ctx))
            .collect::<BindingResult<Vec<_>>>()?;

        match &decl.kind {
            DeclKind::TypeAlias(_) => Ok(TargetType::parameterized(
                ClassName::new("", capitalize(&decl.name)).with_nullable(ty.nullable),
                arguments,
            )),
            DeclKind::Class(_) => {
                let qualified_name = decl.qualified_name.as_deref().unwrap_or_default();
                if names::is_function_type(qualified_name) {
                    return Ok(self.function_type(arguments, ty.nullable));
                }
                // Type arguments of custom classes are not representable.
                let identifier = self.names.identifier(self.oracle, decl.id)?;
                Ok(self.names.class_name(identifier).with_nullable(ty.nullable).into())
            }
            DeclKind::Function(_) | DeclKind::Property(_) | DeclKind::TypeParameter(_) => {
                Err(BindingError::UnexpectedDeclaration {
                    kind: decl.kind.describe().to_string(),
                    declaration: decl.display_name().to_string(),
                    location: decl.location.clone(),
                    reason: "only types can be mapped to C#".to_string(),
                })
            }
        }
    }

    /// `FunctionN<P.., R>`: `System.Action<P..>` when `R` is the unit wrapper, else `System.Func<P.., R>`.
    fn function_type(&self, mut arguments: Vec<TargetType>, nullable: bool) -> TargetType {
        let unit = TargetType::from(self.names.unit());
        if arguments.last() == Some(&unit) {
            arguments.pop();
            TargetType::parameterized(system_action().with_nullable(nullable), arguments)
        } else {
            TargetType::parameterized(system_func().with_nullable(nullable), arguments)
        }
    }

    /// Substitute the first upper bound; a root-object bound widens to `NSObject`.
    fn map_type_parameter(
        &self,
        decl: &Declaration,
        param: &TypeParameterDecl,
        ty: &TypeRef,
        ctx: MappingContext,
    ) -> BindingResult<TargetType> {
        let bound = param
            .bounds
            .first()
            .ok_or_else(|| BindingError::TypeParameterWithoutBound {
                declaration: decl.display_name().to_string(),
                location: decl.location.clone(),
            })?;

        let mut mapped = self.map_type(bound, ctx.deeper())?;
        if let TargetType::Class(name) = &mapped
            && name.same_name(&self.names.base())
        {
            mapped = ns_object()
                .with_nullable(name.nullable)
                .with_attributes(name.attributes.clone())
                .into();
        }

        if ty.nullable {
            let head = mapped.head_mut();
            if ctx.binding_position {
                if !head.attributes.iter().any(|attribute| attribute == NULL_ALLOWED) {
                    head.attributes.push(NULL_ALLOWED.to_string());
                }
            } else {
                // `T?` stays nullable even over a non-null bound.
                head.nullable = true;
            }
        }
        Ok(mapped)
    }
}

// =============================================================================
// Binding-position adjustment
// =============================================================================

fn adjust_for_binding_position(mut mapped: TargetType, qualified_name: Option<&str>, nullable: bool) -> TargetType {
    let head = mapped.head_mut();
    head.nullable = false;
    if head.namespace == FOUNDATION_NAMESPACE
        && let Some(bind_as) = qualified_name.and_then(|name| bind_as_attribute(name, nullable))
    {
        head.attributes.push(bind_as);
    }
    if nullable {
        head.attributes.push(NULL_ALLOWED.to_string());
    }
    mapped
}

/// `ObjCRuntime.BindAs (typeof (int?))` for boxed primitives.
fn bind_as_attribute(qualified_name: &str, nullable: bool) -> Option<String> {
    let primitive = csharp_primitive(qualified_name)?;
    let suffix = if nullable { "?" } else { "" };
    Some(format!("{OBJC_RUNTIME_NAMESPACE}.BindAs (typeof ({primitive}{suffix}))"))
}

/// C# keyword for a source primitive.
fn csharp_primitive(qualified_name: &str) -> Option<&'static str> {
    Some(match qualified_name {
        names::BOOLEAN => "bool",
        names::BYTE => "byte",
        names::CHAR => "char",
        names::DOUBLE => "double",
        names::FLOAT => "float",
        names::INT => "int",
        names::LONG => "long",
        names::SHORT => "short",
        names::STRING => "string",
        _ => return None,
    })
}

#[cfg(test)]
#[path = "tests/type_mapping_tests.rs"]
mod tests;
