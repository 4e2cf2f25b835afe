//! Qualified names of the platform declarations the pipeline keys on.

pub const ANY: &str = "kotlin.Any";
pub const BOOLEAN: &str = "kotlin.Boolean";
pub const BYTE: &str = "kotlin.Byte";
pub const CHAR: &str = "kotlin.Char";
pub const DOUBLE: &str = "kotlin.Double";
pub const FLOAT: &str = "kotlin.Float";
pub const INT: &str = "kotlin.Int";
pub const LONG: &str = "kotlin.Long";
pub const NUMBER: &str = "kotlin.Number";
pub const SHORT: &str = "kotlin.Short";
pub const STRING: &str = "kotlin.String";
pub const UNIT: &str = "kotlin.Unit";
pub const ENUM: &str = "kotlin.Enum";
pub const COMPARABLE: &str = "kotlin.Comparable";
pub const THROWABLE: &str = "kotlin.Throwable";
pub const DURATION: &str = "kotlin.time.Duration";

pub const LIST: &str = "kotlin.collections.List";
pub const SET: &str = "kotlin.collections.Set";
pub const MAP: &str = "kotlin.collections.Map";

pub const INSTANT: &str = "kotlinx.datetime.Instant";
pub const LOCAL_DATE: &str = "kotlinx.datetime.LocalDate";
pub const LOCAL_TIME: &str = "kotlinx.datetime.LocalTime";
pub const LOCAL_DATE_TIME: &str = "kotlinx.datetime.LocalDateTime";

/// Default binding marker annotation.
pub const BINDING_ANNOTATION: &str = "bridgec.annotation.Binding";
/// Default ignore marker annotation.
pub const BINDING_IGNORE_ANNOTATION: &str = "bridgec.annotation.BindingIgnore";

/// Package prefix of declarations that already exist on the target platform.
pub const PLATFORM_PACKAGE_PREFIX: &str = "platform.";

const FUNCTION_PREFIX: &str = "kotlin.Function";
const SUSPEND_FUNCTION_PREFIX: &str = "kotlin.coroutines.SuspendFunction";

/// Highest arity registered for function types.
pub const MAX_FUNCTION_ARITY: usize = 8;

/// Qualified name of the function type with `arity` parameters.
pub fn function_type(arity: usize) -> String {
    format!("{FUNCTION_PREFIX}{arity}")
}

pub fn suspend_function_type(arity: usize) -> String {
    format!("{SUSPEND_FUNCTION_PREFIX}{arity}")
}

fn has_arity_suffix(qualified_name: &str, prefix: &str) -> bool {
    qualified_name
        .strip_prefix(prefix)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// `kotlin.Function0` .. `kotlin.FunctionN`.
pub fn is_function_type(qualified_name: &str) -> bool {
    has_arity_suffix(qualified_name, FUNCTION_PREFIX)
}

/// `kotlin.coroutines.SuspendFunction0` .. `SuspendFunctionN`.
pub fn is_suspend_function_type(qualified_name: &str) -> bool {
    has_arity_suffix(qualified_name, SUSPEND_FUNCTION_PREFIX)
}
