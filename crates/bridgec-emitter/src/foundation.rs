//! Foundational declarations present in every generated file.
//!
//! These mirror the classes the native framework always exports: the root
//! object, the unit wrapper, the comparable and enum markers, the throwable
//! type and the calendar value types with their companions.

use crate::csharp::types::native_object;
use crate::csharp::{
    AttributeList, ClassName, InterfaceDeclarationSpec, MemberSignature, MemberSpec, NamespaceSpecBuilder,
    ParameterSpec, TargetType, base_type_attribute, export_attribute,
};
use crate::naming::BindingNames;
use crate::type_mapping::NULL_ALLOWED;

fn local(name: &str) -> TargetType {
    ClassName::keyword(name).into()
}

fn param(name: &str, ty: &str) -> ParameterSpec {
    ParameterSpec::new(name, local(ty))
}

fn exported(export: &str) -> AttributeList {
    AttributeList::new([export_attribute(export)])
}

fn designated_constructor(export: &str, parameters: Vec<ParameterSpec>) -> MemberSpec {
    MemberSpec::with_attribute_lines(
        vec![exported(export), AttributeList::new(["DesignatedInitializer"])],
        MemberSignature::Constructor { parameters },
    )
}

fn getter(export: &str, ty: &str, name: &str) -> MemberSpec {
    MemberSpec::new(
        exported(export),
        MemberSignature::Property {
            ty: local(ty),
            name: name.to_string(),
            mutable: false,
        },
    )
}

fn method(export: &str, return_type: &str, name: &str, parameters: Vec<ParameterSpec>) -> MemberSpec {
    MemberSpec::new(
        exported(export),
        MemberSignature::Method {
            return_type: local(return_type),
            name: name.to_string(),
            parameters,
        },
    )
}

fn companion_accessor(companion: &str) -> MemberSpec {
    MemberSpec::with_attribute_lines(
        vec![AttributeList::new(["Static"]), exported("companion")],
        MemberSignature::Companion {
            ty: companion.to_string(),
        },
    )
}

/// Add every foundational declaration to `builder`.
pub fn add_foundation_declarations(builder: &mut NamespaceSpecBuilder, names: &BindingNames) {
    let base = names.prefixed("Base");
    let extends_base = || AttributeList::new([base_type_attribute(&base)]);

    let mut root = InterfaceDeclarationSpec::new(AttributeList::new([base_type_attribute("NSObject")]), &base)
        .implementing(native_object().into());
    root.push(method("description", "string", "ToString", vec![]));
    builder.add_interface(root);

    builder.add_interface(
        InterfaceDeclarationSpec::new(extends_base(), names.prefixed("KotlinUnit")).implementing(names.base().into()),
    );
    builder.add_interface(InterfaceDeclarationSpec::new(
        AttributeList::new(["Protocol"]),
        names.prefixed("KotlinComparable"),
    ));
    builder.add_interface(InterfaceDeclarationSpec::new(extends_base(), names.prefixed("KotlinEnum")));

    let mut throwable = InterfaceDeclarationSpec::new(extends_base(), names.prefixed("KotlinThrowable"));
    throwable.push(designated_constructor(
        "initWithMessage:",
        vec![ParameterSpec::new(
            "message",
            ClassName::keyword("string")
                .with_attributes(vec![NULL_ALLOWED.to_string()])
                .into(),
        )],
    ));
    throwable.push(MemberSpec::new(
        AttributeList::new([NULL_ALLOWED.to_string(), export_attribute("message")]),
        MemberSignature::Property {
            ty: local("string"),
            name: "Message".to_string(),
            mutable: false,
        },
    ));
    throwable.push(getter("asError", "NSError", "AsError"));
    builder.add_interface(throwable);

    add_calendar_declarations(builder, names, &extends_base);
}

fn add_calendar_declarations(
    builder: &mut NamespaceSpecBuilder,
    names: &BindingNames,
    extends_base: &dyn Fn() -> AttributeList,
) {
    let local_date = names.prefixed("Kotlinx_datetimeLocalDate");
    let local_date_companion = format!("{local_date}Companion");
    let mut date = InterfaceDeclarationSpec::new(extends_base(), &local_date);
    date.push(designated_constructor(
        "initWithYear:monthNumber:dayOfMonth:",
        vec![param("year", "int"), param("monthNumber", "int"), param("dayOfMonth", "int")],
    ));
    date.push(getter("year", "int", "Year"));
    date.push(getter("monthNumber", "int", "MonthNumber"));
    date.push(getter("dayOfMonth", "int", "DayOfMonth"));
    date.push(companion_accessor(&local_date_companion));
    builder.add_interface(date);

    let mut date_companion = InterfaceDeclarationSpec::new(extends_base(), &local_date_companion);
    date_companion.push(method(
        "fromEpochDaysEpochDays:",
        &local_date,
        "FromEpochDays",
        vec![param("epochDays", "int")],
    ));
    builder.add_interface(date_companion);

    let instant_name = names.prefixed("Kotlinx_datetimeInstant");
    let instant_companion = format!("{instant_name}Companion");
    let mut instant = InterfaceDeclarationSpec::new(extends_base(), &instant_name);
    instant.push(method("toEpochMilliseconds", "long", "ToEpochMilliseconds", vec![]));
    instant.push(companion_accessor(&instant_companion));
    builder.add_interface(instant);

    let mut instant_statics = InterfaceDeclarationSpec::new(extends_base(), &instant_companion);
    instant_statics.push(method(
        "fromEpochMillisecondsEpochMilliseconds:",
        &instant_name,
        "FromEpochMilliseconds",
        vec![param("epochMilliseconds", "long")],
    ));
    instant_statics.push(method(
        "fromEpochSecondsEpochSeconds:nanosecondAdjustment:",
        &instant_name,
        "FromEpochSeconds",
        vec![param("epochSeconds", "long"), param("nanosecondAdjustment", "int")],
    ));
    instant_statics.push(method(
        "fromEpochSecondsEpochSeconds:nanosecondAdjustment_:",
        &instant_name,
        "FromEpochSeconds",
        vec![param("epochSeconds", "long"), param("nanosecondAdjustment", "long")],
    ));
    instant_statics.push(getter("DISTANT_FUTURE", &instant_name, "DISTANT_FUTURE"));
    instant_statics.push(getter("DISTANT_PAST", &instant_name, "DISTANT_PAST"));
    builder.add_interface(instant_statics);

    let local_time = names.prefixed("Kotlinx_datetimeLocalTime");
    let local_time_companion = format!("{local_time}Companion");
    let mut time = InterfaceDeclarationSpec::new(extends_base(), &local_time);
    time.push(designated_constructor(
        "initWithHour:minute:second:nanosecond:",
        vec![
            param("hour", "int"),
            param("minute", "int"),
            param("second", "int"),
            param("nanosecond", "int"),
        ],
    ));
    time.push(getter("hour", "int", "Hour"));
    time.push(getter("minute", "int", "Minute"));
    time.push(getter("nanosecond", "int", "Nanosecond"));
    time.push(getter("second", "int", "Second"));
    time.push(companion_accessor(&local_time_companion));
    builder.add_interface(time);

    let mut time_companion = InterfaceDeclarationSpec::new(extends_base(), &local_time_companion);
    time_companion.push(method(
        "fromMillisecondOfDayMillisecondOfDay:",
        &local_time,
        "FromMillisecondOfDay",
        vec![param("millisecondOfDay", "int")],
    ));
    time_companion.push(method(
        "fromNanosecondOfDayNanosecondOfDay:",
        &local_time,
        "FromNanosecondOfDay",
        vec![param("nanosecondOfDay", "long")],
    ));
    time_companion.push(method(
        "fromSecondOfDaySecondOfDay:",
        &local_time,
        "FromSecondOfDay",
        vec![param("secondOfDay", "int")],
    ));
    builder.add_interface(time_companion);

    let mut date_time = InterfaceDeclarationSpec::new(extends_base(), names.prefixed("Kotlinx_datetimeLocalDateTime"));
    date_time.push(designated_constructor(
        "initWithYear:monthNumber:dayOfMonth:hour:minute:second:nanosecond:",
        ["year", "monthNumber", "dayOfMonth", "hour", "minute", "second", "nanosecond"]
            .into_iter()
            .map(|name| param(name, "int"))
            .collect(),
    ));
    date_time.push(getter("date", &local_date, "Date"));
    date_time.push(getter("time", &local_time, "Time"));
    builder.add_interface(date_time);
}

#[cfg(test)]
#[path = "tests/foundation_tests.rs"]
mod tests;
