use super::reporter::Reporter;
use bridgec_common::{BindingError, Location};
use std::path::Path;

fn unresolved_in_chain() -> BindingError {
    BindingError::Unresolved {
        what: "return type".to_string(),
        declaration: "com.example.Holder.get".to_string(),
        location: Location::new("Holder.kt", 3, 5),
    }
    .in_declaration("com.example.Holder.get", Location::new("Holder.kt", 3, 5))
    .in_declaration("com.example.Holder", Location::new("Holder.kt", 1, 1))
}

#[test]
fn formats_binding_error_chain_outermost_first() {
    let reporter = Reporter::new(false);
    let rendered = reporter.format_binding_error(&unresolved_in_chain());

    assert_eq!(
        rendered,
        "error[resolution error]: Type resolution error: return type of 'com.example.Holder.get' at Holder.kt:3:5\n\
         \x20 while processing 'com.example.Holder' at Holder.kt:1:1\n\
         \x20 while processing 'com.example.Holder.get' at Holder.kt:3:5"
    );
}

#[test]
fn formats_unwrapped_error_on_one_line() {
    let reporter = Reporter::new(false);
    let err = BindingError::DepthLimitExceeded {
        ty: "kotlin.Int".to_string(),
        limit: 10,
    };

    assert_eq!(
        reporter.format_binding_error(&err),
        "error[invariant violation]: Depth limit of 10 reached for type: kotlin.Int"
    );
}

#[test]
fn formats_failure_with_context_chain() {
    let reporter = Reporter::new(false);
    let err = anyhow::anyhow!("No such file").context("failed to load declaration graph model.json");

    assert_eq!(
        reporter.format_failure(&err),
        "error: failed to load declaration graph model.json: No such file"
    );
}

#[test]
fn color_wraps_category_label() {
    colored::control::set_override(true);
    let rendered = Reporter::new(true).format_binding_error(&unresolved_in_chain());
    colored::control::unset_override();

    assert!(rendered.contains("\u{1b}["));
    assert!(rendered.contains("error[resolution error]"));
}

#[test]
fn lists_written_paths() {
    let reporter = Reporter::new(false);
    let rendered = reporter.format_written(&[Path::new("out/Api.cs"), Path::new("out/Api.members.json")]);

    assert_eq!(rendered, "wrote out/Api.cs\nwrote out/Api.members.json\n");
}
