use super::*;

fn unresolved() -> BindingError {
    BindingError::Unresolved {
        what: "return type".to_string(),
        declaration: "com.example.Api.load".to_string(),
        location: Location::new("Api.kt", 12, 5),
    }
}

#[test]
fn test_category_of_plain_errors() {
    assert_eq!(unresolved().category(), ErrorCategory::Resolution);
    assert_eq!(
        BindingError::DepthLimitExceeded {
            ty: "Node<Node<Int>>".to_string(),
            limit: 10,
        }
        .category(),
        ErrorCategory::InvariantViolation
    );
    assert_eq!(
        BindingError::MissingWellKnownType {
            qualified_name: "kotlin.Any".to_string(),
        }
        .category(),
        ErrorCategory::UnsupportedConstruct
    );
}

#[test]
fn test_wrapped_error_reports_root_category() {
    let err = unresolved()
        .in_declaration("com.example.Api", Location::new("Api.kt", 3, 1))
        .in_declaration("com.example", Location::unknown());

    assert_eq!(err.category(), ErrorCategory::Resolution);
    assert_eq!(err.chain().count(), 3);
    assert_eq!(err.root_cause(), &unresolved());
}

#[test]
fn test_display_includes_identity_and_location() {
    let message = unresolved().to_string();
    assert!(message.contains("com.example.Api.load"), "{message}");
    assert!(message.contains("Api.kt:12:5"), "{message}");
}

#[test]
fn test_source_chain_is_exposed() {
    use std::error::Error as _;

    let err = unresolved().in_declaration("com.example.Api", Location::unknown());
    let source = err.source().map(|s| s.to_string()).unwrap_or_default();
    assert!(source.starts_with("Type resolution error"), "{source}");
    assert!(err.to_string().contains("<unknown location>"));
}
