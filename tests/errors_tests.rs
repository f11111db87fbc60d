//! Error type tests

use chote::errors::ChoteError;

#[test]
fn test_error_codes_are_stable() {
    assert_eq!(ChoteError::code_taken("x").code(), "E101");
    assert_eq!(ChoteError::uniqueness_violation("x").code(), "E102");
    assert_eq!(ChoteError::invalid_code("x").code(), "E103");
    assert_eq!(ChoteError::config("x").code(), "E201");
    assert_eq!(ChoteError::database_config("x").code(), "E301");
    assert_eq!(ChoteError::database_connection("x").code(), "E302");
    assert_eq!(ChoteError::database_operation("x").code(), "E303");
    assert_eq!(ChoteError::file_operation("x").code(), "E401");
    assert_eq!(ChoteError::serialization("x").code(), "E402");
}

#[test]
fn test_rejections_versus_failures() {
    assert!(ChoteError::code_taken("x").is_rejection());
    assert!(ChoteError::uniqueness_violation("x").is_rejection());
    assert!(ChoteError::invalid_code("x").is_rejection());
    assert!(!ChoteError::database_operation("x").is_rejection());
    assert!(!ChoteError::config("x").is_rejection());
}

#[test]
fn test_display_uses_simple_format() {
    let err = ChoteError::code_taken("oops");
    assert_eq!(err.to_string(), "Code Already Taken: oops");
    assert_eq!(err.message(), "oops");
}

#[test]
fn test_from_io_error() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: ChoteError = io.into();
    assert!(matches!(err, ChoteError::FileOperation(_)));
    assert!(err.message().contains("missing"));
}

#[test]
fn test_colored_output_contains_code_and_message() {
    colored::control::set_override(false);
    let out = ChoteError::invalid_code("bad").format_colored();
    assert!(out.contains("E103"));
    assert!(out.contains("bad"));
}
