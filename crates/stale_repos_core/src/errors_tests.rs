use super::*;
use std::error::Error as StdError;

#[test]
fn test_organization_not_found_display() {
    let error = Error::OrganizationNotFound("nonexistent".to_string());
    assert_eq!(error.to_string(), "Organisation with ID nonexistent not found.");
}

#[test]
fn test_invalid_age_expression_display() {
    let error = Error::InvalidAgeExpression {
        unit: "day".to_string(),
        expression: "today".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Invalid age expression 'today': no usable count for unit 'day'"
    );
}

#[test]
fn test_scratch_directory_not_empty_display() {
    let error = Error::ScratchDirectoryNotEmpty(PathBuf::from("/tmp/git_archive"));
    assert_eq!(
        error.to_string(),
        "Scratch directory '/tmp/git_archive' already exists and is not empty"
    );
}

#[test]
fn test_io_error_keeps_path_and_source() {
    let error = Error::io(
        "Failed to create scratch directory",
        "/tmp/git_archive",
        io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    );

    assert_eq!(
        error.to_string(),
        "Failed to create scratch directory '/tmp/git_archive': denied"
    );
    assert!(error.source().is_some());
}

#[test]
fn test_github_error_conversion() {
    let error: Error = github_client::Error::NotFound.into();
    assert_eq!(error.to_string(), "GitHub request failed: Resource not found");
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
