//! Unit tests for error.rs
//!
//! Tests all Error variants, the Result alias and the engine_err!/engine_bail! macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_platform_error_display() {
    let err = Error::PlatformError("cannot set swap interval".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Platform error"));
    assert!(display.contains("cannot set swap interval"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("cannot create context".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("cannot create context"));
}

#[test]
fn test_invalid_object_display() {
    let err = Error::InvalidObject("object key is stale".to_string());
    assert_eq!(format!("{}", err), "Invalid object: object key is stale");
}

#[test]
fn test_invalid_operation_display() {
    let err = Error::InvalidOperation("cannot reparent into a descendant".to_string());
    assert!(format!("{}", err).starts_with("Invalid operation"));
}

#[test]
fn test_invalid_data_display() {
    let err = Error::InvalidData("expected 64 bytes, got 12".to_string());
    assert!(format!("{}", err).contains("expected 64 bytes"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::PlatformError("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug_names_variant() {
    assert!(format!("{:?}", Error::PlatformError("a".into())).contains("PlatformError"));
    assert!(format!("{:?}", Error::InvalidObject("b".into())).contains("InvalidObject"));
    assert!(format!("{:?}", Error::InvalidData("c".into())).contains("InvalidData"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::InvalidOperation("cycle".to_string());
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));
}

// ============================================================================
// RESULT / PROPAGATION TESTS
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::InvalidObject("gone".to_string()))
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert!(matches!(outer(), Err(Error::InvalidObject(_))));
}

// ============================================================================
// MACRO TESTS
// ============================================================================

#[test]
fn test_engine_err_builds_platform_error() {
    let err = crate::engine_err!("prism3d::Test", "window {} missing", 7);
    match err {
        Error::PlatformError(msg) => assert_eq!(msg, "window 7 missing"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_engine_bail_returns_early() {
    fn fails(flag: bool) -> Result<u32> {
        if flag {
            crate::engine_bail!("prism3d::Test", "bailed with {}", flag);
        }
        Ok(1)
    }

    assert_eq!(fails(false).unwrap(), 1);
    assert!(format!("{}", fails(true).unwrap_err()).contains("bailed with true"));
}
