//! Tests to verify that all public types are Send + Sync as required.

use mockfs_core::cli::{ExitCode, OutputFormat};
use mockfs_core::*;

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_domain_types_are_send_sync() {
    assert_send_sync::<ByteSize>();
    assert_send_sync::<PieceSize>();
    assert_send_sync::<Seed>();
    assert_send_sync::<FileMode>();
}

#[test]
fn test_config_types_are_send_sync() {
    assert_send_sync::<GeneratorConfig>();
    assert_send_sync::<DigestAlgorithm>();
    assert_send_sync::<OutputFormat>();
    assert_send_sync::<ExitCode>();
}

#[test]
fn test_error_is_send_sync() {
    assert_send_sync::<Error>();
}
