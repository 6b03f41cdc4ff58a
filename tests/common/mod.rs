//! Common test utilities and mock implementations


pub use mock_interface::MockError;
pub use test_utils::{
    assert_float_eq, create_mock_driver, create_ready_driver, default_config,
};
