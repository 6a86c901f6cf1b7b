pub mod determinism_tests;
pub mod adapter_tests;
