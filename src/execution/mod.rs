// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod adapter;
pub mod input;
pub mod native;
pub mod output;

pub use adapter::ExecutionAdapter;
pub use input::{ExecutionEnvironment, ExecutionInput, Transaction, GWEI};
pub use native::{derive_create_address, intrinsic_gas, NativeAdapter};
pub use output::{ExecutionOutcome, ExecutionOutput, Log};
