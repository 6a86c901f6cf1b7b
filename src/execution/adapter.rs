// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::AdapterResult;
use crate::execution::input::ExecutionInput;
use crate::execution::output::ExecutionOutput;

/// Runs one transaction against the pre-state carried by the input.
///
/// Byte-identical inputs must produce byte-identical outputs on every
/// platform. Reverts and out-of-gas are returned as outcomes inside
/// `ExecutionOutput`; `Err` is reserved for inputs that can yield no
/// commitment at all.
pub trait ExecutionAdapter {
    fn execute(&self, input: &ExecutionInput) -> AdapterResult<ExecutionOutput>;
}

impl<A: ExecutionAdapter + ?Sized> ExecutionAdapter for &A {
    fn execute(&self, input: &ExecutionInput) -> AdapterResult<ExecutionOutput> {
        (**self).execute(input)
    }
}

impl<A: ExecutionAdapter + ?Sized> ExecutionAdapter for Box<A> {
    fn execute(&self, input: &ExecutionInput) -> AdapterResult<ExecutionOutput> {
        (**self).execute(input)
    }
}
