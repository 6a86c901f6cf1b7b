// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Off-chain pipeline: execute, commit, encode.

use crate::commitment::{ExecutionCommitment, JOURNAL_LEN};
use crate::error::AdapterResult;
use crate::execution::{ExecutionAdapter, ExecutionEnvironment, ExecutionInput, ExecutionOutput, Transaction};
use crate::state::{AccountState, StateStore};
use crate::types::Address;

/// Everything produced for one input, ready to hand to a prover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Execution {
    pub output: ExecutionOutput,
    pub commitment: ExecutionCommitment,
    pub journal: [u8; JOURNAL_LEN],
}

/// Runs `input` through `adapter` and commits to the result.
///
/// A fatal abort is returned as-is; no commitment or journal exists for it.
pub fn execute_and_commit<A: ExecutionAdapter + ?Sized>(adapter: &A, input: &ExecutionInput) -> AdapterResult<Execution> {
    let output = adapter.execute(input)?;
    let commitment = ExecutionCommitment::from_execution(input, &output);
    let journal = commitment.to_journal();

    Ok(Execution {
        output,
        commitment,
        journal,
    })
}

/// Dry run: classifies `input` and prices its gas without producing a
/// commitment. The returned output carries the untouched pre-state.
pub fn simulate<A: ExecutionAdapter + ?Sized>(adapter: &A, input: &ExecutionInput) -> AdapterResult<ExecutionOutput> {
    let mut output = adapter.execute(input)?;
    output.post_state = input.pre_state.clone();
    Ok(output)
}

#[derive(Clone, Debug, Default)]
pub struct ExecutionBuilder {
    env: ExecutionEnvironment,
    tx: Transaction,
    state: StateStore,
}

impl ExecutionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env(mut self, env: ExecutionEnvironment) -> Self {
        self.env = env;
        self
    }

    pub fn with_tx(mut self, tx: Transaction) -> Self {
        self.tx = tx;
        self
    }

    pub fn with_state(mut self, state: StateStore) -> Self {
        self.state = state;
        self
    }

    pub fn with_account(mut self, address: Address, account: AccountState) -> Self {
        self.state.write(address, account);
        self
    }

    pub fn build(self) -> ExecutionInput {
        ExecutionInput::new(self.env, self.tx, self.state)
    }

    pub fn execute<A: ExecutionAdapter + ?Sized>(self, adapter: &A) -> AdapterResult<Execution> {
        execute_and_commit(adapter, &self.build())
    }

    pub fn simulate<A: ExecutionAdapter + ?Sized>(self, adapter: &A) -> AdapterResult<ExecutionOutput> {
        simulate(adapter, &self.build())
    }
}
