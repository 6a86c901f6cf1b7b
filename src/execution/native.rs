// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Native reference adapter.
//!
//! Handles value transfers and raw code deployment without interpreting any
//! bytecode. A call that would need an interpreter is a fatal abort, so this
//! adapter never commits to an outcome it cannot reproduce exactly.
//!
//! # Order of checks
//! ```text
//! 1. fatal: block gas limit, base fee, nonce, upfront gas funds, code target
//! 2. nonce bump (every non-fatal outcome)
//! 3. gas_limit < intrinsic        -> OutOfGas, whole limit charged
//! 4. fee charged on intrinsic gas
//! 5. value not covered / collision -> Reverted
//! 6. value moved or code installed -> Success
//! ```

use crate::error::{AdapterError, AdapterResult};
use crate::execution::adapter::ExecutionAdapter;
use crate::execution::input::{ExecutionEnvironment, ExecutionInput, Transaction};
use crate::execution::output::ExecutionOutput;
use crate::hashing::{CanonicalHasher, CREATE_DOMAIN};
use crate::state::{AccountState, StateStore};
use crate::types::{Address, Gas, Wei};

pub const TX_BASE_GAS: Gas = 21_000;
pub const TX_CREATE_GAS: Gas = 32_000;
pub const ZERO_BYTE_GAS: Gas = 4;
pub const NONZERO_BYTE_GAS: Gas = 16;
pub const CODE_DEPOSIT_GAS: Gas = 200;

#[derive(Clone, Copy, Debug, Default)]
pub struct NativeAdapter;

impl NativeAdapter {
    pub fn new() -> Self {
        Self
    }
}

/// Gas charged before any effect is applied.
pub fn intrinsic_gas(tx: &Transaction) -> AdapterResult<Gas> {
    let zeros = tx.data.iter().filter(|b| **b == 0).count() as Gas;
    let non_zeros = tx.data.len() as Gas - zeros;

    let mut gas = zeros
        .checked_mul(ZERO_BYTE_GAS)
        .and_then(|z| non_zeros.checked_mul(NONZERO_BYTE_GAS).and_then(|n| z.checked_add(n)))
        .and_then(|d| d.checked_add(TX_BASE_GAS))
        .ok_or(AdapterError::ArithmeticOverflow("intrinsic gas"))?;

    if tx.is_create() {
        let deposit = (tx.data.len() as Gas)
            .checked_mul(CODE_DEPOSIT_GAS)
            .ok_or(AdapterError::ArithmeticOverflow("code deposit gas"))?;
        gas = gas
            .checked_add(TX_CREATE_GAS)
            .and_then(|g| g.checked_add(deposit))
            .ok_or(AdapterError::ArithmeticOverflow("intrinsic gas"))?;
    }

    Ok(gas)
}

/// Address a creation from `caller` at `nonce` deploys to.
pub fn derive_create_address(caller: &Address, nonce: u64) -> Address {
    let hash = CanonicalHasher::new(CREATE_DOMAIN)
        .write_address(caller)
        .write_u64(nonce)
        .finalize();

    let mut bytes = [0u8; Address::LEN];
    bytes.copy_from_slice(&hash.as_bytes()[32 - Address::LEN..]);
    Address(bytes)
}

fn gas_cost(gas: Gas, price: Wei, what: &'static str) -> AdapterResult<Wei> {
    (gas as Wei)
        .checked_mul(price)
        .ok_or(AdapterError::ArithmeticOverflow(what))
}

fn debit(state: &mut StateStore, address: Address, amount: Wei, what: &'static str) -> AdapterResult<()> {
    let mut account = state.read(&address);
    account.balance = account
        .balance
        .checked_sub(amount)
        .ok_or(AdapterError::ArithmeticOverflow(what))?;
    state.write(address, account);
    Ok(())
}

fn credit(state: &mut StateStore, address: Address, amount: Wei, what: &'static str) -> AdapterResult<()> {
    if amount == 0 {
        return Ok(());
    }
    let mut account = state.read(&address);
    account.balance = account
        .balance
        .checked_add(amount)
        .ok_or(AdapterError::ArithmeticOverflow(what))?;
    state.write(address, account);
    Ok(())
}

/// Charges `gas_used` to the caller and pays the priority part to the
/// beneficiary. The base fee part leaves circulation.
fn settle_fee(state: &mut StateStore, env: &ExecutionEnvironment, tx: &Transaction, gas_used: Gas) -> AdapterResult<()> {
    let fee = gas_cost(gas_used, tx.gas_price, "fee")?;
    debit(state, tx.caller, fee, "fee debit")?;

    let tip = gas_cost(gas_used, tx.gas_price - env.base_fee, "priority fee")?;
    credit(state, env.beneficiary, tip, "priority fee credit")
}

impl NativeAdapter {
    fn check_fatal(&self, input: &ExecutionInput) -> AdapterResult<()> {
        let env = &input.env;
        let tx = &input.tx;

        if tx.gas_limit > env.gas_limit {
            return Err(AdapterError::GasLimitExceedsBlock {
                tx: tx.gas_limit,
                block: env.gas_limit,
            });
        }
        if tx.gas_price < env.base_fee {
            return Err(AdapterError::FeeBelowBaseFee {
                gas_price: tx.gas_price,
                base_fee: env.base_fee,
            });
        }

        let caller = input.pre_state.read(&tx.caller);
        if tx.nonce != caller.nonce {
            return Err(AdapterError::NonceMismatch {
                caller: tx.caller,
                expected: caller.nonce,
                found: tx.nonce,
            });
        }

        let upfront = gas_cost(tx.gas_limit, tx.gas_price, "upfront gas cost")?;
        if caller.balance < upfront {
            return Err(AdapterError::InsufficientFundsForGas {
                caller: tx.caller,
                required: upfront,
                available: caller.balance,
            });
        }

        if let Some(to) = tx.to {
            if input.pre_state.read(&to).is_contract() {
                return Err(AdapterError::UnsupportedBytecode(to));
            }
        }

        Ok(())
    }
}

impl ExecutionAdapter for NativeAdapter {
    fn execute(&self, input: &ExecutionInput) -> AdapterResult<ExecutionOutput> {
        self.check_fatal(input)?;

        let env = &input.env;
        let tx = &input.tx;
        let intrinsic = intrinsic_gas(tx)?;
        let mut state = input.pre_state.clone();

        let mut caller = state.read(&tx.caller);
        caller.nonce = caller
            .nonce
            .checked_add(1)
            .ok_or(AdapterError::ArithmeticOverflow("caller nonce"))?;
        state.write(tx.caller, caller);

        if tx.gas_limit < intrinsic {
            settle_fee(&mut state, env, tx, tx.gas_limit)?;
            return Ok(ExecutionOutput::out_of_gas(tx.gas_limit, state));
        }

        settle_fee(&mut state, env, tx, intrinsic)?;

        if state.read(&tx.caller).balance < tx.value {
            return Ok(ExecutionOutput::reverted(Vec::new(), intrinsic, state));
        }

        match tx.to {
            Some(to) => {
                debit(&mut state, tx.caller, tx.value, "value debit")?;
                credit(&mut state, to, tx.value, "value credit")?;
                Ok(ExecutionOutput::success(Vec::new(), intrinsic, Vec::new(), state))
            }
            None => {
                let target = derive_create_address(&tx.caller, tx.nonce);
                let existing = state.read(&target);
                if existing.is_contract() || existing.nonce != 0 {
                    return Ok(ExecutionOutput::reverted(Vec::new(), intrinsic, state));
                }

                debit(&mut state, tx.caller, tx.value, "value debit")?;
                let balance = existing
                    .balance
                    .checked_add(tx.value)
                    .ok_or(AdapterError::ArithmeticOverflow("endowment"))?;
                state.write(target, AccountState::new_contract(tx.data.clone(), balance));

                Ok(ExecutionOutput::success(Vec::new(), intrinsic, Vec::new(), state)
                    .with_created_address(target))
            }
        }
    }
}
