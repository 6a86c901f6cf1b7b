// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::AdapterError;
use crate::execution::{
    derive_create_address, ExecutionAdapter, ExecutionEnvironment, ExecutionInput, ExecutionOutcome, NativeAdapter,
    Transaction, GWEI,
};
use crate::state::{AccountState, StateStore};
use crate::types::{Address, Wei};

const CALLER: Address = Address::repeat_byte(0xaa);
const RECIPIENT: Address = Address::repeat_byte(0xbb);
const BENEFICIARY: Address = Address::repeat_byte(0xcc);
const ETHER: Wei = 1_000_000_000_000_000_000;

fn funded(balance: Wei) -> StateStore {
    [(CALLER, AccountState::new_with_balance(balance))].into_iter().collect()
}

fn env() -> ExecutionEnvironment {
    ExecutionEnvironment::default().with_beneficiary(BENEFICIARY)
}

fn total_supply(state: &StateStore) -> Wei {
    state.iter().map(|(_, account)| account.balance).sum()
}

fn run(tx: Transaction, pre_state: StateStore) -> Result<crate::execution::ExecutionOutput, AdapterError> {
    NativeAdapter::new().execute(&ExecutionInput::new(env(), tx, pre_state))
}

#[test]
fn test_transfer_moves_value_and_settles_fee() {
    let tx = Transaction::transfer(CALLER, RECIPIENT, 1_000).with_gas_price(2 * GWEI);
    let pre = funded(ETHER);
    let output = run(tx, pre.clone()).unwrap();

    assert_eq!(output.outcome, ExecutionOutcome::Success);
    assert_eq!(output.gas_used, 21_000);

    let post = &output.post_state;
    let caller = post.read(&CALLER);
    assert_eq!(caller.nonce, 1);
    assert_eq!(caller.balance, ETHER - 21_000 * 2 * GWEI - 1_000);
    assert_eq!(post.read(&RECIPIENT).balance, 1_000);
    assert_eq!(post.read(&BENEFICIARY).balance, 21_000 * GWEI);

    // Base fee is burned.
    assert_eq!(total_supply(&pre) - total_supply(post), 21_000 * GWEI);
}

#[test]
fn test_self_transfer_only_pays_fee() {
    let tx = Transaction::transfer(CALLER, CALLER, 5_000);
    let output = run(tx, funded(ETHER)).unwrap();

    assert!(output.is_success());
    assert_eq!(output.post_state.read(&CALLER).balance, ETHER - 21_000 * GWEI);
}

#[test]
fn test_gas_below_intrinsic_is_out_of_gas() {
    let tx = Transaction::transfer(CALLER, RECIPIENT, 1_000).with_gas_limit(20_000);
    let output = run(tx, funded(ETHER)).unwrap();

    assert_eq!(output.outcome, ExecutionOutcome::OutOfGas);
    assert_eq!(output.gas_used, 20_000);

    let caller = output.post_state.read(&CALLER);
    assert_eq!(caller.nonce, 1);
    assert_eq!(caller.balance, ETHER - 20_000 * GWEI);
    assert!(!output.post_state.contains(&RECIPIENT));
}

#[test]
fn test_unaffordable_value_reverts() {
    let tx = Transaction::transfer(CALLER, RECIPIENT, 100);
    let output = run(tx, funded(21_000 * GWEI + 10)).unwrap();

    assert_eq!(output.outcome, ExecutionOutcome::Reverted);
    assert_eq!(output.gas_used, 21_000);
    assert!(output.logs.is_empty());

    let caller = output.post_state.read(&CALLER);
    assert_eq!(caller.nonce, 1);
    assert_eq!(caller.balance, 10);
    assert!(!output.post_state.contains(&RECIPIENT));
}

#[test]
fn test_create_installs_code() {
    let code = vec![0x60, 0x00, 0x60, 0x00];
    let tx = Transaction::create(CALLER, code.clone(), 5);
    let output = run(tx, funded(ETHER)).unwrap();

    let target = derive_create_address(&CALLER, 0);
    assert!(output.is_success());
    assert_eq!(output.created_address, Some(target));

    let contract = output.post_state.read(&target);
    assert_eq!(contract.code, code);
    assert_eq!(contract.nonce, 1);
    assert_eq!(contract.balance, 5);
    assert_eq!(output.post_state.read(&CALLER).nonce, 1);
}

#[test]
fn test_create_collision_reverts() {
    let target = derive_create_address(&CALLER, 0);
    let mut pre = funded(ETHER);
    pre.write(target, AccountState::new_contract(vec![0x01], 0));

    let output = run(Transaction::create(CALLER, vec![0x02], 0), pre).unwrap();
    assert_eq!(output.outcome, ExecutionOutcome::Reverted);
    assert_eq!(output.created_address, None);
    assert_eq!(output.post_state.read(&target).code, vec![0x01]);
}

#[test]
fn test_create_keeps_prefunded_balance() {
    let target = derive_create_address(&CALLER, 0);
    let mut pre = funded(ETHER);
    pre.write(target, AccountState::new_with_balance(7));

    let output = run(Transaction::create(CALLER, vec![0x02], 3), pre).unwrap();
    assert!(output.is_success());
    assert_eq!(output.post_state.read(&target).balance, 10);
}

#[test]
fn test_fatal_aborts() {
    let cases: Vec<(Transaction, StateStore)> = vec![
        (Transaction::transfer(CALLER, RECIPIENT, 1).with_gas_limit(40_000_000), funded(ETHER)),
        (Transaction::transfer(CALLER, RECIPIENT, 1).with_gas_price(GWEI - 1), funded(ETHER)),
        (Transaction::transfer(CALLER, RECIPIENT, 1).with_nonce(3), funded(ETHER)),
        (Transaction::transfer(CALLER, RECIPIENT, 1), funded(100)),
        (Transaction::transfer(CALLER, RECIPIENT, 1).with_gas_price(u128::MAX), funded(ETHER)),
    ];

    let errors: Vec<AdapterError> = cases
        .into_iter()
        .map(|(tx, pre)| run(tx, pre).unwrap_err())
        .collect();

    assert_eq!(
        errors[0],
        AdapterError::GasLimitExceedsBlock {
            tx: 40_000_000,
            block: 30_000_000
        }
    );
    assert!(matches!(errors[1], AdapterError::FeeBelowBaseFee { .. }));
    assert_eq!(
        errors[2],
        AdapterError::NonceMismatch {
            caller: CALLER,
            expected: 0,
            found: 3
        }
    );
    assert_eq!(
        errors[3],
        AdapterError::InsufficientFundsForGas {
            caller: CALLER,
            required: 21_000 * GWEI,
            available: 100
        }
    );
    assert!(matches!(errors[4], AdapterError::ArithmeticOverflow(_)));
}

#[test]
fn test_call_into_code_is_fatal() {
    let contract = Address::repeat_byte(0xdd);
    let mut pre = funded(ETHER);
    pre.write(contract, AccountState::new_contract(vec![0x00], 0));

    let err = run(Transaction::call(CALLER, contract, vec![1, 2, 3]), pre).unwrap_err();
    assert_eq!(err, AdapterError::UnsupportedBytecode(contract));
}

#[test]
fn test_identical_inputs_identical_outputs() {
    let input = ExecutionInput::new(
        env(),
        Transaction::transfer(CALLER, RECIPIENT, 42).with_gas_price(3 * GWEI),
        funded(ETHER),
    );
    let adapter = NativeAdapter::new();

    let first = adapter.execute(&input).unwrap();
    let second = adapter.execute(&input.clone()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.hash(), second.hash());
}
