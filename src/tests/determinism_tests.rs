// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::state::{AccountState, StateStore};
use crate::types::{Address, Hash};

/// A simple deterministic RNG for tests.
struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    fn new(seed: u64) -> Self {
        Self { state: seed, inc: 1 }
    }

    fn next_u32(&mut self) -> u32 {
        let oldstate = self.state;
        self.state = oldstate.wrapping_mul(6364136223846793005).wrapping_add(self.inc);
        let xorshifted = (((oldstate >> 18) ^ oldstate) >> 27) as u32;
        let rot = (oldstate >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

fn random_accounts(rng: &mut Pcg32, count: usize) -> Vec<(Address, AccountState)> {
    (0..count)
        .map(|i| {
            let mut addr = [0u8; 20];
            addr[..4].copy_from_slice(&rng.next_u32().to_le_bytes());
            addr[19] = i as u8;

            let mut account = AccountState::new_with_balance(rng.next_u32() as u128 + 1);
            account.nonce = (rng.next_u32() % 8) as u64;
            for _ in 0..(rng.next_u32() % 4) {
                let mut slot = [0u8; 32];
                slot[..4].copy_from_slice(&rng.next_u32().to_le_bytes());
                account.set_storage(Hash(slot), Hash::repeat_byte((rng.next_u32() % 255) as u8 + 1));
            }
            (Address(addr), account)
        })
        .collect()
}

/// Fisher-Yates driven by the test RNG.
fn shuffle<T>(rng: &mut Pcg32, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = (rng.next_u32() as usize) % (i + 1);
        items.swap(i, j);
    }
}

#[test]
fn test_state_root_independent_of_insertion_order() {
    let mut rng = Pcg32::new(42);
    let accounts = random_accounts(&mut rng, 32);

    let reference: StateStore = accounts.iter().cloned().collect();
    let expected = reference.compute_state_root();

    for seed in 0..10 {
        let mut shuffled = accounts.clone();
        shuffle(&mut Pcg32::new(seed), &mut shuffled);
        let store: StateStore = shuffled.into_iter().collect();
        assert_eq!(store.compute_state_root(), expected, "seed {} diverged", seed);
    }
}

#[test]
fn test_state_root_independent_of_mutation_history() {
    let addr = Address::repeat_byte(9);

    let mut direct = StateStore::new();
    direct.write(addr, AccountState::new_with_balance(10));

    let mut detoured = StateStore::new();
    detoured.write(addr, AccountState::new_with_balance(999));
    detoured.write(Address::repeat_byte(1), AccountState::new_with_balance(5));
    detoured.write(Address::repeat_byte(1), AccountState::default());
    let mut account = AccountState::new_with_balance(10);
    account.set_storage(Hash::repeat_byte(1), Hash::repeat_byte(1));
    account.set_storage(Hash::repeat_byte(1), Hash::ZERO);
    detoured.write(addr, account);

    assert_eq!(direct.compute_state_root(), detoured.compute_state_root());
}

#[test]
fn test_state_root_is_stable_across_calls() {
    let mut rng = Pcg32::new(7);
    let store: StateStore = random_accounts(&mut rng, 8).into_iter().collect();
    assert_eq!(store.compute_state_root(), store.clone().compute_state_root());
}
