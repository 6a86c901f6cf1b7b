// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod account;
pub mod store;

pub use account::AccountState;
pub use store::StateStore;
