// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod id;

pub use id::{Address, Hash, ProgramId, Version};

/// Gas amount.
pub type Gas = u64;

/// Balances and transferred values.
pub type Wei = u128;

pub type BlockNumber = u64;

/// Seconds since epoch, always supplied by the caller.
pub type Timestamp = u64;
