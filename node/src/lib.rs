// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod config;
pub mod engine;
pub mod errors;
pub mod events;
pub mod submission;
pub mod telemetry;

pub use config::NodeConfig;
pub use engine::LedgerNode;
pub use errors::NodeError;
pub use submission::Submission;
