// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::errors::NodeError;
use crate::telemetry::DEFAULT_LOG_FILTER;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use transition_kernel::{EdgePolicy, LedgerConfig, ProgramId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Program whose proofs the ledger accepts.
    pub program_id: ProgramId,
    pub edge_policy: EdgePolicy,
    /// Durable event log. `None` keeps the ledger in memory only.
    pub event_log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            program_id: ProgramId::ZERO,
            edge_policy: EdgePolicy::default(),
            event_log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl NodeConfig {
    pub fn new(program_id: ProgramId) -> Self {
        Self {
            program_id,
            ..Default::default()
        }
    }

    pub fn with_event_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.event_log_path = Some(path.into());
        self
    }

    pub fn with_edge_policy(mut self, edge_policy: EdgePolicy) -> Self {
        self.edge_policy = edge_policy;
        self
    }

    /// Fields missing from the file keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn to_ledger_config(&self) -> LedgerConfig {
        LedgerConfig::new(self.program_id).with_edge_policy(self.edge_policy)
    }
}
