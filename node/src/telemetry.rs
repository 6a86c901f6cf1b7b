// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use transition_kernel::LedgerError;

pub const DEFAULT_LOG_FILTER: &str = "transition_node=info,transition_kernel=info";

pub const SUBMISSIONS_ACCEPTED: &str = "transition_submissions_accepted_total";
pub const SUBMISSIONS_REJECTED: &str = "transition_submissions_rejected_total";
pub const EVENTS_COMMITTED: &str = "transition_events_committed_total";
pub const COMMIT_DURATION: &str = "transition_event_commit_duration_seconds";
pub const REPLAY_DURATION: &str = "transition_replay_duration_seconds";
pub const LEDGER_HEIGHT: &str = "transition_ledger_height";
pub const NODE_UP: &str = "transition_node_up";

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize tracing. `RUST_LOG` takes precedence over `default_filter`.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place and return `false`.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

/// Installs the Prometheus recorder and describes the node's metrics.
///
/// Returns `false` when a recorder is already installed. Until this runs,
/// recording a metric is a no-op.
pub fn init_metrics() -> bool {
    let handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(error = %e, "Metrics recorder not installed");
            return false;
        }
    };
    if PROM_HANDLE.set(handle).is_err() {
        tracing::warn!("Prometheus handle already set. Telemetry re-initialized?");
        return false;
    }

    metrics::describe_counter!(SUBMISSIONS_ACCEPTED, "Commitments accepted into the ledger");
    metrics::describe_counter!(SUBMISSIONS_REJECTED, "Submissions rejected, by reason");
    metrics::describe_counter!(EVENTS_COMMITTED, "Ledger events committed");
    metrics::describe_histogram!(COMMIT_DURATION, "Time taken to persist and commit one call");
    metrics::describe_histogram!(REPLAY_DURATION, "Time taken to replay the event log");
    metrics::describe_gauge!(LEDGER_HEIGHT, "Accepted commitments in the ledger");

    metrics::gauge!(NODE_UP, 1.0);
    true
}

/// Prometheus text exposition of every recorded metric.
pub fn render_metrics() -> String {
    match PROM_HANDLE.get() {
        Some(handle) => handle.render(),
        None => "# metrics not initialized".to_string(),
    }
}

/// Label value for a rejected submission.
pub fn rejection_reason(err: &LedgerError) -> &'static str {
    match err {
        LedgerError::MalformedJournal(_) => "malformed_journal",
        LedgerError::ProofRejected => "proof_rejected",
        LedgerError::Replay(_) => "replay",
        LedgerError::BatchLengthMismatch { .. } => "batch_length_mismatch",
        LedgerError::StateRootCollision { .. } => "state_root_collision",
        LedgerError::StalePreparation { .. } => "stale_preparation",
        LedgerError::CorruptHistory(_) => "corrupt_history",
    }
}
