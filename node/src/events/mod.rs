// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod event_log;
pub mod event_replay;

pub use event_log::{EventLogError, EventLogWriter};
pub use event_replay::{read_event_log, recover_from_event_log, LogPosition, RecoveredLog, ReplayError};
