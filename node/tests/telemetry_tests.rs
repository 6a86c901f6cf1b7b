// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use tempfile::tempdir;
use transition_kernel::{dev_seal, Address, DevModeOracle, ExecutionCommitment, Hash, ProgramId};
use transition_node::telemetry::{
    init_metrics, render_metrics, COMMIT_DURATION, EVENTS_COMMITTED, LEDGER_HEIGHT, REPLAY_DURATION,
    SUBMISSIONS_ACCEPTED, SUBMISSIONS_REJECTED,
};
use transition_node::{LedgerNode, NodeConfig};

// The recorder is process-global, so every metrics assertion lives in one test.
#[test]
fn test_metrics_track_commits_rejections_and_replay() {
    assert!(init_metrics());
    assert!(!init_metrics());

    let program = ProgramId::of(b"transition-guest-v1");
    let commitment = ExecutionCommitment::new(
        Hash::repeat_byte(1),
        Hash::repeat_byte(2),
        Hash::repeat_byte(3),
        Hash::repeat_byte(4),
    );
    let journal = commitment.to_journal();
    let seal = dev_seal(&program, &journal);
    let submitter = Address::repeat_byte(0x5e);

    let dir = tempdir().unwrap();
    let config = NodeConfig::new(program).with_event_log(dir.path().join("ledger.log"));
    {
        let mut node = LedgerNode::open(DevModeOracle, &config).unwrap();
        node.verify(submitter, &seal, &journal).unwrap();
        assert!(node.verify(submitter, &seal, &journal).is_err());
        assert!(node.verify(submitter, b"forged", &journal).is_err());
    }
    let reopened = LedgerNode::open(DevModeOracle, &config).unwrap();
    assert_eq!(reopened.ledger().height().0, 1);

    let rendered = render_metrics();
    assert!(rendered.contains(&format!("{SUBMISSIONS_ACCEPTED} 1")));
    assert!(rendered.contains(&format!("{EVENTS_COMMITTED} 2")));
    assert!(rendered.contains(&format!("{SUBMISSIONS_REJECTED}{{reason=\"replay\"}} 1")));
    assert!(rendered.contains(&format!("{SUBMISSIONS_REJECTED}{{reason=\"proof_rejected\"}} 1")));
    assert!(rendered.contains(COMMIT_DURATION));
    assert!(rendered.contains(REPLAY_DURATION));
    assert!(rendered.contains(&format!("{LEDGER_HEIGHT} 1")));
}
