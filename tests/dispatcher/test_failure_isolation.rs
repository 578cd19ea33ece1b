use crate::common::{
    BrokenSink, JournalSink, MockRecordingSink, PanickingSink, isolated_builder, journal,
    sinks_in,
};
use rask_log_dispatch::{DispatchMode, Logger, SinkError, SinkHandle, SinkId, messages, record};

#[test]
fn test_failing_sink_does_not_block_others() {
    let journal = journal();
    let logger = isolated_builder()
        .sink(SinkHandle::new("A", JournalSink::new("A", &journal)))
        .sink(SinkHandle::new("B", BrokenSink))
        .sink(SinkHandle::new("C", JournalSink::new("C", &journal)))
        .build()
        .unwrap();

    let report = logger.info(["epoch finished"]).unwrap();

    assert_eq!(sinks_in(&journal), vec!["A", "C"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].sink, SinkId::from("B"));
    assert!(matches!(
        report.failures[0].source,
        SinkError::Rejected(ref reason) if reason == "backend offline"
    ));

    let err = report.into_result().unwrap_err();
    assert_eq!(err.to_string(), "1 sink(s) failed to deliver: B");
}

#[test]
fn test_panicking_sink_is_contained() {
    let journal = journal();
    let logger = isolated_builder()
        .sink(SinkHandle::new("buggy", PanickingSink))
        .sink(SinkHandle::new("after", JournalSink::new("after", &journal)))
        .build()
        .unwrap();

    let report = logger.error(["still here"]).unwrap();

    assert_eq!(sinks_in(&journal), vec!["after"]);
    assert!(matches!(
        report.failures[0].source,
        SinkError::Panicked(ref msg) if msg == "sink bug"
    ));
}

#[test]
fn test_failure_records_entry_index_and_stops_that_sink() {
    let mut mock = MockRecordingSink::new();
    let mut seq = mockall::Sequence::new();
    mock.expect_accept()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    mock.expect_accept()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(SinkError::Rejected("quota exceeded".to_string())));

    let journal = journal();
    let logger = isolated_builder()
        .sink(SinkHandle::new("metered", mock))
        .sink(SinkHandle::new("local", JournalSink::new("local", &journal)))
        .build()
        .unwrap();

    let report = logger
        .info(messages![
            record! { "step" => 1 },
            record! { "step" => 2 },
            record! { "step" => 3 },
        ])
        .unwrap();

    assert_eq!(report.failures[0].entry_index, 1);
    // The other sink still receives every record.
    assert_eq!(journal.lock().len(), 3);
}

#[test]
fn test_concurrent_dispatch_reports_in_sink_order() {
    let journal = journal();
    let logger = isolated_builder()
        .sink(SinkHandle::new("first", BrokenSink))
        .sink(SinkHandle::new("second", JournalSink::new("second", &journal)))
        .sink(SinkHandle::new("third", PanickingSink))
        .sink(SinkHandle::new("fourth", JournalSink::new("fourth", &journal)))
        .mode(DispatchMode::Concurrent)
        .build()
        .unwrap();

    let report = logger.warn(["parallel"]).unwrap();

    let failed: Vec<&str> = report.failures.iter().map(|f| f.sink.as_str()).collect();
    assert_eq!(failed, vec!["first", "third"]);
    assert_eq!(
        report.delivered,
        vec![SinkId::from("second"), SinkId::from("fourth")]
    );
}

#[test]
fn test_flush_reaches_every_sink() {
    let mut healthy = MockRecordingSink::new();
    healthy.expect_flush().times(1).returning(|| Ok(()));
    let mut stuck = MockRecordingSink::new();
    stuck
        .expect_flush()
        .times(1)
        .returning(|| Err(SinkError::Rejected("still uploading".to_string())));

    let logger = isolated_builder()
        .sink(SinkHandle::new("healthy", healthy))
        .sink(SinkHandle::new("stuck", stuck))
        .build()
        .unwrap();

    let err = logger.flush().unwrap_err();
    assert_eq!(err.0.len(), 1);
    assert_eq!(err.0[0].sink, SinkId::from("stuck"));
    assert_eq!(err.to_string(), "1 sink(s) failed to flush: stuck");
    assert_eq!(
        err.0[0].to_string(),
        "Sink 'stuck' failed to flush: Entry rejected: still uploading"
    );
}
