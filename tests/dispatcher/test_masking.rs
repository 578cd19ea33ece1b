use crate::common::{isolated_builder, journal, journal_logger, sinks_in, JournalSink};
use rask_log_dispatch::{Logger, Mask, SinkHandle, SinkId};

#[test]
fn test_mask_excludes_only_named_sink() {
    let journal = journal();
    let logger = journal_logger(&["A", "B", "C"], &journal);

    let report = logger
        .masked(&Mask::new().with("B"))
        .info(["checkpoint saved"])
        .unwrap();

    assert_eq!(sinks_in(&journal), vec!["A", "C"]);
    assert_eq!(report.masked, vec![SinkId::from("B")]);
    assert_eq!(report.delivered, vec![SinkId::from("A"), SinkId::from("C")]);
}

#[test]
fn test_mask_does_not_outlive_the_call() {
    let journal = journal();
    let logger = journal_logger(&["A", "B"], &journal);
    let mask = Mask::new().with("A");

    logger.masked(&mask).info(["first"]).unwrap();
    logger.info(["second"]).unwrap();

    let calls = journal.lock().clone();
    assert_eq!(
        calls,
        vec![
            ("B".to_string(), "first".to_string()),
            ("A".to_string(), "second".to_string()),
            ("B".to_string(), "second".to_string()),
        ]
    );
}

#[test]
fn test_default_mask_and_explicit_override() {
    let journal = journal();
    let logger = isolated_builder()
        .sink(SinkHandle::new("console", JournalSink::new("console", &journal)))
        .sink(SinkHandle::new("wandb", JournalSink::new("wandb", &journal)))
        .default_mask(Mask::new().with("wandb"))
        .build()
        .unwrap();

    logger.info(["default"]).unwrap();
    // An explicit empty mask replaces the default one.
    logger.masked(&Mask::new()).info(["everyone"]).unwrap();

    assert_eq!(sinks_in(&journal), vec!["console", "console", "wandb"]);
}

#[test]
fn test_unknown_ids_in_call_mask_are_ignored() {
    let journal = journal();
    let logger = journal_logger(&["A"], &journal);

    let report = logger
        .masked(&Mask::new().with("never-registered"))
        .warn(["still delivered"])
        .unwrap();

    assert!(report.was_delivered_to("A"));
    assert!(report.masked.is_empty());
}

#[test]
fn test_mask_everything() {
    let journal = journal();
    let logger = journal_logger(&["A", "B"], &journal);
    let mask: Mask = logger.sink_ids().collect();

    let report = logger.masked(&mask).error(["nobody"]).unwrap();

    assert!(journal.lock().is_empty());
    assert_eq!(report.masked.len(), 2);
    assert!(report.is_clean());
}
