use crate::common::{journal, journal_logger, sinks_in};
use rask_log_dispatch::{Level, LevelSpec, Logger, Mask, messages};

#[test]
fn test_masked_view_covers_every_shortcut() {
    let journal = journal();
    let logger = journal_logger(&["console", "wandb"], &journal);
    let mask = Mask::new().with("wandb");
    let console_only = logger.masked(&mask);

    console_only.info(["i"]).unwrap();
    console_only.warning(["w"]).unwrap();
    console_only.error(["e"]).unwrap();
    console_only.bare(["b"]).unwrap();
    console_only.log(["l"], Level::WARN).unwrap();

    assert_eq!(sinks_in(&journal), vec!["console"; 5]);
    assert_eq!(console_only.mask().len(), 1);
}

#[test]
fn test_explicit_dispatch_mask_wins_over_view() {
    let journal = journal();
    let logger = journal_logger(&["console", "wandb"], &journal);
    let mask = Mask::new().with("wandb");

    logger
        .masked(&mask)
        .dispatch(
            messages!["x"],
            LevelSpec::Bare,
            Some(&Mask::new().with("console")),
        )
        .unwrap();

    assert_eq!(sinks_in(&journal), vec!["wandb"]);
}

#[test]
fn test_logger_shared_across_threads() {
    let journal = journal();
    let logger = std::sync::Arc::new(journal_logger(&["A", "B"], &journal));

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let logger = logger.clone();
            scope.spawn(move || {
                for step in 0..10 {
                    logger.info(messages!["worker ", worker, " step ", step]).unwrap();
                }
            });
        }
    });

    let calls = journal.lock();
    assert_eq!(calls.len(), 8 * 10 * 2);
    assert_eq!(calls.iter().filter(|(sink, _)| sink == "A").count(), 80);
}
