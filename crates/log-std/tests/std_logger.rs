//! File and console behaviour of `StdLogger`.

use std::fs;
use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use proven_log::{Level, Logger, Settings, info, warn};
use proven_log_std::{DEFAULT_MAX_FILE_SIZE, StdLogger};
use regex::Regex;

fn line_pattern() -> Regex {
    Regex::new(
        r"^\[(ERROR|WARN|INFO|DEBUG|TRACE)\]\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{6}\]\[[^\]]*\]\[\d+\] .* /\* .+ \*/$",
    )
    .unwrap()
}

fn record_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|l| !l.ends_with("Started.")).collect()
}

#[test]
fn test_threshold_is_single_and_inclusive() {
    let logger = StdLogger::stderr(Level::Error).unwrap();

    for threshold in Level::ALL {
        logger.set_level(threshold);
        for level in Level::ALL {
            assert_eq!(
                logger.is_enabled("any", level),
                level <= threshold,
                "threshold {threshold}, level {level}"
            );
            assert_eq!(
                logger.is_enabled("any", level),
                logger.is_enabled("other", level)
            );
        }
    }
}

#[test]
fn test_writes_formatted_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/node.log");
    let logger = Arc::new(StdLogger::file(Level::Info, &path).unwrap());

    info!(logger: logger, module: "net", "peers %s", vec!["a", "b"]);
    warn!(logger: logger, module: "disk", "usage %d%%", 93);
    proven_log::debug!(logger: logger, module: "disk", "hidden");

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().ends_with("] Started."));

    let records = record_lines(&text);
    assert_eq!(records.len(), 2);
    let pattern = line_pattern();
    for line in &records {
        assert!(pattern.is_match(line), "{line}");
    }
    assert!(records[0].starts_with("[INFO]["));
    assert!(records[0].contains("][net]["));
    assert!(records[0].contains("] peers a,b /* "));
    assert!(records[0].ends_with("test_writes_formatted_lines */"));
    assert!(records[1].contains("] usage 93% /* "));
}

#[test]
fn test_appends_to_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.log");
    fs::write(&path, "previous run\n").unwrap();

    let logger = Arc::new(StdLogger::file(Level::Info, &path).unwrap());
    info!(logger: logger, "again");

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("previous run\n"));
    assert_eq!(record_lines(&text).len(), 2);
}

#[test]
fn test_rotation_moves_content_to_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.log");
    let backup = dir.path().join("node.log.1");
    let logger = Arc::new(
        StdLogger::file(Level::Info, &path)
            .unwrap()
            .with_max_file_size(1_000),
    );

    let mut written = 0;
    while !backup.exists() {
        info!(logger: logger, module: "fill", "line %d", written);
        written += 1;
        assert!(written < 1_000, "rotation never happened");
    }

    // The write that crossed the limit is the last line of the backup.
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    let archived = fs::read_to_string(&backup).unwrap();
    assert!(archived.len() > 1_000);
    let archived_records = record_lines(&archived);
    assert_eq!(archived_records.len(), written);
    assert!(archived_records.last().unwrap().contains(&format!("line {}", written - 1)));

    info!(logger: logger, module: "fill", "after rotation");
    let fresh = fs::read_to_string(&path).unwrap();
    assert_eq!(fresh.lines().count(), 1);
    assert!(fresh.contains("after rotation"));

    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries.len(), 2, "{entries:?}");
}

#[test]
fn test_concurrent_writers_never_interleave() {
    const THREADS: usize = 8;
    const LINES: usize = 250;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.log");
    let logger = Arc::new(StdLogger::file(Level::Trace, &path).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..LINES {
                    info!(logger: logger, module: "worker", "thread %d line %d padding %s", t, i, "x".repeat(64));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let text = fs::read_to_string(&path).unwrap();
    let records = record_lines(&text);
    assert_eq!(records.len(), THREADS * LINES);

    let pattern = line_pattern();
    for line in &records {
        assert!(pattern.is_match(line), "{line}");
    }
    for t in 0..THREADS {
        let prefix = format!("thread {t} line ");
        assert_eq!(records.iter().filter(|l| l.contains(&prefix)).count(), LINES);
    }
}

#[test]
fn test_concurrent_writers_across_rotation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.log");
    let logger = Arc::new(
        StdLogger::file(Level::Trace, &path)
            .unwrap()
            .with_max_file_size(4_096),
    );

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..100 {
                    info!(logger: logger, "t%d i%d", t, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let pattern = line_pattern();
    for file in [path.clone(), dir.path().join("node.log.1")] {
        let text = fs::read_to_string(file).unwrap();
        for line in record_lines(&text) {
            assert!(pattern.is_match(line), "{line}");
        }
    }
}

#[test]
fn test_log_folder_for_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs/node.log");
    let logger = StdLogger::file(Level::Info, &path).unwrap();

    assert_eq!(logger.log_folder("net").unwrap(), dir.path().join("logs"));
    assert_eq!(logger.log_folder("disk").unwrap(), dir.path().join("logs"));
    assert!(dir.path().join("logs").is_dir());
}

#[test]
fn test_log_folder_for_console() {
    let dir = tempfile::tempdir().unwrap();
    let logger = StdLogger::stderr(Level::Info)
        .unwrap()
        .with_log_root(dir.path().join("log"));

    let folder = logger.log_folder("net").unwrap();
    assert_eq!(folder, dir.path().join("log").join("net"));
    assert!(folder.is_dir());
    assert!(logger.path().is_none());
}

#[test]
fn test_set_levels_uses_one_global_threshold() {
    let logger = StdLogger::stderr(Level::Error).unwrap();

    logger.set_levels(&Settings::global(Level::Debug)).unwrap();
    assert_eq!(logger.level(), Level::Debug);

    let settings = Settings::from_toml_str(
        r#"
        [logging]
        net = "warning"
        disk = "trace"
        "#,
    )
    .unwrap();
    logger.set_levels(&settings).unwrap();
    assert_eq!(logger.level(), Level::Warning);
    assert!(!logger.is_enabled("disk", Level::Trace));

    logger.set_levels(&Settings::default()).unwrap();
    assert_eq!(logger.level(), Level::Warning);
}

#[test]
fn test_unwritable_destination_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    let result = StdLogger::file(Level::Info, blocker.join("node.log"));
    assert!(matches!(result, Err(proven_log::Error::Io(_, _))));
}

#[test]
fn test_default_rotation_threshold() {
    assert_eq!(DEFAULT_MAX_FILE_SIZE, 100_000_000);
}
