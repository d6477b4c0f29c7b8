// Tests for the sweeper against an in-memory file system

use chrono::Duration;
use stale_sweep::cleaner::{FolderTarget, RetentionPolicy, SweepOutcome, Sweeper};
use stale_sweep::clock::FixedClock;
use stale_sweep::fs::MemoryFs;

use crate::now;

fn processed_share() -> MemoryFs {
    let mut fs = MemoryFs::new();
    fs.add_dir("/capture/convert")
        .add_dir("/capture/convert/processed")
        .add_file("/capture/convert/processed/old_a.mp4", 300, now() - Duration::days(120))
        .add_file("/capture/convert/processed/old_b.mp4", 700, now() - Duration::days(91))
        .add_file("/capture/convert/processed/fresh.mp4", 50, now() - Duration::days(10))
        .add_dir("/capture/convert/processed/archive")
        .add_file(
            "/capture/convert/processed/archive/ancient.mp4",
            999,
            now() - Duration::days(900),
        );
    fs
}

fn target() -> FolderTarget {
    FolderTarget::new("/capture/convert/processed")
}

fn summary_of(outcome: SweepOutcome) -> stale_sweep::cleaner::DeletionSummary {
    match outcome {
        SweepOutcome::Summary(summary) => summary,
        SweepOutcome::Failure(message) => panic!("Expected summary, got failure: {}", message),
    }
}

#[test]
fn test_deletes_only_expired_files() {
    let fs = processed_share();
    let clock = FixedClock::new(now());
    let sweeper = Sweeper::new(&fs, &clock);

    let summary = summary_of(sweeper.sweep(&target()));

    assert_eq!(summary.folder(), "convert");
    assert_eq!(summary.count(), 2);
    assert_eq!(summary.total_size_purged(), 1000);
    let names: Vec<&str> = summary.deleted_files().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["old_a.mp4", "old_b.mp4"]);
    assert!(summary.errors().is_empty());

    assert!(!fs.contains("/capture/convert/processed/old_a.mp4"));
    assert!(!fs.contains("/capture/convert/processed/old_b.mp4"));
    assert!(fs.contains("/capture/convert/processed/fresh.mp4"));
}

#[test]
fn test_subdirectories_are_never_touched() {
    let fs = processed_share();
    let clock = FixedClock::new(now());
    let summary = summary_of(Sweeper::new(&fs, &clock).sweep(&target()));

    assert!(fs.contains("/capture/convert/processed/archive"));
    assert!(fs.contains("/capture/convert/processed/archive/ancient.mp4"));
    assert!(summary.deleted_files().iter().all(|f| f.name != "archive"));
}

#[test]
fn test_file_exactly_at_threshold_is_kept() {
    let mut fs = MemoryFs::new();
    fs.add_dir("/share")
        .add_dir("/share/out")
        .add_file("/share/out/edge.mp4", 10, now() - Duration::days(90));
    let clock = FixedClock::new(now());

    let summary = summary_of(Sweeper::new(&fs, &clock).sweep(&FolderTarget::new("/share/out")));
    assert_eq!(summary.count(), 0);
    assert!(fs.contains("/share/out/edge.mp4"));

    // One second later it is past the window
    clock.advance(Duration::seconds(1));
    let summary = summary_of(Sweeper::new(&fs, &clock).sweep(&FolderTarget::new("/share/out")));
    assert_eq!(summary.count(), 1);
    assert!(!fs.contains("/share/out/edge.mp4"));
}

#[test]
fn test_custom_retention_policy() {
    let fs = processed_share();
    let clock = FixedClock::new(now());
    let sweeper = Sweeper::new(&fs, &clock).with_policy(RetentionPolicy::new(5));

    let summary = summary_of(sweeper.sweep(&target()));
    assert_eq!(summary.count(), 3);
    assert_eq!(summary.total_size_purged(), 1050);
}

#[test]
fn test_missing_folder_is_a_failure() {
    let fs = processed_share();
    let clock = FixedClock::new(now());
    let before = fs.len();

    let outcome = Sweeper::new(&fs, &clock).sweep(&FolderTarget::new("/capture/nowhere"));

    match outcome {
        SweepOutcome::Failure(message) => {
            assert!(message.contains("Folder not found"));
            assert!(message.contains("/capture/nowhere"));
        }
        other => panic!("Expected failure, got {:?}", other),
    }
    assert_eq!(fs.len(), before);
}

#[test]
fn test_file_path_is_a_failure() {
    let fs = processed_share();
    let clock = FixedClock::new(now());

    let outcome = Sweeper::new(&fs, &clock)
        .sweep(&FolderTarget::new("/capture/convert/processed/old_a.mp4"));

    assert!(outcome.is_failure());
    assert!(fs.contains("/capture/convert/processed/old_a.mp4"));
}

#[test]
fn test_delete_failure_does_not_stop_the_sweep() {
    let mut fs = processed_share();
    fs.deny_delete("/capture/convert/processed/old_a.mp4");
    let clock = FixedClock::new(now());

    let summary = summary_of(Sweeper::new(&fs, &clock).sweep(&target()));

    assert_eq!(summary.count(), 1);
    assert_eq!(summary.total_size_purged(), 700);
    assert_eq!(summary.deleted_files()[0].name, "old_b.mp4");
    assert_eq!(summary.errors().len(), 1);
    assert!(summary.errors()[0].contains("Permission denied"));
    assert!(summary.errors()[0].contains("old_a.mp4"));

    assert!(fs.contains("/capture/convert/processed/old_a.mp4"));
    assert!(!fs.contains("/capture/convert/processed/old_b.mp4"));
}

#[test]
fn test_stat_failure_is_recorded() {
    let mut fs = processed_share();
    fs.deny_stat("/capture/convert/processed/old_b.mp4");
    let clock = FixedClock::new(now());

    let summary = summary_of(Sweeper::new(&fs, &clock).sweep(&target()));

    assert_eq!(summary.count(), 1);
    assert_eq!(summary.errors().len(), 1);
    assert!(summary.errors()[0].contains("Could not read metadata"));
    assert!(summary.errors()[0].contains("stat refused"));
    assert!(!summary.errors()[0].contains("No modification time"));
    assert!(fs.contains("/capture/convert/processed/old_b.mp4"));
}

#[test]
fn test_missing_mtime_is_recorded_and_kept() {
    let mut fs = MemoryFs::new();
    fs.add_dir("/share")
        .add_dir("/share/out")
        .add_file_without_mtime("/share/out/mystery.bin", 5);
    let clock = FixedClock::new(now());

    let summary = summary_of(Sweeper::new(&fs, &clock).sweep(&FolderTarget::new("/share/out")));

    assert_eq!(summary.count(), 0);
    assert_eq!(summary.errors().len(), 1);
    assert!(fs.contains("/share/out/mystery.bin"));
}

#[test]
fn test_dry_run_keeps_everything() {
    let fs = processed_share();
    let clock = FixedClock::new(now());
    let before = fs.len();

    let summary = summary_of(Sweeper::new(&fs, &clock).with_dry_run(true).sweep(&target()));

    assert_eq!(summary.count(), 2);
    assert_eq!(summary.total_size_purged(), 1000);
    assert_eq!(fs.len(), before);
}

#[test]
fn test_empty_folder() {
    let mut fs = MemoryFs::new();
    fs.add_dir("/share").add_dir("/share/out");
    let clock = FixedClock::new(now());

    let summary = summary_of(Sweeper::new(&fs, &clock).sweep(&FolderTarget::new("/share/out")));
    assert_eq!(summary.count(), 0);
    assert_eq!(summary.total_size_purged(), 0);
    assert!(summary.deleted_files().is_empty());
    assert!(summary.errors().is_empty());
}

#[test]
fn test_label_overrides_identifier() {
    let fs = processed_share();
    let clock = FixedClock::new(now());

    let summary = summary_of(Sweeper::new(&fs, &clock).sweep(&target().with_label("fast lane")));
    assert_eq!(summary.folder(), "fast lane");
}

#[test]
fn test_totals_match_deleted_list() {
    let mut fs = MemoryFs::new();
    fs.add_dir("/share").add_dir("/share/out");
    for i in 0..20u64 {
        let age = Duration::days(60 + i as i64 * 3);
        fs.add_file(format!("/share/out/f{:02}.bin", i), i * 1024 + 7, now() - age);
    }
    fs.deny_delete("/share/out/f15.bin");
    let clock = FixedClock::new(now());

    let summary = summary_of(Sweeper::new(&fs, &clock).sweep(&FolderTarget::new("/share/out")));

    assert_eq!(summary.count(), summary.deleted_files().len());
    assert_eq!(
        summary.total_size_purged(),
        summary.deleted_files().iter().map(|f| f.size).sum::<u64>()
    );
    // ages 60..117 days in steps of 3: f11 (93 days) onwards are expired, f15 is locked
    assert_eq!(summary.count(), 8);
    assert_eq!(summary.errors().len(), 1);
}
