use rstest::{fixture, rstest};
use std::fs;
use strata_fs::{NormalizedPath, io};
use tempfile::TempDir;

#[fixture]
fn workdir() -> TempDir {
    TempDir::new().unwrap()
}

fn under(dir: &TempDir, relative: &str) -> NormalizedPath {
    NormalizedPath::new(dir.path()).join(relative)
}

#[rstest]
fn atomic_write_lands_full_content(workdir: TempDir) {
    let snapshot = under(&workdir, "settings.snapshot.json");
    io::write_atomic(&snapshot, br#"{"format":1}"#).unwrap();

    assert_eq!(io::read_text(&snapshot).unwrap(), r#"{"format":1}"#);
}

#[rstest]
fn atomic_write_builds_missing_directories(workdir: TempDir) {
    let snapshot = under(&workdir, "cache/nested/settings.snapshot.json");
    io::write_atomic(&snapshot, b"{}").unwrap();

    assert!(snapshot.is_file());
}

#[rstest]
fn atomic_write_replaces_previous_snapshot(workdir: TempDir) {
    let snapshot = under(&workdir, "settings.snapshot.json");
    io::write_atomic(&snapshot, b"first").unwrap();
    io::write_atomic(&snapshot, b"second").unwrap();

    assert_eq!(io::read_bytes(&snapshot).unwrap(), b"second");
}

#[rstest]
fn atomic_write_cleans_up_its_temp_file(workdir: TempDir) {
    io::write_atomic(&under(&workdir, "settings.json"), b"{}").unwrap();

    let names: Vec<String> = fs::read_dir(workdir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["settings.json"]);
}

#[rstest]
fn reading_a_missing_file_reports_not_found(workdir: TempDir) {
    let err = io::read_text(&under(&workdir, "config/settings.toml")).unwrap_err();
    assert!(err.is_not_found());
}

#[rstest]
fn remove_reports_whether_anything_was_deleted(workdir: TempDir) {
    let snapshot = under(&workdir, "settings.snapshot.json");
    assert!(!io::remove(&snapshot).unwrap());

    io::write_atomic(&snapshot, b"{}").unwrap();
    assert!(io::remove(&snapshot).unwrap());
    assert!(!snapshot.is_file());
}

#[rstest]
fn concurrent_writers_never_corrupt_the_destination(workdir: TempDir) {
    let snapshot = under(&workdir, "settings.snapshot.json");
    let payloads: Vec<String> = (0..8).map(|i| format!(r#"{{"writer":{i},"pad":"{}"}}"#, "x".repeat(4096))).collect();

    std::thread::scope(|scope| {
        for payload in &payloads {
            let snapshot = &snapshot;
            scope.spawn(move || {
                for _ in 0..10 {
                    io::write_atomic(snapshot, payload.as_bytes()).unwrap();
                }
            });
        }
    });

    let written = io::read_text(&snapshot).unwrap();
    assert!(payloads.contains(&written), "torn write: {written}");
    let names: Vec<String> = fs::read_dir(workdir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["settings.snapshot.json"]);
}
