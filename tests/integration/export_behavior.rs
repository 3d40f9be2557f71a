//! Export of added and modified content

use super::test_utils::{read_tree, Fixture};
use filetime::FileTime;
use snapdiff::api;
use snapdiff::error::{ExportError, SnapdiffError};
use snapdiff::report::REPORT_FILE_NAME;
use std::fs;

#[test]
fn test_export_mirrors_changed_subset_only() {
    let fx = Fixture::new(
        &[("keep.txt", Some("k")), ("edit.txt", Some("1")), ("drop.txt", Some("d"))],
        &[("keep.txt", Some("k")), ("edit.txt", Some("2")), ("new/add.txt", Some("a"))],
    );

    api::run(fx.run_config().with_export(true)).unwrap();

    let exported = read_tree(&fx.output);
    let keys: Vec<_> = exported.keys().cloned().collect();
    assert_eq!(
        keys,
        vec![REPORT_FILE_NAME, "edit.txt", "new", "new/add.txt"]
    );
    assert_eq!(exported["edit.txt"], Some(b"2".to_vec()));
    assert_eq!(exported["new/add.txt"], Some(b"a".to_vec()));
}

#[test]
fn test_nested_added_directories_export_without_collision() {
    let fx = Fixture::new(
        &[],
        &[("a/b/c/deep.txt", Some("deep")), ("a/b/empty", None)],
    );

    let summary = api::run(fx.run_config().with_export(true)).unwrap();

    assert_eq!(
        summary.diff.added,
        vec!["a", "a/b", "a/b/c", "a/b/c/deep.txt", "a/b/empty"]
    );
    let stats = summary.export.unwrap();
    assert_eq!(stats.covered_skipped, 4);
    assert_eq!(stats.files_copied, 1);
    assert!(fx.output.join("a/b/empty").is_dir());
    assert_eq!(
        fs::read_to_string(fx.output.join("a/b/c/deep.txt")).unwrap(),
        "deep"
    );
}

#[test]
fn test_file_replaced_by_directory_exports_directory() {
    let fx = Fixture::new(
        &[("node", Some("file"))],
        &[("node/child.txt", Some("child"))],
    );

    api::run(fx.run_config().with_export(true)).unwrap();

    assert!(fx.output.join("node").is_dir());
    assert_eq!(
        fs::read_to_string(fx.output.join("node/child.txt")).unwrap(),
        "child"
    );
}

#[test]
fn test_directory_replaced_by_file_exports_file() {
    let fx = Fixture::new(
        &[("node/child.txt", Some("child"))],
        &[("node", Some("file"))],
    );

    let summary = api::run(fx.run_config().with_export(true)).unwrap();

    assert_eq!(summary.diff.removed, vec!["node/child.txt"]);
    assert_eq!(summary.diff.modified, vec!["node"]);
    assert_eq!(fs::read_to_string(fx.output.join("node")).unwrap(), "file");
}

#[test]
fn test_export_preserves_modification_time() {
    let fx = Fixture::new(&[], &[("dated.txt", Some("d"))]);
    let stamp = FileTime::from_unix_time(1_500_000_000, 0);
    filetime::set_file_mtime(fx.target.join("dated.txt"), stamp).unwrap();

    api::run(fx.run_config().with_export(true)).unwrap();

    let meta = fs::metadata(fx.output.join("dated.txt")).unwrap();
    assert_eq!(FileTime::from_last_modification_time(&meta), stamp);
}

#[test]
fn test_export_disabled_writes_only_report() {
    let fx = Fixture::new(&[], &[("x.txt", Some("x")), ("d/y.txt", Some("y"))]);

    let summary = api::run(fx.run_config()).unwrap();

    assert!(summary.export.is_none());
    let keys: Vec<_> = read_tree(&fx.output).into_keys().collect();
    assert_eq!(keys, vec![REPORT_FILE_NAME.to_string()]);
}

#[test]
fn test_repeated_runs_are_identical() {
    let fx = Fixture::new(
        &[("a.txt", Some("1")), ("gone/x", Some("x"))],
        &[("a.txt", Some("2")), ("new/deep/y", Some("y")), ("z", None)],
    );

    api::run(fx.run_config().with_export(true)).unwrap();
    let first_report = fx.report();
    let first_tree = read_tree(&fx.output);

    api::run(fx.run_config().with_export(true)).unwrap();
    assert_eq!(fx.report(), first_report);
    assert_eq!(read_tree(&fx.output), first_tree);
}

#[test]
fn test_target_file_named_like_report_does_not_replace_it() {
    let fx = Fixture::new(
        &[],
        &[(REPORT_FILE_NAME, Some("TARGET CONTENT\n")), ("b.txt", Some("x"))],
    );

    let result = api::run(fx.run_config().with_export(true));

    assert!(matches!(
        result,
        Err(SnapdiffError::Export(ExportError::ReservedName { .. }))
    ));
    assert_eq!(fx.report(), "#added\n__result.txt\nb.txt\n");
    assert!(!fx.output.join("b.txt").exists());
}

#[test]
fn test_target_directory_named_like_report_is_refused() {
    let fx = Fixture::new(&[], &[("__result.txt/inner", Some("i"))]);

    let result = api::run(fx.run_config().with_export(true));

    assert!(matches!(
        result,
        Err(SnapdiffError::Export(ExportError::ReservedName { .. }))
    ));
    assert_eq!(fx.report(), "#added\n__result.txt\n__result.txt/inner\n");
}

#[test]
fn test_report_named_target_file_is_fine_without_export() {
    let fx = Fixture::new(&[], &[(REPORT_FILE_NAME, Some("TARGET CONTENT\n"))]);

    api::run(fx.run_config()).unwrap();

    assert_eq!(fx.report(), "#added\n__result.txt\n");
}
