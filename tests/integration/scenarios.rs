//! End-to-end runs over small fixed trees

use super::test_utils::{read_tree, Fixture};
use snapdiff::api;
use snapdiff::report::REPORT_FILE_NAME;
use snapdiff::tree::{build_index, WalkerConfig};
use std::fs;

#[test]
fn test_identical_trees_produce_empty_report() {
    let fx = Fixture::new(&[("a.txt", Some("hi"))], &[("a.txt", Some("hi"))]);

    let summary = api::run(fx.run_config()).unwrap();

    assert!(summary.diff.is_empty());
    assert_eq!(fx.report(), "");
}

#[test]
fn test_file_missing_from_target_is_removed() {
    let fx = Fixture::new(&[("a.txt", Some("hi"))], &[]);

    api::run(fx.run_config()).unwrap();

    assert_eq!(fx.report(), "#removed\na.txt\n");
}

#[test]
fn test_added_file_is_reported_and_exported() {
    let fx = Fixture::new(&[], &[("b.txt", Some("x"))]);

    let summary = api::run(fx.run_config().with_export(true)).unwrap();

    assert_eq!(fx.report(), "#added\nb.txt\n");
    assert_eq!(fs::read_to_string(fx.output.join("b.txt")).unwrap(), "x");
    assert_eq!(summary.export.unwrap().files_copied, 1);
}

#[test]
fn test_changed_content_is_modified() {
    let fx = Fixture::new(&[("c.txt", Some("v1"))], &[("c.txt", Some("v2"))]);

    let summary = api::run(fx.run_config()).unwrap();
    assert_eq!(fx.report(), "#modified\nc.txt\n");

    let source = build_index(&fx.source, &WalkerConfig::default()).unwrap();
    let target = build_index(&fx.target, &WalkerConfig::default()).unwrap();
    assert_ne!(source.get("c.txt"), target.get("c.txt"));
    assert!(summary.export.is_none());
}

#[test]
fn test_excluded_paths_never_reported() {
    let fx = Fixture::new(
        &[("secret/keys.txt", Some("k")), ("keep.txt", Some("1"))],
        &[("keep.txt", Some("1"))],
    );

    api::run(fx.run_config().with_exclude("secret")).unwrap();

    assert!(!fx.report().contains("secret"));
    assert_eq!(fx.report(), "");
}

#[test]
fn test_stale_output_is_replaced() {
    let fx = Fixture::new(&[], &[("new.txt", Some("n"))]);
    fs::create_dir_all(fx.output.join("stale").join("deep")).unwrap();
    fs::write(fx.output.join("stale").join("deep").join("old.bin"), "old").unwrap();
    fs::write(fx.output.join("unrelated.txt"), "junk").unwrap();

    api::run(fx.run_config().with_export(true)).unwrap();

    let names: Vec<_> = read_tree(&fx.output).into_keys().collect();
    assert_eq!(names, vec![REPORT_FILE_NAME.to_string(), "new.txt".to_string()]);
}

#[test]
fn test_stale_output_is_replaced_without_export() {
    let fx = Fixture::new(&[], &[("new.txt", Some("n"))]);
    fs::create_dir_all(&fx.output).unwrap();
    fs::write(fx.output.join("unrelated.txt"), "junk").unwrap();

    api::run(fx.run_config()).unwrap();

    let names: Vec<_> = read_tree(&fx.output).into_keys().collect();
    assert_eq!(names, vec![REPORT_FILE_NAME.to_string()]);
}

#[test]
fn test_all_sections_in_one_report() {
    let fx = Fixture::new(
        &[("gone.txt", Some("g")), ("same.txt", Some("s")), ("edit.txt", Some("1"))],
        &[("same.txt", Some("s")), ("edit.txt", Some("2")), ("fresh/", None)],
    );

    api::run(fx.run_config()).unwrap();

    assert_eq!(
        fx.report(),
        "#removed\ngone.txt\n#added\nfresh\n#modified\nedit.txt\n"
    );
}

#[test]
fn test_empty_directory_is_tracked() {
    let fx = Fixture::new(&[("empty", None)], &[]);

    api::run(fx.run_config()).unwrap();

    assert_eq!(fx.report(), "#removed\nempty\n");
}

#[test]
fn test_file_replaced_by_directory_is_modified() {
    let fx = Fixture::new(
        &[("node", Some("was a file"))],
        &[("node/inner.txt", Some("now a dir"))],
    );

    api::run(fx.run_config()).unwrap();

    assert_eq!(fx.report(), "#added\nnode/inner.txt\n#modified\nnode\n");
}

#[test]
fn test_non_ascii_paths_round_trip_in_report() {
    let fx = Fixture::new(&[], &[("データ/ファイル.txt", Some("x"))]);

    api::run(fx.run_config()).unwrap();

    assert_eq!(fx.report(), "#added\nデータ\nデータ/ファイル.txt\n");
}
