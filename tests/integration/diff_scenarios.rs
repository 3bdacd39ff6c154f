//! End-to-end diff scenarios on real directory trees

use super::test_utils::build_tree;
use std::fs;
use std::time::{Duration, SystemTime};
use sumdiff::tree::ScanConfig;
use sumdiff::{diff_directories, DiffRequest, FileOperation, ScanError};
use tempfile::TempDir;

async fn diff(source: &std::path::Path, target: &std::path::Path) -> Vec<String> {
    let ops = diff_directories(&DiffRequest::new(source, target))
        .await
        .unwrap();
    rendered(&ops)
}

fn rendered(ops: &[FileOperation]) -> Vec<String> {
    ops.iter().map(|op| op.to_string()).collect()
}

#[tokio::test]
async fn test_changed_file_and_target_only_file() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    build_tree(&src, &[("a/", ""), ("a/f.txt", "version X")]);
    build_tree(
        &dst,
        &[("a/", ""), ("a/f.txt", "version Y"), ("a/g.txt", "new file")],
    );

    assert_eq!(diff(&src, &dst).await, vec!["copy `a/f.txt`", "copy `a/g.txt`"]);
}

#[tokio::test]
async fn test_source_only_subtree_deleted_deepest_first() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    build_tree(&src, &[("b/", ""), ("b/old.txt", "old")]);
    build_tree(&dst, &[]);

    assert_eq!(
        diff(&src, &dst).await,
        vec!["delete `b/old.txt`", "delete `b`"]
    );
}

#[tokio::test]
async fn test_target_only_directories_created_before_contents() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    build_tree(&src, &[]);
    build_tree(
        &dst,
        &[("n/", ""), ("n/m/", ""), ("n/m/deep.txt", "d"), ("n/top.txt", "t")],
    );

    assert_eq!(
        diff(&src, &dst).await,
        vec![
            "create `n`",
            "create `n/m`",
            "copy `n/top.txt`",
            "copy `n/m/deep.txt`",
        ]
    );
}

#[tokio::test]
async fn test_identical_trees_yield_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let entries = [
        ("docs/", ""),
        ("docs/readme.md", "# readme"),
        ("src/", ""),
        ("src/lib.rs", "pub fn f() {}"),
        ("empty/", ""),
        ("top.txt", "top"),
    ];
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    build_tree(&src, &entries);
    build_tree(&dst, &entries);

    assert!(diff(&src, &dst).await.is_empty());
}

#[tokio::test]
async fn test_same_length_different_content_is_copied() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    build_tree(&src, &[("same.txt", "aaaa"), ("equal.txt", "zzzz")]);
    build_tree(&dst, &[("same.txt", "bbbb"), ("equal.txt", "zzzz")]);

    assert_eq!(diff(&src, &dst).await, vec!["copy `same.txt`"]);
}

#[tokio::test]
async fn test_modification_time_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    build_tree(&src, &[("f.txt", "content")]);
    build_tree(&dst, &[("f.txt", "content")]);

    let old = SystemTime::now() - Duration::from_secs(86_400);
    let file = fs::File::options()
        .write(true)
        .open(src.join("f.txt"))
        .unwrap();
    file.set_modified(old).unwrap();

    assert!(diff(&src, &dst).await.is_empty());
}

#[tokio::test]
async fn test_file_replaced_by_directory() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    build_tree(&src, &[("x", "was a file")]);
    build_tree(&dst, &[("x/", "")]);

    let ops = diff_directories(&DiffRequest::new(&src, &dst))
        .await
        .unwrap();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].to_string(), "copy `x`");
    assert!(ops[0].is_directory());
}

#[tokio::test]
async fn test_mixed_operations_are_grouped() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    build_tree(
        &src,
        &[("keep.txt", "same"), ("gone/", ""), ("gone/x.txt", "x"), ("edit.txt", "v1")],
    );
    build_tree(
        &dst,
        &[("keep.txt", "same"), ("fresh/", ""), ("edit.txt", "v2")],
    );

    assert_eq!(
        diff(&src, &dst).await,
        vec![
            "delete `gone/x.txt`",
            "delete `gone`",
            "create `fresh`",
            "copy `edit.txt`",
        ]
    );
}

#[tokio::test]
async fn test_single_worker_gives_same_result() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    let mut entries = Vec::new();
    let names: Vec<String> = (0..40).map(|i| format!("d{}/f{}.txt", i % 5, i)).collect();
    for name in &names {
        entries.push((name.as_str(), "content"));
    }
    build_tree(&src, &entries);
    build_tree(&dst, &entries[..20]);

    let scan = ScanConfig {
        workers: 1,
        queue_capacity: 1,
        ..ScanConfig::default()
    };
    let narrow = diff_directories(&DiffRequest::new(&src, &dst).with_scan_config(scan))
        .await
        .unwrap();
    let wide = diff_directories(&DiffRequest::new(&src, &dst))
        .await
        .unwrap();
    assert_eq!(narrow, wide);
    assert_eq!(narrow.len(), 20);
}

#[tokio::test]
async fn test_missing_source_is_validation_error() {
    let temp_dir = TempDir::new().unwrap();
    let dst = temp_dir.path().join("dst");
    build_tree(&dst, &[]);

    let err = diff_directories(&DiffRequest::new(temp_dir.path().join("nope"), &dst))
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::Validation { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_file_fails_whole_run() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    build_tree(&src, &[("locked.txt", "secret"), ("ok.txt", "fine")]);
    build_tree(&dst, &[]);

    let locked = src.join("locked.txt");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::File::open(&locked).is_ok() {
        // Running with privileges that bypass file permissions
        return;
    }

    let result = diff_directories(&DiffRequest::new(&src, &dst)).await;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert!(matches!(result, Err(ScanError::Hash { .. })));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_non_utf8_name_fails_whole_run() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let dst = temp_dir.path().join("dst");
    let names: Vec<String> = (0..2000).map(|i| format!("d{}/f{}.txt", i % 20, i)).collect();
    let entries: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "content")).collect();
    build_tree(&src, &entries);
    build_tree(&dst, &entries);
    fs::write(src.join(OsStr::from_bytes(b"bad\xff")), "unnamed").unwrap();

    let scan = ScanConfig {
        workers: 1,
        queue_capacity: 1,
        ..ScanConfig::default()
    };
    let result = tokio::time::timeout(
        Duration::from_secs(60),
        diff_directories(&DiffRequest::new(&src, &dst).with_scan_config(scan)),
    )
    .await
    .expect("diff run did not finish");

    match result {
        Err(ScanError::InvalidPath(msg)) => assert!(msg.contains("non UTF-8")),
        other => panic!("expected an invalid path error, got {:?}", other),
    }
}
