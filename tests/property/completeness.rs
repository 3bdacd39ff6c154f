//! The engine classifies every path of either tree exactly once, whatever
//! order the two streams interleave in.

use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};
use sumdiff::diff::{order_operations, DiffEngine};
use sumdiff::types::{ChecksumedEntry, Entry, FileOperation, Operation, Origin};

/// Relative path -> record. Directory names are `a`..`c`, file names start
/// with `f`, so a path never names a file in one tree and a directory in
/// the other.
pub type Tree = BTreeMap<String, ChecksumedEntry>;

pub fn tree_strategy() -> impl Strategy<Value = Tree> {
    prop::collection::btree_map("([a-c]/){0,2}f[0-3]", 0u8..3, 0..10).prop_map(|files| {
        let mut tree = Tree::new();
        for (path, content) in files {
            let segments: Vec<&str> = path.split('/').collect();
            let mut ancestor = String::new();
            for segment in &segments[..segments.len() - 1] {
                if !ancestor.is_empty() {
                    ancestor.push('/');
                }
                ancestor.push_str(segment);
                tree.entry(ancestor.clone())
                    .or_insert_with(|| ChecksumedEntry::directory(ancestor.clone()));
            }
            tree.insert(path.clone(), ChecksumedEntry::file(path, vec![content]));
        }
        tree
    })
}

/// What the engine must produce for `source` against `target`
pub fn expected_operations(source: &Tree, target: &Tree) -> HashSet<FileOperation> {
    let mut expected = HashSet::new();
    for (path, record) in source {
        match target.get(path) {
            None => {
                expected.insert(FileOperation::new(Operation::Delete, record.entry.clone()));
            }
            Some(other) if other.checksum != record.checksum => {
                expected.insert(FileOperation::new(Operation::Copy, other.entry.clone()));
            }
            Some(_) => {}
        }
    }
    for (path, record) in target {
        if source.contains_key(path) {
            continue;
        }
        let operation = if record.entry.is_directory {
            Operation::Create
        } else {
            Operation::Copy
        };
        expected.insert(FileOperation::new(operation, record.entry.clone()));
    }
    expected
}

/// Feed both trees into one engine, picking the next side from `schedule`
pub fn run_engine(source: &Tree, target: &Tree, schedule: &[bool]) -> Vec<FileOperation> {
    let engine = DiffEngine::new();
    let mut source_iter = source.values().cloned();
    let mut target_iter = target.values().cloned();
    let mut operations = Vec::new();

    let mut visit = |origin, record| {
        if let Some(op) = engine.visit(origin, record) {
            operations.push(op);
        }
    };
    for take_source in schedule {
        let next = if *take_source {
            source_iter.next().map(|r| (Origin::Source, r))
        } else {
            target_iter.next().map(|r| (Origin::Target, r))
        };
        if let Some((origin, record)) = next {
            visit(origin, record);
        }
    }
    for record in source_iter {
        visit(Origin::Source, record);
    }
    for record in target_iter {
        visit(Origin::Target, record);
    }

    operations.extend(engine.sweep());
    operations
}

proptest! {
    #[test]
    fn prop_every_path_classified_exactly_once(
        source in tree_strategy(),
        target in tree_strategy(),
        schedule in prop::collection::vec(any::<bool>(), 0..64),
    ) {
        let operations = run_engine(&source, &target, &schedule);

        let paths: HashSet<&str> = operations.iter().map(|op| op.path()).collect();
        prop_assert_eq!(paths.len(), operations.len());

        let produced: HashSet<FileOperation> = operations.into_iter().collect();
        prop_assert_eq!(produced, expected_operations(&source, &target));
    }

    #[test]
    fn prop_tree_against_itself_is_empty(
        tree in tree_strategy(),
        schedule in prop::collection::vec(any::<bool>(), 0..64),
    ) {
        prop_assert!(run_engine(&tree, &tree, &schedule).is_empty());
    }

    #[test]
    fn prop_ordered_plan_turns_source_into_target(
        source in tree_strategy(),
        target in tree_strategy(),
    ) {
        let plan = order_operations(run_engine(&source, &target, &[]));

        // Apply the plan to a model of the source tree, checking every
        // step is possible at the moment it runs.
        let mut state: BTreeMap<String, ChecksumedEntry> = source.clone();
        for op in &plan {
            let path = op.path().to_string();
            let parent_ok = match path.rsplit_once('/') {
                Some((parent, _)) => state.get(parent).is_some_and(|p| p.entry.is_directory),
                None => true,
            };
            match op.operation {
                Operation::Delete => {
                    let prefix = format!("{}/", path);
                    prop_assert!(
                        !state.keys().any(|k| k.starts_with(&prefix)),
                        "{} deleted while not empty", path
                    );
                    prop_assert!(state.remove(&path).is_some());
                }
                Operation::Create => {
                    prop_assert!(parent_ok, "{} created before its parent", path);
                    prop_assert!(!state.contains_key(&path));
                    state.insert(path.clone(), ChecksumedEntry::directory(path));
                }
                Operation::Copy => {
                    prop_assert!(parent_ok, "{} copied before its parent exists", path);
                    let record = target.get(&path).cloned();
                    prop_assert!(record.is_some());
                    if let Some(record) = record {
                        state.insert(path, record);
                    }
                }
            }
        }
        prop_assert_eq!(&state, &target);
    }
}

#[test]
fn test_engine_through_async_streams() {
    use std::sync::Arc;
    use sumdiff::concurrency::AbortSignal;
    use sumdiff::diff::compare;
    use sumdiff::tree::ScanStream;
    use tokio::sync::mpsc;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap();
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(32));

    runner
        .run(&(tree_strategy(), tree_strategy()), |(source, target)| {
            let signal = Arc::new(AbortSignal::new());
            let stream = |tree: &Tree| {
                let (tx, rx) = mpsc::channel(tree.len().max(1));
                for record in tree.values() {
                    tx.try_send(record.clone()).unwrap();
                }
                ScanStream::from_channel(rx, Arc::clone(&signal))
            };
            let (source_stream, target_stream) = (stream(&source), stream(&target));

            let operations = runtime
                .block_on(compare(source_stream, target_stream))
                .unwrap();
            let produced: HashSet<FileOperation> = operations.into_iter().collect();
            prop_assert_eq!(produced, expected_operations(&source, &target));
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_expected_model_on_fixed_trees() {
    let mut source = Tree::new();
    source.insert("a".into(), ChecksumedEntry::directory("a"));
    source.insert("a/f0".into(), ChecksumedEntry::file("a/f0", vec![1]));
    let mut target = source.clone();
    target.insert("a/f0".into(), ChecksumedEntry::file("a/f0", vec![2]));

    let expected = expected_operations(&source, &target);
    assert_eq!(expected.len(), 1);
    assert!(expected.contains(&FileOperation::new(Operation::Copy, Entry::file("a/f0"))));
}
