//! Apply-safe ordering of diff operations

use crate::types::{FileOperation, Operation};
use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

/// Reorder `operations` so they can be applied front to back.
///
/// Groups run in `Delete`, `Create`, `Copy` order. Deletes go deepest
/// first, with files before directories at equal depth, so a directory is
/// only removed once its contents are gone. Creates go shallowest first so
/// parents exist before children; copies follow the same order. Remaining
/// ties break on path, making the result independent of input order.
pub fn order_operations(operations: Vec<FileOperation>) -> Vec<FileOperation> {
    let mut groups = group_by_operation(operations);
    let mut ordered = Vec::new();

    for operation in Operation::ALL {
        let Some(mut group) = groups.remove(&operation) else {
            continue;
        };
        match operation {
            Operation::Delete => group.sort_by(compare_delete),
            Operation::Create | Operation::Copy => group.sort_by(compare_ascending),
        }
        ordered.extend(group);
    }

    ordered
}

/// Group operations by type, preserving input order within each group
pub fn group_by_operation(
    operations: Vec<FileOperation>,
) -> BTreeMap<Operation, Vec<FileOperation>> {
    let mut groups: BTreeMap<Operation, Vec<FileOperation>> = BTreeMap::new();
    for op in operations {
        groups.entry(op.operation).or_default().push(op);
    }
    groups
}

fn compare_delete(a: &FileOperation, b: &FileOperation) -> Ordering {
    (Reverse(a.depth()), a.is_directory(), a.path())
        .cmp(&(Reverse(b.depth()), b.is_directory(), b.path()))
}

fn compare_ascending(a: &FileOperation, b: &FileOperation) -> Ordering {
    (a.depth(), a.path()).cmp(&(b.depth(), b.path()))
}
