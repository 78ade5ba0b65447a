//! Optimistic updates over copy-on-write lists

use std::sync::Arc;

use super::resource::Record;

/// Restores one row to the value it had before an optimistic patch
#[derive(Debug, Clone)]
pub struct Rollback<T> {
    previous: T,
}

impl<T: Record> Rollback<T> {
    pub fn id(&self) -> &str {
        self.previous.id()
    }

    pub fn previous(&self) -> &T {
        &self.previous
    }

    /// Put the previous row back, matched by id.
    ///
    /// Other rows are left as they are, so rolling back one row never undoes
    /// a concurrent change to another. Returns `None` when the row is gone.
    pub fn restore(self, list: &Arc<Vec<T>>) -> Option<Arc<Vec<T>>> {
        let index = list.iter().position(|r| r.id() == self.previous.id())?;
        let mut next = Vec::clone(list);
        next[index] = self.previous;
        Some(Arc::new(next))
    }
}

/// Patch the row `id` in a fresh copy of `list`.
///
/// Returns the patched list and the rollback for that row, or `None` when
/// no row has that id. The input list is never mutated.
pub fn apply_optimistic<T, F>(
    list: &Arc<Vec<T>>,
    id: &str,
    patch: F,
) -> Option<(Arc<Vec<T>>, Rollback<T>)>
where
    T: Record,
    F: FnOnce(&mut T),
{
    let index = list.iter().position(|r| r.id() == id)?;
    let previous = list[index].clone();
    let mut next = Vec::clone(list);
    patch(&mut next[index]);
    Some((Arc::new(next), Rollback { previous }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: &'static str,
        on: bool,
    }

    impl Record for Row {
        fn id(&self) -> &str {
            self.id
        }

        fn created_at(&self) -> Option<DateTime<Utc>> {
            None
        }
    }

    fn rows() -> Arc<Vec<Row>> {
        Arc::new(vec![Row { id: "a", on: true }, Row { id: "b", on: true }])
    }

    #[test]
    fn test_patch_leaves_original_untouched() {
        let list = rows();
        let (next, rollback) = apply_optimistic(&list, "a", |r| r.on = false).unwrap();
        assert!(!next[0].on);
        assert!(list[0].on);
        assert_eq!(rollback.id(), "a");
        assert!(rollback.previous().on);
    }

    #[test]
    fn test_unknown_id() {
        assert!(apply_optimistic(&rows(), "zzz", |r| r.on = false).is_none());
    }

    #[test]
    fn test_rollback_only_touches_its_row() {
        let list = rows();
        let (list, rollback_a) = apply_optimistic(&list, "a", |r| r.on = false).unwrap();
        let (list, _rollback_b) = apply_optimistic(&list, "b", |r| r.on = false).unwrap();

        let list = rollback_a.restore(&list).unwrap();
        assert_eq!(list[0], Row { id: "a", on: true });
        assert_eq!(list[1], Row { id: "b", on: false });
    }

    #[test]
    fn test_rollback_of_removed_row() {
        let list = rows();
        let (_, rollback) = apply_optimistic(&list, "a", |r| r.on = false).unwrap();
        let without_a = Arc::new(vec![Row { id: "b", on: true }]);
        assert!(rollback.restore(&without_a).is_none());
    }
}
