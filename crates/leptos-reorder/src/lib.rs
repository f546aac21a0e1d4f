//! Leptos Reorder Utilities
//!
//! List reordering via native HTML5 drag events.
//! One signal bundle per reorderable list; the drop itself is a pure splice.

use leptos::prelude::*;
use web_sys::DragEvent;

/// Reorder state signals for one list
#[derive(Clone, Copy)]
pub struct ReorderSignals {
    pub dragging_read: ReadSignal<Option<u32>>,
    pub dragging_write: WriteSignal<Option<u32>>,
    /// Highlighted drop target; a single signal so at most one row is marked
    pub over_read: ReadSignal<Option<u32>>,
    pub over_write: WriteSignal<Option<u32>>,
}

pub fn create_reorder_signals() -> ReorderSignals {
    let (dragging_read, dragging_write) = signal(None::<u32>);
    let (over_read, over_write) = signal(None::<u32>);
    ReorderSignals {
        dragging_read,
        dragging_write,
        over_read,
        over_write,
    }
}

/// Clear all drag state; called on drop and on dragend
pub fn end_drag(rs: &ReorderSignals) {
    rs.dragging_write.set(None);
    rs.over_write.set(None);
}

/// Move one element from `from` to `to`, shifting the others.
/// Out-of-range indices and `from == to` leave the list untouched.
pub fn splice_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Splice by stable ids instead of indices. No-op when either id is absent.
pub fn move_by_key<T, F>(items: &mut Vec<T>, dragged: u32, target: u32, key: F) -> bool
where
    F: Fn(&T) -> u32,
{
    let from = items.iter().position(|it| key(it) == dragged);
    let to = items.iter().position(|it| key(it) == target);
    match (from, to) {
        (Some(from), Some(to)) => splice_move(items, from, to),
        _ => false,
    }
}

/// Dragstart handler: record the dragged row
pub fn make_on_dragstart(rs: ReorderSignals, item_id: u32) -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        // Firefox refuses to drag without payload
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data("text/plain", &item_id.to_string());
        }
        rs.dragging_write.set(Some(item_id));
    }
}

/// Dragover handler: preventDefault (required to allow dropping) and mark
/// this row as the single highlighted target
pub fn make_on_dragover(rs: ReorderSignals, item_id: u32) -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        ev.prevent_default();
        if rs.dragging_read.get_untracked() != Some(item_id) {
            rs.over_write.set(Some(item_id));
        }
    }
}

/// Dragleave handler: unmark, but only if we were the marked target
pub fn make_on_dragleave(rs: ReorderSignals, item_id: u32) -> impl Fn(DragEvent) + Copy + 'static {
    move |_ev: DragEvent| {
        if rs.over_read.get_untracked() == Some(item_id) {
            rs.over_write.set(None);
        }
    }
}

/// Drop handler: resolve (dragged, target) and hand off; dropping on the
/// source row or with no active drag does nothing
pub fn make_on_drop<F>(rs: ReorderSignals, item_id: u32, on_move: F) -> impl Fn(DragEvent) + Clone + 'static
where
    F: Fn(u32, u32) + Clone + 'static,
{
    move |ev: DragEvent| {
        ev.prevent_default();
        let dragged = rs.dragging_read.get_untracked();
        end_drag(&rs);
        if let Some(dragged) = dragged {
            if dragged != item_id {
                on_move(dragged, item_id);
            }
        }
    }
}

/// Dragend handler: clears markers whether or not the drop landed
pub fn make_on_dragend(rs: ReorderSignals) -> impl Fn(DragEvent) + Copy + 'static {
    move |_ev: DragEvent| {
        end_drag(&rs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splice_moves_forward() {
        let mut v = vec![1, 2, 3, 4, 5];
        assert!(splice_move(&mut v, 0, 3));
        assert_eq!(v, vec![2, 3, 4, 1, 5]);
    }

    #[test]
    fn splice_moves_backward_to_front() {
        // Dropping index 2 onto index 0 makes it first, others shift right
        let mut v = vec!["a", "b", "c", "d", "e"];
        assert!(splice_move(&mut v, 2, 0));
        assert_eq!(v, vec!["c", "a", "b", "d", "e"]);
    }

    #[test]
    fn splice_preserves_relative_order_of_others() {
        let mut v = vec![10, 20, 30, 40, 50, 60];
        splice_move(&mut v, 4, 1);
        let rest: Vec<_> = v.iter().filter(|&&x| x != 50).copied().collect();
        assert_eq!(rest, vec![10, 20, 30, 40, 60]);
    }

    #[test]
    fn splice_same_index_is_noop() {
        let mut v = vec![1, 2, 3];
        assert!(!splice_move(&mut v, 1, 1));
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn splice_out_of_range_is_noop() {
        let mut v = vec![1, 2, 3];
        assert!(!splice_move(&mut v, 5, 0));
        assert!(!splice_move(&mut v, 0, 3));
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn move_by_key_finds_rows() {
        #[derive(Debug, PartialEq)]
        struct Row {
            id: u32,
        }
        let mut v = vec![Row { id: 7 }, Row { id: 8 }, Row { id: 9 }];
        assert!(move_by_key(&mut v, 9, 7, |r| r.id));
        assert_eq!(v[0].id, 9);
        assert_eq!(v[1].id, 7);
        assert_eq!(v[2].id, 8);
    }

    #[test]
    fn move_by_key_missing_id_is_noop() {
        struct Row {
            id: u32,
        }
        let mut v = vec![Row { id: 1 }, Row { id: 2 }];
        assert!(!move_by_key(&mut v, 1, 42, |r| r.id));
        assert_eq!(v[0].id, 1);
    }
}
