//! Copy-on-write list edits.
//!
//! Each helper returns a new `Vec` and leaves its input untouched, which is
//! what state snapshots handed to renderers need.

/// `list` with `value` inserted at `idx` (clamped to the end).
pub fn insert<T: Clone>(list: &[T], idx: usize, value: T) -> Vec<T> {
    let (before, after) = list.split_at(idx.min(list.len()));
    let mut out = Vec::with_capacity(list.len() + 1);
    out.extend_from_slice(before);
    out.push(value);
    out.extend_from_slice(after);
    out
}

/// `list` with `value` prepended.
pub fn insert_start<T: Clone>(list: &[T], value: T) -> Vec<T> {
    insert(list, 0, value)
}

/// `list` without the element at `idx`. Out-of-range indices copy the list.
pub fn remove<T: Clone>(list: &[T], idx: usize) -> Vec<T> {
    let mut out = list.to_vec();
    if idx < out.len() {
        out.remove(idx);
    }
    out
}

/// `list` with the element at `idx` replaced by `value`.
pub fn replace<T: Clone>(list: &[T], idx: usize, value: T) -> Vec<T> {
    let mut out = list.to_vec();
    if let Some(slot) = out.get_mut(idx) {
        *slot = value;
    }
    out
}

/// `list` with the element at `from` moved to position `to`.
///
/// `to` is an index into the list after removal and is clamped to its end.
pub fn move_item<T: Clone>(list: &[T], from: usize, to: usize) -> Vec<T> {
    if from >= list.len() {
        return list.to_vec();
    }
    let mut out = list.to_vec();
    let value = out.remove(from);
    out.insert(to.min(out.len()), value);
    out
}
