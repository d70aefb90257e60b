/// Moves `cursor` by `delta` and clamps into `[0, queue_len - 1]`.
///
/// Returns `None` for an empty queue: there is nothing to point at and the
/// caller should report "nothing to annotate".
pub fn advance(cursor: usize, delta: i64, queue_len: usize) -> Option<usize> {
    if queue_len == 0 {
        return None;
    }
    let last = (queue_len - 1) as i128;
    let target = (cursor as i128 + delta as i128).clamp(0, last);
    Some(target as usize)
}

/// Clamps a cursor left over from a longer queue. `None` when empty.
pub fn clamp(cursor: usize, queue_len: usize) -> Option<usize> {
    advance(cursor, 0, queue_len)
}
