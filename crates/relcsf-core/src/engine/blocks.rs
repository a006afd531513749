/// Reserves room for another `block` elements once `items` is full, so tables
/// grow in fixed increments rather than by doubling.
pub(crate) fn push_in_blocks<T>(items: &mut Vec<T>, item: T, block: usize) {
    if items.len() == items.capacity() {
        items.reserve_exact(block.max(1));
    }
    items.push(item);
}
