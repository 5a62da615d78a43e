/// Number of levels in a tree built by median splitting over `num_items` points.
///
/// Each level at most doubles the number of nodes, and a median split leaves at most `n / 2`
/// points on either side, so the height is `ceil(log2(num_items + 1))`.
pub fn balanced_depth(num_items: usize) -> usize {
    let mut n = num_items;
    let mut depth = 0;
    while n != 0 {
        n >>= 1;
        depth += 1;
    }
    depth
}
