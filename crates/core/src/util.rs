/// Calculate the number of cells within `radius` steps of a center cell,
/// the center itself excluded. Radius 0 means 0 cells, 1 is 6, 2 is 18, etc.
pub fn hex_range_len(radius: u16) -> usize {
    // Ring k holds 6k cells, so the total is 6*1 + 6*2 + ... + 6*r = 3r(r+1)
    let r = radius as usize;
    3 * r * (r + 1)
}
