use whroute_core::Point;

/// The four axis-aligned neighbours of `p` in checkerboard order.
///
/// Cells with odd `x + y` list east, north, west, south; cells with even
/// `x + y` list the reverse (south, west, north, east). Alternating the
/// order keeps equal-cost paths from hugging one diagonal direction, and
/// callers relying on reproducible tie-breaks depend on it exactly.
#[inline]
pub fn checkered_cardinal(p: Point) -> [Point; 4] {
    let mut dirs = p.neighbors_4();
    if p.is_even_parity() {
        dirs.reverse();
    }
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_cells_start_east() {
        let p = Point::new(1, 0);
        assert_eq!(
            checkered_cardinal(p),
            [
                Point::new(2, 0),
                Point::new(1, -1),
                Point::new(0, 0),
                Point::new(1, 1),
            ]
        );
    }

    #[test]
    fn even_cells_start_south() {
        let p = Point::new(2, 2);
        assert_eq!(
            checkered_cardinal(p),
            [
                Point::new(2, 3),
                Point::new(1, 2),
                Point::new(2, 1),
                Point::new(3, 2),
            ]
        );
    }
}
