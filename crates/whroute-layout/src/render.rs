//! Plain-text floor dumps for debugging.

use std::collections::HashSet;
use std::fmt;

use whroute_core::Point;

use crate::warehouse::Warehouse;

/// Cells to highlight on top of the floor.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    /// Drawn as `@`.
    pub points: HashSet<Point>,
    /// Drawn as `^`.
    pub path: HashSet<Point>,
}

impl Overlay {
    /// An overlay highlighting nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `points` with `@`.
    pub fn with_points(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.points.extend(points);
        self
    }

    /// Mark `path` with `^`.
    pub fn with_path(mut self, path: impl IntoIterator<Item = Point>) -> Self {
        self.path.extend(path);
        self
    }
}

/// A floor plus overlay, formatted one row per line.
///
/// Each row starts with its two-digit index, every cell is one glyph
/// followed by a space (`@` point, `^` path, `#` shelf, `x` wall, `.`
/// floor, first match wins), and a footer labels every second column.
pub struct FloorPlan<'a> {
    pub warehouse: &'a Warehouse,
    pub overlay: &'a Overlay,
}

impl FloorPlan<'_> {
    fn glyph(&self, p: Point) -> char {
        if self.overlay.points.contains(&p) {
            '@'
        } else if self.overlay.path.contains(&p) {
            '^'
        } else if self.warehouse.is_shelf(p) {
            '#'
        } else if self.warehouse.is_wall(p) {
            'x'
        } else {
            '.'
        }
    }
}

impl fmt::Display for FloorPlan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.warehouse.width();
        for y in 0..self.warehouse.height() {
            write!(f, "{y:02}")?;
            for x in 0..w {
                write!(f, "{} ", self.glyph(Point::new(x, y)))?;
            }
            writeln!(f)?;
        }
        for x in (0..w).step_by(2) {
            write!(f, "  {x:02}")?;
        }
        writeln!(f)
    }
}

/// Render `warehouse` with `overlay` as text.
pub fn render(warehouse: &Warehouse, overlay: &Overlay) -> String {
    FloorPlan { warehouse, overlay }.to_string()
}
