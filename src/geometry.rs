//! Plain geometry types and the uniform grid layout used by panels.
//!
//! Grid coordinates use a top-left origin (the panel view is flipped), so
//! row 0 is the top row.

/// A point in points (not pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Half-open containment: the max edges belong to the neighbour.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x && p.x < self.max_x() && p.y >= self.origin.y && p.y < self.max_y()
    }
}

/// A line segment, used for grid lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Uniform grid dividing a bounds size into `cols` x `rows` cells.
///
/// Zero columns or rows are treated as one so a malformed panel still
/// renders a single cell instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    cols: u32,
    rows: u32,
    bounds: Size,
}

impl GridLayout {
    pub fn new(cols: u32, rows: u32, bounds: Size) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            bounds,
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn cell_size(&self) -> Size {
        Size::new(
            self.bounds.width / self.cols as f64,
            self.bounds.height / self.rows as f64,
        )
    }

    /// Frame of a cell. Cells outside the grid still get a frame (beyond
    /// the bounds); use [`GridLayout::contains_cell`] to decide visibility.
    pub fn cell_rect(&self, col: u32, row: u32) -> Rect {
        let cell = self.cell_size();
        Rect::new(
            col as f64 * cell.width,
            row as f64 * cell.height,
            cell.width,
            cell.height,
        )
    }

    pub fn contains_cell(&self, col: u32, row: u32) -> bool {
        col < self.cols && row < self.rows
    }

    /// Cell under `p`, or `None` when `p` is outside the bounds.
    pub fn cell_at(&self, p: Point) -> Option<(u32, u32)> {
        let bounds = Rect::new(0.0, 0.0, self.bounds.width, self.bounds.height);
        if !bounds.contains(p) {
            return None;
        }
        let cell = self.cell_size();
        let col = ((p.x / cell.width) as u32).min(self.cols - 1);
        let row = ((p.y / cell.height) as u32).min(self.rows - 1);
        Some((col, row))
    }

    /// `cols + 1` vertical segments from top to bottom.
    pub fn vertical_lines(&self) -> Vec<Segment> {
        let cw = self.cell_size().width;
        (0..=self.cols)
            .map(|i| {
                let x = i as f64 * cw;
                Segment {
                    from: Point::new(x, 0.0),
                    to: Point::new(x, self.bounds.height),
                }
            })
            .collect()
    }

    /// `rows + 1` horizontal segments from left to right.
    pub fn horizontal_lines(&self) -> Vec<Segment> {
        let ch = self.cell_size().height;
        (0..=self.rows)
            .map(|i| {
                let y = i as f64 * ch;
                Segment {
                    from: Point::new(0.0, y),
                    to: Point::new(self.bounds.width, y),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.99, 9.99)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(5.0, -0.1)));
    }

    #[test]
    fn test_rect_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_zero_dimensions_become_one() {
        let grid = GridLayout::new(0, 0, Size::new(100.0, 80.0));
        assert_eq!(grid.cols(), 1);
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.cell_size(), Size::new(100.0, 80.0));
    }
}
