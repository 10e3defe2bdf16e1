/// A cell coordinate on the board.
///
/// `x` grows rightward (columns) and `y` grows downward (rows). Coordinates are
/// signed because a falling piece may sit partially above the visible board
/// (`y < 0`) and a candidate position may poke past either wall.
///
/// # Example
///
/// ```
/// use quadris_engine::Point;
///
/// let p = Point::new(3, -1) + Point::new(1, 2);
/// assert_eq!(p, Point::new(4, 1));
/// assert_eq!(-p, Point::new(-4, -1));
/// ```
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Add,
    derive_more::Sub,
    derive_more::Neg,
    derive_more::Display,
)]
#[display("({x}, {y})")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    const fn doubled(self) -> Self {
        Self::new(self.x * 2, self.y * 2)
    }
}

/// Pivot of a quarter-turn rotation.
///
/// Pivots may lie on a cell corner rather than a cell center (the I-piece turns
/// about `(1.5, 1.5)`), so the coordinates are kept doubled to stay integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Center {
    doubled: Point,
}

impl Center {
    /// Pivot on the center of cell `(x, y)`.
    #[must_use]
    pub const fn cell(x: i32, y: i32) -> Self {
        Self {
            doubled: Point::new(x, y).doubled(),
        }
    }

    /// Pivot given in half-cell units, e.g. `from_doubled(3, 3)` is `(1.5, 1.5)`.
    #[must_use]
    pub const fn from_doubled(x2: i32, y2: i32) -> Self {
        Self {
            doubled: Point::new(x2, y2),
        }
    }

    #[must_use]
    pub const fn doubled(self) -> Point {
        self.doubled
    }

    #[must_use]
    pub fn x(self) -> f64 {
        f64::from(self.doubled.x) / 2.0
    }

    #[must_use]
    pub fn y(self) -> f64 {
        f64::from(self.doubled.y) / 2.0
    }
}

/// `(sin, cos)` for 0, 90, 180 and 270 degrees.
const QUARTER_TURNS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Rotates `point` clockwise about `center` by `quarter_turns` quarter turns.
///
/// On a y-down grid a clockwise quarter turn maps `(x, y)` to `(-y, x)`
/// relative to the pivot.
///
/// # Panics
///
/// Panics in debug builds if the rotated point does not land on a cell, which
/// only happens for a pivot that is not symmetric with the rotated cells.
#[must_use]
pub fn rotate_about(point: Point, center: Center, quarter_turns: u8) -> Point {
    let (sin, cos) = QUARTER_TURNS[usize::from(quarter_turns % 4)];
    let relative = point.doubled() - center.doubled;
    let rotated = Point::new(
        relative.x * cos - relative.y * sin,
        relative.x * sin + relative.y * cos,
    ) + center.doubled;
    debug_assert!(
        rotated.x % 2 == 0 && rotated.y % 2 == 0,
        "rotation of {point} about ({}, {}) is off-grid",
        center.x(),
        center.y(),
    );
    Point::new(rotated.x.div_euclid(2), rotated.y.div_euclid(2))
}

/// Euclidean modulo: the result is always in `0..modulus`.
#[must_use]
pub const fn modulo(value: i32, modulus: i32) -> i32 {
    value.rem_euclid(modulus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(2, -3);
        let b = Point::new(-1, 5);
        assert_eq!(a + b, Point::new(1, 2));
        assert_eq!(a - b, Point::new(3, -8));
        assert_eq!(-a, Point::new(-2, 3));
        assert_eq!(a.to_string(), "(2, -3)");
    }

    #[test]
    fn test_modulo_is_never_negative() {
        assert_eq!(modulo(-1, 4), 3);
        assert_eq!(modulo(-4, 4), 0);
        assert_eq!(modulo(5, 4), 1);
        assert_eq!(modulo(0, 4), 0);
    }

    #[test]
    fn test_rotate_about_cell_center() {
        let center = Center::cell(1, 1);
        // Cell right of the pivot moves below it after a clockwise turn.
        assert_eq!(rotate_about(Point::new(2, 1), center, 1), Point::new(1, 2));
        assert_eq!(rotate_about(Point::new(2, 1), center, 2), Point::new(0, 1));
        assert_eq!(rotate_about(Point::new(2, 1), center, 3), Point::new(1, 0));
        assert_eq!(rotate_about(Point::new(2, 1), center, 4), Point::new(2, 1));
        // The pivot cell itself stays put.
        assert_eq!(rotate_about(Point::new(1, 1), center, 3), Point::new(1, 1));
    }

    #[test]
    fn test_rotate_about_cell_corner() {
        let center = Center::from_doubled(3, 3);
        assert!((center.x() - 1.5).abs() < f64::EPSILON);
        assert_eq!(rotate_about(Point::new(0, 1), center, 1), Point::new(2, 0));
        assert_eq!(rotate_about(Point::new(3, 1), center, 1), Point::new(2, 3));
        assert_eq!(rotate_about(Point::new(0, 1), center, 2), Point::new(3, 2));
    }
}
