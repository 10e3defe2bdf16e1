use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{
    color::Color,
    geometry::{Center, Point},
    piece::Rotation,
};

/// The seven tetrimino kinds.
///
/// Everything shape-specific (cells, pivots, kick offsets, spawn offsets and
/// colors) is looked up from constant tables indexed by the discriminant, so
/// adding behavior never means another `match` per shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum Shape {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// J-piece.
    J = 3,
    /// L-piece.
    L = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<Shape> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Shape {
        Shape::ALL[rng.random_range(0..Shape::LEN)]
    }
}

impl Shape {
    /// Number of shapes (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Shape::I,
        Shape::O,
        Shape::T,
        Shape::J,
        Shape::L,
        Shape::S,
        Shape::Z,
    ];

    /// Occupied cells at rotation 0, relative to the top-left of the bounding box.
    #[must_use]
    pub const fn canonical_cells(self) -> [Point; 4] {
        CANONICAL_CELLS[self as usize]
    }

    #[must_use]
    pub const fn rotation_center(self) -> Center {
        ROTATION_CENTERS[self as usize]
    }

    #[must_use]
    pub const fn color(self) -> Color {
        COLORS[self as usize]
    }

    /// Offset of the piece's position from the spawn column at the top of the board.
    #[must_use]
    pub const fn spawn_offset(self) -> Point {
        SPAWN_OFFSETS[self as usize]
    }

    /// Width and height of the box the piece is drawn in.
    #[must_use]
    pub const fn bounding_box(self) -> (usize, usize) {
        match self {
            Shape::I => (4, 4),
            Shape::O => (4, 3),
            Shape::T | Shape::J | Shape::L | Shape::S | Shape::Z => (3, 3),
        }
    }

    /// Returns the `index`-th kick offset of this shape in `rotation`.
    ///
    /// `None` means the table is exhausted. A rotation from state `a` to state
    /// `b` tries the translation `kick_offset(a, i) - kick_offset(b, i)` for
    /// `i = 0, 1, ...` until this returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadris_engine::{Point, Rotation, Shape};
    ///
    /// let from = Shape::T.kick_offset(Rotation::SPAWN, 1).unwrap();
    /// let to = Shape::T.kick_offset(Rotation::RIGHT, 1).unwrap();
    /// assert_eq!(from - to, Point::new(-1, 0));
    /// assert_eq!(Shape::T.kick_offset(Rotation::SPAWN, 5), None);
    /// assert_eq!(Shape::O.kick_offset(Rotation::SPAWN, 1), None);
    /// ```
    #[must_use]
    pub fn kick_offset(self, rotation: Rotation, index: usize) -> Option<Point> {
        KICK_OFFSETS[self as usize][rotation.as_usize()]
            .get(index)
            .copied()
    }

    /// Returns the single character representation of this shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadris_engine::Shape;
    ///
    /// assert_eq!(Shape::I.as_char(), 'I');
    /// assert_eq!(Shape::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Shape::I => 'I',
            Shape::O => 'O',
            Shape::T => 'T',
            Shape::J => 'J',
            Shape::L => 'L',
            Shape::S => 'S',
            Shape::Z => 'Z',
        }
    }

    /// Parses a shape from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadris_engine::Shape;
    ///
    /// assert_eq!(Shape::from_char('I'), Some(Shape::I));
    /// assert_eq!(Shape::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Shape::I),
            'O' => Some(Shape::O),
            'T' => Some(Shape::T),
            'J' => Some(Shape::J),
            'L' => Some(Shape::L),
            'S' => Some(Shape::S),
            'Z' => Some(Shape::Z),
            _ => None,
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

const fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

const CANONICAL_CELLS: [[Point; 4]; Shape::LEN] = [
    // I: .... / IIII / .... / ....
    [p(0, 1), p(1, 1), p(2, 1), p(3, 1)],
    // O: .OO. / .OO.
    [p(1, 0), p(2, 0), p(1, 1), p(2, 1)],
    // T: .T. / TTT
    [p(1, 0), p(0, 1), p(1, 1), p(2, 1)],
    // J: J.. / JJJ
    [p(0, 0), p(0, 1), p(1, 1), p(2, 1)],
    // L: ..L / LLL
    [p(2, 0), p(0, 1), p(1, 1), p(2, 1)],
    // S: .SS / SS.
    [p(1, 0), p(2, 0), p(0, 1), p(1, 1)],
    // Z: ZZ. / .ZZ
    [p(0, 0), p(1, 0), p(1, 1), p(2, 1)],
];

const ROTATION_CENTERS: [Center; Shape::LEN] = [
    Center::from_doubled(3, 3),
    Center::from_doubled(3, 1),
    Center::cell(1, 1),
    Center::cell(1, 1),
    Center::cell(1, 1),
    Center::cell(1, 1),
    Center::cell(1, 1),
];

const SPAWN_OFFSETS: [Point; Shape::LEN] = [
    p(-2, -3),
    p(-1, -2),
    p(-1, -2),
    p(-1, -2),
    p(-1, -2),
    p(-1, -2),
    p(-1, -2),
];

const COLORS: [Color; Shape::LEN] = [
    Color::CYAN,
    Color::YELLOW,
    Color::PURPLE,
    Color::BLUE,
    Color::ORANGE,
    Color::GREEN,
    Color::RED,
];

/// Kick offsets for each rotation state, y pointing down.
type KickTable = [&'static [Point]; 4];

const JLSTZ_KICKS: KickTable = [
    &[p(0, 0), p(0, 0), p(0, 0), p(0, 0), p(0, 0)],
    &[p(0, 0), p(1, 0), p(1, 1), p(0, -2), p(1, -2)],
    &[p(0, 0), p(0, 0), p(0, 0), p(0, 0), p(0, 0)],
    &[p(0, 0), p(-1, 0), p(-1, 1), p(0, -2), p(-1, -2)],
];

const I_KICKS: KickTable = [
    &[p(0, 0), p(-1, 0), p(2, 0), p(-1, 0), p(2, 0)],
    &[p(0, 0), p(1, 0), p(1, 0), p(1, -1), p(1, 2)],
    &[p(0, 0), p(2, 0), p(-1, 0), p(2, 1), p(-1, 1)],
    &[p(0, 0), p(0, 0), p(0, 0), p(0, 2), p(0, -1)],
];

const O_KICKS: KickTable = [&[p(0, 0)], &[p(0, 0)], &[p(0, 0)], &[p(0, 0)]];

const KICK_OFFSETS: [KickTable; Shape::LEN] = [
    I_KICKS,
    O_KICKS,
    JLSTZ_KICKS,
    JLSTZ_KICKS,
    JLSTZ_KICKS,
    JLSTZ_KICKS,
    JLSTZ_KICKS,
];
