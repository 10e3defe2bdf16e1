use std::fmt;

use super::{
    board::Board,
    geometry::{self, Point},
    shape::Shape,
};

/// A tetrimino with position, rotation, and shape.
///
/// This represents a piece at a specific location and orientation on the board.
/// Pieces are immutable - movement and rotation operations return new `Piece`
/// instances and never check for collisions; that is the board's job.
///
/// # Coordinate System
///
/// - Position is the top-left corner of the shape's bounding box in board
///   coordinates, and may be negative while the piece is above the board
/// - Rotation is tracked as 0 (spawn), 1 (right), 2 (reverse) or 3 (left)
/// - The O-piece never rotates; its rotation is always 0
///
/// # Example
///
/// ```
/// use quadris_engine::{Piece, Point, Shape};
///
/// let piece = Piece::new(Shape::T, Point::new(3, 0));
/// let moved = piece.right();
/// let rotated = moved.rotated(true);
/// assert_eq!(rotated.cells().len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    position: Point,
    rotation: Rotation,
    shape: Shape,
}

impl Piece {
    #[must_use]
    pub const fn new(shape: Shape, position: Point) -> Self {
        Self {
            position,
            rotation: Rotation::SPAWN,
            shape,
        }
    }

    /// Like [`Self::new`], but in the given rotation state.
    ///
    /// The rotation of an O-piece is ignored.
    #[must_use]
    pub fn with_rotation(shape: Shape, rotation: Rotation, position: Point) -> Self {
        let rotation = if shape == Shape::O {
            Rotation::SPAWN
        } else {
            rotation
        };
        Self {
            position,
            rotation,
            shape,
        }
    }

    /// Places `shape` at its spawn position above the board.
    ///
    /// The spawn column is the middle column (rounded down), and the shape's
    /// spawn offset keeps the whole piece above the visible rows.
    #[must_use]
    pub fn spawn(shape: Shape) -> Self {
        #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let column = ((Board::WIDTH - 1) / 2) as i32;
        Self::new(shape, Point::new(column, 0) + shape.spawn_offset())
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Absolute board cells occupied by this piece.
    #[must_use]
    pub fn cells(&self) -> [Point; 4] {
        let center = self.shape.rotation_center();
        let turns = self.rotation.0;
        self.shape
            .canonical_cells()
            .map(|cell| geometry::rotate_about(cell, center, turns) + self.position)
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        self.translated_by(Point::new(dx, dy))
    }

    #[must_use]
    pub fn translated_by(&self, offset: Point) -> Self {
        Self {
            position: self.position + offset,
            ..*self
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.translated(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.translated(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.translated(0, 1)
    }

    /// Rotates a quarter turn in place, without kicks.
    ///
    /// Rotating an O-piece returns it unchanged.
    #[must_use]
    pub fn rotated(&self, clockwise: bool) -> Self {
        if self.shape == Shape::O {
            return *self;
        }
        let rotation = if clockwise {
            self.rotation.rotated_right()
        } else {
            self.rotation.rotated_left()
        };
        Self { rotation, ..*self }
    }

    /// Rotates a quarter turn, resolving collisions with the kick table.
    ///
    /// Each kick index `i` translates the rotated piece by
    /// `kick_offset(old, i) - kick_offset(new, i)`; the first candidate that
    /// fits on `board` wins. Returns `None` when the table runs out.
    #[must_use]
    pub fn super_rotated(&self, board: &Board, clockwise: bool) -> Option<Self> {
        let rotated = self.rotated(clockwise);
        (0..)
            .map_while(|index| {
                let from = self.shape.kick_offset(self.rotation, index)?;
                let to = rotated.shape.kick_offset(rotated.rotation, index)?;
                Some(rotated.translated_by(from - to))
            })
            .find(|candidate| !board.intersects(candidate))
    }

    /// Drops the piece straight down until the next step would collide.
    ///
    /// This is the ghost position. The piece itself must not intersect `board`.
    #[must_use]
    pub fn simulate_drop_position(&self, board: &Board) -> Self {
        assert!(
            !board.intersects(self),
            "dropping a piece that already intersects the board"
        );
        let mut dropped = *self;
        while !board.intersects(&dropped.down()) {
            dropped = dropped.down();
        }
        dropped
    }
}

/// Draws the piece inside its bounding box.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.shape.bounding_box();
        let cells = self.cells().map(|cell| cell - self.position);
        let border = "-".repeat(width);

        writeln!(f, "+{border}+")?;
        for y in 0..height {
            write!(f, "|")?;
            for x in 0..width {
                let here = (Ok(x), Ok(y));
                let occupied = cells
                    .iter()
                    .any(|cell| (usize::try_from(cell.x), usize::try_from(cell.y)) == here);
                write!(f, "{}", if occupied { '#' } else { ' ' })?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "+{border}+")
    }
}

/// Rotation state of a piece.
///
/// Represents one of four rotation states:
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise (90° counterclockwise)
///
/// Rotation operations wrap around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation(u8);

impl Rotation {
    pub const SPAWN: Self = Self(0);
    pub const RIGHT: Self = Self(1);
    pub const REVERSE: Self = Self(2);
    pub const LEFT: Self = Self(3);

    pub const ALL: [Self; 4] = [Self::SPAWN, Self::RIGHT, Self::REVERSE, Self::LEFT];

    /// Normalizes any number of clockwise quarter turns into a rotation state.
    #[must_use]
    pub const fn from_quarter_turns(turns: i32) -> Self {
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let turns = geometry::modulo(turns, 4) as u8;
        Self(turns)
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self::from_quarter_turns(self.0 as i32 + 1)
    }

    #[must_use]
    pub const fn rotated_left(self) -> Self {
        Self::from_quarter_turns(self.0 as i32 - 1)
    }

    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn all_pieces() -> impl Iterator<Item = Piece> {
        Shape::ALL.into_iter().flat_map(|shape| {
            Rotation::ALL
                .into_iter()
                .map(move |rotation| Piece::with_rotation(shape, rotation, Point::new(3, 5)))
        })
    }

    fn cell_set(piece: &Piece) -> HashSet<Point> {
        piece.cells().into_iter().collect()
    }

    #[test]
    fn test_every_orientation_has_four_distinct_cells() {
        for piece in all_pieces() {
            assert_eq!(cell_set(&piece).len(), 4, "{piece:?}");
        }
    }

    #[test]
    fn test_rotation_round_trips() {
        for piece in all_pieces() {
            assert_eq!(piece.rotated(true).rotated(false), piece);
            assert_eq!(piece.rotated(false).rotated(true), piece);
        }
    }

    #[test]
    fn test_four_rotations_wrap_around() {
        for piece in all_pieces() {
            let cw = (0..4).fold(piece, |p, _| p.rotated(true));
            let ccw = (0..4).fold(piece, |p, _| p.rotated(false));
            assert_eq!(cw, piece);
            assert_eq!(ccw, piece);
        }
    }

    #[test]
    fn test_o_piece_never_rotates() {
        let piece = Piece::spawn(Shape::O);
        assert_eq!(piece.rotated(true), piece);
        assert_eq!(piece.rotated(false), piece);
        let forced = Piece::with_rotation(Shape::O, Rotation::REVERSE, piece.position());
        assert_eq!(forced, piece);
    }

    #[test]
    fn test_non_o_rotation_changes_cells() {
        for piece in all_pieces().filter(|p| p.shape() != Shape::O) {
            assert_ne!(cell_set(&piece.rotated(true)), cell_set(&piece), "{piece:?}");
        }
    }

    #[test]
    fn test_non_o_orientations_are_unique() {
        let sets: Vec<_> = all_pieces()
            .filter(|p| p.shape() != Shape::O)
            .map(|p| {
                let mut cells = p.cells().to_vec();
                cells.sort_by_key(|c| (c.y, c.x));
                cells
            })
            .collect();
        let unique: HashSet<_> = sets.iter().collect();
        assert_eq!(unique.len(), sets.len());
    }

    #[test]
    fn test_t_piece_orientations() {
        let origin = Point::ZERO;
        let cells = |rotation| {
            let mut cells = Piece::with_rotation(Shape::T, rotation, origin).cells();
            cells.sort_by_key(|c| (c.y, c.x));
            cells
        };
        let p = Point::new;
        assert_eq!(cells(Rotation::SPAWN), [p(1, 0), p(0, 1), p(1, 1), p(2, 1)]);
        assert_eq!(cells(Rotation::RIGHT), [p(1, 0), p(1, 1), p(2, 1), p(1, 2)]);
        assert_eq!(cells(Rotation::REVERSE), [p(0, 1), p(1, 1), p(2, 1), p(1, 2)]);
        assert_eq!(cells(Rotation::LEFT), [p(1, 0), p(0, 1), p(1, 1), p(1, 2)]);
    }

    #[test]
    fn test_i_piece_orientations_follow_its_box() {
        let p = Point::new;
        let right = Piece::with_rotation(Shape::I, Rotation::RIGHT, Point::ZERO);
        assert_eq!(right.cells(), [p(2, 0), p(2, 1), p(2, 2), p(2, 3)]);
        let reverse = Piece::with_rotation(Shape::I, Rotation::REVERSE, Point::ZERO);
        assert_eq!(reverse.cells(), [p(3, 2), p(2, 2), p(1, 2), p(0, 2)]);
        let left = Piece::with_rotation(Shape::I, Rotation::LEFT, Point::ZERO);
        assert_eq!(left.cells(), [p(1, 3), p(1, 2), p(1, 1), p(1, 0)]);
    }

    #[test]
    fn test_spawn_positions() {
        let p = Point::new;
        let mut i_cells = Piece::spawn(Shape::I).cells();
        i_cells.sort_by_key(|c| c.x);
        assert_eq!(i_cells, [p(2, -2), p(3, -2), p(4, -2), p(5, -2)]);
        assert_eq!(Piece::spawn(Shape::T).position(), p(3, -2));
        for shape in Shape::ALL {
            assert!(Piece::spawn(shape).cells().iter().all(|c| c.y < 0), "{shape}");
        }
    }

    #[test]
    fn test_translation_is_unchecked() {
        let piece = Piece::spawn(Shape::L).translated(-20, 40);
        assert_eq!(piece.position(), Point::new(-17, 38));
        assert_eq!(piece.left().right().down(), piece.translated(0, 1));
    }

    #[test]
    fn test_rotation_normalizes() {
        assert_eq!(Rotation::from_quarter_turns(-1), Rotation::LEFT);
        assert_eq!(Rotation::from_quarter_turns(6), Rotation::REVERSE);
        assert_eq!(Rotation::LEFT.rotated_right(), Rotation::SPAWN);
        assert_eq!(Rotation::SPAWN.rotated_left(), Rotation::LEFT);
    }

    #[test]
    fn test_display_draws_bounding_box() {
        let piece = Piece::new(Shape::T, Point::new(4, 7));
        assert_eq!(piece.to_string(), "+---+\n| # |\n|###|\n|   |\n+---+");
    }

    #[test]
    fn test_super_rotation_kicks_off_the_wall() {
        let board = Board::EMPTY;
        // Vertical T hugging the left wall, stem pointing right.
        let piece = Piece::with_rotation(Shape::T, Rotation::RIGHT, Point::new(-1, 10));
        assert!(piece.cells().iter().all(|c| c.x >= 0));
        assert!(board.intersects(&piece.rotated(true)));

        let kicked = piece.super_rotated(&board, true).unwrap();
        assert_eq!(kicked.rotation(), Rotation::REVERSE);
        assert_eq!(kicked.position(), Point::new(0, 10));
    }

    #[test]
    fn test_super_rotation_fails_when_boxed_in() {
        let board = Board::from_ascii(
            r"
            LLLL.LLLLL
            LLLL.LLLLL
            LLLL.LLLLL
            LLLL.LLLLL
            ",
        );
        // Vertical I in a one-wide well cannot lie down anywhere.
        let piece = Piece::with_rotation(Shape::I, Rotation::RIGHT, Point::new(2, 16));
        assert!(!board.intersects(&piece));
        assert_eq!(piece.super_rotated(&board, true), None);
        assert_eq!(piece.super_rotated(&board, false), None);
    }

    #[test]
    fn test_simulate_drop_position_lands_on_floor() {
        let piece = Piece::spawn(Shape::O);
        let dropped = piece.simulate_drop_position(&Board::EMPTY);
        assert!(dropped.cells().iter().any(|c| c.y == 19));
        assert!(Board::EMPTY.intersects(&dropped.down()));
    }
}
