use std::fmt;

use arrayvec::ArrayVec;

use super::{geometry::Point, piece::Piece, shape::Shape};

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A single row of locked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardRow {
    cells: [Option<Shape>; BOARD_WIDTH],
}

impl BoardRow {
    pub const EMPTY: Self = Self {
        cells: [None; BOARD_WIDTH],
    };

    #[must_use]
    pub fn get(&self, x: usize) -> Option<Shape> {
        self.cells.get(x).copied().flatten()
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// Grid of locked cells.
///
/// Every cell stored here lies inside `0..WIDTH` × `0..HEIGHT`; a piece that
/// would leave cells above the board is never baked. Boards are small `Copy`
/// values and every operation returns a new board, so a game state can be
/// branched by plain assignment.
///
/// # Example
///
/// ```
/// use quadris_engine::{Board, Piece, Shape};
///
/// let piece = Piece::spawn(Shape::O);
/// let landed = piece.simulate_drop_position(&Board::EMPTY);
/// let board = Board::EMPTY.baked(&landed);
/// assert_eq!(board.len(), 4);
/// assert!(board.intersects(&landed));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [BoardRow::EMPTY; BOARD_HEIGHT],
    };

    #[must_use]
    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Builds a board from rows of text, aligned to the bottom of the board.
    ///
    /// Each non-blank line is one row of exactly [`Board::WIDTH`] characters:
    /// `.` for an empty cell or a shape letter. Leading and trailing
    /// whitespace on each line is ignored.
    ///
    /// # Panics
    ///
    /// Panics on a malformed row, an unknown character, or more rows than the
    /// board holds.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "board art has {} rows, at most {BOARD_HEIGHT} allowed",
            lines.len()
        );

        let mut board = Self::EMPTY;
        let top = BOARD_HEIGHT - lines.len();
        for (row, line) in board.rows[top..].iter_mut().zip(&lines) {
            assert_eq!(
                line.chars().count(),
                BOARD_WIDTH,
                "board art row {line:?} must be {BOARD_WIDTH} cells wide"
            );
            for (cell, ch) in row.cells.iter_mut().zip(line.chars()) {
                *cell = match ch {
                    '.' => None,
                    _ => Some(
                        Shape::from_char(ch)
                            .unwrap_or_else(|| panic!("unknown cell {ch:?} in board art")),
                    ),
                };
            }
        }
        board
    }

    #[must_use]
    pub fn rows(&self) -> &[BoardRow; BOARD_HEIGHT] {
        &self.rows
    }

    /// Shape locked at `point`, or `None` for an empty or off-board cell.
    #[must_use]
    pub fn get(&self, point: Point) -> Option<Shape> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        self.rows.get(y)?.get(x)
    }

    #[must_use]
    pub fn is_occupied(&self, point: Point) -> bool {
        self.get(point).is_some()
    }

    /// All locked cells with their shapes, top row first.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Point, Shape)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.cells.iter().enumerate().filter_map(move |(x, cell)| {
                #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let point = Point::new(x as i32, y as i32);
                cell.map(|shape| (point, shape))
            })
        })
    }

    /// Number of locked cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.iter().map(BoardRow::occupied_count).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if any cell of `piece` is off the sides or bottom of the
    /// board, or lands on a locked cell.
    ///
    /// Cells above the board (`y < 0`) are allowed here.
    #[must_use]
    pub fn intersects(&self, piece: &Piece) -> bool {
        piece.cells().iter().any(|&cell| {
            #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let out_of_bounds = cell.x < 0
                || cell.x >= BOARD_WIDTH as i32
                || cell.y >= BOARD_HEIGHT as i32;
            out_of_bounds || self.is_occupied(cell)
        })
    }

    /// Returns a new board with `piece` locked in place.
    ///
    /// # Panics
    ///
    /// Panics if the piece intersects the board or sticks out above it.
    #[must_use]
    pub fn baked(&self, piece: &Piece) -> Self {
        assert!(
            !self.intersects(piece),
            "cannot bake {:?} at {}: it intersects the board",
            piece.shape(),
            piece.position()
        );
        let mut board = *self;
        for cell in piece.cells() {
            let (Ok(x), Ok(y)) = (usize::try_from(cell.x), usize::try_from(cell.y)) else {
                panic!(
                    "cannot bake {:?}: cell {cell} is above the board",
                    piece.shape()
                );
            };
            board.rows[y].cells[x] = Some(piece.shape());
        }
        board
    }

    /// Indices of the rows holding exactly [`Board::WIDTH`] locked cells,
    /// ascending.
    #[must_use]
    pub fn completed_rows(&self) -> ArrayVec<usize, BOARD_HEIGHT> {
        let mut counts = [0; BOARD_HEIGHT];
        for (point, _) in self.occupied_cells() {
            #[expect(clippy::cast_sign_loss)]
            let y = point.y as usize;
            counts[y] += 1;
        }
        counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count == BOARD_WIDTH)
            .map(|(y, _)| y)
            .collect()
    }

    /// Drops row `y`; rows above it move down by one and an empty row appears
    /// at the top. Rows below `y` are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not a row of the board.
    #[must_use]
    pub fn removed_row(&self, y: usize) -> Self {
        assert!(y < BOARD_HEIGHT, "row {y} is outside the board");
        let mut board = *self;
        board.rows.copy_within(0..y, 1);
        board.rows[0] = BoardRow::EMPTY;
        board
    }

    /// Removes every row in `rows`, all given in the coordinates of `self`.
    ///
    /// Rows are removed top to bottom: removing a row only moves rows above
    /// it, so the indices still to be removed stay valid.
    #[must_use]
    pub fn cleared_rows(&self, rows: &[usize]) -> Self {
        let mut rows = rows.to_vec();
        rows.sort_unstable();
        rows.dedup();
        rows.into_iter()
            .fold(*self, |board, y| board.removed_row(y))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(BOARD_WIDTH);
        writeln!(f, "+{border}+")?;
        for row in &self.rows {
            write!(f, "|")?;
            for cell in row.cells {
                write!(f, "{}", cell.map_or(' ', Shape::as_char))?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "+{border}+")
    }
}
