use std::fmt;

use super::{
    board::{BOARD_HEIGHT, BOARD_WIDTH, Board},
    piece::Piece,
    shape::Shape,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderCell {
    #[default]
    Empty,
    Ghost,
    Piece(Shape),
}

impl RenderCell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == RenderCell::Empty
    }

    /// Text used by the `Display` of a render board.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            RenderCell::Empty => ' ',
            RenderCell::Ghost => '.',
            RenderCell::Piece(shape) => shape.as_char(),
        }
    }
}

/// What a player sees: locked cells, the ghost and the active piece.
///
/// Rows run top to bottom. Cells of a piece that are still above the board are
/// not drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBoard {
    rows: [[RenderCell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl RenderBoard {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [[RenderCell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
    };

    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let mut render = Self::EMPTY;
        for (point, shape) in board.occupied_cells() {
            if let Some(cell) = render.cell_mut(point.x, point.y) {
                *cell = RenderCell::Piece(shape);
            }
        }
        render
    }

    pub fn rows(&self) -> impl Iterator<Item = &[RenderCell; BOARD_WIDTH]> {
        self.rows.iter()
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<RenderCell> {
        self.rows.get(y)?.get(x).copied()
    }

    pub fn fill_piece(&mut self, piece: &Piece) {
        self.fill_piece_as(piece, RenderCell::Piece(piece.shape()));
    }

    /// Draws `piece` with `cell`.
    ///
    /// A ghost never covers anything already drawn.
    pub fn fill_piece_as(&mut self, piece: &Piece, cell: RenderCell) {
        for point in piece.cells() {
            let Some(target) = self.cell_mut(point.x, point.y) else {
                continue;
            };
            if cell != RenderCell::Ghost || target.is_empty() {
                *target = cell;
            }
        }
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut RenderCell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get_mut(y)?.get_mut(x)
    }
}

impl fmt::Display for RenderBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(BOARD_WIDTH);
        writeln!(f, "+{border}+")?;
        for row in &self.rows {
            write!(f, "|")?;
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "+{border}+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;

    #[test]
    fn test_from_board_copies_locked_cells() {
        let board = Board::from_ascii("ZZ......JJ");
        let render = RenderBoard::from_board(&board);
        assert_eq!(render.get(0, 19), Some(RenderCell::Piece(Shape::Z)));
        assert_eq!(render.get(9, 19), Some(RenderCell::Piece(Shape::J)));
        assert_eq!(render.get(4, 19), Some(RenderCell::Empty));
        assert_eq!(render.get(0, 20), None);
    }

    #[test]
    fn test_ghost_only_fills_empty_cells() {
        let mut render = RenderBoard::from_board(&Board::from_ascii(".Z........"));
        // O at (0, 18) occupies columns 1 and 2 of rows 18 and 19.
        let piece = Piece::new(Shape::O, Point::new(0, 18));
        render.fill_piece_as(&piece, RenderCell::Ghost);
        assert_eq!(render.get(1, 19), Some(RenderCell::Piece(Shape::Z)));
        assert_eq!(render.get(2, 19), Some(RenderCell::Ghost));
        assert_eq!(render.get(1, 18), Some(RenderCell::Ghost));

        render.fill_piece(&piece);
        assert_eq!(render.get(1, 18), Some(RenderCell::Piece(Shape::O)));
    }

    #[test]
    fn test_cells_above_board_are_skipped() {
        let mut render = RenderBoard::EMPTY;
        render.fill_piece(&Piece::spawn(Shape::T).down());
        let drawn = render
            .rows()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count();
        assert_eq!(drawn, 3);
    }

    #[test]
    fn test_display_uses_letters_and_dots() {
        let mut render = RenderBoard::from_board(&Board::from_ascii("LLL......."));
        render.fill_piece_as(&Piece::new(Shape::O, Point::new(5, 18)), RenderCell::Ghost);
        let text = render.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "+----------+");
        assert_eq!(lines[19], "|      ..  |");
        assert_eq!(lines[20], "|LLL   ..  |");
        assert_eq!(lines[21], "+----------+");
    }
}
