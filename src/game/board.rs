//! Board implementation
//!
//! Fixed 3×3 grid of tri-state cells.

use std::fmt;

use super::{MoveError, Role};

/// Width and height of the board
pub const BOARD_SIZE: usize = 3;

/// Every line that wins the game: 3 rows, 3 columns, 2 diagonals
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// Wire marker: `.` for empty, `X` or `O` otherwise
    pub fn marker(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// Parse a wire marker
    pub fn from_marker(token: &str) -> Option<Cell> {
        match token {
            "." => Some(Cell::Empty),
            "X" => Some(Cell::X),
            "O" => Some(Cell::O),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The role that owns this cell, if any
    pub fn owner(self) -> Option<Role> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Role::X),
            Cell::O => Some(Role::O),
        }
    }
}

impl From<Role> for Cell {
    fn from(role: Role) -> Self {
        match role {
            Role::X => Cell::X,
            Role::O => Cell::O,
        }
    }
}

/// A validated board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Validate raw coordinates as sent by a client
    ///
    /// Coordinates arrive signed so that `MOVE -1 0` is still a well-formed
    /// line and fails here as out of range, not as a parse error.
    pub fn try_new(row: i64, col: i64) -> Result<Self, MoveError> {
        let in_range = |v: i64| (0..BOARD_SIZE as i64).contains(&v);
        if in_range(row) && in_range(col) {
            Ok(Self {
                row: row as usize,
                col: col as usize,
            })
        } else {
            Err(MoveError::OutOfRange { row, col })
        }
    }
}

/// The 3×3 grid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create an all-empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from explicit rows (used when decoding a `BOARD` message)
    pub fn from_rows(rows: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells: rows }
    }

    /// Cell at a validated position
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// Cell at raw coordinates, `None` when off the board
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// One row, left to right
    pub fn row(&self, row: usize) -> &[Cell; BOARD_SIZE] {
        &self.cells[row]
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_SIZE]> {
        self.cells.iter()
    }

    /// Claim an empty cell for `role`
    ///
    /// Fails with `Occupied` and leaves the board untouched if the cell
    /// already carries a mark.
    pub fn place(&mut self, pos: Position, role: Role) -> Result<(), MoveError> {
        let cell = &mut self.cells[pos.row][pos.col];
        if !cell.is_empty() {
            return Err(MoveError::Occupied {
                row: pos.row,
                col: pos.col,
            });
        }
        *cell = Cell::from(role);
        Ok(())
    }

    /// Does `role` own every cell of at least one of the 8 lines?
    pub fn has_line(&self, role: Role) -> bool {
        let mark = Cell::from(role);
        LINES
            .iter()
            .any(|line| line.iter().all(|&(r, c)| self.cells[r][c] == mark))
    }

    /// The role owning a complete line, if any
    pub fn winner(&self) -> Option<Role> {
        [Role::X, Role::O].into_iter().find(|&role| self.has_line(role))
    }

    /// No empty cell left
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|c| !c.is_empty())
    }

    /// Number of cells still empty
    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_empty()).count()
    }
}

impl fmt::Display for Board {
    /// Three lines of `<c0> <c1> <c2>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} {} {}", row[0].marker(), row[1].marker(), row[2].marker())?;
        }
        Ok(())
    }
}
