use std::fmt;

use crate::IllegalMoveError;

/// One turn's action: remove `count` objects from row `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub count: u32,
}

impl Move {
    #[must_use]
    pub fn new(row: usize, count: u32) -> Self {
        Self { row, count }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from row {}", self.count, self.row)
    }
}

/// Nim board state: one object count per row.
///
/// Lives for exactly one duel and is mutated in place, one legal move at
/// a time, until every row is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nim {
    rows: Vec<u32>,
}

impl Nim {
    /// Standard starting position: row `i` holds `2 * i + 1` objects.
    #[must_use]
    pub fn new(num_rows: usize) -> Self {
        let rows = (0..num_rows).map(|i| 2 * i as u32 + 1).collect();
        Self { rows }
    }

    /// Arbitrary starting position, for custom setups and tests.
    #[must_use]
    pub fn from_rows(rows: Vec<u32>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    /// True once every row is empty; the player now to move has lost.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.rows.iter().all(|&count| count == 0)
    }

    /// Applies a move, removing `mv.count` objects from `mv.row`.
    ///
    /// Rejects out-of-range rows, zero-object takes, and takes exceeding
    /// the row's current count.
    pub fn apply(&mut self, mv: Move) -> Result<(), IllegalMoveError> {
        let illegal = IllegalMoveError {
            row: mv.row,
            count: mv.count,
        };
        let Some(&available) = self.rows.get(mv.row) else {
            return Err(illegal);
        };
        if mv.count == 0 || mv.count > available {
            return Err(illegal);
        }
        self.rows[mv.row] -= mv.count;
        Ok(())
    }
}

impl fmt::Display for Nim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &count) in self.rows.iter().enumerate() {
            let indent = " ".repeat(self.rows.len() - i);
            writeln!(f, "{i} {indent}{}", "*".repeat(count as usize))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_rows() {
        assert_eq!(Nim::new(3).rows(), &[1, 3, 5]);
        assert_eq!(Nim::new(5).rows(), &[1, 3, 5, 7, 9]);
        assert!(Nim::new(0).is_terminal());
    }

    #[test]
    fn test_apply_legal_move() {
        let mut game = Nim::new(3);
        game.apply(Move::new(2, 4)).unwrap();
        assert_eq!(game.rows(), &[1, 3, 1]);
        assert!(!game.is_terminal());
    }

    #[test]
    fn test_apply_to_terminal() {
        let mut game = Nim::from_rows(vec![0, 2]);
        game.apply(Move::new(1, 2)).unwrap();
        assert!(game.is_terminal());
    }

    #[test]
    fn test_apply_rejects_illegal_moves() {
        let mut game = Nim::new(3);
        assert!(game.apply(Move::new(3, 1)).is_err()); // no such row
        assert!(game.apply(Move::new(1, 4)).is_err()); // row holds only 3
        assert!(game.apply(Move::new(0, 0)).is_err()); // must take something
        assert_eq!(game.rows(), &[1, 3, 5]);
    }

    #[test]
    fn test_display_draws_rows() {
        let text = Nim::new(2).to_string();
        assert!(text.contains('*'));
        assert!(text.contains("***"));
    }
}
