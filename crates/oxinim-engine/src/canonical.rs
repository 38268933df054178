use crate::{Move, Nim};

/// Symmetry-reduced view of a Nim board: the multiset of positive row
/// counts, sorted ascending.
///
/// Two boards whose rows are permutations of each other collapse to the
/// same canonical state, which is what makes it usable as a memoization
/// and learning key. Equality and hashing cover the sorted counts only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalState {
    counts: Vec<u32>,
}

impl CanonicalState {
    #[must_use]
    pub fn of(game: &Nim) -> Self {
        let mut counts: Vec<u32> = game.rows().iter().copied().filter(|&c| c > 0).collect();
        counts.sort_unstable();
        Self { counts }
    }

    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.counts.is_empty()
    }

    /// Every legal move on the sorted view: each row, each take in
    /// `1..=count`, row by row with counts ascending.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.counts
            .iter()
            .enumerate()
            .flat_map(|(row, &count)| (1..=count).map(move |take| Move::new(row, take)))
    }

    /// Applies a move on the sorted view and re-canonicalizes.
    ///
    /// Row indices here address sorted positions, not board rows.
    #[must_use]
    pub fn apply(&self, mv: Move) -> Self {
        debug_assert!(mv.row < self.counts.len());
        debug_assert!(mv.count >= 1 && mv.count <= self.counts[mv.row]);
        let mut counts = self.counts.clone();
        counts[mv.row] -= mv.count;
        counts.retain(|&c| c > 0);
        counts.sort_unstable();
        Self { counts }
    }
}

/// A canonical state paired with the permutation back to the concrete
/// board it was derived from.
///
/// The permutation never takes part in equality or hashing; it exists
/// only to translate a move computed on the sorted view into a playable
/// move on the live board. Ties in count resolve by original row index,
/// which keeps the translation stable.
#[derive(Debug, Clone)]
pub struct Canonical {
    state: CanonicalState,
    board_rows: Vec<usize>,
}

impl Canonical {
    #[must_use]
    pub fn of(game: &Nim) -> Self {
        let mut pairs: Vec<(u32, usize)> = game
            .rows()
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(row, &count)| (count, row))
            .collect();
        pairs.sort_unstable();
        let counts = pairs.iter().map(|&(count, _)| count).collect();
        let board_rows = pairs.into_iter().map(|(_, row)| row).collect();
        Self {
            state: CanonicalState { counts },
            board_rows,
        }
    }

    #[must_use]
    pub fn state(&self) -> &CanonicalState {
        &self.state
    }

    /// Maps a move on the sorted view back onto the board's rows.
    #[must_use]
    pub fn translate(&self, mv: Move) -> Move {
        Move::new(self.board_rows[mv.row], mv.count)
    }
}
