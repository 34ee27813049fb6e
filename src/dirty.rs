use std::mem;

use crate::coord::SquareIdx;


// What the renderer needs to do to bring the DOM in line with the board model.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardChange {
    // Two cell nodes trade places; their tone classes and square indices are re-applied.
    Swap(SquareIdx, SquareIdx),
    // Cell node content is rebuilt from the model.
    Redraw(SquareIdx),
    RedrawAll,
}

// Ordered log of pending board changes. Order matters: a swap followed by a redraw of one of
// the swapped squares must be replayed in that order.
#[derive(Clone, Debug, Default)]
pub struct DirtyBoard {
    changes: Vec<BoardChange>,
}

impl DirtyBoard {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, change: BoardChange) {
        match change {
            BoardChange::Swap(a, b) if a == b => {}
            BoardChange::RedrawAll => self.changes = vec![BoardChange::RedrawAll],
            _ => {
                // Everything is going to be rebuilt anyway.
                if self.changes.first() == Some(&BoardChange::RedrawAll) {
                    return;
                }
                self.changes.push(change);
            }
        }
    }

    pub fn take(&mut self) -> Vec<BoardChange> { mem::take(&mut self.changes) }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sq(idx: u8) -> SquareIdx { SquareIdx::from_zero_based(idx) }

    #[test]
    fn keeps_order_and_drains() {
        let mut dirty = DirtyBoard::new();
        dirty.push(BoardChange::Swap(sq(1), sq(2)));
        dirty.push(BoardChange::Redraw(sq(2)));
        assert_eq!(dirty.take(), vec![BoardChange::Swap(sq(1), sq(2)), BoardChange::Redraw(sq(2))]);
        assert!(dirty.take().is_empty());
    }

    #[test]
    fn redraw_all_absorbs_everything() {
        let mut dirty = DirtyBoard::new();
        dirty.push(BoardChange::Redraw(sq(5)));
        dirty.push(BoardChange::RedrawAll);
        dirty.push(BoardChange::Swap(sq(1), sq(2)));
        assert_eq!(dirty.take(), vec![BoardChange::RedrawAll]);
    }

    #[test]
    fn self_swap_is_dropped() {
        let mut dirty = DirtyBoard::new();
        dirty.push(BoardChange::Swap(sq(7), sq(7)));
        assert!(dirty.take().is_empty());
    }
}
