//! Squares strictly between two aligned squares

use crate::board::Square;

use super::shape::Delta;

/// Iterator over the squares a sliding piece passes through.
#[derive(Debug, Clone)]
pub struct Trace {
    current: Square,
    end: Square,
    step: (i8, i8),
}

/// `None` unless `start` and `end` differ and share a rank, file or diagonal.
pub fn trace(start: Square, end: Square) -> Option<Trace> {
    let delta = Delta::between(start, end);
    if !(delta.is_orthogonal() || delta.is_diagonal()) {
        return None;
    }

    Some(Trace {
        current: start,
        end,
        step: (delta.d_row.signum(), delta.d_col.signum()),
    })
}

impl Iterator for Trace {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let next = self.current.offset(self.step.0, self.step.1)?;
        if next == self.end {
            return None;
        }
        self.current = next;
        Some(next)
    }
}
