//! Per-call score accumulator.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::FaceShape;

/// Signed score per face shape, rebuilt for every classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub oval: i32,
    pub round: i32,
    pub square: i32,
    pub heart: i32,
    pub long: i32,
    pub diamond: i32,
}

impl ScoreTable {
    /// A table where `winner` holds 100 and every other shape 0.
    #[must_use]
    pub fn definitive(winner: FaceShape) -> Self {
        let mut table = Self::default();
        *table.slot(winner) = 100;
        table
    }

    #[must_use]
    pub const fn get(&self, shape: FaceShape) -> i32 {
        match shape {
            FaceShape::Oval => self.oval,
            FaceShape::Round => self.round,
            FaceShape::Square => self.square,
            FaceShape::Heart => self.heart,
            FaceShape::Long => self.long,
            FaceShape::Diamond => self.diamond,
        }
    }

    pub fn add(&mut self, shape: FaceShape, delta: i32) {
        *self.slot(shape) += delta;
    }

    /// Shapes ordered by descending score; equal scores keep enumeration order.
    #[must_use]
    pub fn ranked(&self) -> [(FaceShape, i32); 6] {
        let mut ranked = FaceShape::ALL.map(|shape| (shape, self.get(shape)));
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    fn slot(&mut self, shape: FaceShape) -> &mut i32 {
        match shape {
            FaceShape::Oval => &mut self.oval,
            FaceShape::Round => &mut self.round,
            FaceShape::Square => &mut self.square,
            FaceShape::Heart => &mut self.heart,
            FaceShape::Long => &mut self.long,
            FaceShape::Diamond => &mut self.diamond,
        }
    }
}

/// Score table plus the switch for per-rule diagnostics.
pub(crate) struct Tally {
    table: ScoreTable,
    trace: bool,
}

impl Tally {
    pub(crate) fn new(trace: bool) -> Self {
        Self {
            table: ScoreTable::default(),
            trace,
        }
    }

    /// Applies the deltas of one rule.
    pub(crate) fn apply(&mut self, rule: &'static str, deltas: &[(FaceShape, i32)]) {
        for &(shape, delta) in deltas {
            self.table.add(shape, delta);
            if self.trace {
                trace!(
                    rule,
                    shape = %shape,
                    delta,
                    total = self.table.get(shape),
                    "score adjusted"
                );
            }
        }
    }

    pub(crate) const fn table(&self) -> &ScoreTable {
        &self.table
    }

    pub(crate) fn into_table(self) -> ScoreTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitive_table() {
        let table = ScoreTable::definitive(FaceShape::Heart);
        assert_eq!(table.heart, 100);
        let others: i32 = FaceShape::ALL
            .iter()
            .filter(|s| **s != FaceShape::Heart)
            .map(|s| table.get(*s))
            .sum();
        assert_eq!(others, 0);
    }

    #[test]
    fn test_ranked_is_stable_on_ties() {
        let mut table = ScoreTable::default();
        table.add(FaceShape::Long, 7);
        table.add(FaceShape::Round, 7);
        table.add(FaceShape::Diamond, 9);

        let ranked = table.ranked();
        assert_eq!(ranked[0], (FaceShape::Diamond, 9));
        assert_eq!(ranked[1], (FaceShape::Round, 7));
        assert_eq!(ranked[2], (FaceShape::Long, 7));
        assert_eq!(ranked[3], (FaceShape::Oval, 0));
    }

    #[test]
    fn test_tally_accumulates_negative_deltas() {
        let mut tally = Tally::new(false);
        tally.apply("a", &[(FaceShape::Oval, 5), (FaceShape::Diamond, 3)]);
        tally.apply("b", &[(FaceShape::Oval, -10)]);
        assert_eq!(tally.table().oval, -5);
        assert_eq!(tally.into_table().diamond, 3);
    }
}
