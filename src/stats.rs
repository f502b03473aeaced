use crate::models::Cell;
use serde::{Deserialize, Serialize};

/// Cross-country accumulator for one year column.
///
/// `reported` counts every numeric cell; the positive-only statistics
/// (`sum`, `min`, `max`) ignore zero and negative values, which these
/// datasets use as missing-data sentinels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearAggregate {
    pub reported: usize,
    pub contributing: usize,
    pub sum: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl YearAggregate {
    pub fn push(&mut self, cell: Cell) {
        let Some(v) = cell.number() else {
            return;
        };
        self.reported += 1;
        if v <= 0.0 {
            return;
        }
        self.contributing += 1;
        self.sum += v;
        self.min = Some(self.min.map_or(v, |m| m.min(v)));
        self.max = Some(self.max.map_or(v, |m| m.max(v)));
    }

    /// Mean of the positive values, `None` when nothing contributed.
    pub fn mean(&self) -> Option<f64> {
        if self.contributing == 0 {
            None
        } else {
            Some(self.sum / self.contributing as f64)
        }
    }
}

impl FromIterator<Cell> for YearAggregate {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut agg = YearAggregate::default();
        for c in iter {
            agg.push(c);
        }
        agg
    }
}
