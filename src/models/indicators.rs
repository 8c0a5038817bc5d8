use serde::{Deserialize, Serialize};

/// EMA values index-aligned with the series they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmaSeries {
    pub span: usize,
    pub values: Vec<f64>,
}

impl EmaSeries {
    pub fn new(span: usize, values: Vec<f64>) -> Self {
        Self { span, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at the most recent bar.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Value `offset` positions back from the end, one-indexed like
    /// `PriceSeries::at_offset`.
    pub fn at_offset(&self, offset: usize) -> Option<f64> {
        if offset == 0 || offset > self.values.len() {
            return None;
        }
        self.values.get(self.values.len() - offset).copied()
    }
}
