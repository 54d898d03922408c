use serde::{Deserialize, Serialize};

/// One index position where both input series had an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedPoint {
    pub date: String,
    pub crypto: f64,
    pub traditional: f64,
    pub crypto_price: f64,
    pub traditional_price: f64,
}

/// Index-aligned sequence consumed by presentation and summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombinedSeries(Vec<CombinedPoint>);

impl CombinedSeries {
    pub fn new(points: Vec<CombinedPoint>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[CombinedPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&CombinedPoint> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CombinedPoint> {
        self.0.iter()
    }
}

impl From<Vec<CombinedPoint>> for CombinedSeries {
    fn from(points: Vec<CombinedPoint>) -> Self {
        Self(points)
    }
}

impl<'a> IntoIterator for &'a CombinedSeries {
    type Item = &'a CombinedPoint;
    type IntoIter = std::slice::Iter<'a, CombinedPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
