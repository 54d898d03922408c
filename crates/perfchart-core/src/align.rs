//! Positional join of the two raw series.
//!
//! [`align`] pairs entries by index, not by date. Entries past the shorter
//! series are dropped and dates at equal indices are never compared; use
//! [`date_mismatches`] or [`AlignmentReport`] to see where the two sides
//! disagree without changing the aligned output.

use serde::Serialize;

use crate::{CombinedPoint, CombinedSeries, Observation};

/// Merge two series into one index-aligned sequence.
///
/// The crypto entry's date is canonical for each point. The result has
/// `min(crypto.len(), traditional.len())` points in input order.
pub fn align(crypto: &[Observation], traditional: &[Observation]) -> CombinedSeries {
    let len = crypto.len().max(traditional.len());
    let mut points = Vec::with_capacity(crypto.len().min(traditional.len()));

    for index in 0..len {
        let (Some(c), Some(t)) = (crypto.get(index), traditional.get(index)) else {
            continue;
        };
        points.push(CombinedPoint {
            date: c.date.clone(),
            crypto: c.normalized_return,
            traditional: t.normalized_return,
            crypto_price: c.price,
            traditional_price: t.price,
        });
    }

    CombinedSeries::new(points)
}

/// An aligned index whose two source dates differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateMismatch {
    pub index: usize,
    pub crypto_date: String,
    pub traditional_date: String,
}

/// Indices within the aligned prefix where the dates disagree.
pub fn date_mismatches(crypto: &[Observation], traditional: &[Observation]) -> Vec<DateMismatch> {
    crypto
        .iter()
        .zip(traditional)
        .enumerate()
        .filter(|(_, (c, t))| c.date != t.date)
        .map(|(index, (c, t))| DateMismatch {
            index,
            crypto_date: c.date.clone(),
            traditional_date: t.date.clone(),
        })
        .collect()
}

/// What the positional join kept and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignmentReport {
    pub aligned: usize,
    pub dropped_crypto: usize,
    pub dropped_traditional: usize,
    pub mismatched_dates: usize,
    pub first_mismatch: Option<DateMismatch>,
}

impl AlignmentReport {
    pub fn new(crypto: &[Observation], traditional: &[Observation]) -> Self {
        let aligned = crypto.len().min(traditional.len());
        let mismatches = date_mismatches(crypto, traditional);

        Self {
            aligned,
            dropped_crypto: crypto.len() - aligned,
            dropped_traditional: traditional.len() - aligned,
            mismatched_dates: mismatches.len(),
            first_mismatch: mismatches.into_iter().next(),
        }
    }

    /// Whether the join lost data or paired different days.
    pub fn is_lossy(&self) -> bool {
        self.dropped_crypto > 0 || self.dropped_traditional > 0 || self.mismatched_dates > 0
    }
}
