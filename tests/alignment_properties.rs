//! Property and scenario tests for the positional join and return summary.

use perfchart_core::{
    align, summarize, AlignmentReport, CombinedPoint, CombinedSeries, Observation,
};
use quickcheck_macros::quickcheck;

fn series(prefix: &str, len: usize) -> Vec<Observation> {
    (0..len)
        .map(|i| Observation {
            date: format!("{prefix}-{i:04}"),
            normalized_return: i as f64 * 0.5,
            price: 100.0 + i as f64,
        })
        .collect()
}

fn dated(len: usize, offset: f64) -> Vec<Observation> {
    (0..len)
        .map(|i| {
            Observation::new(format!("2024-03-{:02}", i + 1), offset + i as f64, 10.0 + i as f64)
                .expect("valid observation")
        })
        .collect()
}

// =============================================================================
// Properties
// =============================================================================

#[quickcheck]
fn aligned_length_is_shorter_input_length(crypto_len: u8, traditional_len: u8) -> bool {
    let crypto = series("c", crypto_len as usize);
    let traditional = series("t", traditional_len as usize);

    align(&crypto, &traditional).len() == crypto.len().min(traditional.len())
}

#[quickcheck]
fn aligned_dates_come_from_first_argument(crypto_len: u8, traditional_len: u8) -> bool {
    let crypto = series("c", crypto_len as usize);
    let traditional = series("t", traditional_len as usize);

    align(&crypto, &traditional)
        .iter()
        .enumerate()
        .all(|(i, point)| point.date == crypto[i].date)
}

#[quickcheck]
fn empty_side_yields_empty_series(len: u8) -> bool {
    let other = series("x", len as usize);
    align(&[], &other).is_empty() && align(&other, &[]).is_empty()
}

#[quickcheck]
fn report_accounts_for_every_input(crypto_len: u8, traditional_len: u8) -> bool {
    let crypto = series("c", crypto_len as usize);
    let traditional = series("t", traditional_len as usize);
    let report = AlignmentReport::new(&crypto, &traditional);

    report.aligned + report.dropped_crypto == crypto.len()
        && report.aligned + report.dropped_traditional == traditional.len()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn when_crypto_has_ten_points_and_traditional_seven_alignment_keeps_seven() {
    // Given: Ten crypto days and seven traditional days sharing the first seven dates
    let crypto = dated(10, 0.0);
    let traditional = dated(7, 100.0);

    // When: The series are aligned
    let aligned = align(&crypto, &traditional);

    // Then: Exactly seven points remain, each pairing same-index entries
    assert_eq!(aligned.len(), 7);
    for (i, point) in aligned.iter().enumerate() {
        assert_eq!(point.date, crypto[i].date);
        assert_eq!(point.date, traditional[i].date);
        assert_eq!(point.crypto, crypto[i].normalized_return);
        assert_eq!(point.traditional, traditional[i].normalized_return);
        assert_eq!(point.crypto_price, crypto[i].price);
        assert_eq!(point.traditional_price, traditional[i].price);
    }
}

#[test]
fn when_inputs_are_out_of_order_alignment_preserves_input_order() {
    // Given: A crypto series that is not chronological
    let mut crypto = dated(3, 0.0);
    crypto.reverse();
    let traditional = dated(3, 0.0);

    // When: The series are aligned
    let aligned = align(&crypto, &traditional);

    // Then: The output follows input order without re-sorting
    let dates: Vec<&str> = aligned.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-03-03", "2024-03-02", "2024-03-01"]);
}

#[test]
fn when_series_is_empty_summary_has_no_figures() {
    let summary = summarize(&CombinedSeries::default());

    assert!(summary.crypto_return.is_none());
    assert!(summary.traditional_return.is_none());
}

#[test]
fn when_series_has_points_summary_reports_the_last_one() {
    // Given: An aligned series ending at crypto 5.2 / traditional -1.1
    let series = CombinedSeries::new(vec![
        CombinedPoint {
            date: String::from("2024-03-01"),
            crypto: 12.0,
            traditional: 3.0,
            crypto_price: 112.0,
            traditional_price: 103.0,
        },
        CombinedPoint {
            date: String::from("2024-03-02"),
            crypto: 5.2,
            traditional: -1.1,
            crypto_price: 105.2,
            traditional_price: 98.9,
        },
    ]);

    // When: The summary is extracted
    let summary = summarize(&series);

    // Then: Only the last point is reported
    assert_eq!(summary.crypto_return, Some(5.2));
    assert_eq!(summary.traditional_return, Some(-1.1));
}
