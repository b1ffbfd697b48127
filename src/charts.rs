//! Descriptive aggregates behind the dashboard charts.
//!
//! Everything here is plain data (label, display value, percent width);
//! the templates draw it as proportional bars. Covers the chart set of the
//! dashboard: points by team, founded-year / age / match-date / odds-price
//! histograms, and position/nationality counts.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// One renderable bar, `pct` scaled so the largest bar is 100.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: String,
    pub pct: u32,
}

/// Bars from (label, value) pairs in the given order.
pub fn bars(pairs: Vec<(String, f64)>) -> Vec<Bar> {
    let max = pairs
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);
    pairs
        .into_iter()
        .map(|(label, value)| Bar {
            label,
            value: trim_number(value),
            pct: scale(value, max),
        })
        .collect()
}

/// Histogram of numeric values over `bin_count` equal-width bins. Empty
/// input yields no bins.
pub fn histogram(values: &[f64], bin_count: usize) -> Vec<Bar> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return vec![Bar {
            label: trim_number(min),
            value: values.len().to_string(),
            pct: 100,
        }];
    }

    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &value in values {
        let index = (((value - min) / width) as usize).min(bin_count - 1);
        counts[index] += 1;
    }

    let peak = counts.iter().copied().max().unwrap_or(0) as f64;
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lo = min + width * i as f64;
            let hi = lo + width;
            Bar {
                label: format!("{} – {}", trim_number(lo), trim_number(hi)),
                value: count.to_string(),
                pct: scale(count as f64, peak),
            }
        })
        .collect()
}

/// Occurrence counts, most frequent first, ties broken by label.
pub fn value_counts<I, S>(values: I) -> Vec<Bar>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values {
        *counts.entry(value.into()).or_insert(0) += 1;
    }

    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let peak = pairs.first().map(|(_, c)| *c).unwrap_or(0) as f64;
    pairs
        .into_iter()
        .map(|(label, count)| Bar {
            label,
            value: count.to_string(),
            pct: scale(count as f64, peak),
        })
        .collect()
}

/// Month histogram of match dates, chronological.
pub fn date_histogram(dates: &[DateTime<Utc>]) -> Vec<Bar> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for date in dates {
        *counts.entry(date.format("%Y-%m").to_string()).or_insert(0) += 1;
    }

    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let peak = pairs.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64;
    pairs
        .into_iter()
        .map(|(label, count)| Bar {
            label,
            value: count.to_string(),
            pct: scale(count as f64, peak),
        })
        .collect()
}

fn scale(value: f64, max: f64) -> u32 {
    if max <= 0.0 || !max.is_finite() {
        0
    } else {
        ((value / max) * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

fn trim_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.2}")
    }
}
