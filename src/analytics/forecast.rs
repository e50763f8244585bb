//! Bed-occupancy forecasting by naive linear extrapolation.
//!
//! The trend is a single global slope over the trailing window — endpoints
//! difference divided by point count, not a regression. Sparse history falls
//! back to a fixed synthetic ramp instead of extrapolating noise.

use chrono::{Duration, Local, NaiveDate};
use rusqlite::Connection;
use serde::Serialize;

use crate::config;
use crate::db;
use crate::models::DailyAdmissions;

use super::{Derived, FallbackReason};

/// Historical points required before the trend is trusted.
const MIN_HISTORY_POINTS: usize = 7;
/// Trailing window fetched for trend estimation.
const HISTORY_WINDOW_DAYS: u32 = 30;
/// Occupancy clamp bounds; extreme trends and thin wards both land inside.
const OCCUPANCY_FLOOR_PCT: f64 = 40.0;
const OCCUPANCY_CEIL_PCT: f64 = 95.0;
/// Flat percentage used when history cannot be fetched at all.
const FALLBACK_OCCUPANCY_PCT: f64 = 65.0;

/// One forecast day. `predicted_count` is absent on fallback sequences,
/// which carry no admission estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyForecast {
    pub date: NaiveDate,
    pub predicted_occupancy_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_count: Option<i64>,
}

/// Project occupancy `horizon_days` ahead of `today`.
///
/// `history` must be in chronological order. With fewer than
/// `MIN_HISTORY_POINTS` entries the result is the synthetic ramp
/// (65% + 2 per day, from tomorrow) tagged `InsufficientHistory`.
pub fn forecast_occupancy(
    history: &[DailyAdmissions],
    horizon_days: u32,
    total_beds: u32,
    today: NaiveDate,
) -> Derived<Vec<OccupancyForecast>> {
    if history.len() < MIN_HISTORY_POINTS {
        return Derived::degraded(
            synthetic_ramp(horizon_days, today),
            FallbackReason::InsufficientHistory,
        );
    }

    let counts: Vec<f64> = history.iter().map(|d| f64::from(d.admissions)).collect();
    let avg = counts.iter().sum::<f64>() / counts.len() as f64;
    let trend = (counts[counts.len() - 1] - counts[0]) / counts.len() as f64;
    let beds = f64::from(total_beds.max(1));

    let forecasts = (0..horizon_days)
        .map(|i| {
            let predicted_admissions = avg + trend * f64::from(i);
            let pct = (predicted_admissions / beds * 100.0)
                .clamp(OCCUPANCY_FLOOR_PCT, OCCUPANCY_CEIL_PCT);
            OccupancyForecast {
                date: today + Duration::days(i64::from(i) + 1),
                predicted_occupancy_pct: round1(pct),
                predicted_count: Some(predicted_admissions.round() as i64),
            }
        })
        .collect();

    Derived::computed(forecasts)
}

/// 65% + 2 per day, dated from tomorrow.
fn synthetic_ramp(horizon_days: u32, today: NaiveDate) -> Vec<OccupancyForecast> {
    (0..horizon_days)
        .map(|i| OccupancyForecast {
            date: today + Duration::days(i64::from(i) + 1),
            predicted_occupancy_pct: 65.0 + 2.0 * f64::from(i),
            predicted_count: None,
        })
        .collect()
}

/// Flat 65%, dated from today.
fn flat_sequence(horizon_days: u32, today: NaiveDate) -> Vec<OccupancyForecast> {
    (0..horizon_days)
        .map(|i| OccupancyForecast {
            date: today + Duration::days(i64::from(i)),
            predicted_occupancy_pct: FALLBACK_OCCUPANCY_PCT,
            predicted_count: None,
        })
        .collect()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Fetch the trailing admission window and forecast against the general-ward
/// capacity. A failed fetch degrades to the flat sequence.
pub fn occupancy_forecast(conn: &Connection, horizon_days: u32) -> Derived<Vec<OccupancyForecast>> {
    let today = Local::now().date_naive();
    match db::get_daily_admission_counts(conn, HISTORY_WINDOW_DAYS) {
        Ok(history) => {
            forecast_occupancy(&history, horizon_days, config::GENERAL_WARD_BEDS, today)
        }
        Err(e) => {
            tracing::warn!("Admission history unavailable, serving flat forecast: {e}");
            Derived::degraded(
                flat_sequence(horizon_days, today),
                FallbackReason::DataUnavailable,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::db::test_support::{seed_admission, seed_patient};

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap() + Duration::days(offset)
    }

    fn history(counts: &[u32]) -> Vec<DailyAdmissions> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &admissions)| DailyAdmissions {
                date: day(i as i64 - counts.len() as i64),
                admissions,
            })
            .collect()
    }

    #[test]
    fn sparse_history_yields_synthetic_ramp() {
        let result = forecast_occupancy(&history(&[4, 5, 6]), 3, 50, day(0));
        assert_eq!(result.fallback, Some(FallbackReason::InsufficientHistory));
        let pcts: Vec<f64> = result
            .value
            .iter()
            .map(|f| f.predicted_occupancy_pct)
            .collect();
        assert_eq!(pcts, vec![65.0, 67.0, 69.0]);
        assert_eq!(result.value[0].date, day(1));
        assert!(result.value.iter().all(|f| f.predicted_count.is_none()));
    }

    #[test]
    fn trend_projects_from_average() {
        // avg = 21, trend = (27 - 20) / 7 = 1.0
        let result = forecast_occupancy(&history(&[20, 20, 20, 20, 20, 20, 27]), 3, 50, day(0));
        assert!(!result.is_fallback());
        let days = &result.value;
        assert_eq!(days[0].predicted_occupancy_pct, 42.0);
        assert_eq!(days[0].predicted_count, Some(21));
        assert_eq!(days[1].predicted_occupancy_pct, 44.0);
        assert_eq!(days[2].predicted_occupancy_pct, 46.0);
        assert_eq!(days[0].date, day(1));
        assert_eq!(days[2].date, day(3));
    }

    #[test]
    fn occupancy_clamps_to_bounds() {
        // avg 60 of 50 beds = 120%, clamped high; count stays unclamped
        let high = forecast_occupancy(&history(&[60; 7]), 1, 50, day(0));
        assert_eq!(high.value[0].predicted_occupancy_pct, 95.0);
        assert_eq!(high.value[0].predicted_count, Some(60));

        // avg 2 of 50 beds = 4%, clamped low
        let low = forecast_occupancy(&history(&[2; 7]), 1, 50, day(0));
        assert_eq!(low.value[0].predicted_occupancy_pct, 40.0);
    }

    #[test]
    fn forecast_is_idempotent() {
        let h = history(&[10, 12, 11, 13, 12, 14, 15]);
        assert_eq!(
            forecast_occupancy(&h, 5, 50, day(0)),
            forecast_occupancy(&h, 5, 50, day(0))
        );
    }

    #[test]
    fn facade_with_thin_store_serves_ramp() {
        let conn = open_memory_database().unwrap();
        let p = seed_patient(&conn, "P", Some(40), "male");
        seed_admission(&conn, p, "-1 days", None);

        let result = occupancy_forecast(&conn, 7);
        assert_eq!(result.fallback, Some(FallbackReason::InsufficientHistory));
        assert_eq!(result.value.len(), 7);
    }

    #[test]
    fn facade_broken_store_serves_flat_sequence() {
        let conn = open_memory_database().unwrap();
        conn.execute_batch("DROP TABLE admissions").unwrap();

        let result = occupancy_forecast(&conn, 4);
        assert_eq!(result.fallback, Some(FallbackReason::DataUnavailable));
        assert_eq!(result.value.len(), 4);
        assert!(result
            .value
            .iter()
            .all(|f| f.predicted_occupancy_pct == 65.0));
        assert_eq!(result.value[0].date, Local::now().date_naive());
    }
}
