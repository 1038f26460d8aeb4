//! Statistics over a product's recorded price history.
//!
//! Pure helpers over `&[PricePoint]`; callers load whatever window of points
//! they care about from the store. Used by presentation layers, not by the
//! acquisition pipeline itself.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::types::PricePoint;

/// Direction of a product's price over a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    /// Net movement under 2% either way.
    Stable,
    /// Fewer than two points in the window.
    Unknown,
}

const STABLE_BAND_PCT: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

fn in_window<'a>(
    points: &'a [PricePoint],
    window: Duration,
    now: DateTime<Utc>,
) -> impl Iterator<Item = &'a PricePoint> {
    points
        .iter()
        .filter(move |p| now.signed_duration_since(p.recorded_at) < window)
}

/// Classifies the net price movement across the window.
///
/// Compares the oldest and newest in-window points; a net change of less
/// than 2% counts as [`Trend::Stable`].
#[must_use]
pub fn trend(points: &[PricePoint], window: Duration, now: DateTime<Utc>) -> Trend {
    let mut sorted: Vec<&PricePoint> = in_window(points, window, now).collect();
    sorted.sort_by_key(|p| p.recorded_at);

    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return Trend::Unknown;
    };
    if sorted.len() < 2 || first.price.is_zero() {
        return Trend::Unknown;
    }

    let change_pct = ((last.price - first.price) / first.price * Decimal::ONE_HUNDRED).abs();
    if change_pct < STABLE_BAND_PCT {
        Trend::Stable
    } else if last.price < first.price {
        Trend::Down
    } else {
        Trend::Up
    }
}

/// Lowest in-window price, or `None` when the window is empty.
#[must_use]
pub fn lowest_in(points: &[PricePoint], window: Duration, now: DateTime<Utc>) -> Option<Decimal> {
    in_window(points, window, now).map(|p| p.price).min()
}

/// Highest in-window price, or `None` when the window is empty.
#[must_use]
pub fn highest_in(points: &[PricePoint], window: Duration, now: DateTime<Utc>) -> Option<Decimal> {
    in_window(points, window, now).map(|p| p.price).max()
}

/// Mean in-window price rounded to two decimal places, or `None` when the
/// window is empty.
#[must_use]
pub fn average_in(points: &[PricePoint], window: Duration, now: DateTime<Utc>) -> Option<Decimal> {
    let prices: Vec<Decimal> = in_window(points, window, now).map(|p| p.price).collect();
    if prices.is_empty() {
        return None;
    }
    let sum: Decimal = prices.iter().copied().sum();
    Some((sum / Decimal::from(prices.len())).round_dp(2))
}
