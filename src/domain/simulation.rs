//! Synthetic benchmark and portfolio chart series.
//!
//! The series is an illustrative random walk, not historical market data.
//! Every [`ChartSeries`] carries `synthetic: true` so consumers cannot mistake
//! it for real prices. Randomness comes from the caller so a seeded RNG gives
//! a reproducible chart.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::Serialize;

use super::holding::round2;

pub const NIFTY_BASE: f64 = 22_000.0;
pub const SENSEX_BASE: f64 = 72_500.0;
pub const PORTFOLIO_INDEX_BASE: f64 = 100.0;
pub const PORTFOLIO_BETA: f64 = 1.1;

/// Largest absolute market move per day, in percent.
const MAX_DAILY_MOVE: f64 = 1.5;
const SENSEX_TRACKING_NOISE: f64 = 0.2;
const PORTFOLIO_NOISE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub nifty: f64,
    pub sensex: f64,
    pub portfolio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub synthetic: bool,
    pub points: Vec<ChartPoint>,
}

/// `days` daily points ending on `end`. The first point sits at the base
/// values; each later point applies one day's move to the previous one.
pub fn simulate_chart<R: Rng + ?Sized>(rng: &mut R, end: NaiveDate, days: usize) -> ChartSeries {
    let mut points = Vec::with_capacity(days);
    let mut nifty = NIFTY_BASE;
    let mut sensex = SENSEX_BASE;
    let mut portfolio = PORTFOLIO_INDEX_BASE;

    for i in 0..days {
        if i > 0 {
            let market_move = rng.gen_range(-MAX_DAILY_MOVE..=MAX_DAILY_MOVE);
            let sensex_move =
                market_move + rng.gen_range(-SENSEX_TRACKING_NOISE..=SENSEX_TRACKING_NOISE);
            let portfolio_move =
                PORTFOLIO_BETA * market_move + rng.gen_range(-PORTFOLIO_NOISE..=PORTFOLIO_NOISE);

            nifty *= 1.0 + market_move / 100.0;
            sensex *= 1.0 + sensex_move / 100.0;
            portfolio *= 1.0 + portfolio_move / 100.0;
        }

        let offset = (days - 1 - i) as i64;
        points.push(ChartPoint {
            date: end - Duration::days(offset),
            nifty: round2(nifty),
            sensex: round2(sensex),
            portfolio: round2(portfolio),
        });
    }

    ChartSeries {
        synthetic: true,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn produces_requested_number_of_points() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = simulate_chart(&mut rng, end(), 30);
        assert!(series.synthetic);
        assert_eq!(series.points.len(), 30);
    }

    #[test]
    fn dates_are_consecutive_and_end_on_end_date() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = simulate_chart(&mut rng, end(), 30);
        assert_eq!(series.points.last().unwrap().date, end());
        assert_eq!(series.points[0].date, end() - Duration::days(29));
        for pair in series.points.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn first_point_is_at_base() {
        let mut rng = StdRng::seed_from_u64(1);
        let series = simulate_chart(&mut rng, end(), 5);
        assert_eq!(series.points[0].nifty, NIFTY_BASE);
        assert_eq!(series.points[0].sensex, SENSEX_BASE);
        assert_eq!(series.points[0].portfolio, PORTFOLIO_INDEX_BASE);
    }

    #[test]
    fn same_seed_same_series() {
        let a = simulate_chart(&mut StdRng::seed_from_u64(42), end(), 30);
        let b = simulate_chart(&mut StdRng::seed_from_u64(42), end(), 30);
        assert_eq!(a, b);
    }

    #[test]
    fn daily_moves_are_bounded() {
        let series = simulate_chart(&mut StdRng::seed_from_u64(99), end(), 60);
        for pair in series.points.windows(2) {
            let change = (pair[1].nifty / pair[0].nifty - 1.0) * 100.0;
            assert!(change.abs() <= MAX_DAILY_MOVE + 0.01, "nifty moved {change}%");
        }
    }

    #[test]
    fn zero_days_is_empty() {
        let series = simulate_chart(&mut StdRng::seed_from_u64(0), end(), 0);
        assert!(series.points.is_empty());
    }
}
