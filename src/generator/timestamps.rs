use crate::config::TimestampMode;
use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use tracing::debug;

/// Default timestamp window
pub const DEFAULT_WINDOW_DAYS: u32 = 180;

const MILLIS_PER_DAY: i64 = 86_400_000;
const MILLIS_PER_HOUR: i64 = 3_600_000;

fn offset(start: NaiveDateTime, millis: i64) -> NaiveDateTime {
    start
        .checked_add_signed(Duration::milliseconds(millis))
        .unwrap_or(NaiveDateTime::MAX)
}

/// `n` evenly spaced points over `[start, start + window_days]`, ascending
///
/// One point yields `start`; more points always include both window ends.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use senda::generator::evenly_spaced;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let points = evenly_spaced(3, start, 180);
///
/// assert_eq!(points[1].date(), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
/// assert_eq!(points[2].date(), NaiveDate::from_ymd_opt(2024, 6, 29).unwrap());
/// ```
pub fn evenly_spaced(n: usize, start: NaiveDateTime, window_days: u32) -> Vec<NaiveDateTime> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let window = i128::from(window_days) * i128::from(MILLIS_PER_DAY);
            let gaps = (n - 1) as i128;
            (0..n)
                .map(|i| offset(start, (window * i as i128 / gaps) as i64))
                .collect()
        }
    }
}

/// Produces ascending timestamps for a path template
#[derive(Debug, Clone, Copy)]
pub struct TimestampSampler {
    mode: TimestampMode,
    window_days: u32,
}

impl TimestampSampler {
    pub fn new(mode: TimestampMode, window_days: u32) -> Self {
        Self { mode, window_days }
    }

    pub fn mode(&self) -> TimestampMode {
        self.mode
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Sample `n` ascending timestamps inside `[start, start + window_days]`
    ///
    /// Grid mode returns the evenly spaced grid and leaves `rng` untouched:
    /// drawing `n` points without replacement from an `n`-point pool and then
    /// sorting always reproduces the pool. Jitter mode draws `n` distinct hours
    /// from the window instead, falling back to the grid when the window has
    /// fewer hourly slots than `n`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n: usize,
        start: NaiveDateTime,
    ) -> Vec<NaiveDateTime> {
        match self.mode {
            TimestampMode::Grid => evenly_spaced(n, start, self.window_days),
            TimestampMode::Jitter => {
                let pool = self.window_days as usize * 24 + 1;
                if n > pool {
                    debug!(n, pool, "hourly pool too small, using grid");
                    return evenly_spaced(n, start, self.window_days);
                }
                let mut hours = rand::seq::index::sample(rng, pool, n).into_vec();
                hours.sort_unstable();
                hours
                    .into_iter()
                    .map(|h| offset(start, h as i64 * MILLIS_PER_HOUR))
                    .collect()
            }
        }
    }
}

impl Default for TimestampSampler {
    fn default() -> Self {
        Self::new(TimestampMode::Grid, DEFAULT_WINDOW_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn jan1() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_three_points_over_default_window() {
        let sampler = TimestampSampler::default();
        let mut rng = StdRng::seed_from_u64(0);
        let points = sampler.sample(&mut rng, 3, jan1());

        assert_eq!(points.len(), 3);
        assert_eq!(points[0], jan1());
        assert_eq!(points[1] - points[0], points[2] - points[1]);
        assert_eq!(
            points[2].date(),
            NaiveDate::from_ymd_opt(2024, 6, 29).unwrap()
        );
    }

    #[test]
    fn test_grid_ignores_seed() {
        let sampler = TimestampSampler::default();
        let a = sampler.sample(&mut StdRng::seed_from_u64(1), 7, jan1());
        let b = sampler.sample(&mut StdRng::seed_from_u64(2), 7, jan1());
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_counts() {
        let sampler = TimestampSampler::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(sampler.sample(&mut rng, 0, jan1()).is_empty());
        assert_eq!(sampler.sample(&mut rng, 1, jan1()), vec![jan1()]);
    }

    #[test]
    fn test_grid_fractional_spacing() {
        // 180 days over 6 gaps = 30 days; over 7 gaps is fractional
        let points = evenly_spaced(8, jan1(), 180);
        assert_eq!(points.len(), 8);
        assert!(points.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(points[7] - points[0], Duration::days(180));
    }

    #[test]
    fn test_jitter_sorted_distinct_in_window() {
        let sampler = TimestampSampler::new(TimestampMode::Jitter, 180);
        let mut rng = StdRng::seed_from_u64(42);
        let end = jan1() + Duration::days(180);

        for n in 1..12 {
            let points = sampler.sample(&mut rng, n, jan1());
            assert_eq!(points.len(), n);
            assert!(points.windows(2).all(|w| w[0] < w[1]));
            assert!(points.iter().all(|p| *p >= jan1() && *p <= end));
        }
    }

    #[test]
    fn test_jitter_small_pool_falls_back() {
        let sampler = TimestampSampler::new(TimestampMode::Jitter, 1);
        let mut rng = StdRng::seed_from_u64(1);
        let points = sampler.sample(&mut rng, 40, jan1());
        assert_eq!(points, evenly_spaced(40, jan1(), 1));
    }
}
