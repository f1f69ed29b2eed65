//! Mock contribution calendar for the GitHub tile.
//!
//! Counts are random but seeded from the username, so the same user always
//! sees the same year.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DAYS: usize = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
    /// Intensity bucket, 0..=4.
    pub level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContributionStats {
    pub total: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub avg_per_day: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContributionCalendar {
    pub username: String,
    pub days: Vec<ContributionDay>,
    pub stats: ContributionStats,
}

pub fn level_for(count: u32) -> u8 {
    match count {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=8 => 3,
        _ => 4,
    }
}

fn seed_for(username: &str) -> u64 {
    // FNV-1a; stable across runs and toolchains.
    username.bytes().fold(0xcbf2_9ce4_8422_2325, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}

impl ContributionCalendar {
    pub fn mock(username: &str) -> Self {
        Self::mock_ending(username, Local::now().date_naive())
    }

    /// `DAYS` days ending on `today`, oldest first.
    pub fn mock_ending(username: &str, today: NaiveDate) -> Self {
        let mut rng = StdRng::seed_from_u64(seed_for(username));
        let days: Vec<ContributionDay> = (0..DAYS as i64)
            .rev()
            .map(|back| {
                let date = today - Duration::days(back);
                let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
                let chance = if weekend { 0.3 } else { 0.7 };
                let count = if rng.gen_bool(chance) {
                    rng.gen_range(1..=12)
                } else {
                    0
                };
                ContributionDay {
                    date,
                    count,
                    level: level_for(count),
                }
            })
            .collect();
        let stats = stats(&days);
        Self {
            username: username.to_string(),
            days,
            stats,
        }
    }

    /// Days grouped into consecutive runs of seven, oldest first.
    pub fn weeks(&self) -> impl Iterator<Item = &[ContributionDay]> {
        self.days.chunks(7)
    }
}

/// The current streak ends today, or yesterday when today has no activity yet.
pub fn stats(days: &[ContributionDay]) -> ContributionStats {
    let total: u32 = days.iter().map(|d| d.count).sum();

    let mut longest = 0;
    let mut run = 0;
    for d in days {
        run = if d.count > 0 { run + 1 } else { 0 };
        longest = longest.max(run);
    }

    let mut recent = days.iter().rev().peekable();
    if recent.peek().is_some_and(|d| d.count == 0) {
        recent.next();
    }
    let current = recent.take_while(|d| d.count > 0).count() as u32;

    let avg_per_day = if days.is_empty() {
        0.0
    } else {
        (f64::from(total) / days.len() as f64 * 10.0).round() / 10.0
    };

    ContributionStats {
        total,
        current_streak: current,
        longest_streak: longest,
        avg_per_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(count: u32) -> ContributionDay {
        ContributionDay {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            count,
            level: level_for(count),
        }
    }

    #[test]
    fn level_buckets() {
        let levels: Vec<u8> = [0, 1, 2, 3, 5, 6, 8, 9, 12].map(level_for).to_vec();
        assert_eq!(levels, vec![0, 1, 1, 2, 2, 3, 3, 4, 4]);
    }

    #[test]
    fn streaks_allow_today_to_be_empty() {
        let days: Vec<_> = [1, 1, 1, 0, 2, 2, 0].map(day).to_vec();
        let s = stats(&days);
        assert_eq!(s.total, 7);
        assert_eq!(s.longest_streak, 3);
        assert_eq!(s.current_streak, 2);
        assert_eq!(s.avg_per_day, 1.0);

        let broken: Vec<_> = [3, 0, 0].map(day).to_vec();
        assert_eq!(stats(&broken).current_streak, 0);
    }

    #[test]
    fn mock_is_reproducible_and_covers_a_year() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let a = ContributionCalendar::mock_ending("namit2111", today);
        let b = ContributionCalendar::mock_ending("namit2111", today);
        assert_eq!(a, b);
        assert_eq!(a.days.len(), DAYS);
        assert_eq!(a.days.last().unwrap().date, today);
        assert!(a.days.iter().all(|d| d.count <= 12 && d.level == level_for(d.count)));
        assert_eq!(a.weeks().count(), 53);
    }
}
