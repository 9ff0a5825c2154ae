//! Cross-day statistics
//!
//! Updated at most once per calendar day. A second commit for a day that was
//! already recorded is a no-op, which keeps reloads and duplicate calls safe.

use super::MAX_TRIES;
use crate::universe::previous_day;
use chrono::NaiveDate;

/// Outcome histogram: wins keyed by try number, plus failures
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Distribution {
    wins: [u32; MAX_TRIES],
    failures: u32,
}

impl Distribution {
    /// Bucket keys in display order
    pub const KEYS: [&'static str; MAX_TRIES + 1] = ["1", "2", "3", "4", "5", "6", "X"];

    /// Count for a bucket key (`"1"`..`"6"` or `"X"`)
    #[must_use]
    pub fn get(&self, key: &str) -> u32 {
        self.slot(key).map_or(0, |slot| *slot)
    }

    /// Set a bucket; unknown keys are ignored
    pub fn set(&mut self, key: &str, count: u32) {
        if let Some(slot) = self.slot_mut(key) {
            *slot = count;
        }
    }

    fn slot(&self, key: &str) -> Option<&u32> {
        match key {
            "X" => Some(&self.failures),
            _ => key
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=MAX_TRIES).contains(n))
                .map(|n| &self.wins[n - 1]),
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut u32> {
        match key {
            "X" => Some(&mut self.failures),
            _ => key
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=MAX_TRIES).contains(n))
                .map(|n| &mut self.wins[n - 1]),
        }
    }

    /// `(key, count)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        Self::KEYS.iter().map(|&key| (key, self.get(key)))
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.wins.iter().sum::<u32>() + self.failures
    }
}

/// Process-wide play statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatsLedger {
    pub played: u32,
    pub wins: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    pub last_played: Option<NaiveDate>,
    pub last_result_was_win: bool,
    pub dist: Distribution,
}

impl StatsLedger {
    /// Fold one finished day into the ledger
    ///
    /// `tries` is the try number of the win; it is ignored for losses.
    /// Returns `false` without changing anything when `date` was already
    /// recorded, or for a win whose try number is outside `1..=MAX_TRIES`.
    pub fn record_outcome(&mut self, date: NaiveDate, won: bool, tries: Option<usize>) -> bool {
        if self.last_played == Some(date) {
            return false;
        }
        let win_key = match (won, tries) {
            (true, Some(t)) if (1..=MAX_TRIES).contains(&t) => Some(t.to_string()),
            (true, _) => return false,
            (false, _) => None,
        };

        self.played += 1;
        if let Some(key) = win_key {
            self.wins += 1;
            let count = self.dist.get(&key);
            self.dist.set(&key, count + 1);

            let continues = self.last_result_was_win
                && self.last_played.is_some()
                && self.last_played == previous_day(date);
            self.current_streak = if continues {
                self.current_streak + 1
            } else {
                1
            };
            self.max_streak = self.max_streak.max(self.current_streak);
        } else {
            let count = self.dist.get("X");
            self.dist.set("X", count + 1);
            self.current_streak = 0;
        }

        self.last_played = Some(date);
        self.last_result_was_win = won;
        true
    }

    /// Rounded win percentage, 0 when nothing was played
    #[must_use]
    pub fn win_percent(&self) -> u32 {
        if self.played == 0 {
            0
        } else {
            (f64::from(self.wins) / f64::from(self.played) * 100.0).round() as u32
        }
    }

    /// Stats panel view; `today` is `Some((won, tries))` once today's game ended
    #[must_use]
    pub fn snapshot(&self, today: Option<(bool, usize)>) -> StatsSnapshot {
        let today_key = today.map(|(won, tries)| {
            if won {
                tries.to_string()
            } else {
                "X".to_string()
            }
        });

        let rows = self
            .dist
            .iter()
            .filter(|(key, count)| {
                *key != "X" || *count > 0 || today_key.as_deref() == Some("X")
            })
            .map(|(key, count)| DistRow {
                key,
                count,
                is_today: today_key.as_deref() == Some(key),
            })
            .collect();

        StatsSnapshot {
            played: self.played,
            win_percent: self.win_percent(),
            current_streak: self.current_streak,
            max_streak: self.max_streak,
            rows,
        }
    }
}

/// One histogram row of the stats panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistRow {
    pub key: &'static str,
    pub count: u32,
    pub is_today: bool,
}

impl DistRow {
    /// Bar width in percent of the largest bucket
    ///
    /// Non-zero rows get at least 10%; an empty row that is today's still
    /// shows a 10% stub so it can be highlighted.
    #[must_use]
    pub fn bar_percent(&self, max_count: u32) -> u32 {
        let max_count = max_count.max(1);
        let pct = if self.count == 0 {
            if self.is_today { 10.0 } else { 0.0 }
        } else {
            (f64::from(self.count) / f64::from(max_count) * 100.0).max(10.0)
        };
        pct.min(100.0) as u32
    }
}

/// Stats panel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub played: u32,
    pub win_percent: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    pub rows: Vec<DistRow>,
}

impl StatsSnapshot {
    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.rows.iter().map(|r| r.count).max().unwrap_or(0).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn duplicate_date_is_noop() {
        let mut stats = StatsLedger::default();
        assert!(stats.record_outcome(day(2024, 1, 1), true, Some(3)));
        let before = stats.clone();
        assert!(!stats.record_outcome(day(2024, 1, 1), true, Some(3)));
        assert!(!stats.record_outcome(day(2024, 1, 1), false, None));
        assert_eq!(stats, before);
    }

    #[test]
    fn first_win() {
        let mut stats = StatsLedger::default();
        stats.record_outcome(day(2024, 1, 1), true, Some(3));
        assert_eq!(stats.played, 1);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_streak, 1);
        assert_eq!(stats.dist.get("3"), 1);
        assert_eq!(stats.dist.total(), 1);
        assert_eq!(stats.last_played, Some(day(2024, 1, 1)));
        assert!(stats.last_result_was_win);
    }

    #[test]
    fn consecutive_wins_extend_streak() {
        let mut stats = StatsLedger::default();
        stats.record_outcome(day(2024, 2, 28), true, Some(2));
        stats.record_outcome(day(2024, 2, 29), true, Some(4));
        assert_eq!(stats.current_streak, 2);
        stats.record_outcome(day(2024, 3, 1), true, Some(1));
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.max_streak, 3);
    }

    #[test]
    fn gap_resets_streak_to_one() {
        let mut stats = StatsLedger::default();
        stats.record_outcome(day(2024, 1, 1), true, Some(2));
        stats.record_outcome(day(2024, 1, 3), true, Some(2));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_streak, 1);
    }

    #[test]
    fn loss_resets_streak() {
        let mut stats = StatsLedger::default();
        stats.record_outcome(day(2024, 1, 1), true, Some(2));
        stats.record_outcome(day(2024, 1, 2), true, Some(2));
        stats.record_outcome(day(2024, 1, 3), false, None);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.max_streak, 2);
        assert_eq!(stats.dist.get("X"), 1);
        assert!(!stats.last_result_was_win);

        // A win after a loss starts over even on the next day
        stats.record_outcome(day(2024, 1, 4), true, Some(5));
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn win_with_impossible_try_count_is_rejected() {
        let mut stats = StatsLedger::default();
        assert!(!stats.record_outcome(day(2024, 1, 1), true, Some(0)));
        assert!(!stats.record_outcome(day(2024, 1, 1), true, Some(MAX_TRIES + 1)));
        assert!(!stats.record_outcome(day(2024, 1, 1), true, None));
        assert_eq!(stats, StatsLedger::default());
        assert_eq!(stats.dist.get("X"), 0);
    }

    #[test]
    fn win_percent_rounds() {
        let mut stats = StatsLedger::default();
        assert_eq!(stats.win_percent(), 0);
        stats.record_outcome(day(2024, 1, 1), true, Some(1));
        stats.record_outcome(day(2024, 1, 2), true, Some(1));
        stats.record_outcome(day(2024, 1, 3), false, None);
        assert_eq!(stats.win_percent(), 67);
    }

    #[test]
    fn distribution_keys() {
        let mut dist = Distribution::default();
        dist.set("6", 4);
        dist.set("7", 9);
        dist.set("X", 2);
        dist.set("bogus", 1);
        assert_eq!(dist.get("6"), 4);
        assert_eq!(dist.get("7"), 0);
        assert_eq!(dist.get("0"), 0);
        assert_eq!(dist.total(), 6);
        let keys: Vec<&str> = dist.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, Distribution::KEYS);
    }

    #[test]
    fn snapshot_hides_empty_failure_row() {
        let mut stats = StatsLedger::default();
        stats.record_outcome(day(2024, 1, 1), true, Some(2));
        let snap = stats.snapshot(Some((true, 2)));
        assert_eq!(snap.rows.len(), 6);
        assert!(snap.rows[1].is_today);
        assert_eq!(snap.max_count(), 1);

        let lost = StatsLedger::default().snapshot(Some((false, 6)));
        assert_eq!(lost.rows.len(), 7);
        assert!(lost.rows[6].is_today);
        assert_eq!(lost.rows[6].bar_percent(lost.max_count()), 10);
    }

    #[test]
    fn bar_percent_minimum() {
        let row = DistRow {
            key: "1",
            count: 1,
            is_today: false,
        };
        assert_eq!(row.bar_percent(50), 10);
        assert_eq!(row.bar_percent(1), 100);
        let empty = DistRow {
            key: "2",
            count: 0,
            is_today: false,
        };
        assert_eq!(empty.bar_percent(5), 0);
    }
}
