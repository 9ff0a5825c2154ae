//! Calendar command
//!
//! Computes the daily answer for every date in a range and reports how the
//! selection spreads over the universe.

use crate::universe::{DailySelector, Universe};
use chrono::{Days, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Answer distribution over a date range
#[derive(Debug, Clone)]
pub struct CalendarReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: usize,
    pub distinct: usize,
    pub universe_size: usize,
    /// Most frequent answers, highest count first
    pub top: Vec<(String, usize)>,
    pub duration: Duration,
}

/// Count daily answers for `days` consecutive dates starting at `from`
///
/// Dates past the end of the calendar are skipped.
#[must_use]
pub fn run_calendar(
    universe: &Universe,
    from: NaiveDate,
    days: u32,
    top_n: usize,
    show_progress: bool,
) -> CalendarReport {
    let start = Instant::now();
    let selector = DailySelector::new(universe);

    let pb = if show_progress {
        ProgressBar::new(u64::from(days))
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("█▓▒░")),
    );

    let dates: Vec<NaiveDate> = (0..days)
        .map_while(|offset| from.checked_add_days(Days::new(u64::from(offset))))
        .collect();

    let counts: FxHashMap<usize, usize> = dates
        .par_iter()
        .map(|&date| {
            pb.inc(1);
            selector.index_for(date)
        })
        .fold(FxHashMap::default, |mut acc, index| {
            *acc.entry(index).or_insert(0) += 1;
            acc
        })
        .reduce(FxHashMap::default, |mut a, b| {
            for (index, count) in b {
                *a.entry(index).or_insert(0) += count;
            }
            a
        });
    pb.finish_and_clear();

    let mut ranked: Vec<(usize, usize)> = counts.iter().map(|(&i, &c)| (i, c)).collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let top = ranked
        .into_iter()
        .take(top_n)
        .filter_map(|(index, count)| universe.get(index).map(|s| (s.to_string(), count)))
        .collect();

    CalendarReport {
        from,
        to: dates.last().copied().unwrap_or(from),
        days: dates.len(),
        distinct: counts.len(),
        universe_size: universe.len(),
        top,
        duration: start.elapsed(),
    }
}
