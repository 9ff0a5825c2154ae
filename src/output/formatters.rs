//! Formatting utilities for terminal output

use crate::core::Feedback;
use crate::game::ShareSummary;
use chrono::{DateTime, Duration, Utc};

/// Format one feedback row as emoji
#[must_use]
pub fn feedback_to_emoji(row: &[Feedback]) -> String {
    row.iter().map(|f| f.emoji()).collect()
}

/// Try count for the share header: `k/6` or `X/6`
#[must_use]
pub fn score_label(summary: &ShareSummary) -> String {
    if summary.won {
        format!("{}/{}", summary.tries_used, summary.max_tries)
    } else {
        format!("X/{}", summary.max_tries)
    }
}

/// Spoiler-free share text
///
/// ```text
/// BRACKLE 20240101 3/6
///
/// 4 → 5 → 8
/// ```
#[must_use]
pub fn share_text(summary: &ShareSummary) -> String {
    let counts: Vec<String> = summary.match_counts.iter().map(ToString::to_string).collect();
    format!(
        "BRACKLE {} {}\n\n{}",
        summary.date.format("%Y%m%d"),
        score_label(summary),
        counts.join(" → ")
    )
}

/// Full-feedback grid, one emoji row per round
#[must_use]
pub fn emoji_grid(summary: &ShareSummary) -> String {
    summary
        .grid
        .iter()
        .map(|row| feedback_to_emoji(row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Last match count as `k/L`, or `—` before the first guess
#[must_use]
pub fn match_pill(last: Option<usize>, len: usize) -> String {
    last.map_or_else(|| "—".to_string(), |k| format!("{k}/{len}"))
}

/// Time left until the next UTC midnight as `HH:MM:SS`
#[must_use]
pub fn countdown(now: DateTime<Utc>) -> String {
    let next = now
        .date_naive()
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc());
    next.map_or_else(|| format_hhmmss(Duration::zero()), |t| format_hhmmss(t - now))
}

/// `HH:MM:SS`; non-positive durations print as `00:00:00`
#[must_use]
pub fn format_hhmmss(left: Duration) -> String {
    let secs = left.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width).div_ceil(100).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn summary(won: bool, counts: Vec<usize>) -> ShareSummary {
        ShareSummary {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            won,
            tries_used: counts.len(),
            max_tries: 6,
            match_counts: counts,
            grid: vec![vec![Feedback::Hit, Feedback::Near, Feedback::Far]],
        }
    }

    #[test]
    fn share_text_win() {
        assert_eq!(
            share_text(&summary(true, vec![4, 5, 8])),
            "BRACKLE 20240101 3/6\n\n4 → 5 → 8"
        );
    }

    #[test]
    fn share_text_loss() {
        let text = share_text(&summary(false, vec![1, 2, 3, 4, 5, 6]));
        assert!(text.starts_with("BRACKLE 20240101 X/6\n\n1 → 2"));
    }

    #[test]
    fn emoji_rows() {
        assert_eq!(emoji_grid(&summary(true, vec![8])), "🟩🟨⬛");
    }

    #[test]
    fn pill() {
        assert_eq!(match_pill(None, 8), "—");
        assert_eq!(match_pill(Some(5), 8), "5/8");
    }

    #[test]
    fn countdown_to_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 22, 58, 30).unwrap();
        assert_eq!(countdown(now), "01:01:30");
        assert_eq!(format_hhmmss(Duration::seconds(-5)), "00:00:00");
    }

    #[test]
    fn progress_bar_bounds() {
        assert_eq!(create_progress_bar(0, 10), "░░░░░░░░░░");
        assert_eq!(create_progress_bar(100, 10), "██████████");
        assert_eq!(create_progress_bar(50, 10), "█████░░░░░");
    }
}
