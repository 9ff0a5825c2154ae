//! Display functions for command results

use super::formatters::{
    create_progress_bar, emoji_grid, feedback_to_emoji, match_pill, share_text,
};
use crate::commands::{CalendarReport, CheckReport};
use crate::core::Feedback;
use crate::game::{DisplayRow, RowKind, SessionSnapshot, SessionState, ShareSummary, StatsSnapshot};
use colored::{ColoredString, Colorize};

fn paint(text: &str, feedback: Option<Feedback>) -> ColoredString {
    let cell = format!(" {text} ");
    match feedback {
        Some(Feedback::Hit) => cell.black().on_green().bold(),
        Some(Feedback::Near) => cell.black().on_yellow().bold(),
        Some(Feedback::Far) => cell.white().on_bright_black(),
        None => cell.normal(),
    }
}

/// Print the board, one line per row
pub fn print_board(rows: &[DisplayRow], snapshot: &SessionSnapshot) {
    println!("\n{}", "─".repeat(40).cyan());
    println!(
        " {}  {}   match {}",
        "BRACKLE".bright_cyan().bold(),
        snapshot.date.format("%Y-%m-%d"),
        match_pill(snapshot.last_match_count, rows.first().map_or(0, |r| r.cells.len()))
            .bright_yellow()
            .bold()
    );
    println!("{}", "─".repeat(40).cyan());

    for (r, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|c| {
                let text = if c.text.is_empty() { "·" } else { c.text.as_str() };
                let painted = paint(text, c.feedback);
                if c.cursor {
                    painted.underline().to_string()
                } else {
                    painted.to_string()
                }
            })
            .collect();
        let marker = match row.kind {
            RowKind::Submitted if row.cells.iter().any(|c| c.clickable) => "?".yellow(),
            RowKind::Active => ">".bright_white().bold(),
            _ => " ".normal(),
        };
        println!(" {marker} {} {}", format!("{}", r + 1).bright_black(), cells.join(""));
    }
    println!();
}

/// Print the end-of-game summary
pub fn print_outcome(snapshot: &SessionSnapshot, share: &ShareSummary) {
    let answer = snapshot
        .answer
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    match snapshot.state {
        SessionState::Won => println!(
            "{}",
            format!("✅ Solved in {}/{}!", snapshot.tries_used, snapshot.max_tries)
                .green()
                .bold()
        ),
        SessionState::Lost => println!(
            "{} {}",
            "❌ Out of tries. The answer was".red().bold(),
            answer.bright_yellow().bold()
        ),
        SessionState::Editing | SessionState::AwaitingReveal => return,
    }
    println!("\n{}\n", share_text(share));
    println!("{}\n", emoji_grid(share));
}

/// Print the stats panel
pub fn print_stats(stats: &StatsSnapshot) {
    println!("\n{}", "═".repeat(40).cyan());
    println!(" {} ", "STATISTICS".bright_cyan().bold());
    println!("{}", "═".repeat(40).cyan());

    println!("   Played:          {}", stats.played);
    println!(
        "   Win %:           {}",
        stats.win_percent.to_string().bright_yellow().bold()
    );
    println!("   Current streak:  {}", stats.current_streak);
    println!("   Max streak:      {}", stats.max_streak);

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    let max = stats.max_count();
    for row in &stats.rows {
        let bar = create_progress_bar(row.bar_percent(max), 24);
        let bar = if row.is_today {
            bar.green().bold()
        } else {
            bar.bright_black()
        };
        println!("   {}: {bar} {}", row.key, row.count);
    }
    println!();
}

/// Print the verdict for one `check` guess
pub fn print_check_report(report: &CheckReport) {
    println!(
        "\nGuess:   {}  heights {:?}",
        report.guess.to_string().bright_white().bold(),
        report.heights
    );
    if let Some(answer) = &report.answer {
        println!(
            "Answer:  {}  heights {:?}",
            answer.to_string().bright_yellow(),
            answer.height_profile()
        );
    }
    let cells = feedback_to_emoji(&report.feedback);
    println!(
        "Result:  {cells}  {} exact",
        format!("{}/{}", report.match_count, report.feedback.len())
            .bright_cyan()
            .bold()
    );
    if report.solved {
        println!("{}", "✅ That is the answer.".green().bold());
    }
    println!();
}

/// Print answer frequencies over a date range
pub fn print_calendar_report(report: &CalendarReport) {
    println!("\n{}", "═".repeat(50).cyan());
    println!(" {} ", "ANSWER CALENDAR".bright_cyan().bold());
    println!("{}", "═".repeat(50).cyan());

    println!(
        "\n   Days:             {} ({} → {})",
        report.days, report.from, report.to
    );
    println!(
        "   Distinct answers: {} of {}",
        report.distinct.to_string().bright_yellow().bold(),
        report.universe_size
    );
    println!("   Time taken:       {:.2}s", report.duration.as_secs_f64());

    println!("\n📈 {}", "Most frequent:".bright_cyan().bold());
    for (answer, count) in &report.top {
        println!("   {answer}  {count}");
    }
    println!();
}
