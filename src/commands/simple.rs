//! Simple interactive CLI mode
//!
//! Line-based play without the TUI: one guess or one hint column per line.

use crate::game::{Game, SessionError, SessionState, SubmitOutcome, Transition};
use crate::output::{countdown, print_board, print_outcome, print_stats};
use chrono::Utc;
use colored::Colorize;
use std::io::{self, Write};

/// Run the line-based game until it ends or the player quits
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input.
pub fn run_simple(game: &mut Game<'_>) -> Result<(), String> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Brackle - Simple Mode                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let len = game.session().grammar().seq_len();
    println!("Guess the hidden {len}-symbol sequence of ( ) and * in 6 tries.");
    println!("Heights start at 0, never go below 0 or above {}, and end at 0.", len / 2);
    println!("After a miss, pick one column of that guess to reveal its hint:\n");
    println!("  🟩 same height   🟨 off by 1–2   ⬛ off by 3 or more\n");
    println!("Commands: 'b' toggles heights, 'q' quits\n");

    if game.is_practice() {
        println!("{}\n", "Practice round: stats are not recorded.".bright_black());
    }

    loop {
        let snapshot = game.session_snapshot();
        print_board(&game.current_display_rows(), &snapshot);

        let prompt = match snapshot.state {
            SessionState::Won | SessionState::Lost => {
                print_outcome(&snapshot, &game.share_summary());
                if !game.is_practice() {
                    print_stats(&game.stats_snapshot());
                    println!("Next puzzle in {}\n", countdown(Utc::now()).bright_cyan());
                }
                return Ok(());
            }
            SessionState::AwaitingReveal => format!("Reveal a column (1-{len})"),
            SessionState::Editing => "Your guess".to_string(),
        };

        let input = get_user_input(&prompt)?;
        let result = match input.as_str() {
            "q" | "quit" | "exit" => {
                println!("\n👋 Progress saved. See you later!\n");
                return Ok(());
            }
            "b" => Ok(game.toggle_view()),
            _ if snapshot.state == SessionState::AwaitingReveal => {
                match input.parse::<usize>() {
                    Ok(col) if (1..=len).contains(&col) => {
                        game.reveal_position(snapshot.tries_used.saturating_sub(1), col - 1)
                    }
                    _ => {
                        println!("{}", format!("Enter a column number from 1 to {len}.").red());
                        continue;
                    }
                }
            }
            _ => game.submit_text(&input),
        };

        report(result, len);
        if !game.storage_ok() {
            println!("{}", "⚠ Progress could not be saved.".yellow());
        }
    }
}

fn report(result: Result<Transition, SessionError>, len: usize) {
    match result {
        Ok(Transition::Submitted {
            match_count,
            outcome: SubmitOutcome::AwaitingReveal,
        }) => println!("{match_count}/{len} heights exact. Pick a hint column."),
        Ok(Transition::Revealed {
            round,
            position,
            feedback,
        }) => println!(
            "Revealed row {}, col {}: {}.",
            round + 1,
            position + 1,
            feedback.label()
        ),
        Ok(_) => {}
        Err(e) => println!("{}", format!("❌ {e}").red()),
    }
}

/// Get user input with a prompt
fn get_user_input(prompt: &str) -> Result<String, String> {
    print!("{prompt}: ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .map_err(|e| e.to_string())?;
    if read == 0 {
        return Ok("q".to_string());
    }

    Ok(input.trim().to_string())
}
