//! Persisted record formats
//!
//! Records are versioned JSON objects. Encoding goes through serde; decoding
//! walks a `serde_json::Value` field by field and substitutes a default for
//! anything missing or malformed, so corrupt storage never fails a load.
//!
//! Defaults: counters 0, dates absent, flags false, buffer empty, rounds
//! empty, reveal cells unrevealed.
//!
//! A record without `version` is read as the current version. A record with
//! any other version is replaced by defaults.

use super::session::{DaySession, Round};
use super::stats::{Distribution, StatsLedger};
use super::{GAME_ID, MAX_TRIES, RECORD_VERSION};
use crate::core::{Feedback, Grammar, Sequence, height_profile};
use crate::universe::daily::DATE_FORMAT;
use crate::universe::parse_day;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Storage key for the stats record
#[must_use]
pub fn stats_key() -> String {
    format!("brackle_stats_v{RECORD_VERSION}")
}

/// Storage key prefix shared by all day records
#[must_use]
pub fn day_key_prefix() -> String {
    format!("brackle_day_v{RECORD_VERSION}_{GAME_ID}_")
}

/// Storage key for one day record
#[must_use]
pub fn day_key(date: NaiveDate) -> String {
    format!("{}{}", day_key_prefix(), date.format(DATE_FORMAT))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsRecord<'a> {
    version: u32,
    played: u32,
    wins: u32,
    current_streak: u32,
    max_streak: u32,
    last_played_date: Option<String>,
    last_result_was_win: bool,
    dist: BTreeMap<&'a str, u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoundRecord {
    guess: String,
    height_profile: Vec<i32>,
    revealed: Vec<Option<&'static str>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayRecord {
    version: u32,
    date: String,
    rounds: Vec<RoundRecord>,
    active_guess: String,
    awaiting_reveal: bool,
    done: bool,
    won: bool,
    tries: usize,
    show_heights: bool,
    match_value: Option<usize>,
    recorded: bool,
}

/// Encode the stats ledger
///
/// # Errors
/// Returns the serde error if serialization fails.
pub fn encode_stats(stats: &StatsLedger) -> serde_json::Result<String> {
    let record = StatsRecord {
        version: RECORD_VERSION,
        played: stats.played,
        wins: stats.wins,
        current_streak: stats.current_streak,
        max_streak: stats.max_streak,
        last_played_date: stats
            .last_played
            .map(|d| d.format(DATE_FORMAT).to_string()),
        last_result_was_win: stats.last_result_was_win,
        dist: stats.dist.iter().collect(),
    };
    serde_json::to_string(&record)
}

/// Encode a day record
///
/// # Errors
/// Returns the serde error if serialization fails.
pub fn encode_day(day: &DaySession) -> serde_json::Result<String> {
    let record = DayRecord {
        version: RECORD_VERSION,
        date: day.date.format(DATE_FORMAT).to_string(),
        rounds: day
            .rounds
            .iter()
            .map(|r| RoundRecord {
                guess: r.guess.to_string(),
                height_profile: r.heights.clone(),
                revealed: r.revealed.iter().map(|c| c.map(Feedback::code)).collect(),
            })
            .collect(),
        active_guess: day.buffer.to_string(),
        awaiting_reveal: day.awaiting_reveal,
        done: day.done,
        won: day.won,
        tries: day.tries_used(),
        show_heights: day.show_heights,
        match_value: day.last_match_count,
        recorded: day.recorded,
    };
    serde_json::to_string(&record)
}

fn uint(obj: &Map<String, Value>, key: &str) -> u32 {
    obj.get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn text<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

/// Parse `raw` into an object of the current record version
fn current_object(raw: Option<&str>) -> Option<Map<String, Value>> {
    let Value::Object(obj) = serde_json::from_str::<Value>(raw?).ok()? else {
        return None;
    };
    match obj.get("version") {
        None => Some(obj),
        Some(v) if v.as_u64() == Some(u64::from(RECORD_VERSION)) => Some(obj),
        Some(v) => {
            tracing::debug!(version = %v, "ignoring record of another version");
            None
        }
    }
}

/// Decode the stats ledger; never fails
#[must_use]
pub fn decode_stats(raw: Option<&str>) -> StatsLedger {
    let Some(obj) = current_object(raw) else {
        return StatsLedger::default();
    };
    let obj = &obj;

    let mut dist = Distribution::default();
    if let Some(map) = obj.get("dist").and_then(Value::as_object) {
        for key in Distribution::KEYS {
            dist.set(key, uint(map, key));
        }
    }

    StatsLedger {
        played: uint(obj, "played"),
        wins: uint(obj, "wins"),
        current_streak: uint(obj, "currentStreak"),
        max_streak: uint(obj, "maxStreak"),
        last_played: text(obj, "lastPlayedDate").and_then(|d| parse_day(d).ok()),
        last_result_was_win: flag(obj, "lastResultWasWin"),
        dist,
    }
}

/// Lenient sequence decoding: keeps the leading run of valid symbols
fn lenient_sequence(raw: &str, max_len: usize) -> Sequence {
    raw.chars()
        .take(max_len)
        .map_while(crate::core::Symbol::from_char)
        .collect::<Vec<_>>()
        .into()
}

fn decode_round(value: &Value, grammar: Grammar) -> Round {
    let len = grammar.seq_len();
    let obj = value.as_object();
    let field = |key: &str| obj.and_then(|o| o.get(key));

    let guess = lenient_sequence(field("guess").and_then(Value::as_str).unwrap_or(""), len);

    // Earlier saves used other names for the profile
    let stored = ["heightProfile", "heights", "gBal"]
        .into_iter()
        .find_map(|key| field(key).and_then(Value::as_array));
    let heights = match stored {
        Some(items) => {
            let mut h: Vec<i32> = items
                .iter()
                .take(len)
                .map(|x| {
                    x.as_i64()
                        .and_then(|n| i32::try_from(n).ok())
                        .unwrap_or(0)
                })
                .collect();
            h.resize(len, 0);
            h
        }
        None if guess.len() == len => height_profile(guess.symbols()),
        None => vec![0; len],
    };

    let mut revealed: Vec<Option<Feedback>> = field("revealed")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .take(len)
                .map(|x| x.as_str().and_then(Feedback::from_code))
                .collect()
        })
        .unwrap_or_default();
    revealed.resize(len, None);

    Round {
        guess,
        heights,
        revealed,
    }
}

/// Decode a day record for `date`; never fails
///
/// A record stored under a different date is stale and is replaced by fresh
/// state for `date`.
#[must_use]
pub fn decode_day(raw: Option<&str>, date: NaiveDate, grammar: Grammar) -> DaySession {
    let fresh = DaySession::new(date);
    let Some(obj) = current_object(raw) else {
        return fresh;
    };
    let obj = &obj;

    let stored_date = text(obj, "date").and_then(|d| parse_day(d).ok());
    if stored_date != Some(date) {
        tracing::debug!(%date, ?stored_date, "discarding stale day record");
        return fresh;
    }

    let rounds: Vec<Round> = obj
        .get("rounds")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .take(MAX_TRIES)
                .map(|r| decode_round(r, grammar))
                .collect()
        })
        .unwrap_or_default();

    let match_value = obj
        .get("matchValue")
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok());

    DaySession {
        date,
        rounds,
        buffer: lenient_sequence(text(obj, "activeGuess").unwrap_or(""), grammar.seq_len()),
        awaiting_reveal: flag(obj, "awaitingReveal"),
        done: flag(obj, "done"),
        won: flag(obj, "won"),
        last_match_count: match_value,
        recorded: flag(obj, "recorded"),
        show_heights: flag(obj, "showHeights"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn keys() {
        assert_eq!(stats_key(), "brackle_stats_v2");
        assert_eq!(day_key(date()), "brackle_day_v2_L8_2024-01-01");
    }

    #[test]
    fn stats_roundtrip() {
        let mut stats = StatsLedger::default();
        stats.record_outcome(date(), true, Some(3));
        let raw = encode_stats(&stats).unwrap();
        assert_eq!(decode_stats(Some(&raw)), stats);
        assert!(raw.contains("\"currentStreak\":1"));
        assert!(raw.contains("\"lastPlayedDate\":\"2024-01-01\""));
    }

    #[test]
    fn stats_defaults_for_garbage() {
        assert_eq!(decode_stats(None), StatsLedger::default());
        assert_eq!(decode_stats(Some("not json")), StatsLedger::default());
        assert_eq!(decode_stats(Some("[1,2]")), StatsLedger::default());
    }

    #[test]
    fn stats_partial_fields() {
        let raw = r#"{"played": 5, "wins": "many", "lastPlayedDate": 7,
                      "lastResultWasWin": "yes", "dist": {"2": 3, "X": -1}}"#;
        let stats = decode_stats(Some(raw));
        assert_eq!(stats.played, 5);
        assert_eq!(stats.wins, 0);
        assert_eq!(stats.last_played, None);
        assert!(!stats.last_result_was_win);
        assert_eq!(stats.dist.get("2"), 3);
        assert_eq!(stats.dist.get("X"), 0);
    }

    #[test]
    fn day_roundtrip() {
        let mut day = DaySession::new(date());
        let mut round = Round::new(Sequence::parse("(*()*)**").unwrap());
        round.revealed[2] = Some(Feedback::Near);
        day.rounds.push(round);
        day.buffer = Sequence::parse("((").unwrap();
        day.last_match_count = Some(4);
        day.show_heights = true;

        let raw = encode_day(&day).unwrap();
        assert_eq!(decode_day(Some(&raw), date(), Grammar::default()), day);
    }

    #[test]
    fn stale_day_discarded() {
        let day = DaySession::new(date());
        let raw = encode_day(&day).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let loaded = decode_day(Some(&raw), tomorrow, Grammar::default());
        assert_eq!(loaded, DaySession::new(tomorrow));
    }

    #[test]
    fn day_defaults_for_malformed_fields() {
        let raw = r#"{
            "date": "2024-01-01",
            "rounds": [
                {"guess": "(*()*)**", "revealed": ["g", "Q", null]},
                {"guess": 12},
                "junk"
            ],
            "activeGuess": "((x",
            "awaitingReveal": 1,
            "done": "no",
            "matchValue": -3
        }"#;
        let day = decode_day(Some(raw), date(), Grammar::default());

        assert_eq!(day.rounds.len(), 3);
        let first = &day.rounds[0];
        assert_eq!(first.heights, vec![1, 1, 2, 1, 1, 0, 0, 0]);
        assert_eq!(first.revealed[0], Some(Feedback::Hit));
        assert_eq!(first.revealed[1], None);
        assert_eq!(first.revealed.len(), 8);
        assert!(day.rounds[1].guess.is_empty());
        assert_eq!(day.rounds[1].heights, vec![0; 8]);
        assert_eq!(day.buffer.to_string(), "((");
        assert!(!day.awaiting_reveal);
        assert!(!day.done);
        assert_eq!(day.last_match_count, None);
    }

    #[test]
    fn round_heights_read_under_any_known_name() {
        let profile = "[0,1,2,1,2,2,1,0]";
        for key in ["heightProfile", "heights", "gBal"] {
            let raw = format!(
                r#"{{"date":"2024-01-01","rounds":[{{"guess":"*(()(*))","{key}":{profile}}}]}}"#
            );
            let day = decode_day(Some(&raw), date(), Grammar::default());
            assert_eq!(day.rounds[0].heights, vec![0, 1, 2, 1, 2, 2, 1, 0], "{key}");
        }

        let raw = encode_day(&{
            let mut day = DaySession::new(date());
            day.rounds.push(Round::new(Sequence::parse("*(()(*))").unwrap()));
            day
        })
        .unwrap();
        assert!(raw.contains(r#""heightProfile":[0,1,2,1,2,2,1,0]"#));
    }

    #[test]
    fn other_versions_fall_back_to_defaults() {
        let raw = r#"{"version":1,"date":"2024-01-01","rounds":[{"guess":"(((())))"}]}"#;
        assert_eq!(
            decode_day(Some(raw), date(), Grammar::default()),
            DaySession::new(date())
        );
        assert_eq!(
            decode_stats(Some(r#"{"version":"2","played":4}"#)),
            StatsLedger::default()
        );

        // Unversioned records are accepted
        let raw = r#"{"date":"2024-01-01","rounds":[{"guess":"(((())))"}]}"#;
        assert_eq!(decode_day(Some(raw), date(), Grammar::default()).tries_used(), 1);
        assert_eq!(decode_stats(Some(r#"{"played":4}"#)).played, 4);
    }

    #[test]
    fn day_rounds_truncated_to_max_tries() {
        let rounds: Vec<String> = (0..9)
            .map(|_| r#"{"guess":"(((())))"}"#.to_string())
            .collect();
        let raw = format!(r#"{{"date":"2024-01-01","rounds":[{}]}}"#, rounds.join(","));
        let day = decode_day(Some(&raw), date(), Grammar::default());
        assert_eq!(day.tries_used(), MAX_TRIES);
    }
}
