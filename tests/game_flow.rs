//! End-to-end play through the `Game` controller

use brackle::core::{Grammar, Sequence, Symbol};
use brackle::game::{
    FileStore, Game, GameOptions, MemoryStore, SessionError, SessionState, Store, StoreError,
    SubmitOutcome, Transition,
    record::{day_key, stats_key},
};
use brackle::universe::Universe;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::rc::Rc;

const ANSWER: &str = "*(()(*))";

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Memory store whose contents survive the `Game` that owns the box
#[derive(Clone, Default)]
struct SharedStore(Rc<RefCell<MemoryStore>>);

impl Store for SharedStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0.borrow().load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.borrow_mut().save(key, value)
    }
}

/// Store that fails every operation
struct BrokenStore;

impl Store for BrokenStore {
    fn load(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Io {
            path: "/nonexistent".into(),
            source: std::io::Error::other("disk on fire"),
        })
    }

    fn save(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io {
            path: "/nonexistent".into(),
            source: std::io::Error::other("disk on fire"),
        })
    }
}

fn open<'a>(universe: &'a Universe, store: &SharedStore, date: NaiveDate) -> Game<'a> {
    Game::open(universe, Box::new(store.clone()), date, GameOptions::default())
}

fn miss_and_reveal(game: &mut Game<'_>, guess: &str) {
    let t = game.submit_text(guess).unwrap();
    assert!(matches!(
        t,
        Transition::Submitted {
            outcome: SubmitOutcome::AwaitingReveal,
            ..
        }
    ));
    let round = game.session().day().tries_used() - 1;
    game.reveal_position(round, 0).unwrap();
}

#[test]
fn win_on_third_try_updates_stats_once() {
    let universe = Universe::default();
    let store = SharedStore::default();
    let mut game = open(&universe, &store, day());

    miss_and_reveal(&mut game, "(*()*)**");
    miss_and_reveal(&mut game, "(((())))");
    game.submit_text(ANSWER).unwrap();

    assert_eq!(game.session().state(), SessionState::Won);
    let stats = game.stats();
    assert_eq!(stats.played, 1);
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.dist.get("3"), 1);
    assert_eq!(stats.current_streak, 1);

    // Reloading the finished day must not count it again
    drop(game);
    let game = open(&universe, &store, day());
    assert_eq!(game.session().state(), SessionState::Won);
    assert_eq!(game.stats().played, 1);
    assert_eq!(game.stats().dist.get("3"), 1);
    assert_eq!(game.session_snapshot().last_match_count, Some(8));
}

#[test]
fn invalid_guesses_create_no_round() {
    let universe = Universe::default();
    let store = SharedStore::default();
    let mut game = open(&universe, &store, day());

    assert!(game.submit_text("(*()*)*a").is_err());
    assert!(game.submit_text("(*()").is_err());
    assert!(game.submit_text("))((**()").is_err());
    assert_eq!(game.session().day().tries_used(), 0);
    assert_eq!(game.session().state(), SessionState::Editing);
    assert!(store.0.borrow().load(&day_key(day())).unwrap().is_none());
}

#[test]
fn progress_survives_reload() {
    let universe = Universe::default();
    let store = SharedStore::default();
    let mut game = open(&universe, &store, day());

    game.submit_text("(*()*)**").unwrap();
    game.toggle_view();
    drop(game);

    let mut game = open(&universe, &store, day());
    assert_eq!(game.session().state(), SessionState::AwaitingReveal);
    assert!(game.session().day().show_heights);
    assert_eq!(game.session_snapshot().last_match_count, Some(4));

    game.reveal_position(0, 3).unwrap();
    for ch in "((".chars() {
        game.append_symbol(Symbol::from_char(ch).unwrap()).unwrap();
    }
    drop(game);

    let game = open(&universe, &store, day());
    assert_eq!(game.session().state(), SessionState::Editing);
    assert_eq!(game.session().day().buffer.to_string(), "((");
    assert!(game.session().day().rounds[0].revealed[3].is_some());
}

#[test]
fn loss_resets_streak_and_counts_failure() {
    let universe = Universe::default();
    let store = SharedStore::default();
    let mut game = open(&universe, &store, day());

    for _ in 0..5 {
        miss_and_reveal(&mut game, "(((())))");
    }
    let t = game.submit_text("(((())))").unwrap();
    assert!(matches!(
        t,
        Transition::Submitted {
            outcome: SubmitOutcome::Lost,
            ..
        }
    ));
    assert_eq!(game.stats().dist.get("X"), 1);
    assert_eq!(game.stats().current_streak, 0);
    assert_eq!(
        game.session_snapshot().answer.map(|a| a.to_string()).as_deref(),
        Some(ANSWER)
    );
    assert_eq!(
        game.append_symbol(Symbol::Up),
        Err(SessionError::SessionTerminal)
    );

    let snapshot = game.stats_snapshot();
    assert!(snapshot.rows.iter().any(|r| r.key == "X" && r.is_today));
}

#[test]
fn consecutive_days_build_a_streak() {
    let universe = Universe::default();
    let store = SharedStore::default();

    let mut game = open(&universe, &store, day());
    game.submit_text(ANSWER).unwrap();
    drop(game);

    let next = day().succ_opt().unwrap();
    let mut game = open(&universe, &store, next);
    assert_eq!(game.session().state(), SessionState::Editing);
    game.submit_text("(()**)()").unwrap();

    assert_eq!(game.stats().current_streak, 2);
    assert_eq!(game.stats().max_streak, 2);
    assert_eq!(game.stats().played, 2);
}

#[test]
fn stale_session_is_discarded_on_roll_over() {
    let universe = Universe::default();
    let store = SharedStore::default();
    let mut game = open(&universe, &store, day());
    game.submit_text("(*()*)**").unwrap();

    let next = day().succ_opt().unwrap();
    assert!(game.roll_over(next));
    assert!(!game.roll_over(next));
    assert_eq!(game.session().day().date, next);
    assert_eq!(game.session().day().tries_used(), 0);
    assert_eq!(game.session().state(), SessionState::Editing);
}

#[test]
fn stale_record_under_todays_key_is_ignored() {
    let universe = Universe::default();
    let store = SharedStore::default();
    let yesterday_record = r#"{"version":2,"date":"2023-12-31","rounds":[{"guess":"(((())))"}]}"#;
    store
        .0
        .borrow_mut()
        .save(&day_key(day()), yesterday_record)
        .unwrap();

    let game = open(&universe, &store, day());
    assert_eq!(game.session().day().tries_used(), 0);
}

#[test]
fn finished_but_unrecorded_day_commits_on_load() {
    let universe = Universe::default();
    let store = SharedStore::default();
    let record = format!(
        r#"{{"version":2,"date":"2024-01-01","rounds":[{{"guess":"{ANSWER}"}}],
            "done":true,"won":true,"recorded":false}}"#
    );
    store.0.borrow_mut().save(&day_key(day()), &record).unwrap();

    let game = open(&universe, &store, day());
    assert_eq!(game.stats().dist.get("1"), 1);
    assert!(game.session().day().recorded);
    let saved = store.0.borrow().load(&stats_key()).unwrap().unwrap();
    assert!(saved.contains("\"played\":1"));
}

#[test]
fn finished_record_without_rounds_is_not_counted() {
    let universe = Universe::default();
    let store = SharedStore::default();
    let record = r#"{"date":"2024-01-01","done":true,"won":true}"#;
    store.0.borrow_mut().save(&day_key(day()), record).unwrap();

    let game = open(&universe, &store, day());
    assert_eq!(game.session().state(), SessionState::Editing);
    assert_eq!(game.stats().played, 0);
    assert_eq!(game.stats().wins, 0);
    assert_eq!(game.stats().dist.get("X"), 0);
}

#[test]
fn fully_revealed_pending_round_can_be_played_on() {
    let universe = Universe::default();
    let store = SharedStore::default();
    let record = r#"{"date":"2024-01-01","awaitingReveal":true,
        "rounds":[{"guess":"(*()*)**","revealed":["g","g","g","g","g","g","g","g"]}]}"#;
    store.0.borrow_mut().save(&day_key(day()), record).unwrap();

    let mut game = open(&universe, &store, day());
    assert_eq!(game.session().state(), SessionState::Editing);
    game.submit_text(ANSWER).unwrap();
    assert_eq!(game.session().state(), SessionState::Won);
    assert_eq!(game.stats().dist.get("2"), 1);
}

#[test]
fn storage_failure_degrades_to_memory() {
    let universe = Universe::default();
    let mut game = Game::open(&universe, Box::new(BrokenStore), day(), GameOptions::default());
    assert!(!game.storage_ok());

    game.submit_text("(*()*)**").unwrap();
    game.reveal_position(0, 0).unwrap();
    game.submit_text(ANSWER).unwrap();
    assert_eq!(game.session().state(), SessionState::Won);
    assert_eq!(game.stats().dist.get("2"), 1);
}

#[test]
fn practice_game_never_touches_storage() {
    let universe = Universe::default();
    let store = SharedStore::default();
    let answer = Sequence::parse("(((())))").unwrap();
    let mut game = Game::open(
        &universe,
        Box::new(store.clone()),
        day(),
        GameOptions {
            practice_answer: Some(answer),
        },
    );
    assert!(game.is_practice());
    game.submit_text("(((())))").unwrap();
    assert_eq!(game.session().state(), SessionState::Won);
    assert_eq!(game.stats().played, 0);
    assert!(store.0.borrow().is_empty());
}

#[test]
fn file_store_round_trip_through_game() {
    let dir = tempfile::tempdir().expect("tempdir");
    let universe = Universe::new(Grammar::default());

    let store = FileStore::open(dir.path()).unwrap();
    let mut game = Game::open(&universe, Box::new(store), day(), GameOptions::default());
    game.submit_text(ANSWER).unwrap();
    drop(game);

    assert!(dir.path().join("brackle_stats_v2.json").exists());
    assert!(
        dir.path()
            .join("days")
            .join("brackle_day_v2_L8_2024-01-01.json")
            .exists()
    );

    let store = FileStore::open(dir.path()).unwrap();
    let game = Game::open(&universe, Box::new(store), day(), GameOptions::default());
    assert_eq!(game.session().state(), SessionState::Won);
    assert_eq!(game.stats().played, 1);
}
