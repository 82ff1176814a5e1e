// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use moniledger::commands::check::{run, CheckResult};
use moniledger::models::{Cadence, Schedule, TxKind, UserDocument};
use moniledger::notify::NotificationSink;
use moniledger::{db, store};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::sync::Mutex;

struct RecordingSink(Mutex<Vec<(String, String)>>);

impl RecordingSink {
    fn new() -> Self {
        RecordingSink(Mutex::new(Vec::new()))
    }

    fn messages(&self) -> Vec<(String, String)> {
        self.0.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, title: &str, body: &str) {
        self.0.lock().unwrap().push((title.to_string(), body.to_string()));
    }
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn seed_user_with_schedule(conn: &Connection, cadence: Cadence, due: NaiveDateTime) {
    let mut doc = UserDocument::new("pw");
    let id = doc.mint_id();
    doc.schedules.push(Schedule {
        id,
        kind: TxKind::Expense,
        amount: "50".parse().unwrap(),
        category: "Bills".to_string(),
        note: Some("rent".to_string()),
        wallet: "Main".to_string(),
        cadence,
        start_date: due.date(),
        start_time: due.time(),
        next_run_at: Some(due),
        completed: false,
        created_at: due,
    });
    store::create_document(conn, "alex", &doc).unwrap();
    store::set_current_user(conn, "alex").unwrap();
}

#[test]
fn no_session_means_no_data() {
    let mut conn = setup();
    let sink = RecordingSink::new();
    assert_eq!(
        run(&mut conn, at(2024, 6, 1, 9, 0), &sink).unwrap(),
        CheckResult::NoData
    );
    assert!(sink.messages().is_empty());
}

#[test]
fn nothing_due_means_no_data() {
    let mut conn = setup();
    seed_user_with_schedule(&conn, Cadence::Monthly, at(2024, 7, 1, 9, 0));
    let sink = RecordingSink::new();

    assert_eq!(
        run(&mut conn, at(2024, 6, 1, 9, 0), &sink).unwrap(),
        CheckResult::NoData
    );
    assert!(sink.messages().is_empty());
}

#[test]
fn due_schedule_commits_and_notifies() {
    let mut conn = setup();
    seed_user_with_schedule(&conn, Cadence::Monthly, at(2024, 6, 1, 9, 0));
    let sink = RecordingSink::new();

    assert_eq!(
        run(&mut conn, at(2024, 6, 1, 9, 30), &sink).unwrap(),
        CheckResult::NewData
    );

    let doc = store::load_document(&conn, "alex").unwrap().unwrap();
    assert_eq!(doc.wallet("Main").unwrap().balance, Decimal::from(-50));
    assert_eq!(doc.wallet("Main").unwrap().transactions.len(), 1);
    assert_eq!(doc.schedules[0].next_run_at, Some(at(2024, 7, 1, 9, 0)));

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, "Scheduled expense");
    assert!(messages[0].1.contains("Bills"));
    assert!(messages[0].1.contains("rent"));
    assert!(messages[0].1.contains("Main"));

    // A second run at the same time is settled: no double-apply, no noise.
    let sink2 = RecordingSink::new();
    assert_eq!(
        run(&mut conn, at(2024, 6, 1, 9, 30), &sink2).unwrap(),
        CheckResult::NoData
    );
    assert!(sink2.messages().is_empty());
    let doc = store::load_document(&conn, "alex").unwrap().unwrap();
    assert_eq!(doc.wallet("Main").unwrap().balance, Decimal::from(-50));
}

#[test]
fn configured_single_mode_is_honored() {
    let mut conn = setup();
    seed_user_with_schedule(&conn, Cadence::Daily, at(2024, 6, 1, 9, 0));
    store::set_catch_up_mode(&conn, moniledger::evaluator::CatchUpMode::Single).unwrap();
    let sink = RecordingSink::new();

    // Three days late: single mode applies one occurrence per run.
    assert_eq!(
        run(&mut conn, at(2024, 6, 4, 10, 0), &sink).unwrap(),
        CheckResult::NewData
    );
    let doc = store::load_document(&conn, "alex").unwrap().unwrap();
    assert_eq!(doc.wallet("Main").unwrap().transactions.len(), 1);
    assert_eq!(doc.schedules[0].next_run_at, Some(at(2024, 6, 2, 9, 0)));
}

#[test]
fn catch_up_mode_change_applies_on_the_next_cycle() {
    let mut conn = setup();
    seed_user_with_schedule(&conn, Cadence::Daily, at(2024, 6, 1, 9, 0));
    store::set_catch_up_mode(&conn, moniledger::evaluator::CatchUpMode::Single).unwrap();
    let sink = RecordingSink::new();

    assert_eq!(
        run(&mut conn, at(2024, 6, 4, 10, 0), &sink).unwrap(),
        CheckResult::NewData
    );
    let doc = store::load_document(&conn, "alex").unwrap().unwrap();
    assert_eq!(doc.wallet("Main").unwrap().transactions.len(), 1);

    // Flipping to exhaustive drains the remaining backlog in one cycle.
    store::set_catch_up_mode(&conn, moniledger::evaluator::CatchUpMode::Exhaustive).unwrap();
    assert_eq!(
        run(&mut conn, at(2024, 6, 4, 10, 0), &sink).unwrap(),
        CheckResult::NewData
    );
    let doc = store::load_document(&conn, "alex").unwrap().unwrap();
    assert_eq!(doc.wallet("Main").unwrap().transactions.len(), 4);
    assert_eq!(doc.schedules[0].next_run_at, Some(at(2024, 6, 5, 9, 0)));
}

#[test]
fn broken_persistence_surfaces_the_cause() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO documents (username, doc) VALUES ('alex', 'not json')",
        [],
    )
    .unwrap();
    store::set_current_user(&conn, "alex").unwrap();
    let sink = RecordingSink::new();

    let err = run(&mut conn, at(2024, 6, 1, 9, 0), &sink).unwrap_err();
    assert!(err.to_string().contains("not valid JSON"), "{err}");
    assert!(err.to_string().contains("alex"), "{err}");
    assert!(sink.messages().is_empty());
}

#[test]
fn dangling_wallet_still_makes_progress() {
    let mut conn = setup();
    let mut doc = UserDocument::new("pw");
    let id = doc.mint_id();
    doc.schedules.push(Schedule {
        id,
        kind: TxKind::Income,
        amount: "10".parse().unwrap(),
        category: "Other".to_string(),
        note: None,
        wallet: "Ghost".to_string(),
        cadence: Cadence::Once,
        start_date: at(2024, 6, 1, 9, 0).date(),
        start_time: at(2024, 6, 1, 9, 0).time(),
        next_run_at: Some(at(2024, 6, 1, 9, 0)),
        completed: false,
        created_at: at(2024, 6, 1, 9, 0),
    });
    store::create_document(&conn, "alex", &doc).unwrap();
    store::set_current_user(&conn, "alex").unwrap();
    let sink = RecordingSink::new();

    // The schedule completes (document changed) but nothing is applied and
    // nothing is announced.
    assert_eq!(
        run(&mut conn, at(2024, 6, 1, 9, 0), &sink).unwrap(),
        CheckResult::NewData
    );
    assert!(sink.messages().is_empty());

    let doc = store::load_document(&conn, "alex").unwrap().unwrap();
    assert!(doc.schedules[0].completed);
    assert!(doc.wallet("Ghost").is_none());
}
