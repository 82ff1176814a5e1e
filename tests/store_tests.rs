// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::bail;
use moniledger::evaluator::CatchUpMode;
use moniledger::models::UserDocument;
use moniledger::{db, store};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn document_round_trip() {
    let conn = setup();
    let mut doc = UserDocument::new("hunter2");
    doc.add_wallet("Savings");
    assert!(store::create_document(&conn, "alex", &doc).unwrap());

    let loaded = store::load_document(&conn, "alex").unwrap().unwrap();
    assert_eq!(loaded.password, "hunter2");
    assert_eq!(loaded.selected_wallet, "Savings");
    assert_eq!(loaded.wallets.len(), 2);
    assert_eq!(loaded.categories.len(), 8);
}

#[test]
fn create_refuses_duplicate_username() {
    let conn = setup();
    let doc = UserDocument::new("pw");
    assert!(store::create_document(&conn, "alex", &doc).unwrap());
    assert!(!store::create_document(&conn, "alex", &doc).unwrap());
}

#[test]
fn load_missing_user_is_none() {
    let conn = setup();
    assert!(store::load_document(&conn, "nobody").unwrap().is_none());
}

#[test]
fn session_key_round_trip() {
    let conn = setup();
    assert!(store::current_user(&conn).unwrap().is_none());
    store::set_current_user(&conn, "alex").unwrap();
    assert_eq!(store::current_user(&conn).unwrap().as_deref(), Some("alex"));
    store::set_current_user(&conn, "sam").unwrap();
    assert_eq!(store::current_user(&conn).unwrap().as_deref(), Some("sam"));
    store::clear_current_user(&conn).unwrap();
    assert!(store::current_user(&conn).unwrap().is_none());
}

#[test]
fn catch_up_mode_defaults_to_exhaustive() {
    let conn = setup();
    assert_eq!(
        store::get_catch_up_mode(&conn).unwrap(),
        CatchUpMode::Exhaustive
    );
    store::set_catch_up_mode(&conn, CatchUpMode::Single).unwrap();
    assert_eq!(store::get_catch_up_mode(&conn).unwrap(), CatchUpMode::Single);
}

#[test]
fn with_document_mut_commits_mutation() {
    let mut conn = setup();
    store::create_document(&conn, "alex", &UserDocument::new("pw")).unwrap();

    store::with_document_mut(&mut conn, "alex", |doc| {
        doc.add_wallet("Cash");
        Ok(())
    })
    .unwrap();

    let doc = store::load_document(&conn, "alex").unwrap().unwrap();
    assert!(doc.wallet("Cash").is_some());
    assert_eq!(doc.selected_wallet, "Cash");
}

#[test]
fn with_document_mut_rolls_back_on_error() {
    let mut conn = setup();
    store::create_document(&conn, "alex", &UserDocument::new("pw")).unwrap();

    let res: anyhow::Result<()> = store::with_document_mut(&mut conn, "alex", |doc| {
        doc.add_wallet("Cash");
        bail!("validation failed after the mutation");
    });
    assert!(res.is_err());

    // Nothing committed.
    let doc = store::load_document(&conn, "alex").unwrap().unwrap();
    assert!(doc.wallet("Cash").is_none());
    assert_eq!(doc.selected_wallet, "Main");
}

#[test]
fn with_document_mut_unknown_user() {
    let mut conn = setup();
    let res = store::with_document_mut(&mut conn, "nobody", |_doc| Ok(()));
    assert!(res.is_err());
}

#[test]
fn corrupt_blob_is_reported_not_panicked() {
    let conn = setup();
    conn.execute(
        "INSERT INTO documents(username, doc) VALUES('alex', 'not json')",
        [],
    )
    .unwrap();
    let err = store::load_document(&conn, "alex").unwrap_err();
    assert!(matches!(err, store::StoreError::Corrupt { .. }));
}

#[test]
fn open_or_init_is_idempotent_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    {
        let conn = Connection::open(&path).unwrap();
        db::init_schema(&conn).unwrap();
        store::create_document(&conn, "alex", &UserDocument::new("pw")).unwrap();
    }
    let conn = Connection::open(&path).unwrap();
    db::init_schema(&conn).unwrap();
    assert!(store::load_document(&conn, "alex").unwrap().is_some());
}
