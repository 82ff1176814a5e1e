// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::UserDocument;
use crate::store;
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn signup(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let username = m.get_one::<String>("username").unwrap();
    let password = m.get_one::<String>("password").unwrap();
    if username.trim().is_empty() || password.is_empty() {
        bail!("Username and password must not be empty");
    }

    let doc = UserDocument::new(password.clone());
    if !store::create_document(conn, username, &doc)? {
        bail!("Username '{}' is already taken", username);
    }
    store::set_current_user(conn, username)?;
    println!("Account '{}' created and logged in", username);
    Ok(())
}

pub fn login(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let username = m.get_one::<String>("username").unwrap();
    let password = m.get_one::<String>("password").unwrap();

    // Credentials are stored and compared as plain strings.
    match store::load_document(conn, username)? {
        Some(doc) if doc.password == *password => {
            store::set_current_user(conn, username)?;
            println!("Logged in as '{}'", username);
            Ok(())
        }
        _ => bail!("Invalid username or password"),
    }
}

pub fn logout(conn: &Connection) -> Result<()> {
    store::clear_current_user(conn)?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(conn: &Connection) -> Result<()> {
    match store::current_user(conn)? {
        Some(user) => println!("{}", user),
        None => println!("Not logged in"),
    }
    Ok(())
}
