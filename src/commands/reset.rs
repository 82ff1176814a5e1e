// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::require_login;
use crate::store;
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let user = require_login(conn)?;
    if !m.get_flag("yes") {
        bail!("This deletes every wallet, transaction and schedule. Re-run with --yes to confirm");
    }
    store::with_document_mut(conn, &user, |doc| {
        doc.reset();
        Ok(())
    })?;
    println!("Data reset for '{}' (account kept)", user);
    Ok(())
}
