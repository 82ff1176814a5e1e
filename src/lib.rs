// Copyright (c) 2025 Moniledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod db;
pub mod evaluator;
pub mod models;
pub mod notify;
pub mod recur;
pub mod store;
pub mod utils;
