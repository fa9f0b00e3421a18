// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod advisor;
pub mod categories;
pub mod clear;
pub mod config;
pub mod dashboard;
pub mod doctor;
pub mod expenses;
pub mod goals;
pub mod projections;

use anyhow::Result;

use crate::error::SessionError;

/// Turn a write result into CLI behaviour: bad input is an error, a failed
/// call is reported and otherwise ignored (local data stays as it was).
pub(crate) fn settle(action: &str, r: Result<(), SessionError>) -> Result<bool> {
    match r {
        Ok(()) => Ok(true),
        Err(SessionError::Api(_)) => {
            eprintln!("Could not {}; local data unchanged.", action);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
