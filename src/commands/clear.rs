// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::api::FinanceApi;
use crate::store::{ClearOutcome, Session};

pub fn handle<A: FinanceApi>(session: &mut Session<A>, m: &clap::ArgMatches) -> Result<()> {
    let stdin = io::stdin();
    run(session, m.get_flag("yes"), stdin.lock(), io::stdout().lock())
}

/// Bulk clear, asking on `input` for a typed `yes` unless `assume_yes` is set.
pub fn run<A: FinanceApi, R: BufRead, W: Write>(
    session: &mut Session<A>,
    assume_yes: bool,
    mut input: R,
    mut out: W,
) -> Result<()> {
    let mut prompt_err = None;
    let outcome = session.clear_all(|plan| {
        if assume_yes {
            return true;
        }
        let mut ask = || -> io::Result<bool> {
            write!(
                out,
                "Are you sure you want to delete ALL {} expenses and {} goals? This cannot be undone. Type 'yes' to continue: ",
                plan.expenses, plan.goals
            )?;
            out.flush()?;
            let mut answer = String::new();
            input.read_line(&mut answer)?;
            Ok(answer.trim().eq_ignore_ascii_case("yes"))
        };
        match ask() {
            Ok(yes) => yes,
            Err(e) => {
                prompt_err = Some(e);
                false
            }
        }
    });
    if let Some(e) = prompt_err {
        return Err(e.into());
    }
    match outcome {
        ClearOutcome::Cancelled => writeln!(out, "Nothing deleted.")?,
        ClearOutcome::Completed(report) if report.is_success() => {
            writeln!(out, "All data cleared successfully!")?
        }
        ClearOutcome::Completed(report) if report.failed == 0 => writeln!(
            out,
            "All records deleted, but the data could not be reloaded."
        )?,
        ClearOutcome::Completed(_) => writeln!(out, "Failed to clear data. Please try again.")?,
    }
    Ok(())
}
