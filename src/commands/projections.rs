// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;

use crate::analytics::project_spending;
use crate::api::FinanceApi;
use crate::store::Session;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle<A: FinanceApi>(session: &Session<A>, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let months = *m.get_one::<u32>("months").unwrap_or(&3);
    let projection = project_spending(session.expenses(), months, Local::now().date_naive());
    if maybe_print_json(json_flag, jsonl_flag, &projection)? {
        return Ok(());
    }
    if projection.is_empty() {
        println!("Not enough data for projections");
        return Ok(());
    }
    println!(
        "Average monthly spend (last 3 months): {}",
        fmt_money(projection.avg_monthly)
    );
    let rows = projection
        .projections
        .iter()
        .map(|p| vec![p.month.clone(), fmt_money(p.projected_expenses)])
        .collect();
    println!("{}", pretty_table(&["Month", "Projected (cumulative)"], rows));
    Ok(())
}
