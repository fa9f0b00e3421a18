// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::analytics::{ProgressTier, goal_progress};
use crate::api::FinanceApi;
use crate::commands::settle;
use crate::models::{Goal, Priority};
use crate::store::{GoalForm, Session};
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table, progress_bar};

pub fn handle<A: FinanceApi>(session: &mut Session<A>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(session, sub)?,
        Some(("add", sub)) => add(session, sub)?,
        Some(("contribute", sub)) => contribute(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct GoalRow {
    pub id: i64,
    pub name: String,
    pub target: String,
    pub current: String,
    pub percent: String,
    pub tier: ProgressTier,
    pub days_left: i64,
    pub deadline: String,
    pub priority: Priority,
    #[serde(skip)]
    pub bar: f64,
}

pub fn rows(goals: &[Goal], now: DateTime<Utc>) -> Vec<GoalRow> {
    goals
        .iter()
        .map(|g| {
            let p = goal_progress(g, now);
            GoalRow {
                id: g.id,
                name: g.name.clone(),
                target: format!("{:.2}", g.target),
                current: format!("{:.2}", g.current),
                percent: format!("{:.1}", p.percent),
                tier: p.tier,
                days_left: p.days_remaining,
                deadline: g.deadline.to_string(),
                priority: g.priority,
                bar: p.bar_percent.to_f64().unwrap_or(0.0),
            }
        })
        .collect()
}

fn list<A: FinanceApi>(session: &Session<A>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = rows(session.goals(), Utc::now());
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No goals yet.");
        return Ok(());
    }
    let table_rows = data
        .iter()
        .map(|r| {
            let days = if r.days_left < 0 {
                format!("{} overdue", -r.days_left)
            } else {
                r.days_left.to_string()
            };
            vec![
                r.id.to_string(),
                r.name.clone(),
                format!("{} / {}", r.current, r.target),
                format!("{} {}%", progress_bar(r.bar, 20), r.percent),
                r.tier.label().to_string(),
                days,
                r.priority.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Goal", "Saved / Target", "Progress", "Tier", "Days left", "Priority"],
            table_rows,
        )
    );
    Ok(())
}

fn add<A: FinanceApi>(session: &mut Session<A>, sub: &clap::ArgMatches) -> Result<()> {
    let form = GoalForm {
        name: sub.get_one::<String>("name").unwrap().clone(),
        target: sub.get_one::<String>("target").unwrap().clone(),
        deadline: Some(parse_date(sub.get_one::<String>("deadline").unwrap())?),
        priority: sub.get_one::<String>("priority").unwrap().parse::<Priority>()?,
    };
    if settle("add goal", session.add_goal(&form))? {
        let goal = form.validate()?;
        println!(
            "Goal '{}' added: {} by {}",
            goal.name,
            fmt_money(goal.target),
            goal.deadline
        );
    }
    Ok(())
}

fn contribute<A: FinanceApi>(session: &mut Session<A>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let amount = sub.get_one::<String>("amount").unwrap();
    if settle("update goal", session.contribute_goal(id, amount))? {
        if let Some(g) = session.store().goal(id) {
            println!(
                "Goal '{}' now at {} of {}",
                g.name,
                fmt_money(g.current),
                fmt_money(g.target)
            );
        }
    }
    Ok(())
}

fn remove<A: FinanceApi>(session: &mut Session<A>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if settle("delete goal", session.delete_goal(id))? {
        println!("Deleted goal {}", id);
    }
    Ok(())
}
