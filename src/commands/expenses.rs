// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::api::FinanceApi;
use crate::commands::settle;
use crate::models::{Expense, PaymentMethod};
use crate::store::{ExpenseForm, Session};
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};

pub fn handle<A: FinanceApi>(session: &mut Session<A>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(session, sub)?,
        Some(("add", sub)) => add(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        Some(("export", sub)) => export(session, sub)?,
        _ => {}
    }
    Ok(())
}

/// Overlay whichever fields were given on the command line onto `form`.
fn apply_fields(form: &mut ExpenseForm, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(a) = sub.get_one::<String>("amount") {
        form.amount = a.clone();
    }
    if let Some(c) = sub.get_one::<String>("category") {
        form.category = c.trim().to_string();
    }
    if let Some(d) = sub.get_one::<String>("date") {
        form.date = parse_date(d)?;
    }
    if let Some(pm) = sub.get_one::<String>("method") {
        form.payment_method = pm.parse::<PaymentMethod>()?;
    }
    if let Some(desc) = sub.get_one::<String>("desc") {
        form.description = desc.clone();
    }
    Ok(())
}

fn add<A: FinanceApi>(session: &mut Session<A>, sub: &clap::ArgMatches) -> Result<()> {
    let mut form = ExpenseForm::default();
    apply_fields(&mut form, sub)?;
    if settle("add expense", session.add_expense(&form))? {
        println!(
            "Recorded {} for {} on {} via {}",
            fmt_money(form.validate()?.amount),
            form.category,
            form.date,
            form.payment_method
        );
    }
    Ok(())
}

fn edit<A: FinanceApi>(session: &mut Session<A>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let current = session
        .store()
        .expense(id)
        .with_context(|| format!("Expense {} not found", id))?;
    let mut form = ExpenseForm::from_expense(current);
    apply_fields(&mut form, sub)?;
    if settle("update expense", session.update_expense(id, &form))? {
        println!("Updated expense {}", id);
    }
    Ok(())
}

fn remove<A: FinanceApi>(session: &mut Session<A>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if settle("delete expense", session.delete_expense(id))? {
        println!("Deleted expense {}", id);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub method: String,
    pub description: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(e: &Expense) -> Self {
        Self {
            id: e.id,
            date: e.date.to_string(),
            category: e.category.clone(),
            amount: format!("{:.2}", e.amount),
            method: e.payment_method.to_string(),
            description: e.description.clone().unwrap_or_default(),
        }
    }
}

/// Cached expenses in backend order, filtered by `--category` and cut at `--limit`.
pub fn query_rows<A: FinanceApi>(
    session: &Session<A>,
    sub: &clap::ArgMatches,
) -> Vec<ExpenseRow> {
    let category = sub.get_one::<String>("category").map(|c| c.trim());
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    session
        .expenses()
        .iter()
        .filter(|e| category.is_none_or(|c| e.category.eq_ignore_ascii_case(c)))
        .take(limit)
        .map(ExpenseRow::from)
        .collect()
}

fn list<A: FinanceApi>(session: &Session<A>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session, sub);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No expenses yet.");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.method.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Category", "Amount", "Method", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

fn export<A: FinanceApi>(session: &Session<A>, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let rows: Vec<ExpenseRow> = session.expenses().iter().map(ExpenseRow::from).collect();

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            for row in &rows {
                wtr.serialize(row)?;
            }
            if rows.is_empty() {
                wtr.write_record(["id", "date", "category", "amount", "method", "description"])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(session.expenses())?)
                .with_context(|| format!("Write {}", out))?;
        }
        _ => {
            return Err(anyhow::anyhow!("Unknown format: {} (use csv|json)", fmt));
        }
    }
    println!("Exported {} expenses to {}", rows.len(), out);
    Ok(())
}
