// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::analytics::{
    CategoryTotal, GoalProgress, MonthTotal, PaymentTotal, Period, TrendOrder,
    category_distribution, filter_period, goal_progress, monthly_trend, payment_breakdown,
    total_spend,
};
use crate::api::FinanceApi;
use crate::models::{Expense, Goal};
use crate::store::Session;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, progress_bar};

#[derive(Debug, Serialize)]
pub struct Dashboard {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total: Decimal,
    pub expense_count: usize,
    pub by_category: Vec<CategoryTotal>,
    pub by_month: Vec<MonthTotal>,
    pub by_payment: Vec<PaymentTotal>,
    pub goals: Vec<GoalProgress>,
}

pub fn build(
    expenses: &[Expense],
    goals: &[Goal],
    period: Period,
    order: TrendOrder,
    now: DateTime<Utc>,
) -> Dashboard {
    let scoped = filter_period(expenses, period, now.date_naive());
    Dashboard {
        total: total_spend(&scoped),
        expense_count: scoped.len(),
        by_category: category_distribution(&scoped),
        by_month: monthly_trend(&scoped, order),
        by_payment: payment_breakdown(&scoped),
        goals: goals.iter().map(|g| goal_progress(g, now)).collect(),
    }
}

pub fn handle<A: FinanceApi>(session: &Session<A>, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let period = Period::parse(m.get_one::<String>("period").unwrap())?;
    let order = if m.get_flag("chronological") {
        TrendOrder::Chronological
    } else {
        TrendOrder::Discovery
    };
    let dash = build(session.expenses(), session.goals(), period, order, Utc::now());
    if maybe_print_json(json_flag, jsonl_flag, &dash)? {
        return Ok(());
    }

    println!(
        "Total spent: {} ({} expenses)",
        fmt_money(dash.total),
        dash.expense_count
    );
    if dash.expense_count == 0 {
        println!("No expenses recorded yet.");
    } else {
        let rows = dash
            .by_category
            .iter()
            .map(|c| vec![c.category.clone(), fmt_money(c.total)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));

        let rows = dash
            .by_month
            .iter()
            .map(|m| vec![m.month.clone(), fmt_money(m.total)])
            .collect();
        println!("{}", pretty_table(&["Month", "Spent"], rows));

        let rows = dash
            .by_payment
            .iter()
            .map(|p| vec![p.method.to_string(), fmt_money(p.total)])
            .collect();
        println!("{}", pretty_table(&["Method", "Spent"], rows));
    }

    if !dash.goals.is_empty() {
        let rows = dash
            .goals
            .iter()
            .map(|g| {
                let bar = g.bar_percent.to_f64().unwrap_or(0.0);
                vec![
                    g.name.clone(),
                    format!("{} {:.1}%", progress_bar(bar, 20), g.percent),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Goal", "Progress"], rows));
    }
    Ok(())
}
