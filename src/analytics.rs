// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Views derived from the current expense and goal sets.
//!
//! Everything here is a pure function of its inputs and is recomputed on
//! every read. Amounts were already coerced to non-negative decimals when
//! the records were decoded, so totals, categories and trends always agree.
//! Sums saturate at `Decimal::MAX` instead of overflowing, and saturate the
//! same way in every view.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Expense, Goal, PaymentMethod};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    /// Short month and year, e.g. `Jan 2024`.
    pub month: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total: Decimal,
    #[serde(skip)]
    pub first_day: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentTotal {
    pub method: PaymentMethod,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendOrder {
    /// Buckets in the order their month is first met while scanning expenses.
    #[default]
    Discovery,
    Chronological,
}

fn sum_first_seen<K, I>(items: I) -> Vec<(K, Decimal)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, Decimal)>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut out: Vec<(K, Decimal)> = Vec::new();
    for (key, amount) in items {
        match index.get(&key) {
            Some(&i) => out[i].1 = out[i].1.saturating_add(amount),
            None => {
                index.insert(key.clone(), out.len());
                out.push((key, amount));
            }
        }
    }
    out
}

/// Sum that stops at `Decimal::MAX` rather than overflowing.
pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, a| acc.saturating_add(a))
}

pub fn category_distribution(expenses: &[Expense]) -> Vec<CategoryTotal> {
    sum_first_seen(expenses.iter().map(|e| (e.category.clone(), e.amount)))
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect()
}

pub fn monthly_trend(expenses: &[Expense], order: TrendOrder) -> Vec<MonthTotal> {
    let mut out: Vec<MonthTotal> = sum_first_seen(
        expenses
            .iter()
            .map(|e| ((e.date.year(), e.date.month()), e.amount)),
    )
    .into_iter()
    .filter_map(|((y, m), total)| {
        let first_day = NaiveDate::from_ymd_opt(y, m, 1)?;
        Some(MonthTotal {
            month: first_day.format("%b %Y").to_string(),
            total,
            first_day,
        })
    })
    .collect();
    if order == TrendOrder::Chronological {
        out.sort_by_key(|m| m.first_day);
    }
    out
}

pub fn payment_breakdown(expenses: &[Expense]) -> Vec<PaymentTotal> {
    sum_first_seen(expenses.iter().map(|e| (e.payment_method, e.amount)))
        .into_iter()
        .map(|(method, total)| PaymentTotal { method, total })
        .collect()
}

pub fn total_spend(expenses: &[Expense]) -> Decimal {
    saturating_sum(expenses.iter().map(|e| e.amount))
}

/// Visual band of a goal, chosen from the unclamped progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressTier {
    Complete,
    Strong,
    Halfway,
    Early,
}

impl ProgressTier {
    pub fn classify(percent: Decimal) -> Self {
        if percent >= Decimal::ONE_HUNDRED {
            ProgressTier::Complete
        } else if percent >= Decimal::from(75) {
            ProgressTier::Strong
        } else if percent >= Decimal::from(50) {
            ProgressTier::Halfway
        } else {
            ProgressTier::Early
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProgressTier::Complete => "complete",
            ProgressTier::Strong => "strong",
            ProgressTier::Halfway => "halfway",
            ProgressTier::Early => "early",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub goal_id: i64,
    pub name: String,
    /// current / target * 100, not clamped.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub percent: Decimal,
    /// `percent` clamped to 0..=100, for bar widths.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub bar_percent: Decimal,
    pub tier: ProgressTier,
    pub days_remaining: i64,
}

pub fn progress_percent(current: Decimal, target: Decimal) -> Decimal {
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    current
        .checked_div(target)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

/// Whole days until `deadline` (midnight UTC), rounded up; negative once overdue.
pub fn days_remaining(deadline: NaiveDate, now: DateTime<Utc>) -> i64 {
    let due = deadline.and_time(NaiveTime::MIN).and_utc();
    let ms = (due - now).num_milliseconds();
    -(-ms).div_euclid(DAY_MS)
}

pub fn goal_progress(goal: &Goal, now: DateTime<Utc>) -> GoalProgress {
    let percent = progress_percent(goal.current, goal.target);
    GoalProgress {
        goal_id: goal.id,
        name: goal.name.clone(),
        percent,
        bar_percent: percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
        tier: ProgressTier::classify(percent),
        days_remaining: days_remaining(goal.deadline, now),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl Period {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "all" => Ok(Period::All),
            other => Err(anyhow::anyhow!(
                "Invalid period '{}', expected week|month|year|all",
                other
            )),
        }
    }

    /// First day included in the period ending `today`.
    pub fn since(&self, today: NaiveDate) -> Option<NaiveDate> {
        let days = match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Year => 365,
            Period::All => return None,
        };
        Some(today - Duration::days(days))
    }
}

pub fn filter_period(expenses: &[Expense], period: Period, today: NaiveDate) -> Vec<Expense> {
    match period.since(today) {
        Some(start) => expenses
            .iter()
            .filter(|e| e.date >= start)
            .cloned()
            .collect(),
        None => expenses.to_vec(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedMonth {
    pub month: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub projected_expenses: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub avg_monthly: Decimal,
    pub projections: Vec<ProjectedMonth>,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.projections.is_empty()
    }
}

/// Linear projection from the average of the last three months (90 days).
pub fn project_spending(expenses: &[Expense], months: u32, today: NaiveDate) -> Projection {
    let start = today - Duration::days(90);
    let recent: Vec<&Expense> = expenses.iter().filter(|e| e.date >= start).collect();
    if recent.is_empty() {
        return Projection {
            avg_monthly: Decimal::ZERO,
            projections: Vec::new(),
        };
    }
    let total = saturating_sum(recent.iter().map(|e| e.amount));
    let avg = total / Decimal::from(3);
    let projections = (1..=months)
        .map(|i| ProjectedMonth {
            month: (today + Duration::days(30 * i as i64))
                .format("%b %Y")
                .to_string(),
            projected_expenses: avg.saturating_mul(Decimal::from(i)).round_dp(2),
        })
        .collect();
    Projection {
        avg_monthly: avg.round_dp(2),
        projections,
    }
}
