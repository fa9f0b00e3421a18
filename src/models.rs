// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::utils::parse_amount;

pub const BUILTIN_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Education",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "UPI")]
    Upi,
    Cash,
    Card,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Upi, PaymentMethod::Cash, PaymentMethod::Card];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upi" => Ok(PaymentMethod::Upi),
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            other => Err(anyhow::anyhow!(
                "Invalid payment method '{}', expected UPI|Cash|Card",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(anyhow::anyhow!(
                "Invalid priority '{}', expected high|medium|low",
                other
            )),
        }
    }
}

/// A recorded spend as returned by `GET /api/expenses`.
///
/// The backend reports the payment column as `payment_method` while the
/// write endpoints expect `paymentMethod`; both are accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    #[serde(
        default,
        deserialize_with = "lenient_amount",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub amount: Decimal,
    pub category: String,
    #[serde(deserialize_with = "lenient_date")]
    pub date: NaiveDate,
    #[serde(rename = "paymentMethod", alias = "payment_method")]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /api/expenses` and `PUT /api/expenses/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpense {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_amount",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub target: Decimal,
    #[serde(
        default,
        deserialize_with = "lenient_amount",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub current: Decimal,
    #[serde(deserialize_with = "lenient_date")]
    pub deadline: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGoal {
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub target: Decimal,
    pub deadline: NaiveDate,
    pub priority: Priority,
}

/// Full replacement body for `PUT /api/goals/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalUpdate {
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub target: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub current: Decimal,
    pub deadline: NaiveDate,
    pub priority: Priority,
}

impl From<&Goal> for GoalUpdate {
    fn from(g: &Goal) -> Self {
        Self {
            name: g.name.clone(),
            target: g.target,
            current: g.current,
            deadline: g.deadline,
            priority: g.priority,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub expenses: Vec<Expense>,
    pub goals: Vec<Goal>,
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Decode a list response one row at a time; rows that do not decode are
/// logged and left out so the rest of the collection still loads.
pub fn decode_rows<T: DeserializeOwned>(kind: &str, rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.get("id").cloned();
            match serde_json::from_value::<T>(row) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!(kind, ?id, error = %e, "skipping row that could not be decoded");
                    None
                }
            }
        })
        .collect()
}

// Invalid or missing amounts become zero so every aggregate sees the same value.
fn lenient_amount<'de, D>(d: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(d)?;
    let parsed = match &raw {
        Some(Value::Number(n)) => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
        Some(Value::String(s)) => parse_amount(s).ok(),
        _ => None,
    };
    match parsed {
        Some(v) => Ok(v.abs()),
        None => {
            warn!(?raw, "unparsable amount, counting it as zero");
            Ok(Decimal::ZERO)
        }
    }
}

fn lenient_date<'de, D>(d: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    let day = s.get(..10).unwrap_or(&s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
}
