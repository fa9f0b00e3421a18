// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

const UA: &str = concat!(
    "spendwise/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/spendwise)"
);

// Leading currency marker: symbol or code, optionally followed by a dot.
static CURRENCY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(₹|\$|€|£|rs\.?|inr|usd|eur|gbp)\s*").unwrap());

// Plain digits, or en-IN / en-US grouping (`,`, `_`, space, thin space): the
// last group has three digits and the ones before it two or three.
static GROUPED_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[+-]?(?:\d+|\d{1,3}(?:[,_ \u{2009}\u{202F}]\d{2,3})*[,_ \u{2009}\u{202F}]\d{3})(?:\.\d+)?$",
    )
    .unwrap()
});

pub fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parse an amount typed by a person: `1,23,456.50`, `₹ 1,500`, `Rs. 20`, `2 500`.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(anyhow::anyhow!("Amount is required"));
    }
    let body = CURRENCY_PREFIX.replace(trimmed, "");
    let body = body.trim();
    if !GROUPED_NUMBER.is_match(body) {
        return Err(anyhow::anyhow!("Invalid amount '{}'", s));
    }
    let digits: String = body
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        .collect();
    digits
        .trim_start_matches('+')
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}'", s))
}

/// Render an amount with en-IN digit grouping and at most two decimals.
pub fn format_grouped(d: Decimal) -> String {
    let rounded = d.round_dp(2).normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text.clone(), None),
    };

    let grouped = if int_part.len() <= 3 {
        int_part
    } else {
        let (head, tail) = int_part.split_at(int_part.len() - 3);
        let mut groups = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (h, t) = rest.split_at(rest.len() - 2);
            groups.push(t);
            rest = h;
        }
        if !rest.is_empty() {
            groups.push(rest);
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(&f);
    }
    out
}

pub fn fmt_money(d: Decimal) -> String {
    format!("₹{}", format_grouped(d))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Text progress bar, `width` cells wide, for a percentage already clamped to 0..=100.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
