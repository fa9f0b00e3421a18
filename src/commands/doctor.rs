// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::analytics::{
    ProgressTier, category_distribution, goal_progress, saturating_sum, total_spend,
};
use crate::api::FinanceApi;
use crate::store::Session;
use crate::utils::pretty_table;

/// Local consistency checks over the cached collections.
pub fn findings<A: FinanceApi>(session: &Session<A>, now: DateTime<Utc>) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Category totals must add up to the overall total
    let total = total_spend(session.expenses());
    let by_cat = saturating_sum(category_distribution(session.expenses()).iter().map(|c| c.total));
    if by_cat != total {
        rows.push(vec![
            "category_total_mismatch".into(),
            format!("{} vs {}", by_cat, total),
        ]);
    }

    // 2) Expenses filed under a category nobody defined
    let known = session.categories();
    for e in session.expenses() {
        if !known.contains(&e.category) {
            rows.push(vec![
                "unknown_category".into(),
                format!("expense {} '{}'", e.id, e.category),
            ]);
        }
    }

    // 3) Unfinished goals past their deadline
    for g in session.goals() {
        let p = goal_progress(g, now);
        if p.days_remaining < 0 && p.tier != ProgressTier::Complete {
            rows.push(vec![
                "goal_overdue".into(),
                format!("goal {} '{}' ({} days)", g.id, g.name, -p.days_remaining),
            ]);
        }
    }
    rows
}

pub fn handle<A: FinanceApi>(session: &Session<A>) -> Result<()> {
    let mut rows = Vec::new();
    match session.api().health() {
        Ok(h) if h.status == "ok" => {}
        Ok(h) => rows.push(vec!["backend_unhealthy".into(), h.status]),
        Err(e) => rows.push(vec!["backend_unreachable".into(), e.to_string()]),
    }
    rows.extend(findings(session, Utc::now()));

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
