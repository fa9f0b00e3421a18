// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::FinanceApi;
use crate::commands::settle;
use crate::models::BUILTIN_CATEGORIES;
use crate::store::Session;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle<A: FinanceApi>(session: &mut Session<A>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            if settle("add category", session.add_category(name))? {
                println!("Added category '{}'", name);
            }
        }
        Some(("list", _)) => {
            let data = session
                .categories()
                .into_iter()
                .map(|c| {
                    let kind = if BUILTIN_CATEGORIES.contains(&c.as_str()) {
                        "built-in"
                    } else {
                        "custom"
                    };
                    vec![c, kind.to_string()]
                })
                .collect();
            println!("{}", pretty_table(&["Category", "Kind"], data));
        }
        _ => {}
    }
    Ok(())
}
