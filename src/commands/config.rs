// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::utils::pretty_table;

pub fn handle(path: &Path, effective: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-api", sub)) => {
            let url = sub.get_one::<String>("url").unwrap().trim();
            set_api(path, url)?;
            println!("API base set to {}", url);
        }
        _ => {
            let rows = vec![
                vec!["config file".into(), path.display().to_string()],
                vec!["api_base".into(), effective.api_base.clone()],
                vec!["timeout_secs".into(), effective.timeout_secs.to_string()],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
    }
    Ok(())
}

/// Store a new API base in the config file, keeping its other settings.
pub fn set_api(path: &Path, url: &str) -> Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(anyhow::anyhow!(
            "Invalid API base '{}', expected an http(s) URL",
            url
        ));
    }
    let mut file_cfg = Config::load_from(path)?;
    file_cfg.api_base = url.trim_end_matches('/').to_string();
    file_cfg.save_to(path)
}
