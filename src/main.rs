// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use spendwise::api::HttpApi;
use spendwise::store::Session;
use spendwise::{cli, commands, config};

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "spendwise=warn",
        1 => "spendwise=info",
        _ => "spendwise=debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_tracing(matches.get_count("verbose"));

    let mut cfg = config::load()?;
    cfg.apply_overrides(
        matches.get_one::<String>("api").map(String::as_str),
        matches.get_one::<u64>("timeout").copied(),
    );

    if let Some(("config", sub)) = matches.subcommand() {
        return commands::config::handle(&config::config_path()?, &cfg, sub);
    }
    if matches.subcommand().is_none() {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    }

    debug!(api = %cfg.api_base, timeout = cfg.timeout_secs, "starting session");
    let mut session = Session::new(HttpApi::new(&cfg.api_base, cfg.timeout())?);
    // Failures are logged inside; commands work on whatever did load.
    let _ = session.refresh_all();

    match matches.subcommand() {
        Some(("dashboard", sub)) => commands::dashboard::handle(&session, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&mut session, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut session, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut session, sub)?,
        Some(("advisor", sub)) => commands::advisor::handle(&mut session, sub)?,
        Some(("project", sub)) => commands::projections::handle(&session, sub)?,
        Some(("clear", sub)) => commands::clear::handle(&mut session, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&session)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
