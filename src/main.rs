// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use periodledger::{Ledger, cli, commands, config, utils};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config_file = match matches.get_one::<PathBuf>("config") {
        Some(path) => path.clone(),
        None => config::config_file_path()?,
    };
    let cfg = config::Config::resolve(
        Some(config_file.as_path()),
        matches.get_one::<PathBuf>("data_dir").cloned(),
        matches.get_one::<u8>("reserve").copied(),
    )?;

    let mut ledger = Ledger::open(&cfg.data_dir, utils::today())
        .with_context(|| format!("Open ledger in {}", cfg.data_dir.display()))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!(
                "Ledger ready at {} (period {})",
                cfg.data_dir.display(),
                ledger.period()
            );
        }
        Some(("account", sub)) => commands::accounts::handle(&mut ledger, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("recurring", sub)) => commands::recurrings::handle(&mut ledger, sub)?,
        Some(("balance", sub)) => commands::balance::handle(&ledger, sub, cfg.reserve_percent)?,
        Some(("period", sub)) => commands::periods::handle(&mut ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        Some(("menu", _)) => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout();
            commands::menu::run(
                &mut ledger,
                &mut input,
                &mut out,
                cfg.reserve_percent,
                utils::today(),
            )?;
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
