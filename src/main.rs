use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use tracing::{info, warn};

mod analysis;
mod config;
mod roster;

use analysis::report;
use analysis::BirthdayCollisionAnalyzer;
use config::Config;
use roster::{load_roster, SquadGrouper};

fn main() -> Result<()> {
    // Initialise tracing / logging. Logs go to stderr; stdout is the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let table = load_roster(&config.input, &config.columns())
        .with_context(|| format!("loading roster table {}", config.input.display()))?;
    info!(
        "Loaded {} row(s) from {}",
        table.stats.rows,
        config.input.display()
    );
    if table.stats.invalid_roster_numbers > 0 || table.stats.unparseable_dates > 0 {
        info!(
            "{} row(s) without a usable roster number, {} without a usable date of birth",
            table.stats.invalid_roster_numbers, table.stats.unparseable_dates
        );
    }

    let squads = SquadGrouper::new(config.squad_size).group(&table.records);
    if squads.is_empty() {
        warn!(
            "No group has {} players numbered 1-{}; nothing to compare against",
            config.squad_size, config.squad_size
        );
    }

    let analysis = BirthdayCollisionAnalyzer::new(config.analyzer_settings()).analyze(&squads);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if config.json {
        report::write_json(&mut out, &analysis)?;
    } else {
        report::write_text(&mut out, &analysis)?;
    }
    out.flush()?;

    Ok(())
}
