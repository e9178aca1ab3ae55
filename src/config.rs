use clap::Parser;
use std::path::PathBuf;

use crate::analysis::AnalyzerSettings;
use crate::roster::RosterColumns;

/// Birthday paradox check against sports squad lists
#[derive(Parser, Debug, Clone)]
#[command(name = "squad-birthdays", version, about)]
pub struct Config {
    /// Squad-list table extracted from the tournament PDF (CSV)
    #[arg(
        long,
        env = "ROSTER_CSV",
        default_value = "SquadLists-English_tables.csv"
    )]
    pub input: PathBuf,

    /// Players per squad; shirt numbers 1..=N are analysed
    #[arg(long, env = "SQUAD_SIZE", default_value = "23")]
    pub squad_size: usize,

    /// Max observed-vs-theory gap (percentage points) reported as aligned
    #[arg(long, env = "ALIGNMENT_THRESHOLD", default_value = "5.0")]
    pub alignment_threshold: f64,

    /// Column identifying the squad (source page)
    #[arg(long, env = "GROUP_COLUMN", default_value = "src_page")]
    pub group_column: String,

    /// Column holding the shirt / roster number
    #[arg(long, env = "NUMBER_COLUMN", default_value = "#")]
    pub number_column: String,

    /// Column holding the date of birth (day-first)
    #[arg(long, env = "DOB_COLUMN", default_value = "DOB")]
    pub dob_column: String,

    /// Column holding the player's display name
    #[arg(long, env = "NAME_COLUMN", default_value = "PLAYER NAME")]
    pub name_column: String,

    /// Print the report as JSON instead of text
    #[arg(long, env = "REPORT_JSON", default_value = "false")]
    pub json: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.squad_size == 0 {
            anyhow::bail!("squad_size must be at least 1");
        }
        if !self.alignment_threshold.is_finite() || self.alignment_threshold < 0.0 {
            anyhow::bail!("alignment_threshold must be a non-negative number");
        }
        for (flag, value) in [
            ("group_column", &self.group_column),
            ("number_column", &self.number_column),
            ("dob_column", &self.dob_column),
            ("name_column", &self.name_column),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{flag} must not be empty");
            }
        }
        Ok(())
    }

    pub fn columns(&self) -> RosterColumns {
        RosterColumns {
            group: self.group_column.clone(),
            number: self.number_column.clone(),
            date_of_birth: self.dob_column.clone(),
            name: self.name_column.clone(),
        }
    }

    pub fn analyzer_settings(&self) -> AnalyzerSettings {
        AnalyzerSettings {
            squad_size: self.squad_size,
            alignment_threshold: self.alignment_threshold,
        }
    }
}
