use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use twc_core::{
    config::{OUTPUT_DIR, SCHEDULES_PATTERN},
    pipeline, Config,
};

#[derive(Debug, Parser)]
pub struct Arguments {
    /// the glob pattern of the schedule files
    #[arg(long, default_value = SCHEDULES_PATTERN)]
    pub schedules: String,
    /// the directory containing the `csv` and `ics` output directories
    #[arg(long, default_value = OUTPUT_DIR)]
    pub output_dir: PathBuf,
    /// do not write CSV calendars
    #[arg(long)]
    pub exclude_csv: bool,
    /// do not write iCalendar files
    #[arg(long)]
    pub exclude_ics: bool,
}

impl From<&Arguments> for Config {
    fn from(value: &Arguments) -> Self {
        Config {
            schedules: value.schedules.clone(),
            output_dir: value.output_dir.clone(),
            exclude_csv: value.exclude_csv,
            exclude_ics: value.exclude_ics,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();
    let args = Arguments::parse();
    pipeline::run(&Config::from(&args))?;
    Ok(())
}
