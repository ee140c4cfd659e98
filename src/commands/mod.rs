//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - `execute.rs` producing a serializable result
//! - `output.rs` formatting that result as a table

mod generate;
mod inspect;

pub use generate::GenerateCmd;
pub use inspect::InspectCmd;

use clap::{Args, Subcommand};
use std::error::Error;
use std::path::PathBuf;

use crate::config::Config;
use crate::maker::DdlMaker;
use crate::output::{OutputFormat, Outputable};
use crate::schema::SchemaFile;

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render CREATE TABLE statements for every record in a schema file
    Generate(GenerateCmd),

    /// Show the assembled tables without rendering DDL
    Inspect(InspectCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Generate(cmd) => {
                let result = cmd.execute()?;
                Ok(result.format(format))
            }
            Command::Inspect(cmd) => {
                let result = cmd.execute()?;
                Ok(result.format(format))
            }
        }
    }
}

fn validate_file_exists(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("File not found: {}", path.display()))
    }
}

/// Schema file and target dialect shared by every command.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Path to the schema JSON file
    #[arg(short, long, value_parser = validate_file_exists)]
    pub schema: PathBuf,

    /// Path to the configuration file (defaults to ./ddl-maker.json when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Database driver: mysql or sqlite (overrides the config file)
    #[arg(short, long)]
    pub driver: Option<String>,

    /// MySQL storage engine (overrides the config file)
    #[arg(long)]
    pub engine: Option<String>,

    /// MySQL default character set (overrides the config file)
    #[arg(long)]
    pub charset: Option<String>,
}

impl TargetArgs {
    /// Configuration file merged with command-line overrides.
    pub fn resolve_config(&self) -> Result<Config, Box<dyn Error>> {
        let mut config = Config::load_or_default(self.config.as_deref())?;
        if let Some(driver) = &self.driver {
            config.db.driver = driver.clone();
        }
        if let Some(engine) = &self.engine {
            config.db.engine = Some(engine.clone());
        }
        if let Some(charset) = &self.charset {
            config.db.charset = Some(charset.clone());
        }
        Ok(config)
    }

    /// Maker for `config` with every record of the schema file registered.
    pub fn maker(&self, config: Config) -> Result<DdlMaker, Box<dyn Error>> {
        let mut maker = DdlMaker::new(config)?;
        let records = SchemaFile::load(&self.schema)?.into_records();
        maker.add_records(records)?;
        Ok(maker)
    }
}
