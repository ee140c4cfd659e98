mod execute;
mod output;

use std::path::PathBuf;

use clap::Args;

use super::TargetArgs;

/// Render CREATE TABLE statements for every record in a schema file
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  ddl_maker generate -s schema.json                    # MySQL DDL on stdout
  ddl_maker generate -s schema.json -d sqlite          # SQLite DDL on stdout
  ddl_maker generate -s schema.json -o schema.sql      # Write to a file
  ddl_maker generate -s schema.json -c ddl-maker.json  # Driver and output from config")]
pub struct GenerateCmd {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output file (overrides out_file_path from the config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
