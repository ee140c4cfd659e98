mod execute;
mod output;

use clap::Args;

use super::TargetArgs;

/// Show the assembled tables without rendering DDL
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  ddl_maker inspect -s schema.json                  # Tables as MySQL sees them
  ddl_maker inspect -s schema.json -d sqlite        # Tables as SQLite sees them
  ddl_maker inspect -s schema.json --format json    # Machine-readable")]
pub struct InspectCmd {
    #[command(flatten)]
    pub target: TargetArgs,
}
