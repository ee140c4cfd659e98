use clap::Parser;

use ddl_maker::cli::Args;
use ddl_maker::logging::setup_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    setup_logging(args.verbose);
    let output = args.command.run(args.format)?;
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
    Ok(())
}
