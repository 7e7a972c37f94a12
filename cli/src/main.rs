mod commands;
mod terminal;

use commands::{CommandLine, scan};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose, commands.quiet);
    print::header("starting scanner", commands.quiet);

    let cfg = commands.to_config();
    scan::scan(cfg, commands.quiet).await
}
