use clap::Parser;
use log::error;
use std::process;
use stegomp3_cli::args::CliArgs;
use stegomp3_cli::{commands, terminal};

fn run_app() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    terminal::init_logging(args.verbose);
    commands::execute(args.command)
}

fn main() {
    process::exit(match run_app() {
        Ok(()) => 0,
        Err(err) => {
            let code = match err.downcast_ref::<stegomp3::Error>() {
                Some(_) => 1,
                None => 2,
            };
            error!("Fatal: {:#}", err);
            code
        }
    });
}
