pub mod compare;
pub mod embed;
pub mod extract;

use crate::args::Command;
use anyhow::Result;

/// Runs a CLI command.
pub fn execute(command: Command) -> Result<()> {
    match command {
        Command::Embed(args) => embed::command(args),
        Command::Extract(args) => extract::command(args),
        Command::Compare(args) => compare::command(args),
    }
}
