use crate::args::EmbedArgs;
use anyhow::Result;
use humansize::{FormatSize, BINARY};
use log::info;
use std::fs;
use stegomp3::EmbedOptions;

/// The `embed` CLI command.
pub fn command(args: EmbedArgs) -> Result<()> {
    let options = EmbedOptions {
        width: args.width,
        cipher: args.cipher,
        random_position: args.random,
        key: args.key.as_deref(),
    };
    stegomp3::embed(&args.cover, &args.secret, &args.output, &options)?;

    let size = fs::metadata(&args.output)?.len();
    info!("Wrote {} to {}", size.format_size(BINARY), args.output.display());
    Ok(())
}
