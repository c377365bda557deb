use crate::args::ExtractArgs;
use anyhow::Result;
use humansize::{FormatSize, BINARY};
use log::{info, warn};
use std::fs;
use stegomp3::ExtractOptions;

/// The `extract` CLI command.
pub fn command(args: ExtractArgs) -> Result<()> {
    let options = ExtractOptions {
        cipher: args.cipher,
        random_position: args.random,
        key: args.key.as_deref(),
    };
    let recovered = stegomp3::extract(&args.input, &args.output, &options)?;

    if !recovered.end_signature_matched {
        warn!("end signature did not match; the recovered file may be incomplete");
    }
    let size = fs::metadata(&recovered.path)?.len();
    info!(
        "Recovered {} ({}, width {}) to {}",
        recovered.filename,
        size.format_size(BINARY),
        recovered.width,
        recovered.path.display()
    );
    Ok(())
}
