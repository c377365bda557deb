use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Hides and recovers files inside MP3 audio using least-significant-bit steganography.
#[derive(Parser)]
#[command(name = "stegomp3", version, about)]
pub struct CliArgs {
    /// Enables debug logging (-vv for trace logging)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Hides a secret file inside a cover MP3
    Embed(EmbedArgs),
    /// Recovers a file previously hidden inside a stego MP3
    Extract(ExtractArgs),
    /// Reports the PSNR, in dB, between two MP3s decoded to PCM
    Compare(CompareArgs),
}

#[derive(Args)]
pub struct EmbedArgs {
    /// Path to the cover MP3
    #[arg(long, value_name("PATH"))]
    pub cover: PathBuf,

    /// Path to the file to hide
    #[arg(long, value_name("PATH"))]
    pub secret: PathBuf,

    /// Path to write the stego MP3 to
    #[arg(long, value_name("PATH"))]
    pub output: PathBuf,

    /// Number of low-order bits per carrier byte to use (1-4)
    #[arg(short = 'n', value_parser = clap::value_parser!(u8).range(1..=4))]
    pub width: u8,

    /// Encrypts the payload with a Vigenère cipher before embedding (requires --key)
    #[arg(long, requires = "key")]
    pub cipher: bool,

    /// Derives the starting carrier position from the key instead of starting at 0
    /// (requires --key)
    #[arg(long, requires = "key")]
    pub random: bool,

    /// Shared secret used by --cipher and/or --random
    #[arg(long, value_name("KEY"))]
    pub key: Option<String>,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Path to the stego MP3 to recover a file from
    #[arg(long, value_name("PATH"))]
    pub input: PathBuf,

    /// Directory to write the recovered file to (created if necessary)
    #[arg(long, value_name("DIR"))]
    pub output: PathBuf,

    /// Decrypts the payload with a Vigenère cipher after extraction (requires --key)
    #[arg(long, requires = "key")]
    pub cipher: bool,

    /// Derives the starting carrier position from the key instead of starting at 0
    /// (requires --key)
    #[arg(long, requires = "key")]
    pub random: bool,

    /// Shared secret used by --cipher and/or --random
    #[arg(long, value_name("KEY"))]
    pub key: Option<String>,
}

#[derive(Args)]
pub struct CompareArgs {
    /// Path to the original MP3
    #[arg(long, value_name("PATH"))]
    pub original: PathBuf,

    /// Path to the modified (stego) MP3
    #[arg(long, value_name("PATH"))]
    pub modified: PathBuf,
}
