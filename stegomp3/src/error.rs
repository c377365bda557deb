//! The error taxonomy shared by every component of the codec.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A failure from embedding, extracting, or comparing MP3 files.
///
/// Everything here is a hard failure: warnings such as an end-signature mismatch or a
/// non-UTF-8 recovered filename are logged through the `log`/`tracing` facade instead, per
/// the propagation policy in the specification.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The input's leading bytes are neither an ID3v2 tag nor an MPEG frame sync.
    #[error("input does not look like an MP3 file")]
    NotAnMp3,

    /// The requested LSB width was outside `1..=4`.
    #[error("invalid LSB width {0}, must be between 1 and 4")]
    InvalidParameter(u8),

    /// `--cipher` or `--random` was requested without a key.
    #[error("a key is required when cipher or random-position mode is enabled")]
    MissingKey,

    /// The secret's filename, as UTF-8, is longer than 255 bytes.
    #[error("filename is {0} bytes long, must be at most 255")]
    FilenameTooLong(usize),

    /// The framed message doesn't fit in the cover's usable capacity.
    #[error("message needs {need} bits but only {have} bits of carrier capacity are available")]
    InsufficientCapacity {
        /// Bits required to carry the framed message at the requested width.
        need: u64,
        /// Bits actually available (`width * usable_positions`).
        have: u64,
    },

    /// None of the four candidate LSB widths matched their start signature.
    #[error("no embedded signature was found in the stego file")]
    SignatureNotFound,

    /// The decoded payload length field was zero or exceeded the sanity bound.
    #[error("decoded payload length {0} is invalid")]
    InvalidLength(u32),

    /// The carrier ran out of usable positions before the framed message was fully read.
    #[error("stego stream ended before the embedded message did")]
    TruncatedStream,

    /// PSNR inputs were decoded at different sample rates.
    #[error("PSNR inputs have different sample rates: {0} Hz vs {1} Hz")]
    PsnrSampleRateMismatch(u32, u32),

    /// PSNR inputs contained no samples.
    #[error("PSNR inputs contain no samples")]
    PsnrEmpty,

    /// A file-system operation failed at the cover/secret/output boundary.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path the operation was attempted on.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: Box<io::Error>,
    },
}

impl Error {
    /// Wraps an [`io::Error`] with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source: Box::new(source) }
    }
}
