#![deny(
    absolute_paths_not_starting_with_crate,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unreachable_patterns,
    unreachable_pub,
    unused_import_braces,
    unused_lifetimes,
    unused_must_use,
    unused_qualifications,
    variant_size_differences
)]

//! A reversible least-significant-bit steganographic codec for MP3 files.
//!
//! The codec never touches MP3 structural bytes (ID3v2 tag, frame headers, and a
//! conservative side-info band): [`scanner`] finds them, [`embed`] and [`extract`]
//! only ever write to or read from what's left over.

pub mod bitio;
pub mod cipher;
pub mod embed;
pub mod error;
pub mod extract;
pub mod frame;
pub mod psnr;
pub mod rng;
pub mod scanner;
pub mod signature;

pub use embed::{embed, Options as EmbedOptions};
pub use error::{Error, Result};
pub use extract::{extract, Options as ExtractOptions, Recovered};
