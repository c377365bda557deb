//! Hides a secret file inside an MP3 cover (C6).

use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::bitio::group_bits;
use crate::cipher;
use crate::error::{Error, Result};
use crate::frame::{message_bits, total_bits_needed};
use crate::rng::generate_random_position;
use crate::scanner::{self, protected_mask, usable_positions};
use crate::signature;

/// Tuning knobs for [`embed`].
#[derive(Debug, Clone, Copy)]
pub struct Options<'a> {
    /// Number of low-order bits of each usable carrier byte to use, 1..=4.
    pub width: u8,
    /// Whether to Vigenère-encrypt the payload before framing.
    pub cipher: bool,
    /// Whether to derive the starting carrier position from `key` instead of starting at 0.
    pub random_position: bool,
    /// The shared secret. Required when `cipher` or `random_position` is set.
    pub key: Option<&'a str>,
}

/// Hides the file at `secret_path` inside the MP3 at `cover_path`, writing the mutated
/// bytes to `output_path`.
///
/// The cover's length never changes; only the low `options.width` bits of non-structural
/// bytes are rewritten. See the module-level documentation of [`crate::scanner`] for what
/// counts as structural.
pub fn embed(
    cover_path: impl AsRef<Path>,
    secret_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    options: &Options<'_>,
) -> Result<()> {
    let cover_path = cover_path.as_ref();
    let secret_path = secret_path.as_ref();
    let output_path = output_path.as_ref();

    let (start_sig, end_sig) =
        signature::for_width(options.width).ok_or(Error::InvalidParameter(options.width))?;
    if (options.cipher || options.random_position) && options.key.is_none() {
        return Err(Error::MissingKey);
    }

    let mut cover = fs::read(cover_path).map_err(|e| Error::io(cover_path, e))?;
    if !scanner::is_probably_mp3(&cover) {
        return Err(Error::NotAnMp3);
    }
    let secret = fs::read(secret_path).map_err(|e| Error::io(secret_path, e))?;

    let filename = secret_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "secret".to_string());
    if filename.len() > 255 {
        return Err(Error::FilenameTooLong(filename.len()));
    }

    let payload = if options.cipher {
        cipher::encrypt(&secret, options.key.expect("checked above"))
    } else {
        secret
    };

    let mask = protected_mask(&cover);
    let positions = usable_positions(&mask);

    let need = total_bits_needed(filename.len(), payload.len());
    let have = u64::from(options.width) * positions.len() as u64;
    if need > have {
        return Err(Error::InsufficientCapacity { need, have });
    }

    let offset = if options.random_position {
        generate_random_position(options.key.expect("checked above"), positions.len())
    } else {
        0
    };

    // Pad out to a whole number of `width`-bit groups with trailing zero bits before
    // grouping, so every group is fully real. A short final group would otherwise pack its
    // few real bits behind implicit high-order zero padding (see `BitGrouper`), and the
    // extractor's continuous bit cursor has no way to tell that padding apart from the real
    // bits that precede it in the same group.
    let padded_len = need.div_ceil(u64::from(options.width)) * u64::from(options.width);
    let bits = message_bits(start_sig, filename.as_bytes(), &payload, end_sig)
        .chain(std::iter::repeat(false))
        .take(padded_len as usize);
    let mask_bits = crate::bitio::low_bits_mask(options.width);
    let mut written = 0usize;
    for (group, &pos) in group_bits(bits, options.width).zip(positions.iter().cycle().skip(offset)) {
        cover[pos] = (cover[pos] & !mask_bits) | group;
        written += 1;
    }

    debug!(positions_used = written, capacity = positions.len(), "embedded framed message");

    let out_dir = output_path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let mut temp = NamedTempFile::new_in(out_dir).map_err(|e| Error::io(out_dir, e))?;
    std::io::Write::write_all(&mut temp, &cover).map_err(|e| Error::io(output_path, e))?;
    temp.persist(output_path).map_err(|e| Error::io(output_path, e.error))?;

    info!(output = %output_path.display(), bytes = payload.len(), "embedded secret");
    Ok(())
}
