//! Recovers a hidden file from a stego MP3 (C7).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use byteorder::{ByteOrder, LittleEndian};

use crate::bitio::{bits_to_u64, CarrierBits};
use crate::cipher;
use crate::error::{Error, Result};
use crate::rng::generate_random_position;
use crate::scanner::{self, protected_mask, usable_positions};
use crate::signature;

/// Sanity bound on the decoded payload length field (100 MiB).
const MAX_PAYLOAD_LEN: u32 = 100 * 1024 * 1024;

const DEFAULT_FILENAME: &str = "extracted_file.bin";

/// Tuning knobs for [`extract`], mirroring the options used at embed time.
#[derive(Debug, Clone, Copy)]
pub struct Options<'a> {
    /// Whether the payload was Vigenère-encrypted at embed time.
    pub cipher: bool,
    /// Whether the starting carrier position was key-derived at embed time.
    pub random_position: bool,
    /// The shared secret. Required when `cipher` or `random_position` is set.
    pub key: Option<&'a str>,
}

/// The outcome of a successful extraction.
#[derive(Debug, Clone)]
pub struct Recovered {
    /// Where the recovered file was written.
    pub path: PathBuf,
    /// The filename recorded at embed time (or the fallback name, if it wasn't valid UTF-8).
    pub filename: String,
    /// The LSB width detected from the start signature.
    pub width: u8,
    /// Whether the trailing end signature matched; a mismatch is logged but non-fatal.
    pub end_signature_matched: bool,
}

/// Recovers the file hidden in `stego_path`, writing it under `output_dir`.
///
/// The LSB width is auto-detected by probing each of the four candidate widths against
/// their start signature; no width needs to be supplied by the caller.
pub fn extract(stego_path: impl AsRef<Path>, output_dir: impl AsRef<Path>, options: &Options<'_>) -> Result<Recovered> {
    let stego_path = stego_path.as_ref();
    let output_dir = output_dir.as_ref();

    if (options.cipher || options.random_position) && options.key.is_none() {
        return Err(Error::MissingKey);
    }

    let stego = fs::read(stego_path).map_err(|e| Error::io(stego_path, e))?;
    if !scanner::is_probably_mp3(&stego) {
        return Err(Error::NotAnMp3);
    }

    let mask = protected_mask(&stego);
    let positions = usable_positions(&mask);
    let offset = if options.random_position {
        generate_random_position(options.key.expect("checked above"), positions.len())
    } else {
        0
    };

    let (width, mut reader) = detect_width(&stego, &positions, offset)?;
    debug!(width, "detected LSB width from start signature");

    let payload_len_bytes = reader.read_bytes(4)?;
    let payload_len = LittleEndian::read_u32(&payload_len_bytes);
    if payload_len == 0 || payload_len > MAX_PAYLOAD_LEN {
        return Err(Error::InvalidLength(payload_len));
    }

    let fname_len = reader.read_bytes(1)?[0] as usize;
    let fname_bytes = reader.read_bytes(fname_len)?;
    let filename = String::from_utf8(fname_bytes).unwrap_or_else(|_| {
        warn!("recovered filename is not valid UTF-8, falling back to a default name");
        DEFAULT_FILENAME.to_string()
    });

    let mut payload = reader.read_bytes(payload_len as usize)?;
    if options.cipher {
        payload = cipher::decrypt(&payload, options.key.expect("checked above"));
    }

    let (_, expected_end_sig) = signature::for_width(width).expect("width came from for_width");
    let end_bits = reader.read_bits(signature::SIGNATURE_BITS)?;
    let end_signature_matched = bits_to_u64(&end_bits) as u16 == expected_end_sig;
    if !end_signature_matched {
        warn!("end signature mismatch; recovered payload may be truncated or corrupted");
    }

    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    let destination = unique_destination(output_dir, &filename);
    fs::write(&destination, &payload).map_err(|e| Error::io(&destination, e))?;

    info!(output = %destination.display(), bytes = payload.len(), width, "recovered secret");
    Ok(Recovered { path: destination, filename, width, end_signature_matched })
}

/// Probes each candidate LSB width in order and returns the first whose start signature
/// matches, along with a reader already advanced exactly [`signature::SIGNATURE_BITS`] bits
/// past it.
///
/// The probe reader is returned as-is rather than rebuilt: `CarrierBits` is a continuous bit
/// cursor, so the bits it buffered beyond the 14-bit signature (from the last group it had to
/// read to complete the match) are exactly the start of the length field, and must not be
/// reread or skipped.
fn detect_width<'a>(carrier: &'a [u8], positions: &'a [usize], offset: usize) -> Result<(u8, CarrierBits<'a>)> {
    for width in signature::CANDIDATE_WIDTHS {
        let (expected_start, _) = signature::for_width(width).expect("width from CANDIDATE_WIDTHS is valid");
        let mut probe = CarrierBits::new(carrier, positions, width, offset);
        let Ok(bits) = probe.read_bits(signature::SIGNATURE_BITS) else { continue };
        if bits_to_u64(&bits) as u16 == expected_start {
            return Ok((width, probe));
        }
    }
    Err(Error::SignatureNotFound)
}

fn unique_destination(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }
    let path = Path::new(filename);
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let ext = path.extension().map(|e| e.to_string_lossy().into_owned());
    for n in 1.. {
        let name = match &ext {
            Some(ext) => format!("{stem}_{n}.{ext}"),
            None => format!("{stem}_{n}"),
        };
        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!("directory cannot contain infinitely many colliding names")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::{self, Options as EmbedOptions};
    use crate::test::synthetic_mp3;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(bytes: &[u8]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(bytes).unwrap();
        f
    }

    #[test]
    fn fails_on_non_mp3_input() {
        let stego = write_temp(b"definitely not an mp3");
        let dir = tempfile::tempdir().unwrap();
        let options = Options { cipher: false, random_position: false, key: None };
        let err = extract(stego.path(), dir.path(), &options).unwrap_err();
        assert!(matches!(err, Error::NotAnMp3));
    }

    #[test]
    fn fails_with_no_embedded_signature() {
        let stego = write_temp(&synthetic_mp3(20, 0));
        let dir = tempfile::tempdir().unwrap();
        let options = Options { cipher: false, random_position: false, key: None };
        let err = extract(stego.path(), dir.path(), &options).unwrap_err();
        assert!(matches!(err, Error::SignatureNotFound));
    }

    #[test]
    fn detects_width_and_recovers_payload() {
        let cover_bytes = synthetic_mp3(20, 0);
        let cover = write_temp(&cover_bytes);
        let secret = write_temp(b"hello");
        let out = NamedTempFile::new().unwrap();
        let embed_options =
            EmbedOptions { width: 3, cipher: false, random_position: false, key: None };
        embed::embed(cover.path(), secret.path(), out.path(), &embed_options).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let extract_options = Options { cipher: false, random_position: false, key: None };
        let recovered = extract(out.path(), dir.path(), &extract_options).unwrap();
        assert_eq!(recovered.width, 3);
        assert!(recovered.end_signature_matched);
        assert_eq!(fs::read(&recovered.path).unwrap(), b"hello");
    }

    #[test]
    fn wrong_random_key_fails_to_recover() {
        let cover_bytes = synthetic_mp3(40, 0);
        let cover = write_temp(&cover_bytes);
        let secret = write_temp(b"attack at dawn, fourteen");
        let out = NamedTempFile::new().unwrap();
        let embed_options = EmbedOptions {
            width: 2,
            cipher: false,
            random_position: true,
            key: Some("seed123"),
        };
        embed::embed(cover.path(), secret.path(), out.path(), &embed_options).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let extract_options =
            Options { cipher: false, random_position: true, key: Some("seed124") };
        let result = extract(out.path(), dir.path(), &extract_options);
        match result {
            Err(Error::SignatureNotFound) => {}
            Ok(recovered) => {
                let recovered_bytes = fs::read(&recovered.path).unwrap();
                assert_ne!(recovered_bytes, b"attack at dawn, fourteen");
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn collision_appends_numeric_suffix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello"), b"existing").unwrap();

        let secret_dir = tempfile::tempdir().unwrap();
        let secret_path = secret_dir.path().join("hello");
        fs::write(&secret_path, b"hi").unwrap();

        let cover_bytes = synthetic_mp3(20, 0);
        let cover = write_temp(&cover_bytes);
        let out = NamedTempFile::new().unwrap();
        let embed_options =
            EmbedOptions { width: 1, cipher: false, random_position: false, key: None };
        embed::embed(cover.path(), &secret_path, out.path(), &embed_options).unwrap();

        let extract_options = Options { cipher: false, random_position: false, key: None };
        let recovered = extract(out.path(), dir.path(), &extract_options).unwrap();
        assert_eq!(recovered.path, dir.path().join("hello_1"));
    }
}
