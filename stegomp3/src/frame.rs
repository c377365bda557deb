//! Assembles and parses the framed message: `start_sig · length · fname_len · fname ·
//! payload · end_sig`.

use byteorder::{ByteOrder, LittleEndian};

use crate::bitio::bytes_bits;
use crate::signature;

/// Total bits needed to carry a framed message with the given field sizes.
#[must_use]
pub fn total_bits_needed(filename_len: usize, payload_len: usize) -> u64 {
    let fields = 4 + 1 + filename_len + payload_len;
    (signature::SIGNATURE_BITS as u64) * 2 + 8 * fields as u64
}

/// Builds the ordered bit stream for a framed message, borrowing `filename` and `payload`.
///
/// `start_sig` and `end_sig` are the width-specific markers chosen by the caller (see
/// [`signature`]).
pub fn message_bits<'a>(
    start_sig: u16,
    filename: &'a [u8],
    payload: &'a [u8],
    end_sig: u16,
) -> impl Iterator<Item = bool> + 'a {
    let mut len_bytes = [0u8; 4];
    LittleEndian::write_u32(&mut len_bytes, payload.len() as u32);
    let fname_len_byte = [filename.len() as u8];

    signature::bits(start_sig)
        .chain(bytes_bits_owned(len_bytes))
        .chain(bytes_bits_owned(fname_len_byte))
        .chain(bytes_bits(filename))
        .chain(bytes_bits(payload))
        .chain(signature::bits(end_sig))
}

fn bytes_bits_owned<const N: usize>(bytes: [u8; N]) -> impl Iterator<Item = bool> {
    (0..N).flat_map(move |i| (0..8).rev().map(move |b| (bytes[i] >> b) & 1 != 0))
}
