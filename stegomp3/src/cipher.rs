//! Byte-wise Vigenère encryption, keyed by a UTF-8 string.

/// Encrypts `data` with `key`: `out[i] = (data[i] + key[i % key.len()]) mod 256`.
///
/// `key` is taken as raw UTF-8 bytes, not Unicode code points. Empty input returns empty
/// output; an empty key is rejected one layer up, by the embedder and extractor.
#[must_use]
pub fn encrypt(data: &[u8], key: &str) -> Vec<u8> {
    transform(data, key, u8::wrapping_add)
}

/// Inverts [`encrypt`]: `out[i] = (data[i] - key[i % key.len()]) mod 256`.
#[must_use]
pub fn decrypt(data: &[u8], key: &str) -> Vec<u8> {
    transform(data, key, u8::wrapping_sub)
}

fn transform(data: &[u8], key: &str, op: fn(u8, u8) -> u8) -> Vec<u8> {
    let key = key.as_bytes();
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter().enumerate().map(|(i, &b)| op(b, key[i % key.len()])).collect()
}
