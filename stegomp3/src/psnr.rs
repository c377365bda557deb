//! Peak Signal-to-Noise Ratio between two decoded PCM sample arrays (C8).

use crate::error::{Error, Result};

/// Computes the PSNR, in dB, between two mono PCM signals sampled at the same rate.
///
/// Samples are compared pairwise up to `min(a.len(), b.len())`; `MAX` is taken as `1.0`,
/// matching samples normalized to `[-1, 1]`. Identical signals report `+inf`.
pub fn compare(a: &[f32], b: &[f32], sample_rate_a: u32, sample_rate_b: u32) -> Result<f64> {
    if sample_rate_a != sample_rate_b {
        return Err(Error::PsnrSampleRateMismatch(sample_rate_a, sample_rate_b));
    }
    let len = a.len().min(b.len());
    if len == 0 {
        return Err(Error::PsnrEmpty);
    }

    let mse: f64 = a[..len]
        .iter()
        .zip(&b[..len])
        .map(|(&x, &y)| {
            let diff = f64::from(x) - f64::from(y);
            diff * diff
        })
        .sum::<f64>()
        / len as f64;

    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * (1.0f64 / mse).log10())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_signals_are_infinite() {
        let signal = [0.1, -0.2, 0.3, 0.0];
        let psnr = compare(&signal, &signal, 44100, 44100).unwrap();
        assert!(psnr.is_infinite());
    }

    #[test]
    fn is_symmetric() {
        let a = [0.1, -0.2, 0.3, 0.4];
        let b = [0.1, -0.25, 0.3, 0.35];
        let ab = compare(&a, &b, 44100, 44100).unwrap();
        let ba = compare(&b, &a, 44100, 44100).unwrap();
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn rejects_mismatched_sample_rates() {
        let err = compare(&[0.0], &[0.0], 44100, 48000).unwrap_err();
        assert!(matches!(err, Error::PsnrSampleRateMismatch(44100, 48000)));
    }

    #[test]
    fn rejects_empty_input() {
        let err = compare(&[], &[], 44100, 44100).unwrap_err();
        assert!(matches!(err, Error::PsnrEmpty));
    }

    #[test]
    fn aligns_to_the_shorter_signal() {
        let a = [0.0, 0.0, 0.0, 0.5];
        let b = [0.0, 0.0];
        // only the first two samples (which match) are compared
        let psnr = compare(&a, &b, 44100, 44100).unwrap();
        assert!(psnr.is_infinite());
    }
}
