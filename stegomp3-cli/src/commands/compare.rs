use crate::args::CompareArgs;
use anyhow::{Context, Result};
use log::info;
use minimp3::{Decoder, Error as Mp3Error};
use std::fs::File;
use std::path::Path;

/// The `compare` CLI command.
pub fn command(args: CompareArgs) -> Result<()> {
    let (original, original_rate) =
        decode_mono(&args.original).with_context(|| format!("decoding {}", args.original.display()))?;
    let (modified, modified_rate) =
        decode_mono(&args.modified).with_context(|| format!("decoding {}", args.modified.display()))?;

    let psnr = stegomp3::psnr::compare(&original, &modified, original_rate, modified_rate)?;
    info!("PSNR({}, {}) = {} dB", args.original.display(), args.modified.display(), psnr);
    println!("{psnr:.4} dB");
    Ok(())
}

/// Decodes an MP3 to a mono, `[-1.0, 1.0]`-normalized float PCM signal, returning it along
/// with the stream's sample rate.
fn decode_mono(path: &Path) -> Result<(Vec<f32>, u32)> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(file);
    let mut samples = Vec::new();
    let mut sample_rate = 0u32;

    loop {
        match decoder.next_frame() {
            Ok(frame) => {
                sample_rate = frame.sample_rate as u32;
                let channels = frame.channels.max(1);
                for chunk in frame.data.chunks_exact(channels) {
                    let sum: i32 = chunk.iter().map(|&s| i32::from(s)).sum();
                    let mono = sum as f32 / channels as f32;
                    samples.push(mono / f32::from(i16::MAX));
                }
            }
            Err(Mp3Error::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok((samples, sample_rate))
}
