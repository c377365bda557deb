use std::fs;

use stegomp3_cli::args::{EmbedArgs, ExtractArgs};
use stegomp3_cli::commands::{embed, extract};

const HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];
const FRAME_LEN: usize = 144_000 * 128 / 44100;

fn synthetic_mp3(frame_count: usize) -> Vec<u8> {
    let mut data = Vec::new();
    for frame in 0..frame_count {
        data.extend_from_slice(&HEADER);
        let fill = (frame as u8).wrapping_mul(7).wrapping_add(1);
        data.extend(std::iter::repeat(fill).take(FRAME_LEN - HEADER.len()));
    }
    data
}

#[test]
fn embed_then_extract_recovers_the_secret() {
    let dir = tempfile::tempdir().unwrap();
    let cover_path = dir.path().join("cover.mp3");
    let secret_path = dir.path().join("secret.txt");
    let stego_path = dir.path().join("stego.mp3");
    let out_dir = dir.path().join("out");

    fs::write(&cover_path, synthetic_mp3(30)).unwrap();
    fs::write(&secret_path, b"a CLI-driven secret").unwrap();

    embed::command(EmbedArgs {
        cover: cover_path,
        secret: secret_path,
        output: stego_path.clone(),
        width: 2,
        cipher: false,
        random: false,
        key: None,
    })
    .unwrap();

    extract::command(ExtractArgs {
        input: stego_path,
        output: out_dir.clone(),
        cipher: false,
        random: false,
        key: None,
    })
    .unwrap();

    let recovered = fs::read(out_dir.join("secret.txt")).unwrap();
    assert_eq!(recovered, b"a CLI-driven secret");
}

#[test]
fn embed_rejects_cover_that_is_not_an_mp3() {
    let dir = tempfile::tempdir().unwrap();
    let cover_path = dir.path().join("cover.bin");
    let secret_path = dir.path().join("secret.txt");
    let stego_path = dir.path().join("stego.mp3");

    fs::write(&cover_path, b"not an mp3").unwrap();
    fs::write(&secret_path, b"secret").unwrap();

    let err = embed::command(EmbedArgs {
        cover: cover_path,
        secret: secret_path,
        output: stego_path,
        width: 1,
        cipher: false,
        random: false,
        key: None,
    })
    .unwrap_err();

    assert!(err.downcast_ref::<stegomp3::Error>().is_some());
}
