use ncmkit::{decode, is_ncm, Decoder, Error, MusicFormat, Stage};

const FLAC_NCM: &[u8] = include_bytes!("fixtures/flac_with_cover.ncm");
const FLAC_AUDIO: &[u8] = include_bytes!("fixtures/flac_with_cover.audio");
const FLAC_COVER: &[u8] = include_bytes!("fixtures/flac_with_cover.cover");
const MP3_NCM: &[u8] = include_bytes!("fixtures/mp3_no_format.ncm");
const MP3_AUDIO: &[u8] = include_bytes!("fixtures/mp3_no_format.audio");

/// 音频负载在 flac 样本中的起始偏移
const FLAC_AUDIO_OFFSET: usize = 757;

#[test]
fn flac_fixture_decodes_to_golden_output() {
    assert!(is_ncm(FLAC_NCM));
    let decoded = decode(FLAC_NCM).unwrap();

    assert_eq!(decoded.format, MusicFormat::Flac);
    assert_eq!(decoded.format_flag(), 1);
    assert!(decoded.audio.starts_with(b"fLaC"));
    assert_eq!(decoded.audio, FLAC_AUDIO);

    let cover = decoded.cover.as_ref().unwrap();
    assert_eq!(cover.data, FLAC_COVER);
    assert_eq!(cover.mime_type(), "image/png");

    assert!(decoded.has_metadata);
    let meta = &decoded.metadata;
    assert_eq!(meta.music_name, "晴天");
    assert_eq!(meta.album, "叶惠美");
    assert_eq!(meta.music_id, "1357924680");
    assert_eq!(meta.album_id, "18905");
    assert_eq!(meta.bitrate, 999_000);
    assert_eq!(meta.duration, 269_000);
    assert_eq!(meta.artists.len(), 1);
    assert_eq!(meta.artists[0].name, "周杰伦");
    assert_eq!(meta.artists[0].id, "6452");
}

#[test]
fn mp3_fixture_without_format_defaults_to_mp3() {
    let decoded = decode(MP3_NCM).unwrap();

    assert_eq!(decoded.format, MusicFormat::Mp3);
    assert_eq!(decoded.format_flag(), 0);
    assert_eq!(decoded.audio, MP3_AUDIO);
    assert!(decoded.cover.is_none());

    let meta = &decoded.metadata;
    assert_eq!(meta.music_name, "Untitled");
    assert_eq!(meta.music_id, "24680");
    assert_eq!(meta.album, "Demo");
    assert_eq!(meta.artist_names(), "A, B");
    assert_eq!(meta.artists[1].id, "2");
}

#[test]
fn decoding_is_deterministic() {
    let first = decode(FLAC_NCM).unwrap();
    let second = decode(FLAC_NCM).unwrap();
    assert_eq!(first, second);
}

#[test]
fn concurrent_decodes_agree() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                if i % 2 == 0 {
                    decode(FLAC_NCM).unwrap().audio
                } else {
                    decode(MP3_NCM).unwrap().audio
                }
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let audio = handle.join().unwrap();
        let expected = if i % 2 == 0 { FLAC_AUDIO } else { MP3_AUDIO };
        assert_eq!(audio, expected);
    }
}

#[test]
fn wrong_signature_is_bad_magic() {
    let mut data = FLAC_NCM.to_vec();
    data[..8].copy_from_slice(b"CTENFDAX");
    assert!(!is_ncm(&data));
    assert_eq!(decode(&data), Err(Error::BadMagic));
}

#[test]
fn truncation_before_audio_is_unexpected_eof() {
    for len in [0, 5, 9, 12, 100, 142, 145, 600, 747, 755, FLAC_AUDIO_OFFSET - 1] {
        assert_eq!(
            decode(&FLAC_NCM[..len]),
            Err(Error::UnexpectedEof),
            "truncated to {len} bytes"
        );
    }
}

#[test]
fn truncation_at_audio_start_yields_empty_audio() {
    let decoded = decode(&FLAC_NCM[..FLAC_AUDIO_OFFSET]).unwrap();
    assert!(decoded.audio.is_empty());
    assert_eq!(decoded.format, MusicFormat::Flac);
    assert!(decoded.cover.is_some());
}

#[test]
fn truncated_audio_is_a_prefix_of_full_audio() {
    let cut = FLAC_AUDIO_OFFSET + 300;
    let decoded = decode(&FLAC_NCM[..cut]).unwrap();
    assert_eq!(decoded.audio, &FLAC_AUDIO[..300]);
}

#[test]
fn corrupted_key_box_is_bad_aes() {
    let mut data = FLAC_NCM.to_vec();
    data[14] ^= 0x01;
    assert_eq!(decode(&data), Err(Error::BadAes));
}

#[test]
fn corrupted_key_box_length_is_bad_length() {
    let mut data = FLAC_NCM.to_vec();
    // L1 = 127，不是 16 的倍数
    data[10] = 127;
    assert_eq!(decode(&data), Err(Error::BadLength));
}

#[test]
fn corrupted_metadata_is_rejected() {
    let mut data = FLAC_NCM.to_vec();
    // 元数据块中段
    data[146 + 200] ^= 0x20;
    let err = decode(&data).unwrap_err();
    assert!(
        matches!(err, Error::BadAes | Error::BadBase64 | Error::BadMetadata),
        "unexpected {err:?}"
    );
}

#[test]
fn corrupted_audio_only_changes_that_byte() {
    let mut data = FLAC_NCM.to_vec();
    data[FLAC_AUDIO_OFFSET + 10] ^= 0xff;
    let decoded = decode(&data).unwrap();
    for (p, (&got, &want)) in decoded.audio.iter().zip(FLAC_AUDIO).enumerate() {
        if p == 10 {
            assert_eq!(got, want ^ 0xff);
        } else {
            assert_eq!(got, want);
        }
    }
}

#[test]
fn staged_decoder_reports_progress() {
    let mut decoder = Decoder::new(MP3_NCM);
    assert_eq!(decoder.step().unwrap(), Stage::MagicChecked);
    assert_eq!(decoder.step().unwrap(), Stage::KeyRecovered);
    assert_eq!(decoder.stage(), Stage::KeyRecovered);
    let decoded = decoder.finish().unwrap();
    assert_eq!(decoded.audio, MP3_AUDIO);
}

#[test]
fn staged_decoder_cannot_skip_metadata() {
    // 停在任意阶段后 finish，结果都与完整解码一致
    for steps in 0..=6 {
        let mut decoder = Decoder::new(MP3_NCM);
        for _ in 0..steps {
            decoder.step().unwrap();
        }
        let decoded = decoder.finish().unwrap();
        assert_eq!(decoded.audio, MP3_AUDIO, "after {steps} steps");
        assert!(decoded.has_metadata);
        assert_eq!(decoded.metadata.music_name, "Untitled");
    }
}
