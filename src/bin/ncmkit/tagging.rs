use crate::error::Result;
use id3::frame::{Picture, PictureType};
use id3::{Tag, TagLike, Version};
use ncmkit::Decoded;
use std::borrow::Cow;
use std::io;

/// ID3v2 header: "ID3", version (2), flags (1), syncsafe size (4).
const ID3_HEADER_LEN: usize = 10;
/// Footer-present flag in the header flags byte.
const ID3_FOOTER_FLAG: u8 = 0x10;

/// Write title, artist, album and cover into an ID3v2.4 tag at the front of
/// the recovered stream.
///
/// A well-formed tag already at the start is updated in place of being
/// stacked; the audio frames after it are copied unchanged. Returns the
/// stream as is when there is nothing to write.
pub fn tagged_audio(decoded: &Decoded) -> Result<Cow<'_, [u8]>> {
    let meta = &decoded.metadata;
    let artists = meta.artist_names();
    let audio = decoded.audio.as_slice();
    if meta.music_name.is_empty()
        && artists.is_empty()
        && meta.album.is_empty()
        && decoded.cover.is_none()
    {
        return Ok(Cow::Borrowed(audio));
    }

    let (mut tag, body) = split_existing_tag(audio);
    if !meta.music_name.is_empty() {
        tag.set_title(meta.music_name.as_str());
    }
    if !artists.is_empty() {
        tag.set_artist(artists);
    }
    if !meta.album.is_empty() {
        tag.set_album(meta.album.as_str());
    }
    if let Some(cover) = &decoded.cover {
        tag.remove_picture_by_type(PictureType::CoverFront);
        tag.add_frame(Picture {
            mime_type: cover.mime_type().to_string(),
            picture_type: PictureType::CoverFront,
            description: String::new(),
            data: cover.data.clone(),
        });
    }

    let mut out = Vec::with_capacity(body.len() + 1024);
    tag.write_to(&mut out, Version::Id3v24)?;
    out.extend_from_slice(body);
    Ok(Cow::Owned(out))
}

/// Parse a leading ID3v2 tag, returning it with the bytes that follow.
///
/// A header that does not parse is treated as audio data.
fn split_existing_tag(audio: &[u8]) -> (Tag, &[u8]) {
    let Some(len) = existing_tag_len(audio) else {
        return (Tag::new(), audio);
    };
    match Tag::read_from2(io::Cursor::new(&audio[..len])) {
        Ok(tag) => (tag, &audio[len..]),
        Err(err) => {
            tracing::debug!(%err, "leading id3 tag unreadable, writing a fresh one");
            (Tag::new(), audio)
        }
    }
}

/// Total length of a leading ID3v2 tag (header, body, optional footer).
fn existing_tag_len(audio: &[u8]) -> Option<usize> {
    let header = audio.get(..ID3_HEADER_LEN)?;
    if &header[..3] != b"ID3" || header[6..].iter().any(|b| b & 0x80 != 0) {
        return None;
    }
    let size = header[6..]
        .iter()
        .fold(0usize, |acc, &b| (acc << 7) | usize::from(b));
    let footer = if header[5] & ID3_FOOTER_FLAG == 0 {
        0
    } else {
        ID3_HEADER_LEN
    };
    let len = ID3_HEADER_LEN + size + footer;
    (len <= audio.len()).then_some(len)
}
