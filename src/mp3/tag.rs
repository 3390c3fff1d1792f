//! ID3 metadata blocks that share the stream with audio frames
//!
//! ID3v2 sits at the very start of a file:
//! "ID3" (3) + version (2) + flags (1) + synchsafe size (4) = 10 byte header,
//! then `size` bytes of tag body, then an optional 10 byte footer (v2.4 only).
//!
//! ID3v1 is a fixed 128 byte block starting with "TAG". It normally closes a
//! file, but concatenated TTS chunks can carry one between any two frames.

/// ID3v2 header length, also the footer length.
pub const ID3V2_HEADER_LEN: usize = 10;
/// ID3v1 block length.
pub const ID3V1_LEN: usize = 128;

const ID3V2_MAGIC: &[u8; 3] = b"ID3";
const ID3V1_MAGIC: &[u8; 3] = b"TAG";
const ID3V2_FOOTER_FLAG: u8 = 0x10;

/// Decode a 4-byte synchsafe integer. Only the low 7 bits of each byte
/// count; a stray top bit is ignored.
pub fn synchsafe(bytes: [u8; 4]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |acc, &b| (acc << 7) | u32::from(b & 0x7F))
}

/// Total length of an ID3v2 tag at the start of `data`, header and footer
/// included. `None` when the signature or the 10 byte header is missing.
pub fn id3v2_len(data: &[u8]) -> Option<usize> {
    let header = data.get(..ID3V2_HEADER_LEN)?;
    if !header.starts_with(ID3V2_MAGIC) {
        return None;
    }

    let major = header[3];
    let flags = header[5];
    let size = synchsafe([header[6], header[7], header[8], header[9]]) as usize;

    let footer = if major == 4 && flags & ID3V2_FOOTER_FLAG != 0 {
        ID3V2_HEADER_LEN
    } else {
        0
    };

    Some(ID3V2_HEADER_LEN + size + footer)
}

/// True when an ID3v1 block starts at `offset`.
#[inline]
pub fn is_id3v1_at(data: &[u8], offset: usize) -> bool {
    data.get(offset..)
        .is_some_and(|rest| rest.starts_with(ID3V1_MAGIC))
}

/// Offset of the first ID3v1 block starting in `from..end`.
pub fn find_id3v1(data: &[u8], from: usize, end: usize) -> Option<usize> {
    data.get(from..end.min(data.len()))?
        .windows(ID3V1_MAGIC.len())
        .position(|window| window == ID3V1_MAGIC)
        .map(|i| from + i)
}

/// Advance `cursor` past a metadata block starting exactly there.
///
/// ID3v2 only counts at offset 0; ID3v1 counts anywhere. A skip never lands
/// past `data.len()`, and `cursor` comes back unchanged when nothing is there.
pub fn skip_metadata(data: &[u8], cursor: usize) -> usize {
    let skipped = if cursor == 0 {
        id3v2_len(data)
    } else {
        None
    };

    let skipped = skipped.or_else(|| is_id3v1_at(data, cursor).then_some(ID3V1_LEN));

    match skipped {
        Some(len) => cursor.saturating_add(len).min(data.len()),
        None => cursor,
    }
}
