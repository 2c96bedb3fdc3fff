//! Extra-field scanning: the ZIP64 extended-information field (for sizes
//! beyond 4 GiB) and, optionally, the InfoZIP Unicode Path field.
//!
//! The extra field is not modeled as an inheritance hierarchy — just a
//! sequence of `(header id, data)` tagged records, per APPNOTE 4.5.1. We
//! only care about two of the many ids that can appear there.

use crate::le::{u16_le, u32_le, u64_le, UNICODE_PATH_EXTRA_ID, ZIP64_EXTRA_ID};

/// Walk an extra field's tagged records, yielding `(header_id, data_slice)`.
/// Stops at the first malformed (truncated) record rather than erroring —
/// extra fields are exactly the kind of thing unrelated writers tack on, and
/// a truncated trailing record from some other tool should not block ours.
fn iter_extra_records(extra: &[u8]) -> impl Iterator<Item = (u16, &[u8])> {
    let mut pos = 0usize;
    std::iter::from_fn(move || {
        if pos + 4 > extra.len() {
            return None;
        }
        let id = u16_le(extra, pos);
        let len = u16_le(extra, pos + 2) as usize;
        let data_start = pos + 4;
        if data_start + len > extra.len() {
            return None;
        }
        let data = &extra[data_start..data_start + len];
        pos = data_start + len;
        Some((id, data))
    })
}

/// The ZIP64 extended-information extra field's size fields, in the order
/// APPNOTE defines: uncompressed size first, then compressed size. Either
/// may be absent: the field only carries the sizes whose LFH slot held the
/// `0xFFFFFFFF` sentinel.
pub struct Zip64Extra {
    pub uncompressed_size: Option<u64>,
    pub compressed_size: Option<u64>,
}

/// Locate header id `0x0001` in `extra` and read whichever of the two size
/// fields the sentinel values in the header indicate are present.
///
/// `uncompressed_is_sentinel`/`compressed_is_sentinel` tell us how many
/// 8-byte fields to expect, in order, since the ZIP64 extra field carries no
/// per-field tag of its own — only a flat sequence of values whose presence
/// is implied by which header fields were `0xFFFFFFFF`.
pub fn find_zip64_sizes(
    extra: &[u8],
    uncompressed_is_sentinel: bool,
    compressed_is_sentinel: bool,
) -> Option<Zip64Extra> {
    for (id, data) in iter_extra_records(extra) {
        if id != ZIP64_EXTRA_ID {
            continue;
        }
        let mut cursor = 0usize;
        let mut uncompressed_size = None;
        let mut compressed_size = None;
        if uncompressed_is_sentinel && cursor + 8 <= data.len() {
            uncompressed_size = Some(u64_le(data, cursor));
            cursor += 8;
        }
        if compressed_is_sentinel && cursor + 8 <= data.len() {
            compressed_size = Some(u64_le(data, cursor));
            cursor += 8;
        }
        return Some(Zip64Extra {
            uncompressed_size,
            compressed_size,
        });
    }
    None
}

/// True if `extra` carries a ZIP64 extended-information record at all,
/// regardless of whether either sentinel was actually set. Entries can
/// legitimately carry the extra field without using it for any field
/// (some writers always attach it), so this is independent of
/// [`find_zip64_sizes`].
pub fn has_zip64_extra(extra: &[u8]) -> bool {
    iter_extra_records(extra).any(|(id, _)| id == ZIP64_EXTRA_ID)
}

/// Look up the InfoZIP Unicode Path extra field (`0x7075`) and return the
/// decoded name if its CRC-32 matches `name_bytes` — guarding against a
/// Unicode name left stale after some other tool rewrote the header's raw
/// name without updating the extra field alongside it.
pub fn find_unicode_name(extra: &[u8], name_bytes: &[u8]) -> Option<String> {
    for (id, data) in iter_extra_records(extra) {
        if id != UNICODE_PATH_EXTRA_ID || data.len() < 5 {
            continue;
        }
        let declared_crc = u32_le(data, 1);
        if declared_crc != crc32fast::hash(name_bytes) {
            continue;
        }
        if let Ok(name) = std::str::from_utf8(&data[5..]) {
            return Some(name.to_string());
        }
    }
    None
}
