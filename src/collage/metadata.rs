/// Best-effort capture-time extraction
///
/// Chronological ordering wants the moment a photo was taken, not the moment
/// its file was last touched. This module digs the capture timestamp out of
/// embedded EXIF metadata; every failure path returns `None` so callers can
/// silently fall back to the file's modified time.

use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use std::io::Cursor;

/// EXIF timestamps are formatted as `YYYY:MM:DD HH:MM:SS`
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// JPEG Start Of Image marker
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// Extract the capture time from image bytes, in milliseconds since the
/// Unix epoch. Only JPEG containers are attempted; `DateTimeOriginal` wins
/// over `DateTimeDigitized`, with plain `DateTime` as the last resort.
///
/// This is a pure function: no side effects, and no failure ever escapes as
/// an error.
pub fn shot_time_from_bytes(bytes: &[u8]) -> Option<i64> {
    if !bytes.starts_with(&JPEG_SOI) {
        return None;
    }

    let exif = Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;

    [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime]
        .into_iter()
        .find_map(|tag| datetime_field(&exif, tag))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Read one ASCII datetime field and parse it
fn datetime_field(exif: &exif::Exif, tag: Tag) -> Option<NaiveDateTime> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let raw = match &field.value {
        Value::Ascii(values) => values.first()?,
        _ => return None,
    };
    let text = std::str::from_utf8(raw).ok()?;
    parse_exif_datetime(text)
}

/// Parse `YYYY:MM:DD HH:MM:SS`, tolerating trailing NULs and whitespace
pub fn parse_exif_datetime(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim_end_matches('\0').trim(), EXIF_DATETIME_FORMAT).ok()
}
