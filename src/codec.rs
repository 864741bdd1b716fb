//! Filename codec
//!
//! Playback position and ordering index live in the leading tokens of a
//! video's filename:
//!
//! ```text
//! [<index> ][<MM>:<SS> ]<clean name>.<ext>
//! ```
//!
//! Decoding never fails. A name whose tokens do not match simply decodes
//! without metadata.

use regex::Regex;
use std::sync::LazyLock;

/// Leading ordering index: `12 rest`
static INDEX_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([0-9]+)\s+(.+)$").expect("Invalid index token regex"));

/// Leading playback time: `MM:SS rest`, minutes may grow past two digits
static TIME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([0-9]{2,}):([0-9]{2})\s+(.+)$").expect("Invalid time token regex")
});

/// Metadata decoded from an extension-less filename
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedName {
    /// Clean name with all codec prefixes stripped
    pub name: String,
    /// Ordering index, always >= 1 when present
    pub index: Option<u32>,
    /// Playback position in whole seconds
    pub position: Option<u64>,
}

/// Format whole seconds as `MM:SS`; minutes are not capped
pub fn encode_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Decode only the time token of `stem`
pub fn decode_time(stem: &str) -> DecodedName {
    match split_time(stem) {
        Some((position, rest)) => DecodedName {
            name: rest.to_string(),
            index: None,
            position: Some(position),
        },
        None => DecodedName {
            name: stem.to_string(),
            ..Default::default()
        },
    }
}

/// Decode the index token, then the time token of what remains
pub fn decode_index_and_time(stem: &str) -> DecodedName {
    let (index, rest) = match split_index(stem) {
        Some((_, index, rest)) => (Some(index), rest),
        None => (None, stem),
    };
    DecodedName {
        index,
        ..decode_time(rest)
    }
}

/// Identity key used for reconciliation
pub fn clean_name(stem: &str) -> String {
    decode_index_and_time(stem).name
}

/// Split `file_name` into stem and extension (extension keeps its dot).
///
/// A leading dot starts the stem, so `.mp4` has no extension.
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < file_name.len() => file_name.split_at(dot),
        _ => (file_name, ""),
    }
}

/// Rebuild `file_name` so it carries `seconds` as its time token.
///
/// An existing index token is kept verbatim; an existing time token is replaced.
pub fn with_position(file_name: &str, seconds: u64) -> String {
    let (stem, ext) = split_extension(file_name);
    let (index_token, rest) = match split_index(stem) {
        Some((raw, _, rest)) => (Some(raw), rest),
        None => (None, stem),
    };
    let clean = split_time(rest).map(|(_, name)| name).unwrap_or(rest);
    let time = encode_time(seconds);

    match index_token {
        Some(raw) => format!("{raw} {time} {clean}{ext}"),
        None => format!("{time} {clean}{ext}"),
    }
}

/// Rebuild `file_name` with `index` as its index token.
///
/// Any time token is preserved. `index` must be at least 1, a zero index
/// would not decode back.
pub fn with_index(file_name: &str, index: u32) -> String {
    let (stem, ext) = split_extension(file_name);
    let rest = split_index(stem).map(|(_, _, rest)| rest).unwrap_or(stem);
    format!("{index} {rest}{ext}")
}

/// Returns the raw index token, its value and the remainder
fn split_index(stem: &str) -> Option<(&str, u32, &str)> {
    let caps = INDEX_TOKEN.captures(stem)?;
    let raw = caps.get(1)?.as_str();
    let rest = caps.get(2)?.as_str();
    match raw.parse::<u32>() {
        Ok(index) if index > 0 => Some((raw, index, rest)),
        _ => None,
    }
}

fn split_time(stem: &str) -> Option<(u64, &str)> {
    let caps = TIME_TOKEN.captures(stem)?;
    let minutes: u64 = caps.get(1)?.as_str().parse().ok()?;
    let seconds: u64 = caps.get(2)?.as_str().parse().ok()?;
    let position = minutes.checked_mul(60)?.checked_add(seconds)?;
    Some((position, caps.get(3)?.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_time() {
        assert_eq!(encode_time(90), "01:30");
        assert_eq!(encode_time(345), "05:45");
        assert_eq!(encode_time(3661), "61:01");
        assert_eq!(encode_time(0), "00:00");
        assert_eq!(encode_time(6000), "100:00");
    }

    #[test]
    fn test_decode_time() {
        let decoded = decode_time("01:30 video2");
        assert_eq!(decoded.name, "video2");
        assert_eq!(decoded.position, Some(90));

        let decoded = decode_time("05:45 video3");
        assert_eq!(decoded.name, "video3");
        assert_eq!(decoded.position, Some(345));

        let decoded = decode_time("video1");
        assert_eq!(decoded.name, "video1");
        assert_eq!(decoded.position, None);
    }

    #[test]
    fn test_decode_index_and_time() {
        let decoded = decode_index_and_time("3 01:30 clip");
        assert_eq!(
            decoded,
            DecodedName {
                name: "clip".to_string(),
                index: Some(3),
                position: Some(90),
            }
        );

        let decoded = decode_index_and_time("7 clip");
        assert_eq!(decoded.index, Some(7));
        assert_eq!(decoded.position, None);
        assert_eq!(decoded.name, "clip");

        // A time token is not mistaken for an index
        let decoded = decode_index_and_time("01:30 clip");
        assert_eq!(decoded.index, None);
        assert_eq!(decoded.position, Some(90));
    }

    #[test]
    fn test_malformed_tokens_fall_through() {
        assert_eq!(decode_index_and_time("1:30 clip").name, "1:30 clip");
        assert_eq!(decode_index_and_time("01:30").name, "01:30");
        assert_eq!(decode_index_and_time("01:30clip").position, None);
        assert_eq!(decode_index_and_time("42").index, None);

        // Zero and overflowing indices are not indices
        let decoded = decode_index_and_time("0 clip");
        assert_eq!(decoded.index, None);
        assert_eq!(decoded.name, "0 clip");
        let decoded = decode_index_and_time("99999999999 clip");
        assert_eq!(decoded.index, None);
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("01:30 a.b.mp4"), ("01:30 a.b", ".mp4"));
        assert_eq!(split_extension("noext"), ("noext", ""));
        assert_eq!(split_extension("trailing."), ("trailing.", ""));
        assert_eq!(split_extension(".mp4"), (".mp4", ""));
        assert_eq!(split_extension(".hidden.mp4"), (".hidden", ".mp4"));
    }

    #[test]
    fn test_with_position() {
        assert_eq!(with_position("test.mp4", 120), "02:00 test.mp4");
        assert_eq!(
            with_position("01:30 positioned_video.mp4", 240),
            "04:00 positioned_video.mp4"
        );
        assert_eq!(with_position("03 01:30 clip.mp4", 61), "03 01:01 clip.mp4");
        assert_eq!(with_position("3 clip.mp4", 0), "3 00:00 clip.mp4");
    }

    #[test]
    fn test_with_index() {
        assert_eq!(with_index("clip.mp4", 2), "2 clip.mp4");
        assert_eq!(with_index("5 clip.mp4", 1), "1 clip.mp4");
        assert_eq!(with_index("01:30 clip.mp4", 4), "4 01:30 clip.mp4");
        assert_eq!(with_index("9 01:30 clip.mp4", 10), "10 01:30 clip.mp4");
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("2 10:00 Lecture 1"), "Lecture 1");
        assert_eq!(clean_name("Lecture 1"), "Lecture 1");
    }

    proptest! {
        #[test]
        fn prop_time_round_trip(seconds in 0u64..100_000_000) {
            let decoded = decode_time(&format!("{} clip", encode_time(seconds)));
            prop_assert_eq!(decoded.position, Some(seconds));
            prop_assert_eq!(decoded.name, "clip");
        }

        #[test]
        fn prop_prefixes_survive_rewrites(
            seconds in 0u64..1_000_000,
            index in 1u32..10_000,
            name in "[a-z][a-z _]{0,12}",
        ) {
            let file_name = with_position(&with_index(&format!("{name}.mp4"), index), seconds);
            let (stem, ext) = split_extension(&file_name);
            let decoded = decode_index_and_time(stem);
            prop_assert_eq!(ext, ".mp4");
            prop_assert_eq!(decoded.index, Some(index));
            prop_assert_eq!(decoded.position, Some(seconds));
            prop_assert_eq!(decoded.name, name);
        }
    }
}
