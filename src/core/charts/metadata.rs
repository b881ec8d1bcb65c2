//! Chord chart metadata extraction.
//!
//! Chart files in the worship team's Drive follow a loose
//! `Song_Name-Artist_Name-Key.pdf` convention, but nothing enforces it.
//! These functions never fail: a name that doesn't fit the convention
//! degrades to documented defaults instead of an error.

use regex::Regex;

/// Placeholder artist for names that carry no artist segment.
pub const UNKNOWN_ARTIST: &str = "未知藝人";

/// Key assumed when no key token can be found in the file name.
pub const DEFAULT_KEY: &str = "C";

/// Song metadata derived from a raw file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongMetadata {
    pub song_name: String,
    pub artist: String,
    pub key: String,
}

/// Derives song name, artist and musical key from a file name.
pub fn extract(file_name: &str) -> SongMetadata {
    SongMetadata {
        song_name: extract_song_name(file_name),
        artist: extract_artist(file_name),
        key: extract_key(file_name),
    }
}

/// Strips a trailing `.pdf` (any casing); other extensions stay untouched.
fn strip_pdf_extension(file_name: &str) -> &str {
    let len = file_name.len();
    // char-boundary guard keeps multibyte names (common here) safe to slice
    if len >= 4
        && file_name.is_char_boundary(len - 4)
        && file_name[len - 4..].eq_ignore_ascii_case(".pdf")
    {
        &file_name[..len - 4]
    } else {
        file_name
    }
}

/// First hyphen-separated segment with underscores as spaces. Falls back to
/// the whole extensionless name when that segment is empty.
fn extract_song_name(file_name: &str) -> String {
    let stem = strip_pdf_extension(file_name);
    match stem.split('-').next() {
        Some(first) if !first.is_empty() => first.replace('_', " "),
        _ => stem.to_string(),
    }
}

/// Second hyphen-separated segment with underscores as spaces, or the
/// unknown-artist placeholder.
fn extract_artist(file_name: &str) -> String {
    let stem = strip_pdf_extension(file_name);
    match stem.split('-').nth(1) {
        Some(second) if !second.is_empty() => second.replace('_', " "),
        _ => UNKNOWN_ARTIST.to_string(),
    }
}

/// Looks for a key token like `-C`, `-Dm`, `-F#` in the original file name.
/// The token must be bordered by hyphens or sit right before the extension
/// dot; an embedded token without those borders is not a key.
fn extract_key(file_name: &str) -> String {
    let key_pattern = Regex::new(r"(?i)-([A-G][#b]?m?)[-.]").unwrap();
    key_pattern
        .captures(file_name)
        .map(|captures| captures[1].to_string())
        .unwrap_or_else(|| DEFAULT_KEY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_convention_name() {
        let meta = extract("Amazing_Grace-John_Newton-Gm.pdf");

        assert_eq!(meta.song_name, "Amazing Grace");
        assert_eq!(meta.artist, "John Newton");
        assert_eq!(meta.key, "Gm");
    }

    #[test]
    fn test_name_without_hyphens() {
        let meta = extract("worship_song.pdf");

        assert_eq!(meta.song_name, "worship song");
        assert_eq!(meta.artist, UNKNOWN_ARTIST);
        assert_eq!(meta.key, DEFAULT_KEY);
    }

    #[test]
    fn test_song_and_artist_only() {
        let meta = extract("How_Great-Chris_Tomlin.pdf");

        assert_eq!(meta.song_name, "How Great");
        assert_eq!(meta.artist, "Chris Tomlin");
        // "-Chris..." is not a key token, so the default applies
        assert_eq!(meta.key, DEFAULT_KEY);
    }

    #[test]
    fn test_sharp_and_flat_keys() {
        assert_eq!(extract("song-artist-F#-v2.pdf").key, "F#");
        assert_eq!(extract("song-artist-Bb.pdf").key, "Bb");
        assert_eq!(extract("song-artist-F#m.pdf").key, "F#m");
    }

    #[test]
    fn test_key_casing_is_preserved() {
        assert_eq!(extract("song-artist-gm.pdf").key, "gm");
    }

    #[test]
    fn test_key_must_border_hyphen_or_extension() {
        // "Grace" starts with G but is not bordered as a key token
        assert_eq!(extract("Amazing-Grace_Hymn.pdf").key, DEFAULT_KEY);
        // no trailing boundary at all (no extension, end of string)
        assert_eq!(extract("song-artist-G").key, DEFAULT_KEY);
    }

    #[test]
    fn test_key_is_scanned_over_the_original_name() {
        // The first bordered token wins, even when it is the artist segment
        assert_eq!(extract("song-A-artist.pdf").key, "A");
    }

    #[test]
    fn test_leading_hyphen_falls_back_to_full_stem() {
        let meta = extract("-Lead_Sheet-C.pdf");

        assert_eq!(meta.song_name, "-Lead_Sheet-C");
        assert_eq!(meta.artist, "Lead Sheet");
        assert_eq!(meta.key, "C");
    }

    #[test]
    fn test_extension_stripping_is_case_insensitive() {
        assert_eq!(extract("Hymn.PDF").song_name, "Hymn");
        // non-pdf extensions are kept as part of the name
        assert_eq!(extract("Hymn.txt").song_name, "Hymn.txt");
    }

    #[test]
    fn test_multibyte_names_degrade_to_defaults() {
        let meta = extract("全然向祢.pdf");

        assert_eq!(meta.song_name, "全然向祢");
        assert_eq!(meta.artist, UNKNOWN_ARTIST);
        assert_eq!(meta.key, DEFAULT_KEY);
    }

    #[test]
    fn test_extract_is_deterministic() {
        let name = "Amazing_Grace-John_Newton-Gm.pdf";
        assert_eq!(extract(name), extract(name));
    }
}
