//! Verse pagination over lyric text.
//!
//! Lyrics are stored as one block of text. A verse is a run of text
//! delimited by a blank line, so splitting is purely textual and nothing
//! derived is ever stored; verses are recomputed for every request.

/// Separator between verses: a blank line.
pub const VERSE_SEPARATOR: &str = "\n\n";

/// Split lyrics into verses.
///
/// Splitting the empty string yields a single empty verse, not zero verses.
pub fn split_verses(text: &str) -> Vec<&str> {
    text.split(VERSE_SEPARATOR).collect()
}

/// Number of verses in the lyrics.
pub fn verse_count(text: &str) -> usize {
    text.split(VERSE_SEPARATOR).count()
}

/// Return the verses visible on a 1-based page.
///
/// The result is `verses[(page-1)*page_size .. min(page*page_size, len)]`,
/// or empty when the page starts past the last verse.
///
/// Callers must pass `page >= 1` and `page_size >= 1`. A zero for either
/// yields an empty page.
pub fn verses(text: &str, page: usize, page_size: usize) -> Vec<&str> {
    let all = split_verses(text);

    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size))
    else {
        return Vec::new();
    };
    if start >= all.len() {
        return Vec::new();
    }

    let end = page.saturating_mul(page_size).min(all.len());
    all[start..end].to_vec()
}
