//! Deterministic output filenames

use crate::core::string::collapse_whitespace;
use crate::instrument::is_absent_voice;
use regex::Regex;
use std::sync::LazyLock;

/// Anything that is not a word character, whitespace, period or hyphen
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.\-]+").expect("valid sanitize pattern"));

/// Strip characters that are unsafe in filenames and collapse whitespace.
///
/// ```
/// use score_domain::sanitize;
///
/// assert_eq!(sanitize("Clarinet in B♭ / 2"), "Clarinet in B 2");
/// ```
pub fn sanitize(text: &str) -> String {
    collapse_whitespace(&UNSAFE_CHARS.replace_all(text, ""))
}

/// Output filename for the `index`-th part: `"{index:02} - {name[ voice]}.pdf"`
///
/// ```
/// use score_domain::part_filename;
///
/// assert_eq!(part_filename(1, "Trumpet", Some("1")), "01 - Trumpet 1.pdf");
/// assert_eq!(part_filename(2, "Clarinet", None), "02 - Clarinet.pdf");
/// ```
pub fn part_filename(index: usize, name: &str, voice: Option<&str>) -> String {
    let label = match voice {
        Some(v) if !is_absent_voice(Some(v)) => format!("{} {}", name, v.trim()),
        _ => name.to_string(),
    };
    format!("{:02} - {}.pdf", index, sanitize(&label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_word_chars_dots_hyphens() {
        assert_eq!(sanitize("Alto-Sax 1."), "Alto-Sax 1.");
        assert_eq!(sanitize("Horn: in F?"), "Horn in F");
    }

    #[test]
    fn test_sanitize_keeps_unicode_letters() {
        assert_eq!(sanitize("Fagott für Bläser"), "Fagott für Bläser");
    }

    #[test]
    fn test_sanitize_collapses_whitespace() {
        assert_eq!(sanitize("  Bass \t  Trombone  "), "Bass Trombone");
    }

    #[test]
    fn test_part_filename_voice_suffix_rules() {
        assert_eq!(part_filename(1, "Trumpet", Some("1")), "01 - Trumpet 1.pdf");
        assert_eq!(part_filename(3, "Horn", Some("null")), "03 - Horn.pdf");
        assert_eq!(part_filename(4, "Horn", Some("None")), "04 - Horn.pdf");
        assert_eq!(part_filename(5, "Horn", Some("")), "05 - Horn.pdf");
        assert_eq!(part_filename(6, "Horn", Some(" 2 ")), "06 - Horn 2.pdf");
    }

    #[test]
    fn test_part_filename_pads_to_two_digits_only() {
        assert_eq!(part_filename(12, "Tuba", None), "12 - Tuba.pdf");
        assert_eq!(part_filename(123, "Tuba", None), "123 - Tuba.pdf");
    }

    #[test]
    fn test_part_filename_strips_path_separators() {
        assert_eq!(part_filename(1, "../Flute/Piccolo", None), "01 - ..FlutePiccolo.pdf");
    }
}
