//! Text helpers for certificate layout: digit transliteration, date
//! normalization, the script-ratio alignment heuristic, and Helvetica
//! measurement/wrapping.

use chrono::NaiveDate;

const DIGIT_WORDS: [&str; 10] = [
    "ZERO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE",
];

/// Spell each decimal digit as its English word, space-joined and in digit
/// order: `"2021"` becomes `"TWO ZERO TWO ONE"`. Non-digit characters are
/// skipped; empty input yields an empty string.
pub fn spell_digits(number: &str) -> String {
    number
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| DIGIT_WORDS[d as usize])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a date to `DD/MM/YYYY` with zero-padded day and month.
///
/// Accepts ISO-8601 input (`YYYY-MM-DD`, optionally with a time suffix) as
/// well as dates that are already in `DD/MM/YYYY` form. Anything that does
/// not parse is passed through unchanged.
pub fn format_date_dmy(input: &str) -> String {
    match parse_date(input) {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => input.trim().to_string(),
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if let Some(prefix) = s.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(d);
        }
    }
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}

/// Horizontal alignment of a positioned text field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Fraction of non-whitespace characters that fall in the Arabic Unicode
/// blocks U+0600..=U+06FF and U+0750..=U+077F. Empty input counts as 0.
pub fn arabic_ratio(text: &str) -> f64 {
    let arabic = text
        .chars()
        .filter(|c| matches!(u32::from(*c), 0x0600..=0x06FF | 0x0750..=0x077F))
        .count();
    let total = text.chars().filter(|c| !c.is_whitespace()).count();
    if total == 0 {
        0.0
    } else {
        arabic as f64 / total as f64
    }
}

/// Alignment choice for mixed-script remarks. Predominantly Arabic text
/// (ratio strictly above one half) is right-aligned; everything else,
/// including an exact 50/50 split, stays left-aligned. This is an alignment
/// choice only; no bidi reordering or glyph reshaping happens anywhere.
pub fn remarks_alignment(text: &str) -> Align {
    if arabic_ratio(text) > 0.5 {
        Align::Right
    } else {
        Align::Left
    }
}

// Standard Helvetica advance widths in 1/1000 em for U+0020..=U+007E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // sp..
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

const DEFAULT_WIDTH: u16 = 556;

fn char_width(c: char) -> u16 {
    let i = c as usize;
    if (0x20..=0x7E).contains(&i) {
        HELVETICA_WIDTHS[i - 0x20]
    } else {
        DEFAULT_WIDTH
    }
}

/// Width of a single line of Helvetica text at the given size, in points.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    units as f32 * font_size / 1000.0
}

/// Greedy word wrap against a maximum line width in points. Explicit
/// newlines always break; a single word wider than the box gets its own
/// line rather than being split.
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current: Vec<&str> = Vec::new();
        for word in paragraph.split_whitespace() {
            let mut candidate = current.clone();
            candidate.push(word);
            let joined = candidate.join(" ");
            if current.is_empty() || text_width(&joined, font_size) <= max_width {
                current = candidate;
            } else {
                lines.push(current.join(" "));
                current = vec![word];
            }
        }
        lines.push(current.join(" "));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spell_digits_basics() {
        assert_eq!(spell_digits(""), "");
        assert_eq!(spell_digits("0"), "ZERO");
        assert_eq!(spell_digits("2021"), "TWO ZERO TWO ONE");
    }

    #[test]
    fn spell_digits_skips_non_digits() {
        assert_eq!(spell_digits("19a9"), "ONE NINE NINE");
    }

    #[test]
    fn date_formats_iso() {
        assert_eq!(format_date_dmy("2023-05-07"), "07/05/2023");
        assert_eq!(format_date_dmy("2023-05-07T12:34:56Z"), "07/05/2023");
    }

    #[test]
    fn date_format_is_idempotent() {
        assert_eq!(format_date_dmy("07/05/2023"), "07/05/2023");
        assert_eq!(format_date_dmy(&format_date_dmy("2023-05-07")), "07/05/2023");
    }

    #[test]
    fn date_passthrough_when_unparseable() {
        assert_eq!(format_date_dmy("not a date"), "not a date");
    }

    #[test]
    fn ratio_of_empty_and_whitespace_is_zero() {
        assert_eq!(arabic_ratio(""), 0.0);
        assert_eq!(arabic_ratio("   \t "), 0.0);
        assert_eq!(remarks_alignment("   "), Align::Left);
    }

    #[test]
    fn ratio_of_pure_arabic_is_one() {
        let s = "\u{0645}\u{0631}\u{062D}\u{0628}\u{0627}";
        assert_eq!(arabic_ratio(s), 1.0);
        assert_eq!(remarks_alignment(s), Align::Right);
    }

    #[test]
    fn exact_half_stays_left() {
        // Two Arabic letters, two Latin letters; threshold is strict.
        let s = "\u{0645}\u{0631} ab";
        assert_eq!(arabic_ratio(s), 0.5);
        assert_eq!(remarks_alignment(s), Align::Left);
    }

    #[test]
    fn width_grows_with_text() {
        let short = text_width("VCC", 12.0);
        let long = text_width("VCC-123456", 12.0);
        assert!(long > short);
        assert!(short > 0.0);
    }

    #[test]
    fn wrap_respects_max_width() {
        let lines = wrap_text("one two three four five six", 12.0, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 12.0) <= 60.0 || !line.contains(' '));
        }
    }

    #[test]
    fn wrap_breaks_on_newline() {
        let lines = wrap_text("OWNER-1\nSome Owner Name", 12.0, 215.0);
        assert_eq!(lines, vec!["OWNER-1".to_string(), "Some Owner Name".to_string()]);
    }

    #[test]
    fn wrap_keeps_overlong_word_whole() {
        let lines = wrap_text("Supercalifragilisticexpialidocious", 12.0, 20.0);
        assert_eq!(lines.len(), 1);
    }
}
