use regex::Regex;
use std::sync::LazyLock;

/// Status marker glyphs that OCR tends to emit in front of or after a name
pub const MARKER_GLYPHS: &[char] = &[
    '🟢', '🟣', '🔴', '●', '•', '■', '□', '▪', '▫', '◦', '◉', '◎', '○', '\u{FE0F}',
];

/// Code-first: "N-6 حسين", "N-6 - حسين"
static CODE_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]{1,4}-?[0-9]{1,4})\s*[-–—]?\s*(.+)$").expect("code-first pattern is valid")
});

/// Name-first: "حسين - N-6", "سارة N-1"
static NAME_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)[\s\-–—]+([A-Za-z]{1,4}-?[0-9]{1,4})$").expect("name-first pattern is valid")
});

/// Name and optional unit code parsed from one roster line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedName {
    /// Empty when the line had nothing left after stripping markers
    pub name: String,
    /// Empty when no code could be isolated
    pub code: String,
}

/// Remove marker glyphs and surrounding whitespace
pub fn strip_marker_glyphs(text: &str) -> String {
    text.chars()
        .filter(|c| !MARKER_GLYPHS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Split a recognized line into name and code.
///
/// Tries a leading code token first, then a trailing one. Falls back to the
/// whole stripped text as the name. Never fails; an empty name tells the
/// caller to drop the line.
pub fn parse_name_code(text: &str) -> ParsedName {
    let text = strip_marker_glyphs(text);

    if let Some(caps) = CODE_FIRST.captures(&text) {
        return ParsedName {
            name: caps[2].trim().to_string(),
            code: caps[1].trim().to_string(),
        };
    }

    if let Some(caps) = NAME_FIRST.captures(&text) {
        return ParsedName {
            name: caps[1].trim().to_string(),
            code: caps[2].trim().to_string(),
        };
    }

    ParsedName {
        name: text,
        code: String::new(),
    }
}

/// True when the text holds at least one Arabic-block character (U+0600..U+06FF)
pub fn contains_target_script(text: &str) -> bool {
    text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}
