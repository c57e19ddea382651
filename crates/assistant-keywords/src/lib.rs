//! Assistant keyword matching: input normalization, whole-word/phrase
//! patterns, and quick-reply prefix stripping.
//!
//! A keyword matches normalized input when it occurs there literally and the
//! occurrence is not glued to another word character on either side. That
//! keeps "hi" from firing on "high" and "yo" from firing on "you", while
//! multi-word keywords like "good morning" still match as a contiguous phrase.
//!
//! Keywords are compiled once into escaped literal regexes, so metacharacters
//! in keywords such as "c++" or "ci/cd" are taken at face value.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static MARK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{M}$").expect("mark regex"));

/// Errors raised while compiling a keyword into a pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The keyword was empty (or whitespace only).
    #[error("keyword is empty")]
    Empty,
    /// The escaped keyword failed to compile.
    #[error("keyword failed to compile: {0}")]
    Regex(#[from] regex::Error),
}

/// Normalize user input for matching: lower-case, then trim.
///
/// No stemming or punctuation stripping happens here. Punctuation is
/// handled by the word-boundary check in [`KeywordPattern`].
///
/// # Examples
///
/// ```
/// use assistant_keywords::normalize;
///
/// assert_eq!(normalize("  Hey There! "), "hey there!");
/// ```
pub fn normalize(input: &str) -> String {
    input.to_lowercase().trim().to_string()
}

/// Word characters for boundary purposes: Unicode alphanumerics, `_`, and
/// combining marks.
///
/// A combining mark belongs to the character before it, so "hi\u{301}" (hí
/// spelled with a combining acute) is one word and "hi" does not match in it.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || is_mark(c)
}

/// Unicode general category `M` (nonspacing, spacing and enclosing marks).
pub fn is_mark(c: char) -> bool {
    MARK_RE.is_match(c.encode_utf8(&mut [0u8; 4]))
}

/// A single precompiled keyword or phrase.
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    keyword: String,
    regex: Regex,
}

impl KeywordPattern {
    /// Compile a keyword. The keyword is lower-cased and trimmed first.
    pub fn new(keyword: &str) -> Result<Self, PatternError> {
        let keyword = normalize(keyword);
        if keyword.is_empty() {
            return Err(PatternError::Empty);
        }
        let regex = Regex::new(&regex::escape(&keyword))?;
        Ok(KeywordPattern { keyword, regex })
    }

    /// The normalized keyword text.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Whether the keyword occurs in `normalized` as a whole word or phrase.
    ///
    /// `normalized` should already have gone through [`normalize`].
    pub fn is_match(&self, normalized: &str) -> bool {
        self.find(normalized).is_some()
    }

    /// Byte range of the first whole-word occurrence, if any.
    ///
    /// Overlapping candidates are all considered: a rejected occurrence only
    /// advances the search by one character, so "a a" still matches the
    /// tail of "xa a a".
    pub fn find(&self, normalized: &str) -> Option<std::ops::Range<usize>> {
        let mut start = 0;
        while start < normalized.len() {
            let m = self.regex.find_at(normalized, start)?;
            if is_bounded(normalized, m.start(), m.end()) {
                return Some(m.range());
            }
            let step = normalized[m.start()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            start = m.start() + step;
        }
        None
    }
}

/// Check that `text[start..end]` is not adjacent to a word character.
///
/// Marks in front of the occurrence are skipped back to their base
/// character, so an emoji with a variation selector ("❤️thanks") still
/// counts as a boundary.
fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().rev().find(|&c| !is_mark(c));
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Strip the decorative prefix from a quick-reply label.
///
/// Removes a leading run of characters that are neither word characters nor
/// whitespace (typically an emoji and its variation selector), plus any
/// whitespace after it. Labels
/// without such a prefix are returned unchanged.
///
/// # Examples
///
/// ```
/// use assistant_keywords::strip_quick_reply_prefix;
///
/// assert_eq!(strip_quick_reply_prefix("👋 Hi there!"), "Hi there!");
/// assert_eq!(strip_quick_reply_prefix("Contact"), "Contact");
/// ```
pub fn strip_quick_reply_prefix(label: &str) -> &str {
    let prefix_len: usize = label
        .chars()
        .take_while(|&c| is_mark(c) || (!is_word_char(c) && !c.is_whitespace()))
        .map(char::len_utf8)
        .sum();
    if prefix_len == 0 {
        return label;
    }
    label[prefix_len..].trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(keyword: &str, input: &str) -> bool {
        KeywordPattern::new(keyword)
            .unwrap()
            .is_match(&normalize(input))
    }

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize("\t HELLO World \n"), "hello world");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn whole_word_only() {
        assert!(matches("hi", "hi there"));
        assert!(!matches("hi", "high five"));
        assert!(!matches("yo", "you"));
        assert!(!matches("ai", "said"));
    }

    #[test]
    fn punctuation_is_a_boundary() {
        assert!(matches("hey", "hey there!"));
        assert!(matches("hey", "hey!"));
        assert!(matches("cost", "how much does this cost?"));
    }

    #[test]
    fn underscore_is_a_word_char() {
        assert!(!matches("hi", "hi_there"));
    }

    #[test]
    fn phrase_must_be_contiguous() {
        assert!(matches("good morning", "wishing you a good morning today"));
        assert!(!matches("good morning", "morning good"));
        assert!(!matches("good morning", "good mornings"));
    }

    #[test]
    fn metacharacters_are_literal() {
        assert!(matches("c++", "i write c++ daily"));
        assert!(matches("c++", "c++"));
        assert!(!matches("c++", "cc"));
        assert!(matches("a.b", "try a.b now"));
        assert!(!matches("a.b", "try axb now"));
        assert!(matches("ci/cd", "our ci/cd pipeline"));
    }

    #[test]
    fn keyword_is_normalized() {
        let pattern = KeywordPattern::new("  Good Morning ").unwrap();
        assert_eq!(pattern.keyword(), "good morning");
        assert!(pattern.is_match("good morning"));
    }

    #[test]
    fn empty_keyword_rejected() {
        assert!(matches!(KeywordPattern::new("  "), Err(PatternError::Empty)));
    }

    #[test]
    fn overlapping_candidates_are_retried() {
        // The first occurrence is glued to "x"; the second one is clean.
        assert!(matches("a a", "xa a a"));
        let pattern = KeywordPattern::new("hi").unwrap();
        assert_eq!(pattern.find("high hi"), Some(5..7));
    }

    #[test]
    fn unicode_letters_count_as_word_chars() {
        assert!(!matches("caf", "café"));
        assert!(matches("café", "un café s'il vous plaît"));
        assert!(matches("hola", "¡hola!"));
    }

    #[test]
    fn combining_marks_extend_the_word() {
        assert!(!matches("hi", "hi\u{301}"));
        assert!(!matches("cafe", "cafe\u{301} au lait"));
        assert!(matches("cafe\u{301}", "un cafe\u{301}!"));
        assert!(is_word_char('\u{301}'));
        assert!(is_mark('\u{fe0f}'));
        assert!(!is_mark('a'));
    }

    #[test]
    fn emoji_selector_before_keyword_is_a_boundary() {
        assert!(matches("thanks", "❤️thanks"));
        assert!(matches("cool", "🛡️ cool"));
    }

    #[test]
    fn emoji_only_input_never_matches_words() {
        assert!(!matches("hi", "🎉🎉"));
    }

    #[test]
    fn quick_reply_prefix_stripped() {
        assert_eq!(strip_quick_reply_prefix("🛡️ Cybersecurity"), "Cybersecurity");
        assert_eq!(strip_quick_reply_prefix("🚀 Products"), "Products");
        assert_eq!(strip_quick_reply_prefix("📞Contact"), "Contact");
        assert_eq!(strip_quick_reply_prefix("  spaced"), "  spaced");
        assert_eq!(strip_quick_reply_prefix(""), "");
    }
}
