/// Text statistics and the analysis result record
///
/// This module holds the counting rules used by the analyzer. Every function
/// works on already-loaded content so the rules can be exercised without
/// touching the file system.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Turn `\r\n` and lone `\r` line endings into `\n`.
///
/// Content that only uses `\n` is borrowed unchanged.
pub fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if !content.contains('\r') {
        return Cow::Borrowed(content);
    }
    Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Number of line records in `content`.
///
/// A trailing line without a terminator still counts as a record, and an
/// empty string has no records at all.
pub fn line_count(content: &str) -> usize {
    content.lines().count()
}

/// Number of whitespace-delimited tokens, without any normalization.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Number of characters in `content`.
///
/// When `include_spaces` is false only the ASCII space character is
/// skipped; tabs and newlines are still counted.
pub fn character_count(content: &str, include_spaces: bool) -> usize {
    if include_spaces {
        content.chars().count()
    } else {
        content.chars().filter(|&c| c != ' ').count()
    }
}

/// Remove every ASCII punctuation character from a token.
pub fn strip_punctuation(token: &str) -> String {
    token.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Longest token after punctuation stripping.
///
/// Lengths are measured in characters. The first token wins on ties, and
/// content without tokens yields an empty string.
pub fn longest_word(content: &str) -> String {
    let mut longest = String::new();
    let mut longest_len = 0;

    for token in content.split_whitespace() {
        let word = strip_punctuation(token);
        let len = word.chars().count();
        // Strictly greater keeps the earliest maximum
        if len > longest_len {
            longest_len = len;
            longest = word;
        }
    }

    longest
}

/// Count normalized words: lowercased, punctuation stripped, empties dropped.
pub fn word_frequencies(content: &str) -> WordFrequencies {
    let lowered = content.to_lowercase();
    let mut frequencies = WordFrequencies::new();

    for token in lowered.split_whitespace() {
        let word = strip_punctuation(token);
        if !word.is_empty() {
            frequencies.record(word);
        }
    }

    frequencies
}

/// Word occurrence counts that remember the order words were first seen
///
/// The first-seen order is what breaks ties when ranking words by count.
/// Two tables compare equal when they hold the same counts, whatever the
/// order of their keys.
#[derive(Debug, Clone, Default)]
pub struct WordFrequencies {
    /// (word, count) pairs in first-seen order
    entries: Vec<(String, usize)>,

    /// Position of each word in `entries`
    index: HashMap<String, usize>,
}

impl WordFrequencies {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `word`
    pub fn record(&mut self, word: String) {
        match self.index.get(&word) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(word.clone(), self.entries.len());
                self.entries.push((word, 1));
            }
        }
    }

    /// Occurrence count of `word`, if it was seen
    pub fn get(&self, word: &str) -> Option<usize> {
        self.index.get(word).map(|&position| self.entries[position].1)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the number of non-empty normalized tokens
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Iterate over (word, count) in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// All entries sorted by count descending, ties in first-seen order
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self.iter().collect();
        // sort_by is stable, so equal counts keep their first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The `n` most frequent words
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

impl PartialEq for WordFrequencies {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(word, count)| other.get(word) == Some(count))
    }
}

impl Eq for WordFrequencies {}

impl Serialize for WordFrequencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, count) in &self.entries {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

/// Complete statistics for one text resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    line_count: usize,
    word_count: usize,
    char_count_with_spaces: usize,
    char_count_without_spaces: usize,
    longest_word: String,
    word_frequencies: WordFrequencies,
}

impl AnalysisResult {
    /// Compute every statistic from loaded content
    pub fn from_content(content: &str) -> Self {
        let content = normalize_newlines(content);
        let content = content.as_ref();
        Self {
            line_count: line_count(content),
            word_count: word_count(content),
            char_count_with_spaces: character_count(content, true),
            char_count_without_spaces: character_count(content, false),
            longest_word: longest_word(content),
            word_frequencies: word_frequencies(content),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn char_count_with_spaces(&self) -> usize {
        self.char_count_with_spaces
    }

    pub fn char_count_without_spaces(&self) -> usize {
        self.char_count_without_spaces
    }

    pub fn longest_word(&self) -> &str {
        &self.longest_word
    }

    pub fn word_frequencies(&self) -> &WordFrequencies {
        &self.word_frequencies
    }

    /// The `n` most frequent normalized words, most frequent first
    pub fn top_words(&self, n: usize) -> Vec<(&str, usize)> {
        self.word_frequencies.top(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "Python is a powerful programming language.\n\
It is widely used in web development, data science, and automation.";

    #[test]
    fn test_scenario_counts() {
        assert_eq!(line_count(SCENARIO), 2);
        assert_eq!(word_count(SCENARIO), 17);
        assert_eq!(longest_word(SCENARIO), "programming");
        assert_eq!(word_frequencies(SCENARIO).get("is"), Some(2));
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let crlf = AnalysisResult::from_content("a b\r\nc d\r\n");
        assert_eq!(crlf.line_count(), 2);
        assert_eq!(crlf.char_count_with_spaces(), 8);
        assert_eq!(crlf.char_count_without_spaces(), 6);

        let cr_only = AnalysisResult::from_content("a\rb\rc");
        assert_eq!(cr_only.line_count(), 3);
        assert_eq!(cr_only.char_count_with_spaces(), 5);

        assert_eq!(normalize_newlines("x\r\r\ny"), "x\n\ny");
        assert!(matches!(normalize_newlines("plain\n"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_line_count_terminators() {
        assert_eq!(line_count(""), 0);
        assert_eq!(line_count("one"), 1);
        assert_eq!(line_count("one\n"), 1);
        assert_eq!(line_count("one\ntwo\n"), 2);
        assert_eq!(line_count("one\n\n"), 2);
        assert_eq!(line_count("\n"), 1);
    }

    #[test]
    fn test_character_count_only_skips_spaces() {
        let content = "a b\tc\n";
        assert_eq!(character_count(content, true), 6);
        assert_eq!(character_count(content, false), 5);
        assert_eq!(character_count("héllo wörld", true), 11);
    }

    #[test]
    fn test_strip_punctuation_inside_token() {
        assert_eq!(strip_punctuation("Python's"), "Pythons");
        assert_eq!(strip_punctuation("--"), "");
        assert_eq!(strip_punctuation("e-mail,"), "email");
    }

    #[test]
    fn test_longest_word_first_occurrence_wins() {
        assert_eq!(longest_word("abc xyz de"), "abc");
        assert_eq!(longest_word("ab, abc! xyz"), "abc");
        assert_eq!(longest_word(""), "");
        assert_eq!(longest_word("   \n\t"), "");
    }

    #[test]
    fn test_word_frequencies_normalization() {
        let frequencies = word_frequencies("The the THE, -- end.");
        assert_eq!(frequencies.get("the"), Some(3));
        assert_eq!(frequencies.get("end"), Some(1));
        assert_eq!(frequencies.get("--"), None);
        assert_eq!(frequencies.len(), 2);
        assert_eq!(frequencies.total(), 4);
        assert!(frequencies.total() < word_count("The the THE, -- end."));
    }

    #[test]
    fn test_ranking_ties_keep_first_seen_order() {
        let frequencies = word_frequencies("b a c a b d");
        let ranked = frequencies.ranked();
        assert_eq!(ranked, vec![("b", 2), ("a", 2), ("c", 1), ("d", 1)]);
        assert_eq!(frequencies.top(1), vec![("b", 2)]);
        assert_eq!(frequencies.top(10).len(), 4);
    }

    #[test]
    fn test_frequencies_equality_ignores_order() {
        let mut first = WordFrequencies::new();
        first.record("x".to_string());
        first.record("y".to_string());
        let mut second = WordFrequencies::new();
        second.record("y".to_string());
        second.record("x".to_string());
        assert_eq!(first, second);

        second.record("x".to_string());
        assert_ne!(first, second);
    }

    #[test]
    fn test_empty_result() {
        let result = AnalysisResult::from_content("");
        assert_eq!(result.line_count(), 0);
        assert_eq!(result.word_count(), 0);
        assert_eq!(result.char_count_with_spaces(), 0);
        assert_eq!(result.char_count_without_spaces(), 0);
        assert_eq!(result.longest_word(), "");
        assert!(result.word_frequencies().is_empty());
        assert!(result.top_words(5).is_empty());
    }

    #[test]
    fn test_serialized_frequencies_keep_first_seen_order() {
        let result = AnalysisResult::from_content("aa bb aa");
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""word_frequencies":{"aa":2,"bb":1}"#));
        assert!(json.contains(r#""longest_word":"aa""#));
    }
}
