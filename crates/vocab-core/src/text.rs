//! String helpers shared by the cleaning passes.

/// Maximum whitespace-separated tokens kept in an example sentence
pub const MAX_TOKENS: usize = 10;

/// Sentence-final marks for source-language sentences
pub const EN_TERMINALS: [char; 3] = ['.', '!', '?'];

/// Sentence-final marks for target-language sentences
pub const JA_TERMINALS: [char; 3] = ['。', '！', '？'];

/// Collapse every whitespace run to a single space and trim both ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace every occurrence of each fragment with a space, in the given order,
/// until none is left. The result is whitespace-collapsed.
pub fn strip_fragments(text: &str, fragments: &[&str]) -> String {
    let mut s = collapse_whitespace(text);

    loop {
        if !fragments.iter().any(|frag| s.contains(frag)) {
            return s;
        }
        for frag in fragments {
            s = s.replace(frag, " ");
        }
        s = collapse_whitespace(&s);
    }
}

/// Keep the first `max` space-separated tokens
pub fn truncate_tokens(text: &str, max: usize) -> String {
    text.split(' ').take(max).collect::<Vec<_>>().join(" ")
}

pub fn ends_with_any(text: &str, marks: &[char]) -> bool {
    text.chars().last().is_some_and(|c| marks.contains(&c))
}

/// Append `mark` unless `text` already ends in one of `marks`
pub fn ensure_terminal(mut text: String, marks: &[char], mark: char) -> String {
    if !ends_with_any(&text, marks) {
        text.push(mark);
    }
    text
}
