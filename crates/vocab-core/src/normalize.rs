//! Fixed-rule cleanup of a single vocabulary record.

use vocab_types::VocabRecord;

use crate::text::{
    EN_TERMINALS, JA_TERMINALS, MAX_TOKENS, collapse_whitespace, ensure_terminal, strip_fragments,
    truncate_tokens,
};

/// Phrase-specific glosses, applied regardless of the current `mean`
pub const MEAN_BY_PHRASE: &[(&str, &str)] = &[
    ("english", "英語"),
    ("japanese", "日本語"),
    ("peppers", "唐辛子"),
    ("option", "選択肢"),
    ("electronic", "電子"),
    ("morning", "朝"),
    ("friends", "友だち"),
    ("giraffe", "キリン"),
    ("tolerance", "耐性"),
    ("kasumi", "カスミ"),
];

/// Katakana transliterations replaced by their natural gloss on exact match
pub const MEAN_REPLACEMENTS: &[(&str, &str)] = &[
    ("イングリッシュ", "英語"),
    ("ジャパニーズ", "日本語"),
    ("エレクトロニック", "電子"),
    ("モーニング", "朝"),
    ("インフォメーション", "情報"),
    ("レギュラー", "定期的な"),
];

/// OCR artifacts removed from example sentences. Dotted forms come first so
/// `am.` is removed whole instead of leaving a stray `.`.
pub const GARBAGE_FRAGMENTS: &[&str] = &["cid", "∞", "—", "A m", "p m", "am.", "pm.", "pm", "am"];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
}

/// Corrected `mean` for the record, if any rule applies
pub fn corrected_mean(phrase: &str, mean: Option<&str>) -> Option<&'static str> {
    lookup(MEAN_BY_PHRASE, phrase.trim()).or_else(|| mean.and_then(|m| lookup(MEAN_REPLACEMENTS, m)))
}

/// Clean a source-language example sentence
pub fn sanitize_one_phrase(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let s = strip_fragments(text, GARBAGE_FRAGMENTS);
    let s = truncate_tokens(&s, MAX_TOKENS);
    ensure_terminal(s, &EN_TERMINALS, '.')
}

/// Clean a target-language example sentence
pub fn sanitize_one_phrase_ja(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let s = collapse_whitespace(text).replace("..", "。");
    ensure_terminal(s, &JA_TERMINALS, '。')
}

/// Apply every correction to `record` in place
pub fn normalize_record(record: &mut VocabRecord) {
    if let Some(mean) = corrected_mean(&record.phrase, record.mean()) {
        record.set_mean(mean);
    }

    if let Some(sentence) = record.one_phrase().filter(|s| !s.is_empty()).map(sanitize_one_phrase) {
        record.set_one_phrase(sentence);
    }

    if let Some(sentence) = record
        .one_phrase_ja()
        .filter(|s| !s.is_empty())
        .map(sanitize_one_phrase_ja)
    {
        record.set_one_phrase_ja(sentence);
    }
}

/// Normalize every record, returning how many changed
pub fn normalize_all<'a>(records: impl IntoIterator<Item = &'a mut VocabRecord>) -> usize {
    records
        .into_iter()
        .map(|record| {
            let before = record.clone();
            normalize_record(record);
            usize::from(*record != before)
        })
        .sum()
}
