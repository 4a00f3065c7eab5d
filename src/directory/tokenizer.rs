//! Query tokenizer / 查询分词
//!
//! Whitespace tokenization with lowercase folding. Works for Latin and
//! Cyrillic text alike since `to_lowercase` is Unicode-aware.

/// Tokenize search query / 对搜索查询进行分词
///
/// Consecutive whitespace never yields empty tokens.
pub fn tokenize_query(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Build the lowercase haystack for a record / 构建记录的搜索文本
///
/// Empty fields are skipped so they don't produce double spaces.
pub fn haystack(fields: &[&str]) -> String {
    let mut out = String::new();
    for field in fields.iter().map(|f| f.trim()).filter(|f| !f.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&field.to_lowercase());
    }
    out
}
