//! クリップボード用テキストの生成

use std::collections::HashSet;

use crate::selection::Selection;
use crate::types::MatchResult;

/// チェック済みの用語を改行区切りで連結
pub fn checked_text(selection: &Selection) -> String {
    selection.checked_terms().join("\n")
}

/// 検出された全用語（重複除去、初出順）
pub fn unique_terms(results: &[MatchResult]) -> Vec<String> {
    let mut seen = HashSet::new();
    results
        .iter()
        .flat_map(|r| r.matched_terms.iter())
        .filter(|term| seen.insert(term.as_str()))
        .cloned()
        .collect()
}

/// 検出された全用語を改行区切りで連結（チェック状態は無視）
pub fn unique_text(results: &[MatchResult]) -> String {
    unique_terms(results).join("\n")
}
