//! 用語照合エンジン
//!
//! テームベースの選択列から用語を取り出し、更新文書の各行に
//! 部分文字列として含まれる用語を列挙する。大文字小文字は区別し、
//! 正規化やあいまい一致は行わない。

use crate::types::{MatchResult, Table};

/// 照合の入力
#[derive(Debug, Clone, Copy)]
pub struct MatchRequest<'a> {
    pub termbase: &'a Table,
    pub termbase_column: usize,
    pub termbase_has_header: bool,
    pub update: &'a Table,
    pub update_column: usize,
    pub update_has_header: bool,
}

/// テームベースから用語一覧を抽出
///
/// 空白のみのセルと列が存在しない行は除外する。
/// 残った用語はセルの値をそのまま使い、重複も保持する。
pub fn extract_terms(table: &Table, column: usize, has_header: bool) -> Vec<String> {
    table
        .body(has_header)
        .iter()
        .filter_map(|row| row.get(column))
        .filter(|term| !term.trim().is_empty())
        .cloned()
        .collect()
}

/// 更新文書の各行に含まれる用語を列挙
///
/// 選択列が空または存在しない行はスキップし、
/// 用語を1つも含まない行は結果に含めない。
pub fn find_matches(
    terms: &[String],
    update: &Table,
    column: usize,
    has_header: bool,
) -> Vec<MatchResult> {
    if terms.is_empty() {
        return Vec::new();
    }

    update
        .body(has_header)
        .iter()
        .filter_map(|row| row.get(column))
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let matched_terms: Vec<String> = terms
                .iter()
                .filter(|term| line.contains(term.as_str()))
                .cloned()
                .collect();

            if matched_terms.is_empty() {
                None
            } else {
                Some(MatchResult {
                    source_line: line.clone(),
                    matched_terms,
                })
            }
        })
        .collect()
}

/// 用語抽出と照合をまとめて実行
pub fn run(request: &MatchRequest<'_>) -> Vec<MatchResult> {
    let terms = extract_terms(
        request.termbase,
        request.termbase_column,
        request.termbase_has_header,
    );
    find_matches(
        &terms,
        request.update,
        request.update_column,
        request.update_has_header,
    )
}
