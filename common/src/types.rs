//! 表データと照合結果の型定義
//!
//! ローダー・照合エンジン・UIで共有される型:
//! - Table: 読み込んだファイルの行×セル
//! - MatchResult: 用語を1つ以上含む更新文書の1行
//! - SelectionMode: チェック状態の連動範囲（全体/出現ごと）

use serde::{Deserialize, Serialize};

/// 読み込み済みの表（行の並び、各行はセル文字列の並び）
///
/// 読み込み後は変更しない。行ごとにセル数が異なってもよい。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 指定セル（範囲外は None）
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// 最も長い行のセル数
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// ヘッダー行を除いたデータ行
    pub fn body(&self, has_header: bool) -> &[Vec<String>] {
        let skip = usize::from(has_header).min(self.rows.len());
        &self.rows[skip..]
    }

    /// 列選択用の候補一覧（列記号と先頭行の値）
    pub fn column_options(&self) -> Vec<ColumnOption> {
        (0..self.column_count())
            .map(|index| ColumnOption {
                index,
                label: column_label(index),
                sample: self.cell(0, index).unwrap_or_default().to_string(),
            })
            .collect()
    }
}

/// 列選択UIの1項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOption {
    pub index: usize,
    pub label: String,
    pub sample: String,
}

/// 列番号をスプレッドシートの列記号に変換（0 → A, 25 → Z, 26 → AA）
pub fn column_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// 照合結果: 用語を含んだ更新文書の1行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// 更新文書の選択列のテキスト
    pub source_line: String,
    /// 行に含まれていた用語（テームベース順、重複あり）
    pub matched_terms: Vec<String>,
}

/// チェック状態の連動範囲
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// 同じ用語は全行で同じチェック状態
    #[default]
    Global,
    /// 出現ごとに独立
    Local,
}
