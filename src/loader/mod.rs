//! 表ファイル読み込み
//!
//! 拡張子で形式を判定し、区切りテキストまたはワークブックの
//! 先頭シートを `Table` に変換する。未対応の拡張子は空の表になる。

mod delimited;
mod workbook;

use crate::error::{Result, TermMatchError};
use std::path::Path;
use term_match_common::Table;

pub use delimited::{parse_delimited, sniff_delimiter};
pub use workbook::parse_workbook;

/// ファイルダイアログ用の拡張子一覧
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt", "xlsx", "xlsm", "xls", "ods"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// 区切りテキスト（区切り文字を指定する場合は Some）
    Delimited(Option<u8>),
    Xlsx,
    Xls,
    Ods,
    Unsupported,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" | "txt" => FileKind::Delimited(None),
            "tsv" => FileKind::Delimited(Some(b'\t')),
            "xlsx" | "xlsm" => FileKind::Xlsx,
            "xls" => FileKind::Xls,
            "ods" => FileKind::Ods,
            _ => FileKind::Unsupported,
        }
    }

    /// ログ・エラー表示用の形式名
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Delimited(_) => "delimited text",
            FileKind::Xlsx => "xlsx",
            FileKind::Xls => "xls",
            FileKind::Ods => "ods",
            FileKind::Unsupported => "unsupported",
        }
    }
}

/// ファイルを読み込んで表に変換
pub fn load_table(path: &Path) -> Result<Table> {
    let kind = FileKind::from_path(path);
    if kind == FileKind::Unsupported {
        tracing::debug!(path = %path.display(), "unsupported extension, returning empty table");
        return Ok(Table::default());
    }
    if !path.exists() {
        return Err(TermMatchError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let table = parse_bytes(kind, bytes)?;
    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.column_count(),
        "table loaded"
    );
    Ok(table)
}

/// 読み込み済みのバイト列を表に変換
pub fn parse_bytes(kind: FileKind, bytes: Vec<u8>) -> Result<Table> {
    match kind {
        FileKind::Delimited(delimiter) => {
            let text = String::from_utf8_lossy(&bytes);
            parse_delimited(&text, delimiter)
        }
        FileKind::Xlsx | FileKind::Xls | FileKind::Ods => parse_workbook(kind, bytes),
        FileKind::Unsupported => Ok(Table::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_from_extension() {
        assert_eq!(FileKind::from_path(Path::new("terms.csv")), FileKind::Delimited(None));
        assert_eq!(FileKind::from_path(Path::new("terms.TXT")), FileKind::Delimited(None));
        assert_eq!(FileKind::from_path(Path::new("terms.tsv")), FileKind::Delimited(Some(b'\t')));
        assert_eq!(FileKind::from_path(Path::new("update.XLSX")), FileKind::Xlsx);
        assert_eq!(FileKind::from_path(Path::new("update.xls")), FileKind::Xls);
        assert_eq!(FileKind::from_path(Path::new("update.ods")), FileKind::Ods);
        assert_eq!(FileKind::from_path(Path::new("notes.docx")), FileKind::Unsupported);
        assert_eq!(FileKind::from_path(Path::new("no_extension")), FileKind::Unsupported);
    }

    #[test]
    fn test_unsupported_bytes_yield_empty_table() {
        let table = parse_bytes(FileKind::Unsupported, b"a,b".to_vec()).unwrap();
        assert!(table.is_empty());
    }
}
