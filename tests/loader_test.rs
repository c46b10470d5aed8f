//! 表ファイル読み込みの統合テスト
//!
//! 一時ディレクトリにCSV/Excelを作成して読み込みを検証

use rust_xlsxwriter::Workbook;
use std::path::Path;
use term_match::loader::load_table;
use tempfile::tempdir;

fn write_xlsx(path: &Path) {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Source").unwrap();
    sheet.write_string(0, 1, "Target").unwrap();
    sheet.write_string(1, 0, "apple").unwrap();
    sheet.write_string(1, 1, "사과").unwrap();
    sheet.write_string(2, 0, "banana").unwrap();
    sheet.write_number(2, 1, 42.0).unwrap();
    // 空行を挟む
    sheet.write_string(4, 0, "cherry").unwrap();

    let second = workbook.add_worksheet();
    second.set_name("Ignored").unwrap();
    second.write_string(0, 0, "should not be read").unwrap();

    workbook.save(path).expect("Excel作成失敗");
}

/// CSVファイルの読み込み
#[test]
fn test_load_csv_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("termbase.csv");
    std::fs::write(&path, "Source,Target\napple,사과\n\"banana, ripe\",바나나\n").unwrap();

    let table = load_table(&path).expect("CSV読み込み失敗");
    assert_eq!(table.len(), 3);
    assert_eq!(table.cell(2, 0), Some("banana, ripe"));
    assert_eq!(table.cell(2, 1), Some("바나나"));
}

/// タブ区切りの .txt は区切り文字を推定する
#[test]
fn test_load_tab_separated_txt() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("glossary.txt");
    std::fs::write(&path, "ko\tja\n용어\t用語\n").unwrap();

    let table = load_table(&path).expect("TXT読み込み失敗");
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.cell(1, 1), Some("用語"));
}

/// Excelは先頭シートのみ読み込む
#[test]
fn test_load_xlsx_first_sheet_only() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("update.xlsx");
    write_xlsx(&path);

    let table = load_table(&path).expect("Excel読み込み失敗");
    assert_eq!(table.len(), 4, "空行は除外される");
    assert_eq!(table.rows()[0], vec!["Source", "Target"]);
    assert_eq!(table.rows()[1], vec!["apple", "사과"]);
    assert_eq!(table.rows()[2], vec!["banana", "42"]);
    assert_eq!(table.rows()[3], vec!["cherry"]);
    assert!(table
        .rows()
        .iter()
        .flatten()
        .all(|cell| cell != "should not be read"));
}

/// A列が空のシートでも列番号がずれない
#[test]
fn test_load_xlsx_keeps_column_positions() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("offset.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 2, "Term").unwrap();
    sheet.write_string(1, 2, "apple").unwrap();
    workbook.save(&path).unwrap();

    let table = load_table(&path).unwrap();
    assert_eq!(table.cell(1, 2), Some("apple"));
    assert_eq!(table.cell(1, 0), Some(""));
}

/// 未対応の拡張子は空の表（エラーにしない）
#[test]
fn test_unsupported_extension_is_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.docx");
    std::fs::write(&path, "apple,banana").unwrap();

    let table = load_table(&path).expect("未対応形式はエラーにしない");
    assert!(table.is_empty());
}
