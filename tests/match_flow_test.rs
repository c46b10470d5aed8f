//! 読み込みから照合・コピーまでの一連の流れを検証

use rust_xlsxwriter::Workbook;
use std::time::{Duration, Instant};
use term_match::clipboard::ClipboardSink;
use term_match::config::Config;
use term_match::error::Result;
use term_match::loader::load_table;
use term_match::session::{Session, Side};
use term_match::common::SelectionMode;
use tempfile::tempdir;

#[derive(Default)]
struct RecordingClipboard {
    copies: Vec<String>,
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.copies.push(text.to_string());
        Ok(())
    }
}

fn prepared_session(config: &Config) -> Session {
    let dir = tempdir().expect("Failed to create temp dir");

    let termbase_path = dir.path().join("termbase.csv");
    std::fs::write(&termbase_path, "ID,Term\n1,apple\n2,banana\n3,  \n4,cherry\n").unwrap();

    let update_path = dir.path().join("update.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Text").unwrap();
    sheet.write_string(1, 0, "I ate an apple today").unwrap();
    sheet.write_string(2, 0, "no fruit here").unwrap();
    sheet.write_string(3, 0, "banana split").unwrap();
    sheet.write_string(4, 0, "cherry and apple").unwrap();
    workbook.save(&update_path).unwrap();

    let mut session = Session::new(config);
    session.set_table(Side::Termbase, "termbase.csv", load_table(&termbase_path).unwrap());
    session.set_table(Side::Update, "update.xlsx", load_table(&update_path).unwrap());
    session.set_column(Side::Termbase, 1);
    session
}

#[test]
fn test_csv_termbase_against_xlsx_update() {
    let mut session = prepared_session(&Config::default());
    assert_eq!(session.run_match(), 3);

    let selection = session.selection().expect("照合結果がない");
    let lines: Vec<&str> = selection
        .results()
        .iter()
        .map(|r| r.source_line.as_str())
        .collect();
    assert_eq!(lines, vec!["I ate an apple today", "banana split", "cherry and apple"]);
    assert_eq!(selection.results()[2].matched_terms, vec!["apple", "cherry"]);

    for result in selection.results() {
        for term in &result.matched_terms {
            assert!(result.source_line.contains(term.as_str()));
        }
    }
}

#[test]
fn test_global_selection_copy() {
    let mut session = prepared_session(&Config::default());
    session.run_match();
    session.toggle(2, 0);

    let mut clipboard = RecordingClipboard::default();
    let now = Instant::now();
    session.copy_checked(&mut clipboard, now).unwrap();

    assert_eq!(clipboard.copies, vec!["banana\ncherry"]);
    assert!(session.notice_visible(now + Duration::from_millis(500)));
    assert!(!session.notice_visible(now + Duration::from_secs(3)));
}

#[test]
fn test_local_selection_copy() {
    let config = Config {
        selection_mode: SelectionMode::Local,
        ..Default::default()
    };
    let mut session = prepared_session(&config);
    session.run_match();
    // 行0の apple だけ外す（行2の apple はチェックのまま）
    session.toggle(0, 0);

    let mut clipboard = RecordingClipboard::default();
    session.copy_checked(&mut clipboard, Instant::now()).unwrap();
    session.copy_unique(&mut clipboard, Instant::now()).unwrap();

    assert_eq!(clipboard.copies[0], "banana\napple\ncherry");
    assert_eq!(clipboard.copies[1], "apple\nbanana\ncherry");
}
