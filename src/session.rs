//! UIセッションの状態
//!
//! 2つの表（テームベース・更新文書）の読み込み結果と列選択、
//! 照合結果のチェック状態、コピー完了通知をまとめて保持する。
//! 描画層から独立しているので、UIなしでテストできる。

use std::time::{Duration, Instant};

use term_match_common::{matcher, MatchRequest, Selection, SelectionMode, Table};

use crate::clipboard::ClipboardSink;
use crate::config::Config;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Termbase,
    Update,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Termbase => "Termbase",
            Side::Update => "Update",
        }
    }
}

/// 読み込んだ表と列・ヘッダー指定
#[derive(Debug, Clone, Default)]
pub struct TableSlot {
    pub file_name: String,
    pub table: Table,
    pub column: usize,
    pub has_header: bool,
}

impl TableSlot {
    fn with_header(has_header: bool) -> Self {
        Self {
            has_header,
            ..Default::default()
        }
    }

    pub fn is_loaded(&self) -> bool {
        !self.file_name.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    termbase: TableSlot,
    update: TableSlot,
    mode: SelectionMode,
    selection: Option<Selection>,
    notice_duration: Duration,
    copied_at: Option<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            termbase: TableSlot::with_header(config.termbase_has_header),
            update: TableSlot::with_header(config.update_has_header),
            mode: config.selection_mode,
            selection: None,
            notice_duration: Duration::from_millis(config.copy_notice_ms),
            copied_at: None,
        }
    }

    pub fn slot(&self, side: Side) -> &TableSlot {
        match side {
            Side::Termbase => &self.termbase,
            Side::Update => &self.update,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut TableSlot {
        match side {
            Side::Termbase => &mut self.termbase,
            Side::Update => &mut self.update,
        }
    }

    /// 表を差し替える（列選択は先頭に戻し、古い照合結果は破棄）
    pub fn set_table(&mut self, side: Side, file_name: impl Into<String>, table: Table) {
        let slot = self.slot_mut(side);
        slot.file_name = file_name.into();
        slot.table = table;
        slot.column = 0;
        self.selection = None;
    }

    pub fn set_column(&mut self, side: Side, column: usize) {
        self.slot_mut(side).column = column;
    }

    pub fn set_has_header(&mut self, side: Side, has_header: bool) {
        self.slot_mut(side).has_header = has_header;
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        if let Some(selection) = &mut self.selection {
            selection.set_mode(mode);
        }
    }

    /// 照合を実行して結果を置き換える（結果行数を返す）
    pub fn run_match(&mut self) -> usize {
        let request = MatchRequest {
            termbase: &self.termbase.table,
            termbase_column: self.termbase.column,
            termbase_has_header: self.termbase.has_header,
            update: &self.update.table,
            update_column: self.update.column,
            update_has_header: self.update.has_header,
        };
        let results = matcher::run(&request);
        let count = results.len();
        tracing::info!(
            termbase = %self.termbase.file_name,
            update = %self.update.file_name,
            matched_rows = count,
            "match run finished"
        );
        self.selection = Some(Selection::new(results, self.mode));
        count
    }

    /// 直近の照合結果（未実行なら None）
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn toggle(&mut self, row: usize, slot: usize) {
        if let Some(selection) = &mut self.selection {
            selection.toggle(row, slot);
        }
    }

    pub fn toggle_row(&mut self, row: usize) {
        if let Some(selection) = &mut self.selection {
            selection.toggle_row(row);
        }
    }

    pub fn set_all(&mut self, checked: bool) {
        if let Some(selection) = &mut self.selection {
            selection.set_all(checked);
        }
    }

    /// チェック済み用語のテキスト
    pub fn export_text(&self) -> String {
        self.selection
            .as_ref()
            .map(term_match_common::checked_text)
            .unwrap_or_default()
    }

    /// チェック状態に関係なく検出された全用語のテキスト
    pub fn unique_text(&self) -> String {
        self.selection
            .as_ref()
            .map(|s| term_match_common::unique_text(s.results()))
            .unwrap_or_default()
    }

    /// チェック済み用語をコピー
    pub fn copy_checked(&mut self, clipboard: &mut dyn ClipboardSink, now: Instant) -> Result<()> {
        let text = self.export_text();
        self.copy_text(clipboard, &text, now)
    }

    /// 検出された全用語をコピー
    pub fn copy_unique(&mut self, clipboard: &mut dyn ClipboardSink, now: Instant) -> Result<()> {
        let text = self.unique_text();
        self.copy_text(clipboard, &text, now)
    }

    fn copy_text(&mut self, clipboard: &mut dyn ClipboardSink, text: &str, now: Instant) -> Result<()> {
        clipboard.set_text(text)?;
        self.copied_at = Some(now);
        tracing::info!(terms = text.lines().count(), "terms copied");
        Ok(())
    }

    /// コピー完了通知の残り表示時間（非表示なら None）
    pub fn notice_remaining(&self, now: Instant) -> Option<Duration> {
        let copied_at = self.copied_at?;
        self.notice_duration
            .checked_sub(now.saturating_duration_since(copied_at))
            .filter(|d| !d.is_zero())
    }

    pub fn notice_visible(&self, now: Instant) -> bool {
        self.notice_remaining(now).is_some()
    }
}
