use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use term_match_common::SelectionMode;

use crate::config::Config;

#[derive(Parser, Debug, Default)]
#[command(name = "term-match")]
#[command(about = "テームベース用語を更新文書から抽出する", long_about = None)]
pub struct Cli {
    /// 起動時に読み込むテームベースファイル
    #[arg(short, long)]
    pub termbase: Option<PathBuf>,

    /// 起動時に読み込む更新ファイル
    #[arg(short, long)]
    pub update: Option<PathBuf>,

    /// チェック状態の連動範囲 (global/local)
    #[arg(short, long)]
    pub mode: Option<ModeArg>,

    /// テームベースの1行目をデータとして扱う
    #[arg(long)]
    pub termbase_no_header: bool,

    /// 更新ファイルの1行目をデータとして扱う
    #[arg(long)]
    pub update_no_header: bool,

    /// 詳細ログを出力
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Global,
    Local,
}

impl From<ModeArg> for SelectionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Global => SelectionMode::Global,
            ModeArg::Local => SelectionMode::Local,
        }
    }
}

impl Cli {
    /// コマンドライン指定で設定を上書き
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.selection_mode = mode.into();
        }
        if self.termbase_no_header {
            config.termbase_has_header = false;
        }
        if self.update_no_header {
            config.update_has_header = false;
        }
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
