//! Term Match
//!
//! テームベース（用語集）と更新文書の2つの表を読み込み、
//! 更新文書の各行に含まれる用語を抽出してクリップボードにコピーする。

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod gui;
pub mod loader;
pub mod session;

pub use term_match_common as common;
