use thiserror::Error;

#[derive(Error, Debug)]
pub enum TermMatchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("CSV解析エラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("ワークブック読み込みエラー: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("シートがありません: {0}")]
    NoSheet(String),

    #[error("クリップボードエラー: {0}")]
    Clipboard(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TermMatchError>;
