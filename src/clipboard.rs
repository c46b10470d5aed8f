//! クリップボード書き込み
//!
//! arboard でシステムクリップボードに書き込む。セッション側はトレイト経由で
//! 使うので、テストではメモリ上の実装に差し替えられる。

use crate::error::{Result, TermMatchError};
use arboard::Clipboard;

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// システムクリップボード
///
/// Linux ではコピー元のハンドルが生きている間だけ内容が保持されるため、
/// 初回使用時に開いたハンドルを保持し続ける。
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            let clipboard = Clipboard::new().map_err(|e| {
                TermMatchError::Clipboard(format!("クリップボードにアクセスできません: {e}"))
            })?;
            self.inner = Some(clipboard);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(TermMatchError::Clipboard("クリップボードが初期化されていません".into()));
        };
        clipboard
            .set_text(text)
            .map_err(|e| TermMatchError::Clipboard(format!("コピーに失敗: {e}")))?;
        tracing::debug!(bytes = text.len(), "copied to clipboard");
        Ok(())
    }
}
