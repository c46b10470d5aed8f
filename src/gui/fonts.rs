use eframe::egui::{self, FontData, FontDefinitions, FontFamily};

/// 韓国語・日本語・中国語の用語を表示できるようにシステムフォントを追加
pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\malgun.ttf",
        r"C:\Windows\Fonts\meiryo.ttc",
        r"C:\Windows\Fonts\msgothic.ttc",
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    ];

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("cjk_fallback".to_string(), FontData::from_owned(data));
            // 末尾に追加する: 先頭に置くとラテン文字や数字まで CJK フォントで描画され、
            // 用語中の英数字の字形が変わってしまう。既定フォントにないグリフだけ補う
            fonts.families
                .entry(FontFamily::Proportional)
                .or_default()
                .push("cjk_fallback".to_string());
            fonts.families
                .entry(FontFamily::Monospace)
                .or_default()
                .push("cjk_fallback".to_string());
            ctx.set_fonts(fonts);
            tracing::debug!(font = path, "CJK fallback font loaded");
            return;
        }
    }
    tracing::warn!("no CJK fallback font found");
}
