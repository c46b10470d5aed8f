use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use eframe::egui::{self, Color32, RichText};
use term_match_common::{SelectionMode, Table};

use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::config::Config;
use crate::error::Result;
use crate::loader::{load_table, SUPPORTED_EXTENSIONS};
use crate::session::{Session, Side};

const RESULTS_MAX_HEIGHT: f32 = 400.0;

pub struct DesktopApp {
    session: Session,
    clipboard: SystemClipboard,
    status: String,
    loading: Vec<Side>,
    load_tx: Sender<UiMessage>,
    load_rx: Receiver<UiMessage>,
}

enum UiMessage {
    Loaded {
        side: Side,
        file_name: String,
        result: std::result::Result<Table, String>,
    },
}

/// 結果表の操作（描画後にまとめて適用）
enum ResultAction {
    Toggle { row: usize, slot: usize },
    ToggleRow(usize),
    SetAll(bool),
}

/// arboard が使えない環境向けに egui の出力へコピーする
struct EguiClipboard<'a>(&'a egui::Context);

impl ClipboardSink for EguiClipboard<'_> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.0.output_mut(|o| o.copied_text = text.to_string());
        Ok(())
    }
}

impl DesktopApp {
    pub fn new(config: &Config) -> Self {
        let (load_tx, load_rx) = mpsc::channel();
        Self {
            session: Session::new(config),
            clipboard: SystemClipboard::default(),
            status: String::new(),
            loading: Vec::new(),
            load_tx,
            load_rx,
        }
    }

    fn open_file(&mut self, side: Side) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Table", SUPPORTED_EXTENSIONS)
            .pick_file()
        {
            self.load_in_background(side, path);
        }
    }

    /// ファイル読み込みをワーカースレッドで実行
    pub fn load_in_background(&mut self, side: Side, path: PathBuf) {
        if self.loading.contains(&side) {
            return;
        }
        self.loading.push(side);
        self.status = format!("Loading {}...", display_name(&path));

        let sender = self.load_tx.clone();
        std::thread::spawn(move || {
            let result = load_table(&path).map_err(|err| err.to_string());
            let _ = sender.send(UiMessage::Loaded {
                side,
                file_name: display_name(&path),
                result,
            });
        });
    }

    fn poll_messages(&mut self) {
        while let Ok(msg) = self.load_rx.try_recv() {
            let UiMessage::Loaded { side, file_name, result } = msg;
            self.loading.retain(|s| *s != side);
            match result {
                Ok(table) => {
                    self.status = format!("Loaded {file_name} ({} rows)", table.len());
                    self.session.set_table(side, file_name, table);
                }
                Err(err) => {
                    tracing::warn!(side = side.label(), %err, "load failed");
                    self.status = format!("Load failed: {err}");
                }
            }
        }
    }

    fn run_match(&mut self) {
        let count = self.session.run_match();
        self.status = if count == 0 {
            "No matching lines".to_string()
        } else {
            format!("{count} matching lines")
        };
    }

    fn copy(&mut self, ctx: &egui::Context, checked_only: bool) {
        let now = Instant::now();
        let copied = if checked_only {
            self.session.copy_checked(&mut self.clipboard, now)
        } else {
            self.session.copy_unique(&mut self.clipboard, now)
        };

        if let Err(err) = copied {
            tracing::warn!(%err, "system clipboard unavailable, using egui output");
            let mut fallback = EguiClipboard(ctx);
            let retried = if checked_only {
                self.session.copy_checked(&mut fallback, now)
            } else {
                self.session.copy_unique(&mut fallback, now)
            };
            if let Err(err) = retried {
                self.status = format!("Copy failed: {err}");
            }
        }
    }

    fn render_slot(&mut self, ui: &mut egui::Ui, side: Side, heading: &str) {
        ui.label(RichText::new(heading).strong().size(16.0));
        ui.horizontal(|ui| {
            let loading = self.loading.contains(&side);
            if ui
                .add_enabled(!loading, egui::Button::new(format!("Open {} file", side.label())))
                .clicked()
            {
                self.open_file(side);
            }
            if loading {
                ui.spinner();
            }
            let slot = self.session.slot(side);
            if slot.is_loaded() {
                ui.label("Selected file:");
                ui.label(RichText::new(&slot.file_name).strong())
                    .on_hover_text(format!("File name: {}", slot.file_name));
            }
        });

        let slot = self.session.slot(side);
        let options = slot.table.column_options();
        if options.is_empty() {
            return;
        }

        let (current_column, current_header) = (slot.column, slot.has_header);
        let mut column = current_column;
        let mut has_header = current_header;
        let selected_text = options
            .get(column)
            .map(|o| format!("{}: {}", o.label, o.sample))
            .unwrap_or_default();

        ui.horizontal(|ui| {
            ui.label(format!("{} column", side.label()));
            egui::ComboBox::from_id_source(("column", side.label()))
                .selected_text(selected_text)
                .width(320.0)
                .show_ui(ui, |ui| {
                    for option in &options {
                        ui.selectable_value(
                            &mut column,
                            option.index,
                            format!("{}: {}", option.label, option.sample),
                        );
                    }
                });
        });
        ui.checkbox(&mut has_header, "First row is a header");

        if column != current_column {
            self.session.set_column(side, column);
        }
        if has_header != current_header {
            self.session.set_has_header(side, has_header);
        }
    }

    fn render_results(&self, ui: &mut egui::Ui) -> Vec<ResultAction> {
        let mut actions = Vec::new();
        let Some(selection) = self.session.selection() else {
            return actions;
        };
        if selection.is_empty() {
            return actions;
        }

        ui.add_space(16.0);
        ui.horizontal(|ui| {
            ui.heading("Matches by line");
            if ui.small_button("Check all").clicked() {
                actions.push(ResultAction::SetAll(true));
            }
            if ui.small_button("Clear all").clicked() {
                actions.push(ResultAction::SetAll(false));
            }
        });

        egui::ScrollArea::vertical()
            .max_height(RESULTS_MAX_HEIGHT)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new("match_results")
                    .striped(true)
                    .num_columns(3)
                    .min_col_width(40.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new("Line").strong());
                        ui.label(RichText::new("Matched terms").strong());
                        ui.label(RichText::new("Text").strong());
                        ui.end_row();

                        for (row, result) in selection.results().iter().enumerate() {
                            if ui
                                .small_button((row + 1).to_string())
                                .on_hover_text("Toggle every term in this line")
                                .clicked()
                            {
                                actions.push(ResultAction::ToggleRow(row));
                            }
                            ui.horizontal_wrapped(|ui| {
                                for (slot, term) in result.matched_terms.iter().enumerate() {
                                    let mut checked = selection.is_checked(row, slot);
                                    let text = RichText::new(term).color(Color32::from_rgb(96, 150, 240));
                                    if ui
                                        .checkbox(&mut checked, text)
                                        .on_hover_text("Click to select this term")
                                        .changed()
                                    {
                                        actions.push(ResultAction::Toggle { row, slot });
                                    }
                                }
                            });
                            ui.label(&result.source_line);
                            ui.end_row();
                        }
                    });
            });

        actions
    }

    fn render_export(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let Some(selection) = self.session.selection() else {
            return;
        };
        if selection.is_empty() {
            return;
        }
        let term_count = selection.checked_terms().len();

        ui.add_space(16.0);
        ui.horizontal(|ui| {
            ui.heading(format!("Detected terms ({term_count})"));
            if ui.button("Copy").on_hover_text("Copy the checked terms").clicked() {
                self.copy(ctx, true);
            }
            if ui
                .button("Copy all")
                .on_hover_text("Copy every detected term, ignoring checkboxes")
                .clicked()
            {
                self.copy(ctx, false);
            }
            let now = Instant::now();
            if let Some(remaining) = self.session.notice_remaining(now) {
                ui.label(RichText::new("Copied!").color(Color32::from_rgb(120, 200, 120)));
                ctx.request_repaint_after(remaining);
            }
        });

        let text = self.session.export_text();
        ui.add(
            egui::TextEdit::multiline(&mut text.as_str())
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        )
        .on_hover_text("The checked terms are listed here");
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.loading.is_empty() {
            ctx.request_repaint();
        }
        self.poll_messages();

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Term Match Extractor");
                ui.add_space(8.0);

                let mut global = self.session.mode() == SelectionMode::Global;
                if ui
                    .checkbox(&mut global, "Apply check state to every line (global check)")
                    .changed()
                {
                    let mode = if global { SelectionMode::Global } else { SelectionMode::Local };
                    self.session.set_mode(mode);
                }

                ui.separator();
                self.render_slot(ui, Side::Termbase, "1. Termbase file");
                ui.separator();
                self.render_slot(ui, Side::Update, "2. Update file");
                ui.separator();

                if ui
                    .add_enabled(self.loading.is_empty(), egui::Button::new("Extract terms"))
                    .clicked()
                {
                    self.run_match();
                }

                for action in self.render_results(ui) {
                    match action {
                        ResultAction::Toggle { row, slot } => self.session.toggle(row, slot),
                        ResultAction::ToggleRow(row) => self.session.toggle_row(row),
                        ResultAction::SetAll(checked) => self.session.set_all(checked),
                    }
                }

                self.render_export(ui, ctx);
            });
        });
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
