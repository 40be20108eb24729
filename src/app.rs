use crate::config::Config;
use crate::constant::{DEFAULT_WINDOW_TITLE, FILE_EXTENSIONS};
use crate::loader::{LoaderMessage, spawn_loader};
use crate::messages::ResponseMessage;
use crate::report;
use crate::state::{Action, DiffState, Phase, Side, Ticket};
use crate::style::{SLATE_400, configure_style};
use crate::ui::diff_view::{DiffView, DiffViewAction};
use crate::ui::drop_zone::{self, DropZone, DropZoneState};
use crate::ui::summary_bar::{SummaryAction, SummaryBar};
use crate::ui::title_bar::{TitleBar, TitleBarAction, TitleBarState};
use egui::{Color32, RichText};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

pub struct DiffStudioApp {
    state: DiffState,
    config: Config,
    diff_view: DiffView,
    loader_sender: Sender<LoaderMessage>,
    response_receiver: Receiver<ResponseMessage>,
    /// Picked paths from file dialogs running on their own threads
    picked_sender: Sender<(Side, PathBuf)>,
    picked_receiver: Receiver<(Side, PathBuf)>,
    next_ticket: Ticket,
    drop_zones: [Option<egui::Rect>; 2],
    /// Compare as soon as both files given on the command line are loaded
    compare_when_ready: bool,
}

impl DiffStudioApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_files: [Option<PathBuf>; 2]) -> Self {
        let config = Config::default();
        configure_style(&cc.egui_ctx, config.settings.font_size);

        let (loader_sender, response_receiver) = spawn_loader(Some(cc.egui_ctx.clone()));
        let (picked_sender, picked_receiver) = std::sync::mpsc::channel();

        let mut app = Self {
            state: DiffState::default(),
            config,
            diff_view: DiffView::default(),
            loader_sender,
            response_receiver,
            picked_sender,
            picked_receiver,
            next_ticket: 0,
            drop_zones: [None, None],
            compare_when_ready: initial_files.iter().all(Option::is_some),
        };

        for (side, path) in Side::BOTH.into_iter().zip(initial_files) {
            if let Some(path) = path {
                app.open_path(side, path);
            }
        }

        app
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
        if self.state.phase() != Phase::Compared {
            self.diff_view.reset();
        }
    }

    fn issue_ticket(&mut self, side: Side) -> Ticket {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.dispatch(Action::LoadStarted(side, ticket));
        ticket
    }

    fn open_path(&mut self, side: Side, path: PathBuf) {
        let ticket = self.issue_ticket(side);
        self.config.add_recent_file(path.clone());
        if let Err(e) = self
            .loader_sender
            .send(LoaderMessage::Open { side, ticket, path })
        {
            tracing::error!("Failed to send open message: {}", e);
        }
    }

    fn open_dropped(&mut self, side: Side, file: egui::DroppedFile) {
        if let Some(path) = file.path {
            self.open_path(side, path);
            return;
        }
        let ticket = self.issue_ticket(side);
        let message = LoaderMessage::Decode {
            side,
            ticket,
            name: file.name,
            bytes: file.bytes,
        };
        if let Err(e) = self.loader_sender.send(message) {
            tracing::error!("Failed to send dropped file: {}", e);
        }
    }

    /// Show the native file dialog without blocking the UI thread
    fn pick_file(&self, side: Side) {
        let sender = self.picked_sender.clone();
        let directory = self.config.dialog_dir();
        std::thread::spawn(move || {
            let mut dialog = rfd::FileDialog::new().add_filter("XML", FILE_EXTENSIONS);
            if let Some(directory) = directory {
                dialog = dialog.set_directory(directory);
            }
            if let Some(path) = dialog.pick_file()
                && let Err(e) = sender.send((side, path))
            {
                tracing::error!("Failed to send picked file: {}", e);
            }
        });
    }

    fn poll_background(&mut self) {
        while let Ok((side, path)) = self.picked_receiver.try_recv() {
            self.open_path(side, path);
        }

        while let Ok(response) = self.response_receiver.try_recv() {
            match response {
                ResponseMessage::FileLoaded {
                    side,
                    ticket,
                    result,
                } => match result {
                    Ok(input) => self.dispatch(Action::FileLoaded(side, ticket, input)),
                    Err(e) => {
                        self.compare_when_ready = false;
                        self.dispatch(Action::LoadFailed(side, ticket, e));
                    }
                },
            }
        }

        let loading = Side::BOTH.iter().any(|side| self.state.is_loading(*side));
        if self.compare_when_ready && !loading && self.state.can_compare() {
            self.compare_when_ready = false;
            self.dispatch(Action::Compare);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (dropped, pointer) =
            ctx.input(|i| (i.raw.dropped_files.clone(), i.pointer.hover_pos()));
        for file in dropped {
            let side = drop_zone::target_side(pointer, &self.drop_zones, self.state.occupied());
            tracing::info!("File dropped on side {}: {}", side, file.name);
            self.open_dropped(side, file);
        }
    }

    fn copy_to_clipboard(&self, ctx: &egui::Context, text: String) {
        tracing::info!("Copied {} bytes to clipboard", text.len());
        ctx.copy_text(text);
    }

    fn file_names(&self) -> [String; 2] {
        Side::BOTH.map(|side| {
            self.state
                .file(side)
                .map(|f| f.name.clone())
                .unwrap_or_default()
        })
    }

    fn handle_title_bar_action(&mut self, ctx: &egui::Context, action: TitleBarAction) {
        match action {
            TitleBarAction::Pick(side) => self.pick_file(side),
            TitleBarAction::OpenRecent(side, path) => self.open_path(side, path),
            TitleBarAction::Reset => {
                self.compare_when_ready = false;
                self.dispatch(Action::Reset);
            }
            TitleBarAction::CopyReport => {
                if let Some(result) = self.state.result() {
                    let [a, b] = self.file_names();
                    let text = report::render_text(result, &a, &b);
                    self.copy_to_clipboard(ctx, text);
                }
            }
            TitleBarAction::CopyJson => {
                if let Some(result) = self.state.result() {
                    let [a, b] = self.file_names();
                    match report::render_json(result, &a, &b) {
                        Ok(json) => self.copy_to_clipboard(ctx, json),
                        Err(e) => tracing::error!("Failed to serialize comparison: {}", e),
                    }
                }
            }
            TitleBarAction::ToggleCharHighlight => {
                self.config.settings.char_highlight = !self.config.settings.char_highlight;
                self.config.save_in_background();
            }
            TitleBarAction::SetLocale(locale) => {
                self.config.settings.locale = locale;
                self.config.save_in_background();
            }
        }
    }

    fn show_selection(&mut self, ui: &mut egui::Ui, files_hovering: bool) {
        let strings = self.config.settings.locale.strings();
        let spacing = ui.spacing().item_spacing.x * 2.0;
        let zone_size = egui::vec2(
            ((ui.available_width() - spacing) / 2.0).max(100.0),
            (ui.available_height() - 140.0).clamp(160.0, 400.0),
        );

        let mut clicked = None;
        ui.horizontal(|ui| {
            for side in Side::BOTH {
                let response = DropZone::show(
                    ui,
                    zone_size,
                    DropZoneState {
                        side,
                        file: self.state.file(side),
                        loading: self.state.is_loading(side),
                        files_hovering,
                        strings,
                    },
                );
                self.drop_zones[side.index()] = Some(response.rect);
                if response.clicked {
                    clicked = Some(side);
                }
            }
        });
        if let Some(side) = clicked {
            self.pick_file(side);
        }

        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(
                RichText::new(format!("⇄  {}", strings.compare))
                    .strong()
                    .size(16.0)
                    .color(Color32::WHITE),
            )
            .fill(crate::style::SLATE_800)
            .min_size(egui::vec2(240.0, 48.0));
            if ui.add_enabled(self.state.can_compare(), button).clicked() {
                self.dispatch(Action::Compare);
            }
        });
    }

    fn show_error(&mut self, ui: &mut egui::Ui) {
        let Some(error) = self.state.error() else {
            return;
        };
        let strings = self.config.settings.locale.strings();
        let message = strings.error_message(error);

        let mut dismiss = false;
        egui::Frame::new()
            .fill(Color32::from_rgb(254, 242, 242))
            .stroke(egui::Stroke::new(1.0, Color32::from_rgb(254, 226, 226)))
            .corner_radius(egui::CornerRadius::same(12))
            .inner_margin(egui::Margin::symmetric(16, 10))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("⚠ {}", message))
                            .strong()
                            .color(Color32::from_rgb(220, 38, 38)),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(strings.dismiss).clicked() {
                            dismiss = true;
                        }
                    });
                });
            });
        if dismiss {
            self.dispatch(Action::DismissError);
        }
        ui.add_space(8.0);
    }
}

impl eframe::App for DiffStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background();
        self.handle_dropped_files(ctx);

        let settings = &self.config.settings;
        let strings = settings.locale.strings();
        let files_hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        // Title Bar
        let title_action = egui::TopBottomPanel::top("title_bar_panel")
            .show(ctx, |ui| {
                ui.add_space(4.0);
                let action = TitleBar::show(
                    ui,
                    TitleBarState {
                        title: DEFAULT_WINDOW_TITLE,
                        strings,
                        locale: settings.locale,
                        has_result: self.state.result().is_some(),
                        char_highlight: settings.char_highlight,
                        recent_files: &settings.recent_files,
                    },
                );
                ui.add_space(4.0);
                action
            })
            .inner;
        if let Some(action) = title_action {
            self.handle_title_bar_action(ctx, action);
        }

        // Footer
        egui::TopBottomPanel::bottom("footer_panel").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(strings.footer.to_uppercase()).small().color(SLATE_400));
            });
        });

        // Main Content
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_error(ui);

            let strings = self.config.settings.locale.strings();
            let char_highlight = self.config.settings.char_highlight;
            let names = self.file_names();

            let Some(result) = self.state.result() else {
                self.show_selection(ui, files_hovering);
                return;
            };

            let summary_action = SummaryBar::show(
                ui,
                &result.summary,
                [names[0].as_str(), names[1].as_str()],
                strings,
            );
            match summary_action {
                Some(SummaryAction::NextDifference) => self.diff_view.next_difference(result),
                Some(SummaryAction::PreviousDifference) => {
                    self.diff_view.previous_difference(result)
                }
                None => {}
            }
            ui.add_space(8.0);

            if let Some(DiffViewAction::CopyContent(side)) =
                self.diff_view.show(ui, result, strings, char_highlight)
                && let Some(file) = self.state.file(side)
            {
                self.copy_to_clipboard(ctx, file.content.clone());
            }
        });
    }
}
