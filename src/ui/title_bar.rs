use crate::locale::{Locale, Strings};
use crate::state::Side;
use crate::style::{SLATE_400, SLATE_800};
use egui::{Align, Layout, RichText, Ui};
use std::path::PathBuf;

pub enum TitleBarAction {
    Pick(Side),
    OpenRecent(Side, PathBuf),
    Reset,
    CopyReport,
    CopyJson,
    ToggleCharHighlight,
    SetLocale(Locale),
}

pub struct TitleBar;

pub struct TitleBarState<'a> {
    pub title: &'a str,
    pub strings: &'static Strings,
    pub locale: Locale,
    pub has_result: bool,
    pub char_highlight: bool,
    pub recent_files: &'a [PathBuf],
}

impl TitleBar {
    pub fn show(ui: &mut Ui, state: TitleBarState<'_>) -> Option<TitleBarAction> {
        let TitleBarState {
            title,
            strings,
            locale,
            has_result,
            char_highlight,
            recent_files,
        } = state;

        let mut action = None;

        ui.horizontal(|ui| {
            ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).strong().size(18.0).color(SLATE_800));
                    ui.label(RichText::new(strings.subtitle).small().color(SLATE_400));
                });
                ui.add_space(16.0);

                for side in Side::BOTH {
                    let label = format!("📂 {}", side);
                    ui.menu_button(label, |ui| {
                        if !recent_files.is_empty() {
                            ui.label(RichText::new(strings.recent_files).small());
                        }
                        for path in recent_files {
                            let file_name = path
                                .file_name()
                                .and_then(|n| n.to_str())
                                .unwrap_or("Unknown");
                            let path_str = path.to_string_lossy();
                            if ui
                                .button(file_name)
                                .on_hover_text(path_str.as_ref())
                                .clicked()
                            {
                                action = Some(TitleBarAction::OpenRecent(side, path.clone()));
                                ui.close();
                            }
                        }
                        if !recent_files.is_empty() {
                            ui.separator();
                        }
                        if ui.button(strings.open_file).clicked() {
                            action = Some(TitleBarAction::Pick(side));
                            ui.close();
                        }
                    })
                    .response
                    .on_hover_text(format!("{} {}", strings.open, strings.side_title(side)));
                }

                ui.menu_button("⚙", |ui| {
                    let mut highlight = char_highlight;
                    if ui.checkbox(&mut highlight, strings.char_highlight).changed() {
                        action = Some(TitleBarAction::ToggleCharHighlight);
                    }
                    ui.separator();
                    ui.label(RichText::new(strings.language).small());
                    for option in Locale::ALL {
                        if ui
                            .selectable_label(option == locale, option.native_name())
                            .clicked()
                        {
                            action = Some(TitleBarAction::SetLocale(option));
                            ui.close();
                        }
                    }
                })
                .response
                .on_hover_text(strings.settings);
            });

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if !has_result {
                    return;
                }
                if ui.button(format!("🗑 {}", strings.reset)).clicked() {
                    action = Some(TitleBarAction::Reset);
                }
                ui.menu_button("📋", |ui| {
                    if ui.button(strings.copy_report).clicked() {
                        action = Some(TitleBarAction::CopyReport);
                        ui.close();
                    }
                    if ui.button(strings.copy_json).clicked() {
                        action = Some(TitleBarAction::CopyJson);
                        ui.close();
                    }
                })
                .response
                .on_hover_text(strings.copy_report);
            });
        });

        action
    }
}
