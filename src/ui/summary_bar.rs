use crate::differ::DiffSummary;
use crate::locale::Strings;
use crate::style::{SLATE_200, SLATE_400};
use egui::{Align, Color32, CornerRadius, Layout, RichText, Ui};

pub const ADDED_CHIP: (Color32, Color32) = (
    Color32::from_rgb(240, 253, 244),
    Color32::from_rgb(21, 128, 61),
);
pub const REMOVED_CHIP: (Color32, Color32) = (
    Color32::from_rgb(254, 242, 242),
    Color32::from_rgb(185, 28, 28),
);
pub const CHANGED_CHIP: (Color32, Color32) = (
    Color32::from_rgb(255, 251, 235),
    Color32::from_rgb(180, 83, 9),
);

pub enum SummaryAction {
    PreviousDifference,
    NextDifference,
}

pub struct SummaryBar;

impl SummaryBar {
    pub fn show(
        ui: &mut Ui,
        summary: &DiffSummary,
        names: [&str; 2],
        strings: &'static Strings,
    ) -> Option<SummaryAction> {
        let mut action = None;

        egui::Frame::new()
            .fill(Color32::WHITE)
            .stroke(egui::Stroke::new(1.0, SLATE_200))
            .corner_radius(CornerRadius::same(12))
            .inner_margin(egui::Margin::symmetric(16, 8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(strings.statistics.to_uppercase())
                            .small()
                            .strong()
                            .color(SLATE_400),
                    );
                    chip(ui, format!("+{} {}", summary.added, strings.added), ADDED_CHIP);
                    chip(ui, format!("-{} {}", summary.removed, strings.removed), REMOVED_CHIP);
                    chip(ui, format!("{} {}", summary.changed, strings.changed), CHANGED_CHIP);

                    if summary.total() == 0 {
                        ui.label(RichText::new(format!("✔ {}", strings.identical)).color(ADDED_CHIP.1));
                    } else {
                        if ui
                            .small_button("⬆")
                            .on_hover_text(strings.previous_difference)
                            .clicked()
                        {
                            action = Some(SummaryAction::PreviousDifference);
                        }
                        if ui
                            .small_button("⬇")
                            .on_hover_text(strings.next_difference)
                            .clicked()
                        {
                            action = Some(SummaryAction::NextDifference);
                        }
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        for (side, name) in ["B", "A"].into_iter().zip(names.into_iter().rev()) {
                            ui.label(
                                RichText::new(format!("{}: {}", side, name))
                                    .monospace()
                                    .small()
                                    .color(SLATE_400),
                            );
                        }
                    });
                });
            });

        action
    }
}

fn chip(ui: &mut Ui, text: String, (fill, color): (Color32, Color32)) {
    egui::Frame::new()
        .fill(fill)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(10, 3))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small().strong().color(color));
        });
}
