use crate::file::FileInput;
use crate::locale::Strings;
use crate::state::Side;
use crate::style::{INDIGO_600, SLATE_300, SLATE_400, SLATE_600, SLATE_800};
use egui::{Color32, CornerRadius, Rect, RichText, Sense, Stroke, StrokeKind, Ui, Vec2};

const ZONE_FILL: Color32 = Color32::WHITE;
const ZONE_FILL_SELECTED: Color32 = Color32::from_rgb(238, 242, 255);
const ZONE_FILL_HOVERED: Color32 = Color32::from_rgb(241, 245, 249);
const ZONE_STROKE_SELECTED: Color32 = Color32::from_rgb(199, 210, 254);

pub struct DropZoneState<'a> {
    pub side: Side,
    pub file: Option<&'a FileInput>,
    pub loading: bool,
    /// Files are being dragged over the window
    pub files_hovering: bool,
    pub strings: &'static Strings,
}

pub struct DropZoneResponse {
    pub rect: Rect,
    pub clicked: bool,
}

pub struct DropZone;

impl DropZone {
    pub fn show(ui: &mut Ui, size: Vec2, state: DropZoneState<'_>) -> DropZoneResponse {
        let DropZoneState {
            side,
            file,
            loading,
            files_hovering,
            strings,
        } = state;

        let (rect, response) = ui.allocate_exact_size(size, Sense::click());
        let pointer_over = response.hovered()
            || (files_hovering
                && ui
                    .input(|i| i.pointer.hover_pos())
                    .is_some_and(|pos| rect.contains(pos)));

        let (fill, stroke) = if pointer_over {
            (ZONE_FILL_HOVERED, Stroke::new(2.0, SLATE_400))
        } else if file.is_some() {
            (ZONE_FILL_SELECTED, Stroke::new(2.0, ZONE_STROKE_SELECTED))
        } else {
            (ZONE_FILL, Stroke::new(2.0, SLATE_300))
        };

        let painter = ui.painter_at(rect);
        painter.rect(
            rect.shrink(1.0),
            CornerRadius::same(16),
            fill,
            stroke,
            StrokeKind::Inside,
        );

        let mut content = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(rect.shrink(24.0))
                .layout(egui::Layout::top_down(egui::Align::Center)),
        );
        content.style_mut().interaction.selectable_labels = false;
        content.add_space((rect.height() / 2.0 - 70.0).max(0.0));

        match file {
            Some(file) => {
                content.label(RichText::new("📄").size(36.0).color(INDIGO_600));
                content.label(RichText::new(&file.name).strong().color(SLATE_800));
                content.label(
                    RichText::new(format!(
                        "{:.2} KB · {} {}",
                        file.size_kb(),
                        file.line_count(),
                        strings.lines
                    ))
                    .monospace()
                    .small()
                    .color(SLATE_400),
                );
                content.label(
                    RichText::new(strings.change_file)
                        .small()
                        .underline()
                        .color(INDIGO_600),
                );
            }
            None => {
                content.label(RichText::new("⬆").size(36.0).color(SLATE_300));
                content.label(
                    RichText::new(strings.side_title(side).to_uppercase())
                        .small()
                        .strong()
                        .color(SLATE_600),
                );
                content.label(RichText::new(strings.drop_hint).color(SLATE_400));
            }
        }

        if loading {
            content.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new(strings.loading).small().color(SLATE_400));
            });
        }

        DropZoneResponse {
            rect,
            clicked: response.clicked(),
        }
    }
}

/// Which zone a dropped file belongs to: the one under the pointer, else the
/// first empty one, else A.
pub fn target_side(
    pointer: Option<egui::Pos2>,
    zones: &[Option<Rect>; 2],
    occupied: [bool; 2],
) -> Side {
    if let Some(pos) = pointer {
        for side in Side::BOTH {
            if zones[side.index()].is_some_and(|rect| rect.contains(pos)) {
                return side;
            }
        }
    }
    Side::BOTH
        .into_iter()
        .find(|side| !occupied[side.index()])
        .unwrap_or(Side::A)
}
