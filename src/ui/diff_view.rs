//! Side-by-side diff panes
//!
//! Both panes are painted row by row inside a single scroll area, so they
//! always scroll together and row `i` of A sits next to row `i` of B.

use crate::differ::{self, ClassifiedLine, Comparison, RowChange};
use crate::locale::Strings;
use crate::state::Side;
use crate::style::{INDIGO_600, SLATE_200, SLATE_300, SLATE_400, SLATE_600};
use egui::text::LayoutJob;
use egui::{
    Align2, Color32, FontId, Rect, RichText, ScrollArea, Sense, Stroke, StrokeKind, TextFormat,
    TextStyle, Ui, pos2, vec2,
};
use std::collections::HashMap;
use std::ops::Range;

const GUTTER_WIDTH: f32 = 44.0;
const TEXT_PADDING: f32 = 8.0;
const ROW_PADDING: f32 = 6.0;

const REMOVED_LINE_BG: Color32 = Color32::from_rgb(254, 242, 242);
const ADDED_LINE_BG: Color32 = Color32::from_rgb(240, 253, 244);
const FILLER_BG: Color32 = Color32::from_rgb(241, 245, 249);
const REMOVED_CHAR_BG: Color32 = Color32::from_rgb(254, 202, 202);
const ADDED_CHAR_BG: Color32 = Color32::from_rgb(187, 247, 208);
const REMOVED_TEXT_COLOR: Color32 = Color32::from_rgb(185, 28, 28);
const ADDED_TEXT_COLOR: Color32 = Color32::from_rgb(21, 128, 61);

pub enum DiffViewAction {
    CopyContent(Side),
}

/// How one cell of a row is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellStyle {
    Plain,
    Removed,
    Added,
    /// The side ran out of lines at this row
    Filler,
}

fn cell_style(side: Side, change: RowChange) -> CellStyle {
    match (side, change) {
        (_, RowChange::Unchanged) => CellStyle::Plain,
        (Side::A, RowChange::Added) | (Side::B, RowChange::Removed) => CellStyle::Filler,
        (Side::A, _) => CellStyle::Removed,
        (Side::B, _) => CellStyle::Added,
    }
}

/// Highlighted byte ranges of a changed row: removed in A, added in B
type RowSpans = (Vec<Range<usize>>, Vec<Range<usize>>);

#[derive(Default)]
pub struct DiffView {
    selected: Option<usize>,
    scroll_to: Option<usize>,
    /// Character spans of changed rows already drawn for the current comparison
    spans: HashMap<usize, RowSpans>,
}

impl DiffView {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn next_difference(&mut self, comparison: &Comparison) {
        self.select(comparison.next_difference(self.selected));
    }

    pub fn previous_difference(&mut self, comparison: &Comparison) {
        self.select(comparison.previous_difference(self.selected));
    }

    fn row_spans(&mut self, comparison: &Comparison, row: usize) -> &RowSpans {
        self.spans.entry(row).or_insert_with(|| {
            differ::char_changes(&comparison.left[row].text, &comparison.right[row].text)
        })
    }

    fn select(&mut self, row: Option<usize>) {
        if row.is_some() {
            self.selected = row;
            self.scroll_to = row;
        }
    }

    pub fn show(
        &mut self,
        ui: &mut Ui,
        comparison: &Comparison,
        strings: &'static Strings,
        char_highlight: bool,
    ) -> Option<DiffViewAction> {
        let mut action = None;

        egui::Frame::new()
            .fill(Color32::WHITE)
            .stroke(Stroke::new(1.0, SLATE_200))
            .corner_radius(egui::CornerRadius::same(16))
            .show(ui, |ui| {
                ui.set_min_size(ui.available_size());

                ui.columns(2, |columns| {
                    for side in Side::BOTH {
                        let ui = &mut columns[side.index()];
                        ui.horizontal(|ui| {
                            ui.add_space(TEXT_PADDING);
                            ui.label(
                                RichText::new(strings.side_title(side).to_uppercase())
                                    .small()
                                    .strong()
                                    .color(SLATE_400),
                            );
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.add_space(TEXT_PADDING);
                                if ui.small_button("📋").on_hover_text(strings.copy_all).clicked() {
                                    action = Some(DiffViewAction::CopyContent(side));
                                }
                            });
                        });
                    }
                });
                ui.separator();

                self.show_rows(ui, comparison, char_highlight);
            });

        action
    }

    fn show_rows(&mut self, ui: &mut Ui, comparison: &Comparison, char_highlight: bool) {
        let font_id = TextStyle::Monospace.resolve(ui.style());
        let row_height = ui.text_style_height(&TextStyle::Monospace) + ROW_PADDING;
        ui.spacing_mut().item_spacing.y = 0.0;

        let mut scroll = ScrollArea::vertical()
            .id_salt("diff_rows")
            .auto_shrink([false, false]);
        if let Some(row) = self.scroll_to.take() {
            let offset = row as f32 * row_height - ui.available_height() / 2.0;
            scroll = scroll.vertical_scroll_offset(offset.max(0.0));
        }

        scroll.show_rows(ui, row_height, comparison.len(), |ui, range| {
            for i in range {
                let selected = self.selected == Some(i);
                let change = comparison.changes[i];
                let spans = if char_highlight && change == RowChange::Changed {
                    Some(self.row_spans(comparison, i))
                } else {
                    None
                };
                let clicked = paint_row(
                    ui,
                    &comparison.left[i],
                    &comparison.right[i],
                    change,
                    RowLook {
                        font_id: &font_id,
                        height: row_height,
                        selected,
                        spans,
                    },
                );
                if clicked {
                    self.selected = Some(i);
                }
            }
        });
    }
}

struct RowLook<'a> {
    font_id: &'a FontId,
    height: f32,
    selected: bool,
    spans: Option<&'a RowSpans>,
}

/// Paint one row of both panes; returns whether it was clicked
fn paint_row(
    ui: &mut Ui,
    left: &ClassifiedLine,
    right: &ClassifiedLine,
    change: RowChange,
    look: RowLook<'_>,
) -> bool {
    let (rect, response) =
        ui.allocate_exact_size(vec2(ui.available_width(), look.height), Sense::click());
    if !ui.is_rect_visible(rect) {
        return response.clicked();
    }

    let half = rect.width() / 2.0;
    let left_rect = Rect::from_min_size(rect.min, vec2(half, rect.height()));
    let right_rect = Rect::from_min_max(pos2(rect.min.x + half, rect.min.y), rect.max);

    let (removed_spans, added_spans) = match look.spans {
        Some((removed, added)) => (removed.as_slice(), added.as_slice()),
        None => (&[][..], &[][..]),
    };

    let left_style = cell_style(Side::A, change);
    let right_style = cell_style(Side::B, change);
    let left_clipped = paint_cell(ui, left_rect, left, left_style, removed_spans, look.font_id);
    let right_clipped = paint_cell(ui, right_rect, right, right_style, added_spans, look.font_id);

    let painter = ui.painter();
    painter.vline(
        rect.min.x + half,
        rect.y_range(),
        Stroke::new(1.0, SLATE_200),
    );
    if look.selected {
        painter.rect_stroke(rect, 0.0, Stroke::new(1.5, INDIGO_600), StrokeKind::Inside);
    }

    let clicked = response.clicked();
    if left_clipped || right_clipped {
        response.on_hover_ui(|ui| {
            ui.label(RichText::new(format!("A: {}", left.text)).monospace());
            ui.label(RichText::new(format!("B: {}", right.text)).monospace());
        });
    }
    clicked
}

/// Paint the gutter and text of one cell; returns whether the text was cut off
fn paint_cell(
    ui: &Ui,
    rect: Rect,
    line: &ClassifiedLine,
    style: CellStyle,
    spans: &[Range<usize>],
    font_id: &FontId,
) -> bool {
    let painter = ui.painter_at(rect);

    let (bg, text_color, span_bg) = match style {
        CellStyle::Plain => (Color32::TRANSPARENT, SLATE_600, Color32::TRANSPARENT),
        CellStyle::Removed => (REMOVED_LINE_BG, REMOVED_TEXT_COLOR, REMOVED_CHAR_BG),
        CellStyle::Added => (ADDED_LINE_BG, ADDED_TEXT_COLOR, ADDED_CHAR_BG),
        CellStyle::Filler => (FILLER_BG, SLATE_300, Color32::TRANSPARENT),
    };
    painter.rect_filled(rect, 0.0, bg);

    let gutter = Rect::from_min_size(rect.min, vec2(GUTTER_WIDTH, rect.height()));
    painter.vline(gutter.max.x, gutter.y_range(), Stroke::new(1.0, SLATE_200));
    painter.text(
        gutter.right_center() - vec2(TEXT_PADDING / 2.0, 0.0),
        Align2::RIGHT_CENTER,
        line.position.to_string(),
        FontId::monospace(font_id.size * 0.8),
        SLATE_300,
    );

    if style == CellStyle::Filler {
        return false;
    }

    let job = highlight_job(&line.text, spans, font_id, text_color, span_bg);
    let galley = painter.layout_job(job);
    let text_rect = Rect::from_min_max(
        pos2(gutter.max.x + TEXT_PADDING, rect.min.y),
        pos2(rect.max.x - TEXT_PADDING, rect.max.y),
    );
    let pos = pos2(text_rect.min.x, rect.center().y - galley.size().y / 2.0);
    let clipped = galley.size().x > text_rect.width();
    painter
        .with_clip_rect(text_rect)
        .galley(pos, galley, text_color);
    clipped
}

/// Text with the given byte spans drawn on a highlighted background
fn highlight_job(
    text: &str,
    spans: &[Range<usize>],
    font_id: &FontId,
    color: Color32,
    span_bg: Color32,
) -> LayoutJob {
    let plain = TextFormat {
        font_id: font_id.clone(),
        color,
        ..Default::default()
    };
    let highlighted = TextFormat {
        background: span_bg,
        ..plain.clone()
    };

    let mut job = LayoutJob::default();
    let mut cursor = 0;
    for span in spans {
        if span.start > cursor {
            job.append(&text[cursor..span.start], 0.0, plain.clone());
        }
        job.append(&text[span.clone()], 0.0, highlighted.clone());
        cursor = span.end;
    }
    if cursor < text.len() || text.is_empty() {
        job.append(&text[cursor..], 0.0, plain);
    }
    job
}
