/// Custom egui Widgets
///
/// Painter-based pieces of the launcher surface:
/// - app tiles (grid) and rows (narrow list) with icon dispatch
/// - category chips and headings
/// - overlay scrollbar
/// - assistant panel

use crate::models::{AppEntry, Icon};
use crate::theme::palette::parse_css_color;
use crate::theme::Palette;
use crate::ui::scroll::ThumbGeometry;
use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, Rounding, Sense, Stroke, Vec2};

pub const TILE_ICON_SIZE: f32 = 64.0;
pub const LIST_ICON_SIZE: f32 = 48.0;
pub const SCROLLBAR_WIDTH: f32 = 4.0;

/// Draw an app icon into `rect`, dispatching on the icon variant
///
/// `icon_uri` is the resolved URL for `Icon::Url` entries.
pub fn paint_app_icon(ui: &egui::Ui, rect: Rect, app: &AppEntry, icon_uri: Option<&str>, palette: &Palette) {
    let rounding = Rounding::same(rect.width() * 0.22);
    let painter = ui.painter_at(rect);
    let background = parse_css_color(&app.background_color).unwrap_or(Color32::from_black_alpha(26));
    painter.rect_filled(rect, rounding, background);

    match (&app.icon, icon_uri) {
        (Icon::Url(_), Some(uri)) => {
            egui::Image::new(uri.to_string())
                .rounding(rounding)
                .fit_to_exact_size(rect.size())
                .paint_at(ui, rect.shrink(rect.width() * 0.12));
        }
        (Icon::Inline(inline), _) => {
            let tint = parse_css_color(&inline.tint).unwrap_or(palette.text_primary);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                &inline.glyph,
                FontId::proportional(rect.height() * 0.5),
                tint,
            );
        }
        _ => paint_placeholder(&painter, rect, &app.name, palette),
    }
}

fn paint_placeholder(painter: &egui::Painter, rect: Rect, name: &str, palette: &Palette) {
    let initial: String = name.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default();
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        initial,
        FontId::proportional(rect.height() * 0.45),
        palette.text_tertiary,
    );
}

/// Grid tile: icon with the app name underneath
pub fn app_tile(
    ui: &mut egui::Ui,
    app: &AppEntry,
    icon_uri: Option<&str>,
    width: f32,
    hovered: bool,
    palette: &Palette,
) -> egui::Response {
    let height = TILE_ICON_SIZE + 36.0;
    let (rect, response) = ui.allocate_exact_size(Vec2::new(width, height), Sense::click());

    if hovered || response.hovered() {
        ui.painter()
            .rect_filled(rect.shrink(2.0), Rounding::same(16.0), palette.button_bg_hover);
    }

    let icon_rect = Rect::from_center_size(
        Pos2::new(rect.center().x, rect.top() + 8.0 + TILE_ICON_SIZE / 2.0),
        Vec2::splat(TILE_ICON_SIZE),
    );
    paint_app_icon(ui, icon_rect, app, icon_uri, palette);

    let label = ui.painter().layout(
        app.name.clone(),
        FontId::proportional(13.0),
        palette.text_secondary,
        width - 8.0,
    );
    let label_pos = Pos2::new(rect.center().x - label.size().x / 2.0, icon_rect.bottom() + 6.0);
    ui.painter().galley(label_pos, label, palette.text_secondary);

    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Narrow-layout row: icon, name and description
pub fn app_row(
    ui: &mut egui::Ui,
    app: &AppEntry,
    icon_uri: Option<&str>,
    palette: &Palette,
) -> egui::Response {
    let width = ui.available_width();
    let height = LIST_ICON_SIZE + 16.0;
    let (rect, response) = ui.allocate_exact_size(Vec2::new(width, height), Sense::click());

    if response.hovered() {
        ui.painter().rect_filled(rect, Rounding::same(12.0), palette.button_bg_hover);
    }

    let icon_rect = Rect::from_min_size(
        Pos2::new(rect.left() + 8.0, rect.top() + 8.0),
        Vec2::splat(LIST_ICON_SIZE),
    );
    paint_app_icon(ui, icon_rect, app, icon_uri, palette);

    let text_left = icon_rect.right() + 12.0;
    let text_width = (rect.right() - text_left - 8.0).max(0.0);
    let painter = ui.painter();

    let name = painter.layout_no_wrap(app.name.clone(), FontId::proportional(15.0), palette.text_primary);
    let name_height = name.size().y;
    painter.galley(Pos2::new(text_left, rect.top() + 12.0), name, palette.text_primary);

    if !app.description.is_empty() {
        let description = painter.layout(
            app.description.clone(),
            FontId::proportional(12.0),
            palette.text_secondary,
            text_width,
        );
        painter.galley(
            Pos2::new(text_left, rect.top() + 14.0 + name_height),
            description,
            palette.text_secondary,
        );
    }

    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Category filter chip
pub fn category_chip(ui: &mut egui::Ui, label: &str, active: bool, palette: &Palette) -> egui::Response {
    let galley = ui
        .painter()
        .layout_no_wrap(label.to_string(), FontId::proportional(13.0), palette.text_primary);
    let size = galley.size() + Vec2::new(24.0, 12.0);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    let (fill, border) = if active {
        (palette.button_bg_active, palette.button_border_active)
    } else if response.hovered() {
        (palette.button_bg_hover, palette.button_border_inactive)
    } else {
        (palette.button_bg_inactive, palette.button_border_inactive)
    };

    let rounding = Rounding::same(rect.height() / 2.0);
    ui.painter().rect(rect, rounding, fill, Stroke::new(1.0, border));
    ui.painter().galley(
        rect.center() - galley.size() / 2.0,
        galley,
        palette.text_primary,
    );

    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Category heading drawn at half opacity
pub fn category_heading(ui: &mut egui::Ui, name: &str, palette: &Palette) {
    ui.label(
        egui::RichText::new(name)
            .size(14.0)
            .strong()
            .color(palette.text_primary.gamma_multiply(0.5)),
    );
}

/// Faint line between category groups
pub fn group_separator(ui: &mut egui::Ui, palette: &Palette) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, 17.0), Sense::hover());
    ui.painter().hline(rect.x_range(), rect.center().y, Stroke::new(1.0, palette.separator()));
}

/// Overlay scrollbar thumb inside `track`
pub fn overlay_scrollbar(ui: &egui::Ui, track: Rect, thumb: ThumbGeometry, visible: bool, palette: &Palette) {
    let opacity = ui
        .ctx()
        .animate_bool(egui::Id::new("overlay_scrollbar_opacity"), visible);
    if opacity <= 0.0 {
        return;
    }

    let x = track.right() - SCROLLBAR_WIDTH - 2.0;
    let thumb_rect = Rect::from_min_size(
        Pos2::new(x, track.top() + thumb.top),
        Vec2::new(SCROLLBAR_WIDTH, thumb.height.min(track.height())),
    );
    ui.painter().rect_filled(
        thumb_rect,
        Rounding::same(SCROLLBAR_WIDTH / 2.0),
        palette.scrollbar_bg.gamma_multiply(opacity),
    );
}

pub const ASSISTANT_PROMPT: &str = "Ask the assistant";
pub const ASSISTANT_HINT: &str = "Hover an app to see what it does, or press Ctrl+K to ask.";

/// Assistant panel: details of the hovered app, or the static prompt
pub fn assistant_panel(
    ui: &mut egui::Ui,
    hovered: Option<&AppEntry>,
    icon_uri: Option<&str>,
    palette: &Palette,
) -> egui::Response {
    let frame = egui::Frame::none()
        .fill(palette.panel_bg)
        .stroke(Stroke::new(1.0, palette.panel_border))
        .shadow(palette.panel_shadow)
        .rounding(Rounding::same(24.0))
        .inner_margin(egui::Margin::same(20.0));

    frame
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            match hovered {
                Some(app) => {
                    ui.horizontal(|ui| {
                        let (rect, _) = ui.allocate_exact_size(Vec2::splat(LIST_ICON_SIZE), Sense::hover());
                        paint_app_icon(ui, rect, app, icon_uri, palette);
                        ui.vertical(|ui| {
                            ui.label(egui::RichText::new(&app.name).size(16.0).color(palette.text_primary));
                            if let Some(english) = &app.english_name {
                                ui.label(egui::RichText::new(english).size(12.0).color(palette.text_tertiary));
                            }
                        });
                    });
                    if !app.description.is_empty() {
                        ui.add_space(8.0);
                        ui.label(egui::RichText::new(&app.description).color(palette.text_secondary));
                    }
                }
                None => {
                    ui.label(egui::RichText::new(ASSISTANT_PROMPT).size(16.0).color(palette.text_primary));
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new(ASSISTANT_HINT).color(palette.text_secondary));
                }
            }
        })
        .response
        .interact(Sense::click())
}
