/// Launcher window and page state
///
/// `LauncherUI` implements `eframe::App`: it drains background events, keeps
/// the adaptive theme pointed at the right image, routes between the
/// Loading / Error / Ready pages and wraps every frame in a render boundary
/// that swaps in a fallback page after a panic.

use crate::catalog::{category_names, is_valid_category, visible_groups};
use crate::config::LauncherSettings;
use crate::models::{AppEntry, Catalog, Icon, LoadStatus};
use crate::theme::{AdaptiveTheme, Classification, Palette, ThemeTokens};
use crate::ui::boundary::RenderBoundary;
use crate::ui::controller::{BackgroundImage, CatalogSnapshot, LauncherController, LauncherEvent};
use crate::ui::debounce::Debounced;
use crate::ui::hover::HoverTracker;
use crate::ui::install::InstallBanner;
use crate::ui::scroll::ScrollTracker;
use crate::ui::widgets;
use eframe::egui;
use egui::{Color32, Rect, Vec2};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

const GRID_COLUMNS: usize = 4;
const GRID_PANEL_MAX_WIDTH: f32 = 640.0;
const GRID_PANEL_MAX_HEIGHT: f32 = 480.0;
const ASSISTANT_PANEL_HEIGHT: f32 = 110.0;

pub const LOADING_TEXT: &str = "Loading…";
pub const RETRY_LABEL: &str = "Try again";
pub const SEARCH_HINT: &str = "Search apps";
pub const NO_RESULTS_TEXT: &str = "No apps match your search.";
pub const CRASH_TITLE: &str = "Something went wrong while running the launcher.";
pub const CRASH_HINT: &str = "Please reload. If the problem continues, let the support team know.";
pub const RELOAD_LABEL: &str = "Reload";
pub const INSTALL_TEXT: &str = "Add the launcher to your applications menu?";
pub const INSTALL_LABEL: &str = "Install";
pub const DISMISS_LABEL: &str = "Not now";

/// Transient view state - nothing here persists across sessions
#[derive(Debug, Clone)]
pub struct ViewState {
    pub query: String,
    /// Selected category name, empty for "all"
    pub selected_category: String,
    pub hover: HoverTracker<AppEntry>,
    /// Tile under the pointer during the previous frame
    pub pointer_tile: Option<AppEntry>,
    pub pointer_on_panel: bool,
    pub scroll: ScrollTracker,
    pub scroll_to_top: Debounced<()>,
    pub install: InstallBanner,
    pub install_error: Option<String>,
    /// Search box already received its initial focus
    pub search_focused: bool,
}

impl ViewState {
    pub fn new(settings: &LauncherSettings) -> Self {
        ViewState {
            query: String::new(),
            selected_category: String::new(),
            hover: HoverTracker::new(settings.hover_delay()),
            pointer_tile: None,
            pointer_on_panel: false,
            scroll: ScrollTracker::new(settings.scrollbar_hide_delay()),
            scroll_to_top: Debounced::new(settings.scroll_to_top_delay()),
            install: InstallBanner::new(settings.install_banner_delay()),
            install_error: None,
            search_focused: false,
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        self.query = query.into();
        self.query_changed(now);
    }

    /// Query text changed: scroll the results back to the top shortly after
    pub fn query_changed(&mut self, now: Instant) {
        self.scroll_to_top.set_after((), now);
    }

    /// Clicking the active chip clears the selection
    pub fn toggle_category(&mut self, name: &str) {
        if self.selected_category == name {
            self.selected_category.clear();
        } else {
            self.selected_category = name.to_string();
        }
    }

    /// Drop a selection that no longer names a loaded category
    pub fn retain_valid_category(&mut self, catalog: &Catalog) {
        if !self.selected_category.is_empty() && !is_valid_category(&catalog.categories, &self.selected_category) {
            log::debug!("[UI] Clearing stale category selection '{}'", self.selected_category);
            self.selected_category.clear();
        }
    }

    /// Feed the tile under the pointer this frame
    pub fn pointer_over(&mut self, tile: Option<AppEntry>, now: Instant) {
        if tile == self.pointer_tile {
            return;
        }
        match &tile {
            Some(app) => self.hover.enter(app.clone()),
            None => self.hover.leave(now),
        }
        self.pointer_tile = tile;
    }

    /// Feed whether the pointer is over the assistant panel this frame
    pub fn pointer_over_panel(&mut self, on_panel: bool, now: Instant) {
        if on_panel == self.pointer_on_panel {
            return;
        }
        if on_panel {
            self.hover.hold();
        } else if self.pointer_tile.is_none() {
            self.hover.leave(now);
        }
        self.pointer_on_panel = on_panel;
    }

    /// Fire due timers; true when anything visible changed
    pub fn poll(&mut self, now: Instant) -> bool {
        let hover = self.hover.poll(now);
        let scroll = self.scroll.poll(now);
        let top = self.scroll_to_top.poll(now);
        let install = self.install.poll(now);
        hover || scroll || top || install
    }

    /// Earliest pending timer
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.hover.deadline(),
            self.scroll.deadline(),
            self.scroll_to_top.deadline(),
            self.install.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }
}

/// Source-rect in UV space that makes an image cover `target` without distortion
pub fn cover_uv(image: Vec2, target: Vec2) -> Rect {
    let full = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if image.x <= 0.0 || image.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }

    let image_aspect = image.x / image.y;
    let target_aspect = target.x / target.y;
    if image_aspect > target_aspect {
        let w = target_aspect / image_aspect;
        let x0 = (1.0 - w) / 2.0;
        Rect::from_min_max(egui::pos2(x0, 0.0), egui::pos2(x0 + w, 1.0))
    } else {
        let h = image_aspect / target_aspect;
        let y0 = (1.0 - h) / 2.0;
        Rect::from_min_max(egui::pos2(0.0, y0), egui::pos2(1.0, y0 + h))
    }
}

/// What the user asked for while a page was drawn
#[derive(Debug, Default)]
struct FrameActions {
    launch: Option<String>,
    open_assistant: bool,
    retry: bool,
    install: bool,
}

/// Main application UI
pub struct LauncherUI {
    controller: Arc<LauncherController>,
    event_rx: mpsc::Receiver<LauncherEvent>,
    snapshot: CatalogSnapshot,
    view: ViewState,
    theme: AdaptiveTheme,
    tokens: Option<ThemeTokens>,
    palette: Palette,
    background: Option<egui::TextureHandle>,
    /// Classification computed while decoding the loaded background
    background_classification: Option<Classification>,
    /// Source URL of the loaded background, empty until it loads
    background_source: String,
    boundary: RenderBoundary,
    started: bool,
}

impl LauncherUI {
    pub fn new(controller: Arc<LauncherController>, event_rx: mpsc::Receiver<LauncherEvent>) -> Self {
        let view = ViewState::new(&controller.settings);
        let theme = AdaptiveTheme::new();
        let palette = theme.tokens().resolve();
        Self {
            controller,
            event_rx,
            snapshot: CatalogSnapshot::default(),
            view,
            theme,
            tokens: None,
            palette,
            background: None,
            background_classification: None,
            background_source: String::new(),
            boundary: RenderBoundary::new(),
            started: false,
        }
    }

    /// Kick off the initial loads
    fn start(&mut self, ctx: &egui::Context) {
        self.started = true;
        self.controller.set_ui_context(ctx);
        self.controller.request_catalog();
        self.controller.request_background();
        self.snapshot = self.controller.snapshot();
        self.view
            .install
            .update_capability(self.controller.install_capability(), Instant::now());
        log::info!("[UI] Launcher started");
    }

    /// Start over as if the window had just opened
    fn reload(&mut self) {
        log::info!("[UI] Reloading after failure");
        self.boundary.reset();
        self.view = ViewState::new(&self.controller.settings);
        self.theme = AdaptiveTheme::new();
        self.tokens = None;
        self.background = None;
        self.background_classification = None;
        self.background_source.clear();
        self.started = false;
    }

    /// Drain every pending background event
    fn process_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                LauncherEvent::CatalogUpdated { request } => {
                    self.snapshot = self.controller.snapshot();
                    log::debug!("[UI] Catalog load #{} finished: {}", request, self.snapshot.status);
                    if self.snapshot.status == LoadStatus::Success {
                        self.view.retain_valid_category(&self.snapshot.catalog);
                        self.view.search_focused = false;
                    }
                }
                LauncherEvent::BackgroundLoaded(Ok(background)) => self.install_background(ctx, background),
                LauncherEvent::BackgroundLoaded(Err(_)) => {}
                LauncherEvent::Classified { token, classification } => {
                    self.theme.complete(token, classification);
                }
                LauncherEvent::InstallFinished(Ok(_)) => {
                    self.view.install.mark_installed();
                    self.view.install_error = None;
                }
                LauncherEvent::InstallFinished(Err(e)) => {
                    self.view.install_error = Some(e.user_message());
                }
            }
        }
    }

    /// Upload an already decoded background; no decoding happens here
    fn install_background(&mut self, ctx: &egui::Context, background: Arc<BackgroundImage>) {
        let BackgroundImage { image, classification } =
            Arc::try_unwrap(background).unwrap_or_else(|shared| (*shared).clone());
        self.background = Some(ctx.load_texture("background", image, egui::TextureOptions::LINEAR));
        self.background_classification = Some(classification);
        self.background_source = self.controller.settings.background_image_url();
    }

    /// Point the adaptive theme at the current source and refresh visuals
    fn sync_theme(&mut self, ctx: &egui::Context, is_narrow: bool) {
        let source = if is_narrow { "" } else { self.background_source.as_str() };
        if let Some(request) = self.theme.set_source(source) {
            match self.background_classification.filter(|_| request.source == self.background_source) {
                Some(classification) => {
                    self.theme.complete(request.token, classification);
                }
                None => self.controller.request_classification(request),
            }
        }

        let tokens = self.theme.tokens();
        if self.tokens != Some(tokens) {
            self.palette = tokens.resolve();
            ctx.set_visuals(self.palette.visuals());
            self.tokens = Some(tokens);
        }
    }

    fn icon_uri(&self, app: &AppEntry) -> Option<String> {
        match &app.icon {
            Icon::Url(url) => Some(self.controller.backend_url(url)).filter(|u| !u.is_empty()),
            _ => None,
        }
    }

    fn paint_background(&self, ctx: &egui::Context, is_narrow: bool) {
        let painter = ctx.layer_painter(egui::LayerId::background());
        let screen = ctx.screen_rect();
        painter.rect_filled(screen, 0.0, Color32::BLACK);
        if is_narrow {
            return;
        }
        if let Some(texture) = &self.background {
            let uv = cover_uv(texture.size_vec2(), screen.size());
            painter.image(texture.id(), screen, uv, Color32::WHITE);
        }
    }

    /// One full frame; panics here are caught by the render boundary
    fn render_frame(&mut self, ctx: &egui::Context, now: Instant) {
        let is_narrow = self.controller.settings.is_narrow(ctx.screen_rect().width());
        self.sync_theme(ctx, is_narrow);

        let mut actions = FrameActions::default();
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::K)) {
            actions.open_assistant = true;
        }

        self.paint_background(ctx, is_narrow);

        match self.snapshot.status.clone() {
            LoadStatus::Idle | LoadStatus::Loading => self.render_loading(ctx),
            LoadStatus::Error { message, status } => {
                self.render_error(ctx, &message, status, &mut actions)
            }
            LoadStatus::Success => {
                if is_narrow {
                    self.render_narrow(ctx, now, &mut actions);
                } else {
                    self.render_desktop(ctx, now, &mut actions);
                }
                self.render_install_banner(ctx, &mut actions);
            }
        }

        self.apply_actions(ctx, actions);

        if self.view.poll(now) {
            ctx.request_repaint();
        }
        if let Some(deadline) = self.view.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }

    fn apply_actions(&mut self, ctx: &egui::Context, actions: FrameActions) {
        if let Some(url) = actions.launch {
            let url = self.controller.backend_url(&url);
            if url.is_empty() {
                log::warn!("[UI] App has no URL to open");
            } else {
                log::info!("[UI] Opening {}", url);
                ctx.open_url(egui::OpenUrl::new_tab(url));
            }
        }
        if actions.open_assistant {
            log::info!("[UI] Opening assistant");
            ctx.open_url(egui::OpenUrl::new_tab(self.controller.settings.assistant_url.clone()));
        }
        if actions.retry {
            self.controller.request_catalog();
            self.snapshot = self.controller.snapshot();
        }
        if actions.install {
            self.view.install_error = None;
            self.controller.request_install();
        }
    }

    fn render_loading(&self, ctx: &egui::Context) {
        let color = self.palette.text_primary;
        egui::CentralPanel::default().frame(egui::Frame::none()).show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new(LOADING_TEXT).size(18.0).color(color));
            });
        });
    }

    fn render_error(&self, ctx: &egui::Context, message: &str, status: Option<u16>, actions: &mut FrameActions) {
        let palette = &self.palette;
        egui::CentralPanel::default().frame(egui::Frame::none()).show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.35);
                ui.label(egui::RichText::new(message).size(18.0).color(palette.text_primary));
                if let Some(code) = status {
                    ui.label(egui::RichText::new(format!("HTTP {}", code)).color(palette.text_tertiary));
                }
                ui.add_space(12.0);
                if ui.button(RETRY_LABEL).clicked() {
                    actions.retry = true;
                }
            });
        });
    }

    fn render_search(ui: &mut egui::Ui, view: &mut ViewState, now: Instant) {
        let response = ui.add(
            egui::TextEdit::singleline(&mut view.query)
                .hint_text(SEARCH_HINT)
                .desired_width(f32::INFINITY),
        );
        if !view.search_focused {
            response.request_focus();
            view.search_focused = true;
        }
        if response.changed() {
            view.query_changed(now);
        }
    }

    fn scroll_area(view: &mut ViewState, id: &str, max_height: f32) -> egui::ScrollArea {
        let mut area = egui::ScrollArea::vertical()
            .id_source(id)
            .auto_shrink([false, false])
            .max_height(max_height)
            .scroll_bar_visibility(egui::scroll_area::ScrollBarVisibility::AlwaysHidden);
        if view.scroll_to_top.take().is_some() {
            area = area.vertical_scroll_offset(0.0);
        }
        area
    }

    fn render_desktop(&mut self, ctx: &egui::Context, now: Instant, actions: &mut FrameActions) {
        let catalog = self.snapshot.catalog.clone();
        let screen = ctx.screen_rect();
        let width = GRID_PANEL_MAX_WIDTH.min(screen.width() * 0.9);
        let height = GRID_PANEL_MAX_HEIGHT.min(screen.height() * 0.65);
        let top = screen.top() + screen.height() * 0.15;
        let grid_rect = Rect::from_min_size(egui::pos2(screen.center().x - width / 2.0, top), Vec2::new(width, height));
        let assistant_rect = Rect::from_min_size(
            egui::pos2(grid_rect.left(), grid_rect.bottom() + 16.0),
            Vec2::new(width, ASSISTANT_PANEL_HEIGHT),
        );

        let icon_uris: Vec<Option<String>> = catalog.apps.iter().map(|a| self.icon_uri(a)).collect();
        let palette = self.palette.clone();
        let view = &mut self.view;
        let mut pointer_tile: Option<AppEntry> = None;

        egui::CentralPanel::default().frame(egui::Frame::none()).show(ctx, |ui| {
            ui.allocate_ui_at_rect(grid_rect, |ui| {
                egui::Frame::none()
                    .fill(palette.panel_bg)
                    .stroke(egui::Stroke::new(1.0, palette.panel_border))
                    .shadow(palette.panel_shadow)
                    .rounding(egui::Rounding::same(24.0))
                    .inner_margin(egui::Margin::same(20.0))
                    .show(ui, |ui| {
                        ui.set_width(width - 40.0);
                        Self::render_search(ui, view, now);
                        ui.add_space(10.0);

                        ui.horizontal_wrapped(|ui| {
                            for name in category_names(&catalog.categories) {
                                let active = view.selected_category == name;
                                if widgets::category_chip(ui, &name, active, &palette).clicked() {
                                    view.toggle_category(&name);
                                }
                            }
                        });
                        ui.add_space(10.0);

                        let remaining = (height - 40.0 - ui.min_rect().height()).max(80.0);
                        let output = Self::scroll_area(view, "apps_grid", remaining).show(ui, |ui| {
                            let groups = visible_groups(&catalog.apps, &view.query, &view.selected_category, false);
                            if groups.is_empty() {
                                ui.label(egui::RichText::new(NO_RESULTS_TEXT).color(palette.text_secondary));
                                return;
                            }
                            let column = ui.available_width() / GRID_COLUMNS as f32;
                            let group_count = groups.len();
                            for (index, group) in groups.iter().enumerate() {
                                widgets::category_heading(ui, group.category, &palette);
                                let entries: Vec<(usize, &AppEntry)> = group.entries().collect();
                                for row in entries.chunks(GRID_COLUMNS) {
                                    ui.horizontal(|ui| {
                                        ui.spacing_mut().item_spacing.x = 0.0;
                                        for &(position, app) in row {
                                            let uri = icon_uris[position].as_deref();
                                            let hovered = view.hover.is_hovering(app);
                                            let response = widgets::app_tile(ui, app, uri, column, hovered, &palette);
                                            if response.hovered() {
                                                pointer_tile = Some(app.clone());
                                            }
                                            if response.clicked() {
                                                actions.launch = Some(app.url.clone());
                                            }
                                        }
                                        for _ in row.len()..GRID_COLUMNS {
                                            ui.allocate_exact_size(Vec2::new(column, 1.0), egui::Sense::hover());
                                        }
                                    });
                                }
                                if index + 1 < group_count {
                                    widgets::group_separator(ui, &palette);
                                }
                            }
                        });

                        view.scroll.track(
                            output.state.offset.y,
                            output.content_size.y,
                            output.inner_rect.height(),
                            now,
                        );
                        let metrics = view.scroll.metrics();
                        widgets::overlay_scrollbar(ui, output.inner_rect, view.scroll.thumb(), metrics.is_scrollbar_visible, &palette);
                    });
            });

            view.pointer_over(pointer_tile.take(), now);

            ui.allocate_ui_at_rect(assistant_rect, |ui| {
                let hovered = view.hover.current().cloned();
                // Hover holds a copy of the entry, so match by value
                let uri = hovered
                    .as_ref()
                    .and_then(|app| catalog.apps.iter().position(|candidate| candidate == app))
                    .and_then(|i| icon_uris[i].clone());
                let response = widgets::assistant_panel(ui, hovered.as_ref(), uri.as_deref(), &palette);
                view.pointer_over_panel(response.hovered(), now);
                if response.clicked() && hovered.is_none() {
                    actions.open_assistant = true;
                }
            });
        });
    }

    fn render_narrow(&mut self, ctx: &egui::Context, now: Instant, actions: &mut FrameActions) {
        let catalog = self.snapshot.catalog.clone();
        let icon_uris: Vec<Option<String>> = catalog.apps.iter().map(|a| self.icon_uri(a)).collect();
        let palette = self.palette.clone();
        let view = &mut self.view;

        egui::TopBottomPanel::bottom("search_bar")
            .frame(
                egui::Frame::none()
                    .fill(palette.panel_bg)
                    .inner_margin(egui::Margin::symmetric(16.0, 12.0)),
            )
            .show(ctx, |ui| {
                Self::render_search(ui, view, now);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(egui::Margin::same(12.0)))
            .show(ctx, |ui| {
                let height = ui.available_height();
                let output = Self::scroll_area(view, "apps_list", height).show(ui, |ui| {
                    // Narrow layout has no chip row, so the selection is ignored
                    let groups = visible_groups(&catalog.apps, &view.query, &view.selected_category, true);
                    if groups.is_empty() {
                        ui.label(egui::RichText::new(NO_RESULTS_TEXT).color(palette.text_secondary));
                        return;
                    }
                    for group in groups.iter() {
                        widgets::category_heading(ui, group.category, &palette);
                        for (position, app) in group.entries() {
                            let uri = icon_uris[position].as_deref();
                            if widgets::app_row(ui, app, uri, &palette).clicked() {
                                actions.launch = Some(app.url.clone());
                            }
                        }
                        ui.add_space(12.0);
                    }
                });
                view.scroll.track(
                    output.state.offset.y,
                    output.content_size.y,
                    output.inner_rect.height(),
                    now,
                );
                let metrics = view.scroll.metrics();
                widgets::overlay_scrollbar(ui, output.inner_rect, view.scroll.thumb(), metrics.is_scrollbar_visible, &palette);
            });
    }

    fn render_install_banner(&mut self, ctx: &egui::Context, actions: &mut FrameActions) {
        if !self.view.install.is_visible() {
            return;
        }
        let palette = &self.palette;
        let view = &mut self.view;

        egui::Area::new(egui::Id::new("install_banner"))
            .anchor(egui::Align2::CENTER_BOTTOM, Vec2::new(0.0, -24.0))
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(palette.panel_bg)
                    .stroke(egui::Stroke::new(1.0, palette.panel_border))
                    .rounding(egui::Rounding::same(16.0))
                    .inner_margin(egui::Margin::same(12.0))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(INSTALL_TEXT).color(palette.text_primary));
                            if ui.button(INSTALL_LABEL).clicked() {
                                actions.install = true;
                            }
                            if ui.button(DISMISS_LABEL).clicked() {
                                view.install.dismiss();
                            }
                        });
                        if let Some(error) = &view.install_error {
                            ui.label(egui::RichText::new(error).color(palette.text_secondary));
                        }
                    });
            });
    }

    /// Fallback page shown after a render failure
    fn render_fallback(ctx: &egui::Context) -> bool {
        let mut reload = false;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK).inner_margin(egui::Margin::same(16.0)))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.35);
                    ui.label(egui::RichText::new(CRASH_TITLE).size(20.0).color(Color32::WHITE));
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new(CRASH_HINT).size(14.0).color(Color32::from_white_alpha(204)));
                    ui.add_space(16.0);
                    if ui.button(RELOAD_LABEL).clicked() {
                        reload = true;
                    }
                });
            });
        reload
    }
}

impl eframe::App for LauncherUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.boundary.is_crashed() {
            ctx.set_visuals(egui::Visuals::dark());
            if Self::render_fallback(ctx) {
                self.reload();
                ctx.request_repaint();
            }
            return;
        }

        if !self.started {
            self.start(ctx);
        }
        self.process_events(ctx);

        let now = Instant::now();
        let mut boundary = std::mem::take(&mut self.boundary);
        let rendered = boundary.run(|| self.render_frame(ctx, now));
        self.boundary = boundary;
        if !rendered {
            self.tokens = None;
            ctx.request_repaint();
        }
    }
}
