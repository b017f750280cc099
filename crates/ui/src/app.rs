use std::sync::{Arc, Mutex};
use std::time::Duration;

use eframe::egui;
use folio_core::model::contact::ContactField;
use folio_core::model::page::Page;
use folio_core::views::{LayoutMetrics, PageLayout, SectionState, render_page};
use folio_core::{PortfolioConfig, Scheduler};
use folio_protocol::{HitTarget, Viewport};
use tracing::{debug, info, warn};
#[cfg(target_arch = "wasm32")]
use tracing::error;

use crate::renderer;
use crate::theme::{self, ThemeMode};

/// Pixels moved per arrow-key press.
const LINE_STEP: f64 = 48.0;
/// Fraction of the remaining distance covered per frame while animating to a
/// section.
const SCROLL_EASING: f64 = 0.2;

/// Main application state.
pub struct PortfolioApp {
    config: PortfolioConfig,
    scheduler: Scheduler,
    /// `None` until a valid config has been mounted.
    page: Option<Page>,
    /// Document offset of the top of the viewport.
    scroll_y: f64,
    /// Where a nav click asked to scroll to; eased towards each frame.
    scroll_goal: Option<f64>,
    focused: Option<ContactField>,
    theme_mode: ThemeMode,
    /// Error message to display.
    error: Option<String>,
    /// Config bytes from an async load, applied on the next frame.
    pending_config: Arc<Mutex<Option<Vec<u8>>>>,
}

impl PortfolioApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx
            .set_visuals(theme::portfolio_visuals(ThemeMode::Dark));

        let pending_config: Arc<Mutex<Option<Vec<u8>>>> = Arc::new(Mutex::new(None));

        // On WASM, #custom loads the portfolio served next to the app
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(w) = web_sys::window() {
                let hash = w.location().hash().unwrap_or_default();
                if hash == "#custom" {
                    let pc = pending_config.clone();
                    let ctx = cc.egui_ctx.clone();
                    info!("loading /assets/portfolio.json");
                    wasm_bindgen_futures::spawn_local(async move {
                        match Self::fetch_bytes("/assets/portfolio.json").await {
                            Ok(resp) => {
                                deliver_pending(&pc, resp);
                                ctx.request_repaint();
                            }
                            Err(e) => error!(error = %e, "portfolio fetch failed"),
                        }
                    });
                }
            }
        }

        let now_ms = seconds_to_ms(cc.egui_ctx.input(|i| i.time));
        let mut app = Self {
            config: PortfolioConfig::default(),
            scheduler: Scheduler::new(),
            page: None,
            scroll_y: 0.0,
            scroll_goal: None,
            focused: None,
            theme_mode: ThemeMode::Dark,
            error: None,
            pending_config,
        };
        app.mount(PortfolioConfig::default(), now_ms);
        app
    }

    /// Replace the page with one built from `config`. The old page is
    /// dropped first so its timers are released.
    fn mount(&mut self, config: PortfolioConfig, now_ms: u64) {
        self.page = None;
        match Page::new(&config, &self.scheduler, now_ms) {
            Ok(page) => {
                info!(sections = config.sections.len(), "portfolio mounted");
                self.page = Some(page);
                self.config = config;
                self.scroll_y = 0.0;
                self.scroll_goal = None;
                self.focused = None;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "rejected portfolio config");
                self.error = Some(format!("Invalid portfolio config: {e}"));
                // Fall back to the last config that worked.
                if let Ok(page) = Page::new(&self.config, &self.scheduler, now_ms) {
                    self.page = Some(page);
                }
            }
        }
    }

    fn load_config(&mut self, data: &[u8], now_ms: u64) {
        debug!(bytes = data.len(), "parsing portfolio config");
        match PortfolioConfig::from_json(data) {
            Ok(config) => self.mount(config, now_ms),
            Err(e) => {
                warn!(error = %e, "failed to parse portfolio config");
                self.error = Some(format!("Failed to load config: {e}"));
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let window = web_sys::window().ok_or("no window")?;
        let resp_value = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| format!("{e:?}"))?;
        let resp: web_sys::Response = resp_value.dyn_into().map_err(|_| "not a Response")?;
        if !resp.ok() {
            return Err(format!("HTTP {}", resp.status()));
        }
        let buf = JsFuture::from(resp.array_buffer().map_err(|e| format!("{e:?}"))?)
            .await
            .map_err(|e| format!("{e:?}"))?;
        let uint8 = js_sys::Uint8Array::new(&buf);
        Ok(uint8.to_vec())
    }

    /// Show the browser file picker. The chosen file lands in
    /// `pending_config` and is mounted on the next frame.
    #[cfg(target_arch = "wasm32")]
    fn pick_web_file(&self, ctx: &egui::Context) -> Result<(), String> {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        let input: web_sys::HtmlInputElement = document
            .create_element("input")
            .map_err(|e| format!("{e:?}"))?
            .dyn_into()
            .map_err(|_| "not an input element")?;
        input.set_type("file");
        input.set_accept(".json,application/json");

        let pending = self.pending_config.clone();
        let ctx = ctx.clone();
        let picker = input.clone();
        let on_change = Closure::once_into_js(move || {
            let Some(file) = picker.files().and_then(|files| files.get(0)) else {
                return;
            };
            info!(name = %file.name(), "reading picked config");
            wasm_bindgen_futures::spawn_local(async move {
                match JsFuture::from(file.array_buffer()).await {
                    Ok(buf) => {
                        deliver_pending(&pending, js_sys::Uint8Array::new(&buf).to_vec());
                        ctx.request_repaint();
                    }
                    Err(e) => warn!(error = ?e, "failed to read picked file"),
                }
            });
        });
        input.set_onchange(Some(on_change.unchecked_ref()));
        input.click();
        Ok(())
    }

    fn status_bar(&mut self, ctx: &egui::Context, now_ms: u64) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open config").clicked() {
                    #[cfg(not(target_arch = "wasm32"))]
                    {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Portfolio", &["json"])
                            .pick_file()
                        {
                            match std::fs::read(&path) {
                                Ok(data) => self.load_config(&data, now_ms),
                                Err(e) => {
                                    self.error = Some(format!("Failed to read file: {e}"));
                                }
                            }
                        }
                    }
                    #[cfg(target_arch = "wasm32")]
                    {
                        let _ = now_ms;
                        if let Err(e) = self.pick_web_file(ctx) {
                            self.error = Some(format!("Failed to open file picker: {e}"));
                        }
                    }
                }

                ui.separator();

                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "Dark",
                    ThemeMode::Light => "Light",
                };
                if ui.button(theme_label).clicked() {
                    self.theme_mode = self.theme_mode.toggled();
                    ctx.set_visuals(theme::portfolio_visuals(self.theme_mode));
                }

                ui.separator();

                if let Some(err) = &self.error {
                    ui.colored_label(ui.visuals().error_fg_color, err);
                } else if let Some(page) = &self.page {
                    ui.label(format!(
                        "Section: {} | Timers: {}",
                        page.active_section(),
                        self.scheduler.pending()
                    ));
                }
            });
        });
    }

    /// Keyboard input while a form field has focus. Returns whether the
    /// page changed.
    fn edit_focused(&mut self, ctx: &egui::Context, now_ms: u64) -> bool {
        let (Some(field), Some(page)) = (self.focused, self.page.as_mut()) else {
            return false;
        };
        let events = ctx.input(|i| i.events.clone());
        let mut changed = false;
        for event in events {
            match event {
                egui::Event::Text(text) => {
                    page.contact_field_mut(field).push_str(&text);
                    changed = true;
                }
                egui::Event::Key {
                    key, pressed: true, ..
                } => match key {
                    egui::Key::Backspace => {
                        page.contact_field_mut(field).pop();
                        changed = true;
                    }
                    egui::Key::Enter if field == ContactField::Message => {
                        page.contact_field_mut(field).push('\n');
                        changed = true;
                    }
                    egui::Key::Enter => {
                        if let Err(e) = page.submit_contact(now_ms) {
                            debug!(error = %e, "contact form rejected");
                        }
                        changed = true;
                    }
                    egui::Key::Tab => {
                        self.focused = Some(field.next());
                        changed = true;
                    }
                    egui::Key::Escape => {
                        self.focused = None;
                        changed = true;
                    }
                    _ => {}
                },
                _ => {}
            }
        }
        changed
    }

    /// Keyboard scrolling when no field has focus.
    fn scroll_keys(&mut self, ctx: &egui::Context, layout: &PageLayout, page_height: f64) {
        if self.focused.is_some() {
            return;
        }
        ctx.input(|i| {
            let mut delta = 0.0;
            if i.key_pressed(egui::Key::ArrowDown) || i.key_pressed(egui::Key::J) {
                delta += LINE_STEP;
            }
            if i.key_pressed(egui::Key::ArrowUp) || i.key_pressed(egui::Key::K) {
                delta -= LINE_STEP;
            }
            if i.key_pressed(egui::Key::PageDown) || i.key_pressed(egui::Key::Space) {
                delta += page_height;
            }
            if i.key_pressed(egui::Key::PageUp) {
                delta -= page_height;
            }
            if delta != 0.0 {
                self.scroll_goal = None;
                self.scroll_y += delta;
            }
            if i.key_pressed(egui::Key::Home) {
                self.scroll_goal = Some(0.0);
            }
            if i.key_pressed(egui::Key::End) {
                self.scroll_goal = Some(layout.max_scroll());
            }
        });
    }

    fn dispatch(&mut self, ctx: &egui::Context, target: HitTarget, layout: &PageLayout, now_ms: u64) {
        let Some(page) = self.page.as_mut() else {
            return;
        };
        debug!(?target, "click");
        match target {
            HitTarget::Section(id) => {
                self.focused = None;
                if let Some(top) = page.select_section(&id, layout) {
                    self.scroll_goal = Some(layout.clamp_scroll(top));
                }
            }
            HitTarget::ToggleMenu => page.toggle_menu(),
            HitTarget::FormField(name) => self.focused = ContactField::from_name(&name),
            HitTarget::SubmitForm => {
                self.focused = None;
                if let Err(e) = page.submit_contact(now_ms) {
                    debug!(error = %e, "contact form rejected");
                }
            }
            HitTarget::DismissToast => page.dismiss_toast(),
            HitTarget::Link(url) => ctx.open_url(egui::OpenUrl::new_tab(url)),
        }
    }
}

/// Stash config bytes loaded off-frame; the newest load wins.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn deliver_pending(slot: &Mutex<Option<Vec<u8>>>, data: Vec<u8>) {
    *slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(data);
}

fn take_pending(slot: &Mutex<Option<Vec<u8>>>) -> Option<Vec<u8>> {
    slot.lock().unwrap_or_else(|e| e.into_inner()).take()
}

fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds * 1000.0).max(0.0) as u64
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now_ms = seconds_to_ms(ctx.input(|i| i.time));

        // Check for async-loaded config
        let pending = take_pending(&self.pending_config);
        if let Some(data) = pending {
            self.load_config(&data, now_ms);
        }

        if let Some(page) = self.page.as_mut() {
            page.run_timers(now_ms);
        }
        self.edit_focused(ctx, now_ms);

        self.status_bar(ctx, now_ms);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_rect_before_wrap();
                let metrics = LayoutMetrics::pixels();

                let layout = {
                    let Some(page) = &self.page else {
                        ui.centered_and_justified(|ui| {
                            ui.heading("No portfolio loaded");
                        });
                        return;
                    };
                    let viewport = Viewport::new(available.width() as f64, available.height() as f64);
                    let state = SectionState::from_page(page, self.focused);
                    PageLayout::compute(
                        &self.config.content,
                        page.tracker().registry(),
                        &state,
                        &metrics,
                        &viewport,
                    )
                };

                let response = ui.allocate_rect(available, egui::Sense::click());

                let wheel = ui.input(|i| i.smooth_scroll_delta.y) as f64;
                if wheel.abs() > 0.1 {
                    self.scroll_goal = None;
                    self.scroll_y -= wheel;
                }
                self.scroll_keys(ctx, &layout, available.height() as f64);

                if let Some(goal) = self.scroll_goal {
                    let step = (goal - self.scroll_y) * SCROLL_EASING;
                    if step.abs() < 0.5 {
                        self.scroll_y = goal;
                        self.scroll_goal = None;
                    } else {
                        self.scroll_y += step;
                        ctx.request_repaint();
                    }
                }
                self.scroll_y = layout.clamp_scroll(self.scroll_y);

                let Some(page) = self.page.as_mut() else {
                    return;
                };
                page.on_scroll(self.scroll_y, &layout);

                let viewport = Viewport::new(available.width() as f64, available.height() as f64)
                    .scrolled_to(self.scroll_y);
                let state = SectionState::from_page(page, self.focused);
                let commands = render_page(
                    page,
                    &self.config.content,
                    &layout,
                    &state,
                    &metrics,
                    &viewport,
                );

                let mut painter = ui.painter_at(available);
                let result = renderer::render_commands(
                    &mut painter,
                    &commands,
                    available.min,
                    self.theme_mode,
                );

                if response
                    .hover_pos()
                    .is_some_and(|hover| result.target_at(hover).is_some())
                {
                    ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                }

                if response.clicked() {
                    let target = response
                        .interact_pointer_pos()
                        .and_then(|pos| result.target_at(pos).cloned());
                    match target {
                        Some(target) => self.dispatch(ctx, target, &layout, now_ms),
                        None => self.focused = None,
                    }
                }
            });

        // Handle config drop
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .first()
                .and_then(|file| file.bytes.as_ref().map(|bytes| bytes.to_vec()))
        });
        if let Some(data) = dropped {
            self.load_config(&data, now_ms);
        }

        // Wake up for the next typewriter step, blink or toast expiry
        if let Some(deadline) = self.scheduler.next_deadline() {
            ctx.request_repaint_after(Duration::from_millis(deadline.saturating_sub(now_ms)));
        }
    }
}
