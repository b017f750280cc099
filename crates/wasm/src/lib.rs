use std::cell::RefCell;

use folio_core::model::contact::{ContactField, Toast};
use folio_core::model::page::Page;
use folio_core::views::{LayoutMetrics, PageLayout, SectionState, render_page};
use folio_core::{ConfigError, ContactFormError, PortfolioConfig, Scheduler};
use folio_protocol::{SectionBounds, SectionId, TypedText, Viewport};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;

/// A mounted page plus the content it renders. Each page has its own
/// scheduler; JS drives it by calling [`tick`] with `performance.now()`.
struct Mounted {
    config: PortfolioConfig,
    page: Page,
}

thread_local! {
    static PAGES: RefCell<Vec<Option<Mounted>>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug, Error)]
enum BridgeError {
    #[error("invalid page handle: {0}")]
    UnknownHandle(usize),
    #[error("unknown form field: {0}")]
    UnknownField(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Contact(#[from] ContactFormError),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

fn to_js(e: BridgeError) -> JsError {
    warn!(error = %e, "bridge call failed");
    JsError::new(&e.to_string())
}

/// Section geometry as measured by the DOM.
#[derive(Debug, Deserialize)]
struct MeasuredSection {
    id: String,
    top: f64,
    bottom: f64,
}

fn parse_layout(bounds_json: &str) -> Result<Vec<(SectionId, SectionBounds)>, BridgeError> {
    let measured: Vec<MeasuredSection> = serde_json::from_str(bounds_json)?;
    Ok(measured
        .into_iter()
        .map(|s| (SectionId::from(s.id), SectionBounds::new(s.top, s.bottom)))
        .collect())
}

/// What changed after a timer pass, for the JS side to patch into the DOM.
#[derive(Debug, Serialize)]
struct TickResult {
    changed: bool,
    typed: TypedText,
    submitting: bool,
    toast: Option<Toast>,
    next_deadline_ms: Option<u64>,
}

fn mount(config_json: &str, now_ms: u64) -> Result<usize, BridgeError> {
    let config = if config_json.trim().is_empty() {
        PortfolioConfig::default()
    } else {
        PortfolioConfig::from_json(config_json.as_bytes())?
    };
    let page = Page::new(&config, &Scheduler::new(), now_ms)?;
    let mounted = Some(Mounted { config, page });
    let handle = PAGES.with_borrow_mut(|pages| match pages.iter().position(Option::is_none) {
        Some(free) => {
            pages[free] = mounted;
            free
        }
        None => {
            pages.push(mounted);
            pages.len() - 1
        }
    });
    info!(handle, "page mounted");
    Ok(handle)
}

fn with_page<R>(
    handle: usize,
    f: impl FnOnce(&mut Mounted) -> Result<R, BridgeError>,
) -> Result<R, BridgeError> {
    PAGES.with_borrow_mut(|pages| {
        let mounted = pages
            .get_mut(handle)
            .and_then(Option::as_mut)
            .ok_or(BridgeError::UnknownHandle(handle))?;
        f(mounted)
    })
}

fn tick_page(mounted: &mut Mounted, now_ms: u64) -> TickResult {
    let page = &mut mounted.page;
    let changed = page.run_timers(now_ms);
    TickResult {
        changed,
        typed: page.typed_text(),
        submitting: page.contact().is_submitting(),
        toast: page.toast().cloned(),
        next_deadline_ms: page.scheduler().next_deadline(),
    }
}

fn ms(value: f64) -> u64 {
    value.max(0.0) as u64
}

/// Route `tracing` output to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    let _ = folio_core::telemetry::init_console_tracing();
}

/// Mount a page from a JSON config (empty string for the built-in sample).
/// Returns a handle for the other calls.
#[wasm_bindgen]
pub fn create_page(config_json: &str, now_ms: f64) -> Result<usize, JsError> {
    mount(config_json, ms(now_ms)).map_err(to_js)
}

/// Release a page and cancel all of its timers.
#[wasm_bindgen]
pub fn drop_page(handle: usize) -> Result<(), JsError> {
    release(handle).map_err(to_js)
}

fn release(handle: usize) -> Result<(), BridgeError> {
    let mounted = PAGES.with_borrow_mut(|pages| pages.get_mut(handle).and_then(Option::take));
    match mounted {
        Some(mounted) => {
            drop(mounted);
            debug!(handle, "page dropped");
            Ok(())
        }
        None => Err(BridgeError::UnknownHandle(handle)),
    }
}

/// Run every timer due at `now_ms`. Returns a JSON `TickResult`.
#[wasm_bindgen]
pub fn tick(handle: usize, now_ms: f64) -> Result<String, JsError> {
    with_page(handle, |mounted| {
        Ok(serde_json::to_string(&tick_page(mounted, ms(now_ms)))?)
    })
    .map_err(to_js)
}

/// Feed a scroll event. `bounds_json` is `[{"id","top","bottom"}, ...]` in
/// document pixels. Returns the newly active section id, if it changed.
#[wasm_bindgen]
pub fn on_scroll(handle: usize, scroll_y: f64, bounds_json: &str) -> Result<Option<String>, JsError> {
    with_page(handle, |mounted| {
        let layout = parse_layout(bounds_json)?;
        let update = mounted.page.on_scroll(scroll_y, layout.as_slice());
        Ok(update.active.map(|id| id.to_string()))
    })
    .map_err(to_js)
}

#[wasm_bindgen]
pub fn active_section(handle: usize) -> Result<String, JsError> {
    with_page(handle, |mounted| Ok(mounted.page.active_section().to_string())).map_err(to_js)
}

/// Nav item clicked. Returns the scroll offset to move to, if the section
/// is laid out.
#[wasm_bindgen]
pub fn select_section(handle: usize, id: &str, bounds_json: &str) -> Result<Option<f64>, JsError> {
    with_page(handle, |mounted| {
        let layout = parse_layout(bounds_json)?;
        Ok(mounted.page.select_section(id, layout.as_slice()))
    })
    .map_err(to_js)
}

#[wasm_bindgen]
pub fn toggle_menu(handle: usize) -> Result<bool, JsError> {
    with_page(handle, |mounted| {
        mounted.page.toggle_menu();
        Ok(mounted.page.navigation().is_menu_open())
    })
    .map_err(to_js)
}

#[wasm_bindgen]
pub fn set_contact_field(handle: usize, field: &str, value: &str) -> Result<(), JsError> {
    with_page(handle, |mounted| {
        let field =
            ContactField::from_name(field).ok_or_else(|| BridgeError::UnknownField(field.to_owned()))?;
        mounted.page.set_contact_field(field, value);
        Ok(())
    })
    .map_err(to_js)
}

/// Start the simulated submission; validation failures become JS errors.
#[wasm_bindgen]
pub fn submit_contact(handle: usize, now_ms: f64) -> Result<(), JsError> {
    with_page(handle, |mounted| Ok(mounted.page.submit_contact(ms(now_ms))?)).map_err(to_js)
}

#[wasm_bindgen]
pub fn dismiss_toast(handle: usize) -> Result<(), JsError> {
    with_page(handle, |mounted| {
        mounted.page.dismiss_toast();
        Ok(())
    })
    .map_err(to_js)
}

/// Render the whole page for a canvas host, returning render commands as
/// JSON. Layout is computed here rather than measured.
#[wasm_bindgen]
pub fn render_view(
    handle: usize,
    width: f64,
    height: f64,
    scroll_y: f64,
    dpr: f64,
) -> Result<String, JsError> {
    with_page(handle, |mounted| {
        let metrics = LayoutMetrics::pixels();
        let viewport = Viewport {
            dpr,
            ..Viewport::new(width, height)
        };
        let layout = {
            let state = SectionState::from_page(&mounted.page, None);
            PageLayout::compute(
                &mounted.config.content,
                mounted.page.tracker().registry(),
                &state,
                &metrics,
                &viewport,
            )
        };
        let scroll_y = layout.clamp_scroll(scroll_y);
        mounted.page.on_scroll(scroll_y, &layout);
        let state = SectionState::from_page(&mounted.page, None);
        let commands = render_page(
            &mounted.page,
            &mounted.config.content,
            &layout,
            &state,
            &metrics,
            &viewport.scrolled_to(scroll_y),
        );
        Ok(serde_json::to_string(&commands)?)
    })
    .map_err(to_js)
}

/// Static portfolio content as JSON, for hosts that build their own DOM.
#[wasm_bindgen]
pub fn get_content(handle: usize) -> Result<String, JsError> {
    with_page(handle, |mounted| Ok(serde_json::to_string(&mounted.config.content)?)).map_err(to_js)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> String {
        serde_json::json!([
            {"id": "hero", "top": 0.0, "bottom": 800.0},
            {"id": "about", "top": 800.0, "bottom": 1600.0},
            {"id": "skills", "top": 1600.0, "bottom": 2400.0},
        ])
        .to_string()
    }

    #[test]
    fn handles_are_independent() {
        let a = mount("", 0).unwrap();
        let b = mount("", 0).unwrap();
        assert_ne!(a, b);

        let layout = parse_layout(&bounds()).unwrap();
        let active = with_page(a, |m| Ok(m.page.on_scroll(900.0, layout.as_slice()).active)).unwrap();
        assert_eq!(active.as_deref(), Some("about"));
        let other = with_page(b, |m| Ok(m.page.active_section().to_string())).unwrap();
        assert_eq!(other, "hero");
    }

    #[test]
    fn tick_reports_typed_text() {
        let handle = mount("", 0).unwrap();
        let result = with_page(handle, |m| Ok(tick_page(m, 300))).unwrap();
        assert!(result.changed);
        assert_eq!(result.typed.text, "Ful");
        assert!(result.next_deadline_ms.is_some());
    }

    #[test]
    fn dropped_handles_are_rejected() {
        let handle = mount("", 0).unwrap();
        release(handle).unwrap();
        let err = with_page(handle, |_| Ok(())).unwrap_err();
        assert!(matches!(err, BridgeError::UnknownHandle(h) if h == handle));
        assert!(matches!(release(handle), Err(BridgeError::UnknownHandle(_))));
    }

    #[test]
    fn freed_slots_are_reused() {
        let first = mount("", 0).unwrap();
        let second = mount("", 0).unwrap();
        release(first).unwrap();
        let len = PAGES.with_borrow(Vec::len);

        let reused = mount("", 0).unwrap();
        assert_eq!(reused, first);
        assert_eq!(PAGES.with_borrow(Vec::len), len);
        let other = with_page(second, |m| Ok(m.page.active_section().to_string())).unwrap();
        assert_eq!(other, "hero");
    }

    #[test]
    fn invalid_config_is_an_error() {
        let err = mount(r#"{"sections": []}"#, 0).unwrap_err();
        assert!(matches!(err, BridgeError::Config(ConfigError::EmptyRegistry)));
        assert!(matches!(mount("{", 0), Err(BridgeError::Config(ConfigError::Json(_)))));
    }

    #[test]
    fn unknown_layout_json_is_an_error() {
        assert!(matches!(parse_layout("{}"), Err(BridgeError::Json(_))));
    }
}
