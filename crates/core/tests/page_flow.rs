//! Integration test: drive a page the way a host does (config load, layout,
//! scroll events, nav clicks, timers, the contact form) and check what the
//! rendered frames show.

use folio_core::PortfolioConfig;
use folio_core::model::{ContactField, Page};
use folio_core::timers::Scheduler;
use folio_core::views::{LayoutMetrics, PageLayout, SectionState, hit_test, render_page};
use folio_protocol::{HitTarget, Point, RenderCommand, SectionId, Viewport};

fn texts(commands: &[RenderCommand]) -> Vec<&str> {
    commands.iter().filter_map(|c| c.text()).collect()
}

fn layout_for(page: &Page, config: &PortfolioConfig, viewport: &Viewport) -> PageLayout {
    let state = SectionState::from_page(page, None);
    PageLayout::compute(
        &config.content,
        page.tracker().registry(),
        &state,
        &LayoutMetrics::pixels(),
        viewport,
    )
}

/// Screen point at the center of the first rect carrying `target`.
fn center_of(commands: &[RenderCommand], target: &HitTarget) -> Option<Point> {
    commands.iter().find_map(|c| match c {
        RenderCommand::DrawRect {
            rect,
            target: Some(t),
            ..
        } if t == target => Some(Point::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0)),
        _ => None,
    })
}

#[test]
fn nav_click_scrolls_and_updates_active_section() {
    let config = PortfolioConfig::default();
    let scheduler = Scheduler::new();
    let mut page = Page::new(&config, &scheduler, 0).expect("default config is valid");
    let viewport = Viewport::new(1_280.0, 800.0);
    let layout = layout_for(&page, &config, &viewport);
    let metrics = LayoutMetrics::pixels();

    page.on_scroll(0.0, &layout);
    assert_eq!(page.active_section(), &"hero");

    let state = SectionState::from_page(&page, None);
    let frame = render_page(&page, &config.content, &layout, &state, &metrics, &viewport);
    let resume = HitTarget::Section(SectionId::from("resume"));
    let click = center_of(&frame, &resume).expect("resume nav item is drawn");
    assert_eq!(hit_test(&frame, click), Some(resume));

    let offset = page
        .select_section("resume", &layout)
        .expect("resume is laid out");
    let offset = layout.clamp_scroll(offset);
    let update = page.on_scroll(offset, &layout);
    assert_eq!(update.active.as_deref(), Some("resume"));
    assert!(update.scrolled_changed);
    assert!(page.navigation().is_scrolled());
}

#[test]
fn typed_text_reaches_the_hero() {
    let config = PortfolioConfig::default();
    let scheduler = Scheduler::new();
    let mut page = Page::new(&config, &scheduler, 0).expect("default config is valid");
    let viewport = Viewport::new(1_280.0, 800.0);
    let layout = layout_for(&page, &config, &viewport);

    // 20 chars at 100 ms each.
    page.run_timers(2_000);
    assert_eq!(page.typed_text().text, "Full Stack Developer");

    let state = SectionState::from_page(&page, None);
    let frame = render_page(
        &page,
        &config.content,
        &layout,
        &state,
        &LayoutMetrics::pixels(),
        &viewport,
    );
    assert!(texts(&frame).contains(&"Full Stack Developer"));
}

#[test]
fn contact_submission_shows_toast_then_clears() {
    let config = PortfolioConfig::default();
    let scheduler = Scheduler::new();
    let mut page = Page::new(&config, &scheduler, 0).expect("default config is valid");
    let viewport = Viewport::new(1_280.0, 800.0);
    let metrics = LayoutMetrics::pixels();

    assert!(page.submit_contact(0).is_err());
    page.set_contact_field(ContactField::Name, "Ada Lovelace");
    page.set_contact_field(ContactField::Email, "ada@example.com");
    page.set_contact_field(ContactField::Subject, "Engines");
    page.set_contact_field(ContactField::Message, "Let's talk.");
    page.submit_contact(100).expect("form is complete");

    let layout = layout_for(&page, &config, &viewport);
    let contact = layout
        .sections()
        .iter()
        .find(|(id, _)| id == &"contact")
        .map(|(_, b)| *b)
        .expect("contact is laid out");
    let at_contact = viewport.scrolled_to(layout.clamp_scroll(contact.top));
    let state = SectionState::from_page(&page, None);
    let frame = render_page(&page, &config.content, &layout, &state, &metrics, &at_contact);
    assert!(texts(&frame).contains(&"Sending..."));

    page.run_timers(2_100);
    assert_eq!(page.contact().fields().name, "");
    let state = SectionState::from_page(&page, None);
    let frame = render_page(&page, &config.content, &layout, &state, &metrics, &at_contact);
    assert!(texts(&frame).contains(&"Message Sent Successfully!"));

    let dismiss = center_of(&frame, &HitTarget::DismissToast).expect("toast is drawn");
    assert_eq!(hit_test(&frame, dismiss), Some(HitTarget::DismissToast));
    page.dismiss_toast();
    assert!(page.toast().is_none());
}

#[test]
fn custom_config_drives_sections_and_phrases() {
    let json = br#"{
        "sections": ["hero", "blog", "contact"],
        "typing": { "phrases": ["Hi"], "type_speed_ms": 10 }
    }"#;
    let config = PortfolioConfig::from_json(json).expect("valid config");
    let scheduler = Scheduler::new();
    let mut page = Page::new(&config, &scheduler, 0).expect("valid page");
    let viewport = Viewport::new(1_280.0, 800.0);
    let layout = layout_for(&page, &config, &viewport);

    let ids: Vec<&str> = layout.sections().iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["hero", "blog", "contact"]);

    page.run_timers(20);
    assert_eq!(page.typed_text().text, "Hi");
}

#[test]
fn invalid_config_is_rejected_up_front() {
    assert!(PortfolioConfig::from_json(br#"{ "sections": [] }"#).is_err());
    assert!(PortfolioConfig::from_json(br#"{ "typing": { "phrases": [] } }"#).is_err());
    assert!(PortfolioConfig::from_json(br#"{ "typing": { "type_speed_ms": 0 } }"#).is_err());
    assert!(PortfolioConfig::from_json(b"not json").is_err());
}
