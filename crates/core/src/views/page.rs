use folio_protocol::{Point, RenderCommand, SectionId, ThemeToken, TypedText, Viewport};

use crate::content::PortfolioContent;
use crate::model::contact::{ContactField, ContactFields};
use crate::model::navigation::menu_label;
use crate::model::page::Page;

use super::about::render_about;
use super::backdrop::render_backdrop;
use super::canvas::{LayoutMetrics, RenderedSection, SectionCanvas};
use super::contact::{FormState, render_contact, render_toast};
use super::hero::render_hero;
use super::layout::PageLayout;
use super::navigation::render_navigation;
use super::projects::render_projects;
use super::resume::render_resume;
use super::skills::render_skills;

/// Per-frame state the section views read besides static content.
#[derive(Debug, Clone)]
pub struct SectionState<'a> {
    pub typed: TypedText,
    pub form: FormState<'a>,
}

impl<'a> SectionState<'a> {
    /// Nothing typed yet, empty form.
    pub fn idle(fields: &'a ContactFields) -> Self {
        Self {
            typed: TypedText::default(),
            form: FormState {
                fields,
                focused: None,
                submitting: false,
                error: None,
            },
        }
    }

    pub fn from_page(page: &'a Page, focused: Option<ContactField>) -> Self {
        let contact = page.contact();
        Self {
            typed: page.typed_text(),
            form: FormState {
                fields: contact.fields(),
                focused,
                submitting: contact.is_submitting(),
                error: contact.last_error(),
            },
        }
    }
}

/// Which view draws a section id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    About,
    Skills,
    Projects,
    Resume,
    Contact,
    /// An id with no dedicated view: drawn as a bare heading.
    Other,
}

impl SectionKind {
    pub fn of(id: &str) -> Self {
        match id {
            "hero" => Self::Hero,
            "about" => Self::About,
            "skills" => Self::Skills,
            "projects" => Self::Projects,
            "resume" => Self::Resume,
            "contact" => Self::Contact,
            _ => Self::Other,
        }
    }
}

/// Render one section with its top edge at `top` (document coordinates).
pub fn render_section(
    id: &SectionId,
    content: &PortfolioContent,
    state: &SectionState<'_>,
    metrics: &LayoutMetrics,
    viewport: &Viewport,
    top: f64,
) -> RenderedSection {
    let width = viewport.width;
    match SectionKind::of(id) {
        SectionKind::Hero => render_hero(
            id,
            content,
            &state.typed,
            metrics,
            width,
            top,
            viewport.height,
        ),
        SectionKind::About => render_about(id, content, metrics, width, top),
        SectionKind::Skills => render_skills(id, content, metrics, width, top),
        SectionKind::Projects => render_projects(id, content, metrics, width, top),
        SectionKind::Resume => render_resume(id, content, metrics, width, top),
        SectionKind::Contact => render_contact(id, content, state.form, metrics, width, top),
        SectionKind::Other => {
            let label = menu_label(id);
            let mut canvas = SectionCanvas::begin(id, &label, metrics, width, top);
            canvas.heading(&label);
            canvas.finish()
        }
    }
}

pub fn render_footer(
    content: &PortfolioContent,
    metrics: &LayoutMetrics,
    width: f64,
    top: f64,
) -> RenderedSection {
    let owner = &content.owner;
    let mut canvas = SectionCanvas::begin("footer", "Footer", metrics, width, top);
    canvas.push(RenderCommand::DrawLine {
        from: Point::new(0.0, top),
        to: Point::new(width, top),
        color: ThemeToken::Border,
        width: 1.0,
    });
    canvas.centered_paragraph(&owner.footer_tagline, ThemeToken::TextSecondary);
    canvas.centered_paragraph(&owner.copyright, ThemeToken::TextMuted);
    canvas.finish()
}

/// Render a full frame: backdrop, the sections intersecting the viewport,
/// the fixed nav bar and any toast.
///
/// Sections are emitted in document coordinates inside a transform that
/// scrolls them by `viewport.y`; everything else is in screen coordinates.
pub fn render_page(
    page: &Page,
    content: &PortfolioContent,
    layout: &PageLayout,
    state: &SectionState<'_>,
    metrics: &LayoutMetrics,
    viewport: &Viewport,
) -> Vec<RenderCommand> {
    let mut commands = render_backdrop(page.background(), viewport, metrics);

    let visible_top = viewport.y;
    let visible_bottom = viewport.y + viewport.height;
    let visible = |top: f64, bottom: f64| bottom > visible_top && top < visible_bottom;

    commands.push(RenderCommand::PushTransform {
        translate: Point::new(-viewport.x, -viewport.y),
        scale: Point::new(1.0, 1.0),
    });
    for (id, bounds) in layout.sections() {
        if visible(bounds.top, bounds.bottom) {
            let section = render_section(id, content, state, metrics, viewport, bounds.top);
            commands.extend(section.commands);
        }
    }
    let footer = layout.footer();
    if visible(footer.top, footer.bottom) {
        commands.extend(render_footer(content, metrics, viewport.width, footer.top).commands);
    }
    commands.push(RenderCommand::PopTransform);

    commands.extend(render_navigation(
        page.navigation(),
        page.active_section(),
        metrics,
        viewport,
    ));
    if let Some(toast) = page.toast() {
        commands.extend(render_toast(toast, viewport, metrics));
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortfolioConfig;
    use crate::timers::Scheduler;

    fn group_ids(commands: &[RenderCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::BeginGroup { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn only_visible_sections_are_rendered() {
        let config = PortfolioConfig::default();
        let scheduler = Scheduler::new();
        let page = Page::new(&config, &scheduler, 0).unwrap();
        let metrics = LayoutMetrics::pixels();
        let viewport = Viewport::new(1_280.0, 800.0);
        let state = SectionState::from_page(&page, None);
        let layout = PageLayout::compute(
            &config.content,
            page.tracker().registry(),
            &state,
            &metrics,
            &viewport,
        );

        let top = render_page(&page, &config.content, &layout, &state, &metrics, &viewport);
        let ids = group_ids(&top);
        assert!(ids.contains(&"hero"));
        assert!(!ids.contains(&"contact"));
        assert_eq!(ids.first(), Some(&"backdrop"));
        assert!(ids.contains(&"nav"));

        let bottom = viewport.scrolled_to(layout.max_scroll());
        let ids_bottom = render_page(&page, &config.content, &layout, &state, &metrics, &bottom);
        let ids_bottom = group_ids(&ids_bottom);
        assert!(ids_bottom.contains(&"footer"));
        assert!(!ids_bottom.contains(&"hero"));
    }

    #[test]
    fn unknown_sections_get_a_heading() {
        let fields = ContactFields::default();
        let section = render_section(
            &SectionId::from("blog"),
            &PortfolioContent::sample(),
            &SectionState::idle(&fields),
            &LayoutMetrics::cells(),
            &Viewport::new(100.0, 40.0),
            0.0,
        );
        assert!(section.commands.iter().any(|c| c.text() == Some("Blog")));
    }
}
