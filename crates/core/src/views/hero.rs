use folio_protocol::{HitTarget, Rect, RenderCommand, SectionId, ThemeToken, TypedText};

use crate::content::PortfolioContent;

use super::canvas::{Button, LayoutMetrics, RenderedSection, SectionCanvas};

/// Render the landing section: greeting, name, the typed phrase with its
/// cursor, intro and calls to action.
///
/// The hero is always at least `min_height` tall so that it fills the first
/// screen.
pub fn render_hero(
    id: &SectionId,
    content: &PortfolioContent,
    typed: &TypedText,
    metrics: &LayoutMetrics,
    width: f64,
    top: f64,
    min_height: f64,
) -> RenderedSection {
    let owner = &content.owner;
    let mut canvas = SectionCanvas::begin(id, "Home", metrics, width, top);
    canvas.advance_to(top + metrics.nav_height + metrics.padding);
    canvas.skip(1.0);

    canvas.display(&owner.greeting, 1.5, 1.0, ThemeToken::TextSecondary);
    canvas.display(&owner.name, 3.5, 3.0, ThemeToken::GradientText);

    // Typed phrase, centered, with the cursor block right after the last glyph.
    let y = canvas.y();
    canvas.display(&typed.text, 1.75, 2.0, ThemeToken::Accent);
    if typed.cursor_visible {
        let text_width = typed.text.chars().count() as f64 * metrics.char_width * 1.75;
        let lh = metrics.line_height;
        let h = lh * 1.25;
        canvas.push(RenderCommand::DrawRect {
            rect: Rect::new(
                width / 2.0 + text_width / 2.0 + metrics.char_width / 2.0,
                y + lh - h / 2.0,
                (metrics.char_width / 4.0).max(1.0),
                h.min(2.0 * lh),
            ),
            color: ThemeToken::TypingCursor,
            border_color: None,
            label: None,
            target: None,
        });
    }
    canvas.skip(1.0);

    canvas.centered_paragraph(&owner.intro, ThemeToken::TextSecondary);
    canvas.skip(1.5);

    let left = canvas.left();
    let inner = canvas.content_width();
    canvas.button_row(
        left,
        inner,
        true,
        vec![
            Button::new(
                "Download Resume",
                ThemeToken::ButtonPrimary,
                Some(HitTarget::Link(owner.resume_url.clone())),
            ),
            Button::new(
                "View My Work",
                ThemeToken::Surface,
                Some(HitTarget::Section(SectionId::from("projects"))),
            ),
        ],
    );
    canvas.skip(0.5);

    let socials = content
        .contact
        .socials
        .iter()
        .take(3)
        .map(|s| Button::new(&s.name, ThemeToken::Surface, Some(HitTarget::Link(s.url.clone()))))
        .collect();
    canvas.button_row(left, inner, true, socials);

    canvas.finish_at_least(min_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero(typed: TypedText) -> RenderedSection {
        render_hero(
            &SectionId::from("hero"),
            &PortfolioContent::sample(),
            &typed,
            &LayoutMetrics::pixels(),
            1_280.0,
            0.0,
            800.0,
        )
    }

    fn cursor_rects(section: &RenderedSection) -> usize {
        section
            .commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    RenderCommand::DrawRect {
                        color: ThemeToken::TypingCursor,
                        ..
                    }
                )
            })
            .count()
    }

    #[test]
    fn fills_at_least_one_screen() {
        let section = hero(TypedText::default());
        assert!(section.height >= 800.0);
    }

    #[test]
    fn shows_typed_prefix_and_cursor() {
        let section = hero(TypedText {
            text: "Full".into(),
            cursor_visible: true,
        });
        assert!(section.commands.iter().any(|c| c.text() == Some("Full")));
        assert_eq!(cursor_rects(&section), 1);

        let hidden = hero(TypedText {
            text: "Full".into(),
            cursor_visible: false,
        });
        assert_eq!(cursor_rects(&hidden), 0);
    }

    #[test]
    fn view_my_work_targets_projects() {
        let section = hero(TypedText::default());
        let target = section
            .commands
            .iter()
            .find(|c| c.text() == Some("View My Work"))
            .and_then(|c| c.target());
        assert_eq!(
            target,
            Some(&HitTarget::Section(SectionId::from("projects")))
        );
    }
}
