use folio_protocol::{HitTarget, Point, Rect, RenderCommand, SectionId, TextAlign, ThemeToken};

use crate::content::PortfolioContent;

use super::canvas::{Button, LayoutMetrics, RenderedSection, SectionCanvas};

/// Render the résumé: download actions, an experience timeline, education
/// and the closing summary.
pub fn render_resume(
    id: &SectionId,
    content: &PortfolioContent,
    metrics: &LayoutMetrics,
    width: f64,
    top: f64,
) -> RenderedSection {
    let resume = &content.resume;
    let mut canvas = SectionCanvas::begin(id, "Resume", metrics, width, top);
    canvas.heading("Resume");
    canvas.centered_paragraph(&content.intros.resume, ThemeToken::TextSecondary);
    canvas.skip(1.0);

    let x = canvas.left();
    let inner = canvas.content_width();
    let url = &content.owner.resume_url;
    canvas.button_row(
        x,
        inner,
        true,
        vec![
            Button::new(
                "Download Resume",
                ThemeToken::ButtonPrimary,
                Some(HitTarget::Link(url.clone())),
            ),
            Button::new(
                "View Online",
                ThemeToken::Surface,
                Some(HitTarget::Link(url.clone())),
            ),
        ],
    );
    canvas.skip(1.0);

    canvas.title(x, "Professional Experience", ThemeToken::Accent);
    canvas.skip(0.5);
    let rail = x + metrics.char_width;
    let body = x + metrics.char_width * 4.0;
    let body_width = inner - metrics.char_width * 4.0;
    let timeline_top = canvas.y();
    for job in &resume.experience {
        canvas.push(RenderCommand::DrawRect {
            rect: Rect::new(
                rail - metrics.char_width / 2.0,
                canvas.y() + metrics.line_height / 4.0,
                metrics.char_width,
                metrics.line_height / 2.0,
            ),
            color: ThemeToken::TimelineDot,
            border_color: None,
            label: None,
            target: None,
        });
        canvas.label_pair(
            body,
            body_width,
            (&job.title, ThemeToken::TextPrimary),
            (&job.period, ThemeToken::TextMuted),
        );
        let place = format!("{} · {}", job.company, job.location);
        canvas.text(body, &place, ThemeToken::Accent, TextAlign::Left);
        for item in &job.achievements {
            canvas.paragraph(body, body_width, &format!("• {item}"), ThemeToken::TextSecondary);
        }
        canvas.skip(1.0);
    }
    if !resume.experience.is_empty() {
        canvas.push(RenderCommand::DrawLine {
            from: Point::new(rail, timeline_top),
            to: Point::new(rail, canvas.y() - metrics.line_height),
            color: ThemeToken::TimelineLine,
            width: 2.0,
        });
    }

    canvas.title(x, "Education", ThemeToken::Accent);
    canvas.skip(0.5);
    for edu in &resume.education {
        let card_top = canvas.y();
        let mark = canvas.mark();
        let inset = metrics.char_width * 2.0;
        canvas.skip(0.5);
        canvas.label_pair(
            x + inset,
            inner - 2.0 * inset,
            (&edu.degree, ThemeToken::TextPrimary),
            (&edu.period, ThemeToken::TextMuted),
        );
        let place = format!("{} · {}", edu.school, edu.location);
        canvas.text(x + inset, &place, ThemeToken::Accent, TextAlign::Left);
        canvas.paragraph(x + inset, inner - 2.0 * inset, &edu.details, ThemeToken::TextSecondary);
        canvas.skip(0.5);
        canvas.frame(mark, x, card_top, inner, ThemeToken::CardBackground, ThemeToken::CardBorder);
        canvas.skip(0.5);
    }

    if !resume.summary.is_empty() {
        canvas.skip(1.0);
        canvas.title(x, "Professional Summary", ThemeToken::Accent);
        canvas.paragraph(x, inner, &resume.summary, ThemeToken::TextSecondary);
    }

    canvas.finish()
}
