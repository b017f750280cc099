use folio_protocol::{SectionId, ThemeToken};

use crate::content::PortfolioContent;

use super::canvas::{LayoutMetrics, RenderedSection, SectionCanvas, Tile};

/// Render skill categories as cards of labelled level bars, followed by the
/// highlight tiles.
pub fn render_skills(
    id: &SectionId,
    content: &PortfolioContent,
    metrics: &LayoutMetrics,
    width: f64,
    top: f64,
) -> RenderedSection {
    let mut canvas = SectionCanvas::begin(id, "Skills", metrics, width, top);
    canvas.heading("My Skills");
    canvas.centered_paragraph(&content.intros.skills, ThemeToken::TextSecondary);
    canvas.skip(1.5);

    let gap = metrics.padding / 2.0;
    let per_row = if metrics.is_mobile(width) { 1 } else { 3 };
    let spans = canvas.column_spans(per_row, gap);
    let inset = metrics.char_width * 2.0;

    for row in content.skills.chunks(spans.len()) {
        let row_top = canvas.y();
        let mut row_bottom = row_top;
        for (category, &(cx, cw)) in row.iter().zip(&spans) {
            canvas.rewind_to(row_top);
            let mark = canvas.mark();
            let (x, w) = (cx + inset, cw - 2.0 * inset);
            canvas.skip(0.5);
            canvas.title(x, &category.title, ThemeToken::GradientText);
            canvas.skip(0.5);
            for skill in &category.skills {
                let level = format!("{}%", skill.level.min(100));
                canvas.label_pair(
                    x,
                    w,
                    (&skill.name, ThemeToken::TextPrimary),
                    (&level, ThemeToken::Accent),
                );
                canvas.bar(x, w, skill.fraction());
            }
            canvas.skip(0.5);
            canvas.frame(mark, cx, row_top, cw, ThemeToken::CardBackground, ThemeToken::CardBorder);
            row_bottom = row_bottom.max(canvas.y());
        }
        canvas.rewind_to(row_bottom + gap);
    }

    if !content.highlights.is_empty() {
        canvas.skip(1.0);
        let tiles = content
            .highlights
            .iter()
            .map(|h| Tile {
                lines: vec![(h.clone(), ThemeToken::TextPrimary)],
                target: None,
            })
            .collect();
        let (x, inner) = (canvas.left(), canvas.content_width());
        canvas.tile_grid(x, inner, tiles, if metrics.is_mobile(width) { 2 } else { 4 });
    }

    canvas.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_protocol::RenderCommand;

    #[test]
    fn draws_one_bar_per_skill() {
        let content = PortfolioContent::sample();
        let section = render_skills(
            &SectionId::from("skills"),
            &content,
            &LayoutMetrics::pixels(),
            1_280.0,
            0.0,
        );
        let tracks = section
            .commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    RenderCommand::DrawRect {
                        color: ThemeToken::SkillBarTrack,
                        ..
                    }
                )
            })
            .count();
        let skills: usize = content.skills.iter().map(|c| c.skills.len()).sum();
        assert_eq!(tracks, skills);
        let texts: Vec<&str> = section.commands.iter().filter_map(|c| c.text()).collect();
        assert!(texts.contains(&"95%"));
        assert!(texts.contains(&"Clean Code Advocate"));
    }
}
