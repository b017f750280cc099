use folio_protocol::{SectionId, ThemeToken};

use crate::content::PortfolioContent;

use super::canvas::{LayoutMetrics, RenderedSection, SectionCanvas, Tile};

pub fn render_about(
    id: &SectionId,
    content: &PortfolioContent,
    metrics: &LayoutMetrics,
    width: f64,
    top: f64,
) -> RenderedSection {
    let about = &content.about;
    let mut canvas = SectionCanvas::begin(id, "About", metrics, width, top);
    canvas.heading("About Me");
    canvas.centered_paragraph(&about.summary, ThemeToken::TextSecondary);
    canvas.skip(1.5);

    let x = canvas.left();
    let inner = canvas.content_width();
    if !about.journey.is_empty() {
        canvas.title(x, "My Journey", ThemeToken::GradientText);
        canvas.skip(0.5);
        for paragraph in &about.journey {
            canvas.paragraph(x, inner, paragraph, ThemeToken::TextSecondary);
            canvas.skip(0.5);
        }
        canvas.skip(1.0);
    }

    let columns = if metrics.is_mobile(width) { 2 } else { 4 };
    let stats = about
        .achievements
        .iter()
        .map(|a| Tile {
            lines: vec![
                (a.number.clone(), ThemeToken::StatNumber),
                (a.label.clone(), ThemeToken::TextSecondary),
            ],
            target: None,
        })
        .collect();
    canvas.tile_grid(x, inner, stats, columns);
    canvas.skip(1.0);

    // Focus areas: one card per area, two per row on wide screens.
    let gap = metrics.padding / 2.0;
    let spans = canvas.column_spans(if metrics.is_mobile(width) { 1 } else { 2 }, gap);
    for row in about.focus_areas.chunks(spans.len()) {
        let row_top = canvas.y();
        let mut row_bottom = row_top;
        for (area, &(cx, cw)) in row.iter().zip(&spans) {
            canvas.rewind_to(row_top);
            let mark = canvas.mark();
            let inset = metrics.char_width * 2.0;
            canvas.skip(0.5);
            canvas.title(cx + inset, &area.title, ThemeToken::TextPrimary);
            canvas.paragraph(cx + inset, cw - 2.0 * inset, &area.description, ThemeToken::TextMuted);
            canvas.skip(0.5);
            canvas.frame(mark, cx, row_top, cw, ThemeToken::CardBackground, ThemeToken::CardBorder);
            row_bottom = row_bottom.max(canvas.y());
        }
        canvas.rewind_to(row_bottom + gap);
    }

    canvas.finish()
}
