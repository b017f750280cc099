use folio_protocol::{HitTarget, SectionId, ThemeToken};

use crate::content::{PortfolioContent, Project};

use super::canvas::{Button, LayoutMetrics, RenderedSection, SectionCanvas};

const GITHUB_PROFILE: &str = "https://github.com";

/// Render project cards. Featured projects take a full row; the rest share
/// rows two at a time on wide screens.
pub fn render_projects(
    id: &SectionId,
    content: &PortfolioContent,
    metrics: &LayoutMetrics,
    width: f64,
    top: f64,
) -> RenderedSection {
    let mut canvas = SectionCanvas::begin(id, "Projects", metrics, width, top);
    canvas.heading("Featured Projects");
    canvas.centered_paragraph(&content.intros.projects, ThemeToken::TextSecondary);
    canvas.skip(1.5);

    let gap = metrics.padding / 2.0;
    let wide = canvas.column_spans(1, gap);
    let pair = canvas.column_spans(if metrics.is_mobile(width) { 1 } else { 2 }, gap);

    let mut rows: Vec<Vec<&Project>> = Vec::new();
    let mut pending: Vec<&Project> = Vec::new();
    for project in &content.projects {
        if project.featured {
            rows.push(vec![project]);
        } else {
            pending.push(project);
            if pending.len() == pair.len() {
                rows.push(std::mem::take(&mut pending));
            }
        }
    }
    if !pending.is_empty() {
        rows.push(pending);
    }

    for row in rows {
        let spans = if row.len() == 1 && row[0].featured {
            &wide
        } else {
            &pair
        };
        let row_top = canvas.y();
        let mut row_bottom = row_top;
        for (project, &(cx, cw)) in row.into_iter().zip(spans) {
            canvas.rewind_to(row_top);
            project_card(&mut canvas, project, cx, cw);
            row_bottom = row_bottom.max(canvas.y());
        }
        canvas.rewind_to(row_bottom + gap);
    }

    canvas.skip(0.5);
    let x = canvas.left();
    let inner = canvas.content_width();
    let github = content
        .contact
        .socials
        .iter()
        .find(|social| social.name.eq_ignore_ascii_case("github"))
        .map_or(GITHUB_PROFILE, |social| social.url.as_str());
    canvas.button_row(
        x,
        inner,
        true,
        vec![Button::new(
            "View More on GitHub",
            ThemeToken::Surface,
            Some(HitTarget::Link(github.to_owned())),
        )],
    );

    canvas.finish()
}

fn project_card(canvas: &mut SectionCanvas<'_>, project: &Project, cx: f64, cw: f64) {
    let metrics = *canvas.metrics();
    let inset = metrics.char_width * 2.0;
    let (x, w) = (cx + inset, cw - 2.0 * inset);
    let top = canvas.y();
    let mark = canvas.mark();

    canvas.skip(0.5);
    if project.featured {
        canvas.label_pair(
            x,
            w,
            (&project.title, ThemeToken::TextPrimary),
            ("Featured", ThemeToken::TagText),
        );
    } else {
        canvas.title(x, &project.title, ThemeToken::TextPrimary);
    }
    canvas.paragraph(x, w, &project.description, ThemeToken::TextMuted);
    canvas.skip(0.25);
    let tags = project
        .technologies
        .iter()
        .map(|tech| Button::new(tech.as_str(), ThemeToken::TagBackground, None))
        .collect();
    canvas.button_row(x, w, false, tags);

    let mut links = Vec::new();
    if let Some(url) = &project.github_url {
        links.push(Button::new(
            "Code",
            ThemeToken::Surface,
            Some(HitTarget::Link(url.clone())),
        ));
    }
    if let Some(url) = &project.live_url {
        links.push(Button::new(
            "Live Demo",
            ThemeToken::ButtonPrimary,
            Some(HitTarget::Link(url.clone())),
        ));
    }
    if !links.is_empty() {
        canvas.button_row(x, w, false, links);
    }
    canvas.frame(mark, cx, top, cw, ThemeToken::CardBackground, ThemeToken::CardBorder);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_project_gets_a_title_and_links() {
        let content = PortfolioContent::sample();
        let section = render_projects(
            &SectionId::from("projects"),
            &content,
            &LayoutMetrics::pixels(),
            1_280.0,
            0.0,
        );
        let texts: Vec<&str> = section.commands.iter().filter_map(|c| c.text()).collect();
        for project in &content.projects {
            assert!(texts.contains(&project.title.as_str()), "{}", project.title);
        }
        let demos = texts.iter().filter(|t| **t == "Live Demo").count();
        assert_eq!(demos, content.projects.len());
        assert_eq!(texts.iter().filter(|t| **t == "Featured").count(), 2);
    }

    #[test]
    fn projects_without_links_have_no_buttons() {
        let content = PortfolioContent {
            projects: vec![Project {
                title: "Engine".into(),
                ..Project::default()
            }],
            ..PortfolioContent::sample()
        };
        let section = render_projects(
            &SectionId::from("projects"),
            &content,
            &LayoutMetrics::cells(),
            100.0,
            0.0,
        );
        assert!(!section.commands.iter().any(|c| c.text() == Some("Code")));
    }
}
