use folio_protocol::{HitTarget, Point, Rect, RenderCommand, SectionId, TextAlign, ThemeToken, Viewport};

use crate::model::navigation::NavigationState;

use super::canvas::{LayoutMetrics, label_width};

const LOGO: &str = "Portfolio";

/// Render the fixed navigation bar in screen coordinates.
///
/// Wide viewports get the inline menu with the active item highlighted;
/// narrow ones get a toggle button and, while open, a full-width menu panel.
pub fn render_navigation(
    nav: &NavigationState,
    active: &SectionId,
    metrics: &LayoutMetrics,
    viewport: &Viewport,
) -> Vec<RenderCommand> {
    let width = viewport.width;
    let bar_h = metrics.nav_height;
    let mid = bar_h / 2.0;
    let mut commands = Vec::with_capacity(nav.items().len() * 2 + 8);

    commands.push(RenderCommand::BeginGroup {
        id: "nav".into(),
        label: Some("Navigation".into()),
    });
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, width, bar_h),
        color: if nav.is_scrolled() {
            ThemeToken::NavBackgroundScrolled
        } else {
            ThemeToken::NavBackground
        },
        border_color: nav.is_scrolled().then_some(ThemeToken::Border),
        label: None,
        target: None,
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(metrics.padding, mid),
        text: LOGO.into(),
        color: ThemeToken::GradientText,
        font_size: metrics.font_size * 1.5,
        align: TextAlign::Left,
    });

    if metrics.is_mobile(width) {
        let glyph = if nav.is_menu_open() { "✕" } else { "☰" };
        let w = label_width(metrics, glyph, metrics.char_width);
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(width - metrics.padding - w, 0.0, w, bar_h),
            color: ThemeToken::Surface,
            border_color: None,
            label: Some(glyph.into()),
            target: Some(HitTarget::ToggleMenu),
        });
        commands.push(RenderCommand::EndGroup);
        if nav.is_menu_open() {
            render_mobile_menu(&mut commands, nav, active, metrics, viewport);
        }
        return commands;
    }

    let item_pad = metrics.char_width * 2.0;
    let widths: Vec<f64> = nav
        .items()
        .iter()
        .map(|item| label_width(metrics, &item.label, item_pad))
        .collect();
    let total: f64 = widths.iter().sum();
    let mut x = (width - metrics.padding - total).max(metrics.padding);
    for (item, w) in nav.items().iter().zip(widths) {
        let is_active = &item.id == active;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, 0.0, w, bar_h),
            color: if is_active {
                ThemeToken::NavItemActiveBackground
            } else {
                ThemeToken::NavBackground
            },
            border_color: None,
            label: None,
            target: Some(HitTarget::Section(item.id.clone())),
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x + w / 2.0, mid),
            text: item.label.clone(),
            color: if is_active {
                ThemeToken::NavItemActive
            } else {
                ThemeToken::NavItem
            },
            font_size: metrics.font_size,
            align: TextAlign::Center,
        });
        x += w;
    }
    commands.push(RenderCommand::EndGroup);
    commands
}

fn render_mobile_menu(
    commands: &mut Vec<RenderCommand>,
    nav: &NavigationState,
    active: &SectionId,
    metrics: &LayoutMetrics,
    viewport: &Viewport,
) {
    commands.push(RenderCommand::BeginGroup {
        id: "nav-menu".into(),
        label: Some("Menu".into()),
    });
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, metrics.nav_height, viewport.width, viewport.height - metrics.nav_height),
        color: ThemeToken::Background,
        border_color: None,
        label: None,
        target: None,
    });
    let x = metrics.padding / 2.0;
    let w = viewport.width - metrics.padding;
    let row_h = metrics.control_height;
    let mut y = metrics.nav_height + metrics.padding / 2.0;
    for item in nav.items() {
        let is_active = &item.id == active;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, y, w, row_h),
            color: if is_active {
                ThemeToken::ButtonPrimary
            } else {
                ThemeToken::Surface
            },
            border_color: None,
            label: None,
            target: Some(HitTarget::Section(item.id.clone())),
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x + metrics.char_width * 2.0, y + row_h / 2.0),
            text: item.label.clone(),
            color: if is_active {
                ThemeToken::ButtonText
            } else {
                ThemeToken::NavItem
            },
            font_size: metrics.font_size,
            align: TextAlign::Left,
        });
        y += row_h + metrics.line_height / 4.0;
    }
    commands.push(RenderCommand::EndGroup);
}
