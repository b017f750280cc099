use folio_protocol::{HitTarget, Point, RenderCommand};

/// Find what a click at `point` (screen coordinates) activates.
///
/// Replays the transform stack the way a painter would. Every rectangle is
/// opaque to clicks: the topmost one under the point decides, so a panel
/// without a target swallows clicks meant for whatever it covers.
pub fn hit_test(commands: &[RenderCommand], point: Point) -> Option<HitTarget> {
    let mut stack: Vec<(Point, Point)> = Vec::new();
    let mut current = (Point::new(0.0, 0.0), Point::new(1.0, 1.0));
    let mut hit = None;

    for command in commands {
        match command {
            RenderCommand::PushTransform { translate, scale } => {
                stack.push(current);
                let (t, s) = current;
                current = (
                    Point::new(t.x + translate.x * s.x, t.y + translate.y * s.y),
                    Point::new(s.x * scale.x, s.y * scale.y),
                );
            }
            RenderCommand::PopTransform => {
                current = stack.pop().unwrap_or((Point::new(0.0, 0.0), Point::new(1.0, 1.0)));
            }
            RenderCommand::DrawRect { rect, target, .. } => {
                let (t, s) = current;
                if s.x == 0.0 || s.y == 0.0 {
                    continue;
                }
                let local = Point::new((point.x - t.x) / s.x, (point.y - t.y) / s.y);
                if rect.contains(local) {
                    hit = target.as_ref();
                }
            }
            _ => {}
        }
    }
    hit.cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_protocol::{Rect, SectionId, ThemeToken, Viewport};

    use crate::model::navigation::NavigationState;
    use crate::model::registry::SectionRegistry;
    use crate::views::canvas::LayoutMetrics;
    use crate::views::navigation::render_navigation;

    fn button(rect: Rect, target: HitTarget) -> RenderCommand {
        RenderCommand::DrawRect {
            rect,
            color: ThemeToken::Surface,
            border_color: None,
            label: None,
            target: Some(target),
        }
    }

    #[test]
    fn topmost_target_wins() {
        let commands = vec![
            button(Rect::new(0.0, 0.0, 100.0, 100.0), HitTarget::DismissToast),
            button(Rect::new(10.0, 10.0, 20.0, 20.0), HitTarget::ToggleMenu),
        ];
        assert_eq!(
            hit_test(&commands, Point::new(15.0, 15.0)),
            Some(HitTarget::ToggleMenu)
        );
        assert_eq!(
            hit_test(&commands, Point::new(50.0, 50.0)),
            Some(HitTarget::DismissToast)
        );
        assert_eq!(hit_test(&commands, Point::new(150.0, 50.0)), None);
    }

    #[test]
    fn scrolled_content_is_offset() {
        let about = HitTarget::Section(SectionId::from("about"));
        let commands = vec![
            RenderCommand::PushTransform {
                translate: Point::new(0.0, -1_000.0),
                scale: Point::new(1.0, 1.0),
            },
            button(Rect::new(0.0, 1_050.0, 100.0, 20.0), about.clone()),
            RenderCommand::PopTransform,
            button(Rect::new(0.0, 0.0, 100.0, 40.0), HitTarget::ToggleMenu),
        ];
        assert_eq!(hit_test(&commands, Point::new(5.0, 55.0)), Some(about));
        assert_eq!(
            hit_test(&commands, Point::new(5.0, 5.0)),
            Some(HitTarget::ToggleMenu)
        );
    }

    #[test]
    fn untargeted_rects_block_clicks_beneath() {
        let commands = vec![
            button(Rect::new(0.0, 0.0, 100.0, 100.0), HitTarget::SubmitForm),
            RenderCommand::DrawRect {
                rect: Rect::new(0.0, 50.0, 100.0, 50.0),
                color: ThemeToken::Background,
                border_color: None,
                label: None,
                target: None,
            },
        ];
        assert_eq!(
            hit_test(&commands, Point::new(10.0, 10.0)),
            Some(HitTarget::SubmitForm)
        );
        assert_eq!(hit_test(&commands, Point::new(10.0, 75.0)), None);
    }

    #[test]
    fn open_mobile_menu_covers_the_page() {
        let metrics = LayoutMetrics::pixels();
        let viewport = Viewport::new(400.0, 800.0);
        let mut nav = NavigationState::new(&SectionRegistry::default(), 50.0);
        nav.toggle_menu();
        assert!(nav.is_menu_open());

        let mut commands = vec![
            RenderCommand::PushTransform {
                translate: Point::new(0.0, 0.0),
                scale: Point::new(1.0, 1.0),
            },
            button(Rect::new(0.0, 0.0, 400.0, 800.0), HitTarget::Link("/resume.pdf".into())),
            RenderCommand::PopTransform,
        ];
        commands.extend(render_navigation(&nav, &SectionId::from("hero"), &metrics, &viewport));

        // Below the last menu row the overlay is empty.
        let point = Point::new(200.0, 780.0);
        assert_eq!(hit_test(&commands, point), None);
        // The bar itself also absorbs clicks away from its controls.
        let on_bar = Point::new(metrics.padding + 1.0, metrics.nav_height / 2.0);
        assert_eq!(hit_test(&commands, on_bar), None);
    }
}
