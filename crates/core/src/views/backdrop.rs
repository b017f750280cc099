use folio_protocol::{Rect, RenderCommand, ThemeToken, Viewport};

use crate::model::background::BackgroundVariant;

use super::canvas::LayoutMetrics;

/// Fraction of the scroll offset the particle field moves by.
const PARALLAX: f64 = 0.2;

/// Render the screen-space backdrop for the current variant: a tinted fill
/// and a field of particles that drifts slower than the page.
///
/// Particle positions are a pure function of the variant and index, so the
/// field is stable from frame to frame.
pub fn render_backdrop(
    variant: BackgroundVariant,
    viewport: &Viewport,
    metrics: &LayoutMetrics,
) -> Vec<RenderCommand> {
    let count = variant.particle_count();
    let mut commands = Vec::with_capacity(count + 3);
    commands.push(RenderCommand::BeginGroup {
        id: "backdrop".into(),
        label: None,
    });
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, viewport.width, viewport.height),
        color: variant.token(),
        border_color: None,
        label: None,
        target: None,
    });

    if viewport.width > 0.0 && viewport.height > 0.0 {
        let size = (metrics.char_width / 2.0).max(1.0).min(metrics.line_height);
        let drift = viewport.y * PARALLAX;
        let mut seed = 0x9E37_79B9_7F4A_7C15_u64 ^ (variant as u64 + 1);
        for _ in 0..count {
            let fx = unit(&mut seed);
            let fy = unit(&mut seed);
            let x = fx * (viewport.width - size).max(0.0);
            let y = (fy * viewport.height - drift).rem_euclid(viewport.height);
            commands.push(RenderCommand::DrawRect {
                rect: Rect::new(x, y, size, size),
                color: ThemeToken::Particle,
                border_color: None,
                label: None,
                target: None,
            });
        }
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

/// xorshift64*, mapped to `[0, 1)`.
fn unit(state: &mut u64) -> f64 {
    let mut x = *state;
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    *state = x;
    (x.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particles(commands: &[RenderCommand]) -> Vec<Rect> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect {
                    rect,
                    color: ThemeToken::Particle,
                    ..
                } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn fill_follows_variant() {
        let viewport = Viewport::new(800.0, 600.0);
        let commands = render_backdrop(BackgroundVariant::Skills, &viewport, &LayoutMetrics::pixels());
        assert!(matches!(
            commands[1],
            RenderCommand::DrawRect {
                color: ThemeToken::BackdropSkills,
                ..
            }
        ));
        assert_eq!(
            particles(&commands).len(),
            BackgroundVariant::Skills.particle_count()
        );
    }

    #[test]
    fn particles_stay_on_screen_and_are_stable() {
        let viewport = Viewport::new(800.0, 600.0).scrolled_to(12_345.0);
        let metrics = LayoutMetrics::pixels();
        let a = particles(&render_backdrop(BackgroundVariant::Hero, &viewport, &metrics));
        let b = particles(&render_backdrop(BackgroundVariant::Hero, &viewport, &metrics));
        assert_eq!(a, b);
        for rect in a {
            assert!(rect.x >= 0.0 && rect.x + rect.w <= 800.0);
            assert!(rect.y >= 0.0 && rect.y < 600.0);
        }
    }

    #[test]
    fn empty_viewport_draws_only_fill() {
        let viewport = Viewport::new(0.0, 0.0);
        let commands = render_backdrop(BackgroundVariant::Contact, &viewport, &LayoutMetrics::cells());
        assert!(particles(&commands).is_empty());
    }
}
