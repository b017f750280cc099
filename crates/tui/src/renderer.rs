use folio_protocol::{Point, RenderCommand, TextAlign, ThemeToken};
use ratatui::{buffer::Buffer, layout::Rect, style::Color};

pub fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::Surface => Color::Rgb(31, 35, 58),
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::Accent => Color::Cyan,
        ThemeToken::GradientText => Color::LightMagenta,
        ThemeToken::NavBackground => Color::Black,
        ThemeToken::NavBackgroundScrolled => Color::Rgb(20, 23, 42),
        ThemeToken::NavItem => Color::Gray,
        ThemeToken::NavItemActive => Color::LightMagenta,
        ThemeToken::NavItemActiveBackground => Color::Rgb(45, 30, 80),
        ThemeToken::TypingCursor => Color::Cyan,
        ThemeToken::CardBackground => Color::Rgb(26, 30, 51),
        ThemeToken::CardBorder => Color::Rgb(70, 50, 120),
        ThemeToken::TagBackground => Color::Rgb(45, 30, 80),
        ThemeToken::TagText => Color::LightMagenta,
        ThemeToken::SkillBarTrack => Color::Rgb(39, 43, 69),
        ThemeToken::SkillBarFill => Color::Magenta,
        ThemeToken::TimelineLine => Color::Magenta,
        ThemeToken::TimelineDot => Color::Cyan,
        ThemeToken::StatNumber => Color::LightMagenta,
        ThemeToken::InputBackground => Color::Rgb(18, 21, 38),
        ThemeToken::InputBorder => Color::DarkGray,
        ThemeToken::ButtonPrimary => Color::Rgb(124, 58, 237),
        ThemeToken::ButtonDisabled => Color::DarkGray,
        ThemeToken::ButtonText => Color::White,
        ThemeToken::ToastBackground => Color::Rgb(31, 35, 58),
        ThemeToken::ToastText => Color::LightGreen,
        ThemeToken::ErrorText => Color::LightRed,
        ThemeToken::BackdropHero => Color::Black,
        ThemeToken::BackdropAbout => Color::Rgb(13, 15, 29),
        ThemeToken::BackdropSkills => Color::Rgb(10, 17, 28),
        ThemeToken::BackdropProjects => Color::Rgb(16, 12, 28),
        ThemeToken::BackdropResume => Color::Rgb(12, 16, 24),
        ThemeToken::BackdropContact => Color::Rgb(14, 12, 24),
        ThemeToken::Particle => Color::Rgb(90, 70, 140),
    }
}

/// Translation/scale pair for PushTransform/PopTransform.
#[derive(Debug, Clone, Copy)]
struct Transform {
    translate: Point,
    scale: Point,
}

impl Transform {
    const IDENTITY: Self = Self {
        translate: Point { x: 0.0, y: 0.0 },
        scale: Point { x: 1.0, y: 1.0 },
    };

    fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale.x + self.translate.x,
            p.y * self.scale.y + self.translate.y,
        )
    }
}

/// Paints render commands measured in character cells into a buffer area.
pub struct CellPainter<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    clip: Rect,
    clip_stack: Vec<Rect>,
    transforms: Vec<Transform>,
}

impl<'a> CellPainter<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        Self {
            buf,
            area,
            clip: area,
            clip_stack: Vec::new(),
            transforms: Vec::new(),
        }
    }

    fn transform(&self) -> Transform {
        self.transforms.last().copied().unwrap_or(Transform::IDENTITY)
    }

    /// Map a unit-space rectangle to the cells it covers, clipped.
    fn cells(&self, x: f64, y: f64, w: f64, h: f64) -> Option<Rect> {
        let tf = self.transform();
        let min = tf.apply(Point::new(x, y));
        let max = tf.apply(Point::new(x + w, y + h));
        let left = f64::from(self.area.x) + min.x.round();
        let top = f64::from(self.area.y) + min.y.round();
        let right = f64::from(self.area.x) + max.x.round();
        let bottom = f64::from(self.area.y) + max.y.round();
        if right <= left || bottom <= top || right <= 0.0 || bottom <= 0.0 {
            return None;
        }
        let left = left.max(0.0) as u16;
        let top = top.max(0.0) as u16;
        let rect = Rect::new(
            left,
            top,
            (right as u16).saturating_sub(left),
            (bottom as u16).saturating_sub(top),
        );
        let clipped = rect.intersection(self.clip);
        (!clipped.is_empty()).then_some(clipped)
    }

    fn put(&mut self, x: u16, y: u16, ch: char, fg: Option<Color>, bg: Option<Color>) {
        let inside = x >= self.clip.x
            && x < self.clip.right()
            && y >= self.clip.y
            && y < self.clip.bottom();
        if !inside {
            return;
        }
        let cell = &mut self.buf[(x, y)];
        cell.set_char(ch);
        if let Some(fg) = fg {
            cell.set_fg(fg);
        }
        if let Some(bg) = bg {
            cell.set_bg(bg);
        }
    }

    fn put_str(&mut self, x: i64, y: u16, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            let col = x + i as i64;
            if col < 0 || col > i64::from(u16::MAX) {
                continue;
            }
            self.put(col as u16, y, ch, Some(fg), None);
        }
    }

    pub fn paint(&mut self, commands: &[RenderCommand]) {
        for cmd in commands {
            match cmd {
                RenderCommand::DrawRect {
                    rect, color, label, ..
                } => {
                    // Sub-cell rects (particles) become a dot.
                    if rect.w < 1.0 || rect.h < 1.0 || *color == ThemeToken::Particle {
                        let tf = self.transform();
                        let p = tf.apply(Point::new(rect.x, rect.y));
                        let x = f64::from(self.area.x) + p.x.floor();
                        let y = f64::from(self.area.y) + p.y.floor();
                        if x >= 0.0 && y >= 0.0 {
                            self.put(x as u16, y as u16, '·', Some(theme_to_color(*color)), None);
                        }
                        continue;
                    }
                    let Some(cells) = self.cells(rect.x, rect.y, rect.w, rect.h) else {
                        continue;
                    };
                    let bg = theme_to_color(*color);
                    for y in cells.top()..cells.bottom() {
                        for x in cells.left()..cells.right() {
                            self.put(x, y, ' ', None, Some(bg));
                        }
                    }
                    if let Some(label) = label.as_deref().filter(|l| !l.is_empty()) {
                        let fg = match color {
                            ThemeToken::ButtonPrimary | ThemeToken::ButtonDisabled => {
                                theme_to_color(ThemeToken::ButtonText)
                            }
                            ThemeToken::TagBackground => theme_to_color(ThemeToken::TagText),
                            _ => theme_to_color(ThemeToken::TextPrimary),
                        };
                        let len = label.chars().count() as i64;
                        let x = i64::from(cells.x) + (i64::from(cells.width) - len).max(0) / 2;
                        let y = cells.y + cells.height / 2;
                        self.put_str(x, y, label, fg);
                    }
                }
                RenderCommand::DrawText {
                    position,
                    text,
                    color,
                    align,
                    ..
                } => {
                    let p = self.transform().apply(*position);
                    let y = f64::from(self.area.y) + p.y.floor();
                    if y < 0.0 || y > f64::from(u16::MAX) {
                        continue;
                    }
                    let len = text.chars().count() as f64;
                    let x = match align {
                        TextAlign::Left => p.x,
                        TextAlign::Center => p.x - len / 2.0,
                        TextAlign::Right => p.x - len,
                    };
                    let x = i64::from(self.area.x) + x.round() as i64;
                    self.put_str(x, y as u16, text, theme_to_color(*color));
                }
                RenderCommand::DrawLine {
                    from, to, color, ..
                } => {
                    let tf = self.transform();
                    let a = tf.apply(*from);
                    let b = tf.apply(*to);
                    let fg = Some(theme_to_color(*color));
                    if (a.y - b.y).abs() < 0.5 {
                        let y = f64::from(self.area.y) + a.y.floor();
                        if y < 0.0 {
                            continue;
                        }
                        let (x0, x1) = (a.x.min(b.x).max(0.0), a.x.max(b.x));
                        for x in (x0.round() as u16)..(x1.round() as u16) {
                            self.put(self.area.x.saturating_add(x), y as u16, '─', fg, None);
                        }
                    } else {
                        let x = f64::from(self.area.x) + a.x.floor();
                        if x < 0.0 {
                            continue;
                        }
                        let (y0, y1) = (a.y.min(b.y).max(0.0), a.y.max(b.y));
                        for y in (y0.round() as u16)..(y1.round() as u16) {
                            self.put(x as u16, self.area.y.saturating_add(y), '│', fg, None);
                        }
                    }
                }
                RenderCommand::SetClip { rect } => {
                    self.clip_stack.push(self.clip);
                    self.clip = self
                        .cells(rect.x, rect.y, rect.w, rect.h)
                        .unwrap_or_default();
                }
                RenderCommand::ClearClip => {
                    self.clip = self.clip_stack.pop().unwrap_or(self.area);
                }
                RenderCommand::PushTransform { translate, scale } => {
                    let parent = self.transform();
                    self.transforms.push(Transform {
                        translate: Point::new(
                            parent.translate.x + translate.x * parent.scale.x,
                            parent.translate.y + translate.y * parent.scale.y,
                        ),
                        scale: Point::new(parent.scale.x * scale.x, parent.scale.y * scale.y),
                    });
                }
                RenderCommand::PopTransform => {
                    self.transforms.pop();
                }
                RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_protocol::Rect as UnitRect;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_owned())
            .collect()
    }

    #[test]
    fn text_lands_on_its_center_row() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        CellPainter::new(&mut buf, area).paint(&[RenderCommand::DrawText {
            position: Point::new(2.0, 1.5),
            text: "Hello".into(),
            color: ThemeToken::TextPrimary,
            font_size: 1.0,
            align: TextAlign::Left,
        }]);
        assert!(row(&buf, 1).starts_with("  Hello"));
        assert_eq!(row(&buf, 0).trim(), "");
    }

    #[test]
    fn transforms_scroll_content() {
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        CellPainter::new(&mut buf, area).paint(&[
            RenderCommand::PushTransform {
                translate: Point::new(0.0, -10.0),
                scale: Point::new(1.0, 1.0),
            },
            RenderCommand::DrawRect {
                rect: UnitRect::new(0.0, 12.0, 6.0, 1.0),
                color: ThemeToken::ButtonPrimary,
                border_color: None,
                label: Some("Go".into()),
                target: None,
            },
            RenderCommand::PopTransform,
        ]);
        assert_eq!(row(&buf, 2).trim(), "Go");
        assert_eq!(buf[(0, 2)].bg, theme_to_color(ThemeToken::ButtonPrimary));
        assert_eq!(buf[(0, 1)].bg, Color::Reset);
    }

    #[test]
    fn offscreen_commands_are_dropped() {
        let area = Rect::new(0, 0, 5, 2);
        let mut buf = Buffer::empty(area);
        CellPainter::new(&mut buf, area).paint(&[
            RenderCommand::DrawText {
                position: Point::new(-10.0, -3.0),
                text: "gone".into(),
                color: ThemeToken::TextPrimary,
                font_size: 1.0,
                align: TextAlign::Left,
            },
            RenderCommand::DrawRect {
                rect: UnitRect::new(0.0, 40.0, 5.0, 1.0),
                color: ThemeToken::Surface,
                border_color: None,
                label: None,
                target: None,
            },
        ]);
        assert_eq!(row(&buf, 0).trim(), "");
        assert_eq!(row(&buf, 1).trim(), "");
    }
}
