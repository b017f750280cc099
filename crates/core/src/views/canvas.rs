use folio_protocol::{HitTarget, Point, Rect, RenderCommand, TextAlign, ThemeToken};

/// Unit sizes for laying out the page.
///
/// Views work in abstract document units: the egui host uses
/// [`LayoutMetrics::pixels`], the terminal host [`LayoutMetrics::cells`]
/// where one unit is one character cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub font_size: f64,
    pub line_height: f64,
    /// Average advance of one glyph, used to pick wrap columns.
    pub char_width: f64,
    pub padding: f64,
    pub nav_height: f64,
    /// Height of buttons and single-line inputs.
    pub control_height: f64,
    /// Viewports narrower than this get the collapsed mobile nav.
    pub mobile_breakpoint: f64,
}

impl LayoutMetrics {
    pub fn pixels() -> Self {
        Self {
            font_size: 16.0,
            line_height: 24.0,
            char_width: 8.0,
            padding: 32.0,
            nav_height: 64.0,
            control_height: 40.0,
            mobile_breakpoint: 768.0,
        }
    }

    pub fn cells() -> Self {
        Self {
            font_size: 1.0,
            line_height: 1.0,
            char_width: 1.0,
            padding: 2.0,
            nav_height: 1.0,
            control_height: 1.0,
            mobile_breakpoint: 80.0,
        }
    }

    /// Ratio between these metrics and pixel metrics, for scaling
    /// pixel-denominated settings such as the tracker header offset.
    pub fn scale(&self) -> f64 {
        self.line_height / LayoutMetrics::pixels().line_height
    }

    pub fn is_mobile(&self, width: f64) -> bool {
        width < self.mobile_breakpoint
    }

    /// Wrap columns available in `width` units.
    pub fn columns(&self, width: f64) -> usize {
        ((width / self.char_width).floor() as usize).max(1)
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::pixels()
    }
}

/// One rendered section: its commands in document coordinates and its height.
#[derive(Debug, Clone)]
pub struct RenderedSection {
    pub commands: Vec<RenderCommand>,
    pub height: f64,
}

/// Top-to-bottom flow layout for one section.
///
/// Every helper draws at the current cursor row and advances it, so the
/// final cursor position is the section's height.
pub struct SectionCanvas<'a> {
    metrics: &'a LayoutMetrics,
    width: f64,
    top: f64,
    y: f64,
    commands: Vec<RenderCommand>,
}

impl<'a> SectionCanvas<'a> {
    pub fn begin(id: &str, label: &str, metrics: &'a LayoutMetrics, width: f64, top: f64) -> Self {
        let commands = vec![RenderCommand::BeginGroup {
            id: id.to_owned(),
            label: Some(label.to_owned()),
        }];
        Self {
            metrics,
            width,
            top,
            y: top + metrics.padding,
            commands,
        }
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        self.metrics
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn left(&self) -> f64 {
        self.metrics.padding
    }

    pub fn content_width(&self) -> f64 {
        (self.width - 2.0 * self.metrics.padding).max(self.metrics.char_width)
    }

    /// Advance the cursor by `lines` line heights.
    pub fn skip(&mut self, lines: f64) {
        self.y += lines * self.metrics.line_height;
    }

    pub fn advance_to(&mut self, y: f64) {
        self.y = self.y.max(y);
    }

    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Centered section title with an accent rule under it.
    pub fn heading(&mut self, text: &str) {
        let lh = self.metrics.line_height;
        let center = self.width / 2.0;
        self.commands.push(RenderCommand::DrawText {
            position: Point::new(center, self.y + lh),
            text: text.to_owned(),
            color: ThemeToken::GradientText,
            font_size: self.metrics.font_size * 2.25,
            align: TextAlign::Center,
        });
        let rule = (text.chars().count() as f64 * self.metrics.char_width).min(self.content_width());
        let rule_y = self.y + 2.0 * lh;
        self.commands.push(RenderCommand::DrawLine {
            from: Point::new(center - rule / 2.0, rule_y),
            to: Point::new(center + rule / 2.0, rule_y),
            color: ThemeToken::Accent,
            width: 2.0,
        });
        self.skip(3.0);
    }

    /// Left-aligned bold-ish line, one and a quarter times the body size.
    pub fn title(&mut self, x: f64, text: &str, color: ThemeToken) {
        self.text_sized(x, text, color, self.metrics.font_size * 1.25, TextAlign::Left);
    }

    pub fn text(&mut self, x: f64, text: &str, color: ThemeToken, align: TextAlign) {
        self.text_sized(x, text, color, self.metrics.font_size, align);
    }

    fn text_sized(&mut self, x: f64, text: &str, color: ThemeToken, font_size: f64, align: TextAlign) {
        let lh = self.metrics.line_height;
        self.commands.push(RenderCommand::DrawText {
            position: Point::new(x, self.y + lh / 2.0),
            text: text.to_owned(),
            color,
            font_size,
            align,
        });
        self.y += lh;
    }

    /// Word-wrapped paragraph in the column `[x, x + width)`. Returns the
    /// number of lines drawn.
    pub fn paragraph(&mut self, x: f64, width: f64, text: &str, color: ThemeToken) -> usize {
        let columns = self.metrics.columns(width);
        let lines = textwrap::wrap(text, columns);
        for line in &lines {
            self.text(x, line, color, TextAlign::Left);
        }
        lines.len()
    }

    /// Same as [`paragraph`](Self::paragraph) but centered on the section.
    pub fn centered_paragraph(&mut self, text: &str, color: ThemeToken) -> usize {
        let columns = self.metrics.columns(self.content_width());
        let lines = textwrap::wrap(text, columns);
        let center = self.width / 2.0;
        for line in &lines {
            self.text(center, line, color, TextAlign::Center);
        }
        lines.len()
    }

    /// Horizontal progress bar filled to `fraction` (clamped to `[0, 1]`).
    pub fn bar(&mut self, x: f64, width: f64, fraction: f64) {
        let lh = self.metrics.line_height;
        let h = (lh / 3.0).max(1.0);
        let y = self.y + (lh - h) / 2.0;
        self.commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, y, width, h),
            color: ThemeToken::SkillBarTrack,
            border_color: None,
            label: None,
            target: None,
        });
        let filled = width * fraction.clamp(0.0, 1.0);
        if filled > 0.0 {
            self.commands.push(RenderCommand::DrawRect {
                rect: Rect::new(x, y, filled, h),
                color: ThemeToken::SkillBarFill,
                border_color: None,
                label: None,
                target: None,
            });
        }
        self.y += lh;
    }

    /// Labelled clickable box of control height.
    pub fn button(
        &mut self,
        x: f64,
        width: f64,
        label: &str,
        color: ThemeToken,
        target: Option<HitTarget>,
    ) -> Rect {
        let rect = Rect::new(x, self.y, width, self.metrics.control_height);
        self.commands.push(RenderCommand::DrawRect {
            rect,
            color,
            border_color: None,
            label: Some(label.to_owned()),
            target,
        });
        self.y += self.metrics.control_height;
        rect
    }

    /// Buttons laid out left to right on one control row, centered in
    /// `[x, x + width)` when `centered` is set. Wraps onto further rows when
    /// they do not fit.
    pub fn button_row(&mut self, x: f64, width: f64, centered: bool, buttons: Vec<Button>) {
        let gap = self.metrics.char_width * 2.0;
        let pad = self.metrics.char_width * 2.0;
        let mut rows: Vec<Vec<(f64, Button)>> = Vec::new();
        let mut used = 0.0;
        for button in buttons {
            let w = label_width(self.metrics, &button.label, pad).min(width);
            match rows.last_mut() {
                Some(row) if used + gap + w <= width => {
                    used += gap + w;
                    row.push((w, button));
                }
                _ => {
                    used = w;
                    rows.push(vec![(w, button)]);
                }
            }
        }
        for row in rows {
            let total: f64 = row.iter().map(|(w, _)| *w).sum::<f64>()
                + gap * row.len().saturating_sub(1) as f64;
            let mut bx = if centered { x + (width - total) / 2.0 } else { x };
            for (w, button) in row {
                self.commands.push(RenderCommand::DrawRect {
                    rect: Rect::new(bx, self.y, w, self.metrics.control_height),
                    color: button.color,
                    border_color: None,
                    label: Some(button.label),
                    target: button.target,
                });
                bx += w + gap;
            }
            self.y += self.metrics.control_height + self.metrics.line_height / 2.0;
        }
    }

    /// Large single line, `lines` line heights tall.
    pub fn display(&mut self, text: &str, scale: f64, lines: f64, color: ThemeToken) {
        let lh = self.metrics.line_height;
        self.commands.push(RenderCommand::DrawText {
            position: Point::new(self.width / 2.0, self.y + lines * lh / 2.0),
            text: text.to_owned(),
            color,
            font_size: self.metrics.font_size * scale,
            align: TextAlign::Center,
        });
        self.skip(lines);
    }

    /// Two labels on one line: `left` aligned at `x`, `right` aligned to
    /// `x + width`.
    pub fn label_pair(
        &mut self,
        x: f64,
        width: f64,
        left: (&str, ThemeToken),
        right: (&str, ThemeToken),
    ) {
        let mid = self.y + self.metrics.line_height / 2.0;
        self.commands.push(RenderCommand::DrawText {
            position: Point::new(x + width, mid),
            text: right.0.to_owned(),
            color: right.1,
            font_size: self.metrics.font_size * 0.875,
            align: TextAlign::Right,
        });
        self.text(x, left.0, left.1, TextAlign::Left);
    }

    /// Position in the command list, for [`frame`](Self::frame).
    pub fn mark(&self) -> usize {
        self.commands.len()
    }

    /// Box from `top` to the current row, inserted at `mark` so that it is
    /// painted under everything drawn since.
    pub fn frame(&mut self, mark: usize, x: f64, top: f64, width: f64, fill: ThemeToken, border: ThemeToken) {
        let mark = mark.min(self.commands.len());
        self.commands.insert(
            mark,
            RenderCommand::DrawRect {
                rect: Rect::new(x, top, width, self.y - top),
                color: fill,
                border_color: Some(border),
                label: None,
                target: None,
            },
        );
    }

    /// Move the cursor back up, for laying out side-by-side columns.
    pub fn rewind_to(&mut self, y: f64) {
        self.y = y;
    }

    /// Split the content width into `count` columns separated by `gap`.
    /// Returns `(x, width)` per column.
    pub fn column_spans(&self, count: usize, gap: f64) -> Vec<(f64, f64)> {
        self.spans_within(self.left(), self.content_width(), count, gap)
    }

    /// Like [`column_spans`](Self::column_spans) inside `[x, x + width)`.
    pub fn spans_within(&self, x: f64, width: f64, count: usize, gap: f64) -> Vec<(f64, f64)> {
        let count = count.max(1);
        let w = ((width - gap * (count - 1) as f64) / count as f64).max(self.metrics.char_width);
        (0..count).map(|i| (x + i as f64 * (w + gap), w)).collect()
    }

    /// Grid of tiles with centered lines of text in `[x, x + width)`.
    pub fn tile_grid(&mut self, x: f64, width: f64, tiles: Vec<Tile>, columns: usize) {
        let lh = self.metrics.line_height;
        let gap = self.metrics.padding / 2.0;
        let spans = self.spans_within(x, width, columns, gap);
        let rows = tiles.len().div_ceil(spans.len());
        let mut tiles = tiles.into_iter();
        for _ in 0..rows {
            let row_top = self.y;
            let mut row_bottom = row_top;
            for &(x, w) in &spans {
                let Some(tile) = tiles.next() else { break };
                let h = (tile.lines.len() as f64 + 1.0) * lh;
                self.commands.push(RenderCommand::DrawRect {
                    rect: Rect::new(x, row_top, w, h),
                    color: ThemeToken::CardBackground,
                    border_color: Some(ThemeToken::CardBorder),
                    label: None,
                    target: tile.target,
                });
                let mut ty = row_top + lh;
                for (text, color) in tile.lines {
                    self.commands.push(RenderCommand::DrawText {
                        position: Point::new(x + w / 2.0, ty),
                        text,
                        color,
                        font_size: self.metrics.font_size,
                        align: TextAlign::Center,
                    });
                    ty += lh;
                }
                row_bottom = row_bottom.max(row_top + h);
            }
            self.y = row_bottom + gap;
        }
    }

    pub fn finish(self) -> RenderedSection {
        self.finish_at_least(0.0)
    }

    /// Close the section, padding it out to at least `min_height`.
    pub fn finish_at_least(mut self, min_height: f64) -> RenderedSection {
        self.y += self.metrics.padding;
        self.y = self.y.max(self.top + min_height);
        self.commands.push(RenderCommand::EndGroup);
        RenderedSection {
            commands: self.commands,
            height: self.y - self.top,
        }
    }
}

/// A clickable label for [`SectionCanvas::button_row`].
#[derive(Debug, Clone)]
pub struct Button {
    pub label: String,
    pub color: ThemeToken,
    pub target: Option<HitTarget>,
}

impl Button {
    pub fn new(label: impl Into<String>, color: ThemeToken, target: Option<HitTarget>) -> Self {
        Self {
            label: label.into(),
            color,
            target,
        }
    }
}

/// One cell of [`SectionCanvas::tile_grid`].
#[derive(Debug, Clone, Default)]
pub struct Tile {
    pub lines: Vec<(String, ThemeToken)>,
    pub target: Option<HitTarget>,
}

/// Width in units of a one-line label, plus padding on both sides.
pub fn label_width(metrics: &LayoutMetrics, label: &str, padding: f64) -> f64 {
    label.chars().count() as f64 * metrics.char_width + 2.0 * padding
}
