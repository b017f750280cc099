use folio_protocol::{HitTarget, Point, Rect, RenderCommand, SectionId, TextAlign, ThemeToken, Viewport};

use crate::content::PortfolioContent;
use crate::error::ContactFormError;
use crate::model::contact::{ContactField, ContactFields, Toast};

use super::canvas::{Button, LayoutMetrics, RenderedSection, SectionCanvas, Tile};

/// Lines given to the message box.
const MESSAGE_LINES: f64 = 4.0;

/// What the contact form looks like right now.
#[derive(Debug, Clone, Copy)]
pub struct FormState<'a> {
    pub fields: &'a ContactFields,
    /// Field receiving keyboard input, if the host tracks one.
    pub focused: Option<ContactField>,
    pub submitting: bool,
    pub error: Option<&'a ContactFormError>,
}

pub fn render_contact(
    id: &SectionId,
    content: &PortfolioContent,
    form: FormState<'_>,
    metrics: &LayoutMetrics,
    width: f64,
    top: f64,
) -> RenderedSection {
    let mut canvas = SectionCanvas::begin(id, "Contact", metrics, width, top);
    canvas.heading("Get In Touch");
    canvas.centered_paragraph(&content.intros.contact, ThemeToken::TextSecondary);
    canvas.skip(1.5);

    let gap = metrics.padding;
    let stacked = metrics.is_mobile(width);
    let spans = canvas.column_spans(if stacked { 1 } else { 2 }, gap);
    let Some(&(form_x, form_w)) = spans.first() else {
        return canvas.finish();
    };
    let (info_x, info_w) = spans.get(1).copied().unwrap_or((form_x, form_w));

    let columns_top = canvas.y();
    form_card(&mut canvas, form, form_x, form_w);
    let form_bottom = canvas.y();

    if stacked {
        canvas.skip(1.0);
    } else {
        canvas.rewind_to(columns_top);
    }
    contact_info(&mut canvas, content, info_x, info_w);
    canvas.advance_to(form_bottom);

    canvas.finish()
}

fn form_card(canvas: &mut SectionCanvas<'_>, form: FormState<'_>, cx: f64, cw: f64) {
    let metrics = *canvas.metrics();
    let inset = metrics.char_width * 2.0;
    let (x, w) = (cx + inset, cw - 2.0 * inset);
    let top = canvas.y();
    let mark = canvas.mark();

    canvas.skip(0.5);
    canvas.title(x, "Send a Message", ThemeToken::GradientText);
    canvas.skip(0.5);

    for field in ContactField::ALL {
        let lines = if field == ContactField::Message {
            MESSAGE_LINES
        } else {
            1.0
        };
        input(canvas, form, field, x, w, lines);
        canvas.skip(0.5);
    }

    if let Some(error) = form.error {
        canvas.paragraph(x, w, &error.to_string(), ThemeToken::ErrorText);
    }

    let button = if form.submitting {
        Button::new("Sending...", ThemeToken::ButtonDisabled, None)
    } else {
        Button::new(
            "Send Message",
            ThemeToken::ButtonPrimary,
            Some(HitTarget::SubmitForm),
        )
    };
    canvas.button_row(x, w, false, vec![button]);
    canvas.frame(mark, cx, top, cw, ThemeToken::CardBackground, ThemeToken::CardBorder);
}

fn input(
    canvas: &mut SectionCanvas<'_>,
    form: FormState<'_>,
    field: ContactField,
    x: f64,
    w: f64,
    lines: f64,
) {
    let metrics = *canvas.metrics();
    let focused = form.focused == Some(field);
    let top = canvas.y();
    let h = if lines > 1.0 {
        lines * metrics.line_height
    } else {
        metrics.control_height
    };
    canvas.push(RenderCommand::DrawRect {
        rect: Rect::new(x, top, w, h),
        color: ThemeToken::InputBackground,
        border_color: Some(if focused {
            ThemeToken::Accent
        } else {
            ThemeToken::InputBorder
        }),
        label: None,
        target: Some(HitTarget::FormField(field.name().to_owned())),
    });

    let value = form.fields.get(field);
    let (text, color) = if value.is_empty() {
        (field.placeholder(), ThemeToken::TextMuted)
    } else {
        (value, ThemeToken::TextPrimary)
    };
    let text_x = x + metrics.char_width;
    let text_w = w - 2.0 * metrics.char_width;
    let columns = metrics.columns(text_w);
    let mut wrapped: Vec<String> = textwrap::wrap(text, columns)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    let visible = (lines as usize).max(1);
    if wrapped.len() > visible {
        // Keep the tail visible while typing.
        wrapped.drain(..wrapped.len() - visible);
    }
    if focused {
        match wrapped.last_mut() {
            Some(line) => line.push('|'),
            None => wrapped.push("|".to_owned()),
        }
    }
    let first_center = if lines > 1.0 {
        top + metrics.line_height / 2.0
    } else {
        top + h / 2.0
    };
    for (i, line) in wrapped.into_iter().enumerate() {
        canvas.push(RenderCommand::DrawText {
            position: Point::new(text_x, first_center + i as f64 * metrics.line_height),
            text: line,
            color,
            font_size: metrics.font_size,
            align: TextAlign::Left,
        });
    }
    canvas.advance_to(top + h);
}

fn contact_info(canvas: &mut SectionCanvas<'_>, content: &PortfolioContent, x: f64, w: f64) {
    let info = &content.contact;
    canvas.title(x, "Contact Information", ThemeToken::GradientText);
    canvas.skip(0.5);
    for entry in &info.entries {
        let target = (entry.href != "#").then(|| HitTarget::Link(entry.href.clone()));
        let top = canvas.y();
        let metrics = *canvas.metrics();
        canvas.push(RenderCommand::DrawRect {
            rect: Rect::new(x, top, w, 2.0 * metrics.line_height),
            color: ThemeToken::Surface,
            border_color: None,
            label: None,
            target,
        });
        canvas.text(x + metrics.char_width, &entry.label, ThemeToken::TextMuted, TextAlign::Left);
        canvas.text(x + metrics.char_width, &entry.value, ThemeToken::TextPrimary, TextAlign::Left);
        canvas.skip(0.5);
    }

    canvas.skip(0.5);
    canvas.title(x, "Connect With Me", ThemeToken::GradientText);
    canvas.skip(0.5);
    let tiles = info
        .socials
        .iter()
        .map(|s| Tile {
            lines: vec![(s.name.clone(), ThemeToken::TextPrimary)],
            target: Some(HitTarget::Link(s.url.clone())),
        })
        .collect();
    canvas.tile_grid(x, w, tiles, 2);

    if !info.availability.is_empty() {
        canvas.skip(0.5);
        canvas.title(x, "Let's Work Together", ThemeToken::GradientText);
        for item in &info.availability {
            canvas.text(x, &format!("✓ {item}"), ThemeToken::TextSecondary, TextAlign::Left);
        }
    }
}

/// Toast pinned to the bottom-right corner of the screen. Clicking it
/// dismisses it.
pub fn render_toast(toast: &Toast, viewport: &Viewport, metrics: &LayoutMetrics) -> Vec<RenderCommand> {
    let columns = 40.0_f64.min((viewport.width - 2.0 * metrics.padding) / metrics.char_width).max(1.0);
    let w = columns * metrics.char_width;
    let lines = textwrap::wrap(&toast.description, columns as usize);
    let h = (lines.len() as f64 + 2.0) * metrics.line_height;
    let x = viewport.width - w - metrics.padding / 2.0;
    let y = viewport.height - h - metrics.padding / 2.0;

    let mut commands = Vec::with_capacity(lines.len() + 4);
    commands.push(RenderCommand::BeginGroup {
        id: "toast".into(),
        label: Some("Notification".into()),
    });
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(x, y, w, h),
        color: ThemeToken::ToastBackground,
        border_color: Some(ThemeToken::Accent),
        label: None,
        target: Some(HitTarget::DismissToast),
    });
    let text_x = x + metrics.char_width;
    let mut line_y = y + metrics.line_height;
    commands.push(RenderCommand::DrawText {
        position: Point::new(text_x, line_y),
        text: toast.title.clone(),
        color: ThemeToken::ToastText,
        font_size: metrics.font_size,
        align: TextAlign::Left,
    });
    for line in lines {
        line_y += metrics.line_height;
        commands.push(RenderCommand::DrawText {
            position: Point::new(text_x, line_y),
            text: line.into_owned(),
            color: ThemeToken::TextSecondary,
            font_size: metrics.font_size * 0.875,
            align: TextAlign::Left,
        });
    }
    commands.push(RenderCommand::EndGroup);
    commands
}
