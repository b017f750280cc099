use serde::{Deserialize, Serialize};

use crate::section_id::SectionId;
use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// Views emit a `Vec<RenderCommand>` for each frame. Hosts consume the list
/// sequentially; each command carries everything it needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally labelled. `target` marks the
    /// rectangle as clickable.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        label: Option<String>,
        target: Option<HitTarget>,
    },

    /// Draw a text string anchored at a position.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Push a translation/scale applied to all subsequent commands until the
    /// matching `PopTransform`.
    PushTransform { translate: Point, scale: Point },

    /// Pop the most recent transform.
    PopTransform,

    /// Begin a logical group (a page section, the nav bar).
    BeginGroup { id: String, label: Option<String> },

    /// End the current group.
    EndGroup,
}

/// What activating a clickable rectangle should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    /// Scroll the section to the top of the viewport.
    Section(SectionId),
    ToggleMenu,
    /// Focus a contact form input, by field name.
    FormField(String),
    SubmitForm,
    DismissToast,
    /// Open an external URL.
    Link(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl RenderCommand {
    pub fn target(&self) -> Option<&HitTarget> {
        match self {
            RenderCommand::DrawRect { target, .. } => target.as_ref(),
            _ => None,
        }
    }

    /// Text carried by the command, if any. Hosts without a painter (tests,
    /// accessibility dumps) read content through this.
    pub fn text(&self) -> Option<&str> {
        match self {
            RenderCommand::DrawText { text, .. } => Some(text),
            RenderCommand::DrawRect { label, .. } => label.as_deref(),
            _ => None,
        }
    }
}
