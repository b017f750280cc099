pub mod commands;
pub mod section_id;
pub mod theme;
pub mod types;

pub use commands::{HitTarget, RenderCommand, TextAlign};
pub use section_id::SectionId;
pub use theme::ThemeToken;
pub use types::{Point, Rect, SectionBounds, TypedText, Viewport};
