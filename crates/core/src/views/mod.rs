pub mod about;
pub mod backdrop;
pub mod canvas;
pub mod contact;
pub mod hero;
pub mod hit;
pub mod layout;
pub mod navigation;
pub mod page;
pub mod projects;
pub mod resume;
pub mod skills;

pub use canvas::{LayoutMetrics, RenderedSection};
pub use contact::FormState;
pub use hit::hit_test;
pub use layout::PageLayout;
pub use page::{SectionKind, SectionState, render_page, render_section};
