pub mod background;
pub mod contact;
pub mod navigation;
pub mod page;
pub mod registry;
pub mod tracker;
pub mod typing;
pub mod typing_effect;

pub use background::BackgroundVariant;
pub use contact::{ContactField, ContactFields, ContactForm, Toast};
pub use navigation::{MenuItem, NavigationState};
pub use page::{Page, ScrollUpdate};
pub use registry::SectionRegistry;
pub use tracker::{ActiveSectionTracker, SectionLayout};
pub use typing::{PhraseQueue, TypingCycler, TypingPhase, TypingTimings};
pub use typing_effect::TypingEffect;
