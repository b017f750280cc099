use folio_protocol::{SectionId, ThemeToken};
use serde::{Deserialize, Serialize};

/// Decorative backdrop shown behind the page, following the active section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackgroundVariant {
    Hero,
    About,
    Skills,
    Projects,
    Resume,
    Contact,
}

impl BackgroundVariant {
    /// Variant for a section; ids without a dedicated backdrop use `Hero`.
    pub fn for_section(id: &SectionId) -> Self {
        match id.as_str() {
            "about" => Self::About,
            "skills" => Self::Skills,
            "projects" => Self::Projects,
            "resume" => Self::Resume,
            "contact" => Self::Contact,
            _ => Self::Hero,
        }
    }

    pub fn token(self) -> ThemeToken {
        match self {
            Self::Hero => ThemeToken::BackdropHero,
            Self::About => ThemeToken::BackdropAbout,
            Self::Skills => ThemeToken::BackdropSkills,
            Self::Projects => ThemeToken::BackdropProjects,
            Self::Resume => ThemeToken::BackdropResume,
            Self::Contact => ThemeToken::BackdropContact,
        }
    }

    /// Number of particles in the decorative field.
    pub fn particle_count(self) -> usize {
        match self {
            Self::Hero => 48,
            Self::About | Self::Resume => 24,
            Self::Skills | Self::Projects => 32,
            Self::Contact => 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_sections() {
        assert_eq!(
            BackgroundVariant::for_section(&SectionId::from("skills")),
            BackgroundVariant::Skills
        );
        assert_eq!(
            BackgroundVariant::for_section(&SectionId::from("contact")).token(),
            ThemeToken::BackdropContact
        );
    }

    #[test]
    fn unknown_sections_fall_back_to_hero() {
        assert_eq!(
            BackgroundVariant::for_section(&SectionId::from("blog")),
            BackgroundVariant::Hero
        );
    }
}
