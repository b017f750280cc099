use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the host's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Surface,
    Border,

    TextPrimary,
    TextSecondary,
    TextMuted,
    Accent,
    GradientText,

    // Navigation bar
    NavBackground,
    NavBackgroundScrolled,
    NavItem,
    NavItemActive,
    NavItemActiveBackground,

    // Typed-text decoration
    TypingCursor,

    // Section content
    CardBackground,
    CardBorder,
    TagBackground,
    TagText,
    SkillBarTrack,
    SkillBarFill,
    TimelineLine,
    TimelineDot,
    StatNumber,

    // Contact form
    InputBackground,
    InputBorder,
    ButtonPrimary,
    ButtonDisabled,
    ButtonText,
    ToastBackground,
    ToastText,
    ErrorText,

    // Per-section backdrops
    BackdropHero,
    BackdropAbout,
    BackdropSkills,
    BackdropProjects,
    BackdropResume,
    BackdropContact,
    Particle,
}
