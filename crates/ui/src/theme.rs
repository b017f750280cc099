use folio_protocol::ThemeToken;

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    // Night sky with violet/cyan accents
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0x0b, 0x0d, 0x17),
        Surface => ResolvedColor::rgba(0x1f, 0x23, 0x3a, 220),
        Border => ResolvedColor::rgb(0x2e, 0x33, 0x52),

        TextPrimary => ResolvedColor::rgb(0xf1, 0xf3, 0xfb),
        TextSecondary => ResolvedColor::rgb(0xb8, 0xbe, 0xd8),
        TextMuted => ResolvedColor::rgb(0x8a, 0x90, 0xac),
        Accent => ResolvedColor::rgb(0x22, 0xd3, 0xee), // Cyan
        GradientText => ResolvedColor::rgb(0xa7, 0x8b, 0xfa), // Violet

        NavBackground => ResolvedColor::rgba(0x0b, 0x0d, 0x17, 0),
        NavBackgroundScrolled => ResolvedColor::rgba(0x14, 0x17, 0x2a, 235),
        NavItem => ResolvedColor::rgb(0xe2, 0xe5, 0xf3),
        NavItemActive => ResolvedColor::rgb(0xa7, 0x8b, 0xfa),
        NavItemActiveBackground => ResolvedColor::rgba(0x8b, 0x5c, 0xf6, 50),

        TypingCursor => ResolvedColor::rgb(0x22, 0xd3, 0xee),

        CardBackground => ResolvedColor::rgba(0x1a, 0x1e, 0x33, 200),
        CardBorder => ResolvedColor::rgba(0x8b, 0x5c, 0xf6, 70),
        TagBackground => ResolvedColor::rgba(0x8b, 0x5c, 0xf6, 40),
        TagText => ResolvedColor::rgb(0xc4, 0xb5, 0xfd),
        SkillBarTrack => ResolvedColor::rgb(0x27, 0x2b, 0x45),
        SkillBarFill => ResolvedColor::rgb(0x8b, 0x5c, 0xf6),
        TimelineLine => ResolvedColor::rgba(0x8b, 0x5c, 0xf6, 120),
        TimelineDot => ResolvedColor::rgb(0x22, 0xd3, 0xee),
        StatNumber => ResolvedColor::rgb(0xa7, 0x8b, 0xfa),

        InputBackground => ResolvedColor::rgb(0x12, 0x15, 0x26),
        InputBorder => ResolvedColor::rgb(0x2e, 0x33, 0x52),
        ButtonPrimary => ResolvedColor::rgb(0x7c, 0x3a, 0xed),
        ButtonDisabled => ResolvedColor::rgb(0x4b, 0x4f, 0x6b),
        ButtonText => ResolvedColor::rgb(0xff, 0xff, 0xff),
        ToastBackground => ResolvedColor::rgb(0x1f, 0x23, 0x3a),
        ToastText => ResolvedColor::rgb(0x86, 0xef, 0xac), // Green
        ErrorText => ResolvedColor::rgb(0xf8, 0x71, 0x71),

        BackdropHero => ResolvedColor::rgb(0x0b, 0x0d, 0x17),
        BackdropAbout => ResolvedColor::rgb(0x0d, 0x0f, 0x1d),
        BackdropSkills => ResolvedColor::rgb(0x0a, 0x11, 0x1c),
        BackdropProjects => ResolvedColor::rgb(0x10, 0x0c, 0x1c),
        BackdropResume => ResolvedColor::rgb(0x0c, 0x10, 0x18),
        BackdropContact => ResolvedColor::rgb(0x0e, 0x0c, 0x18),
        Particle => ResolvedColor::rgba(0xa7, 0x8b, 0xfa, 90),
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(250, 250, 253),
        Surface => ResolvedColor::rgba(238, 238, 246, 230),
        Border => ResolvedColor::rgb(214, 214, 228),

        TextPrimary => ResolvedColor::rgb(20, 22, 36),
        TextSecondary => ResolvedColor::rgb(72, 76, 100),
        TextMuted => ResolvedColor::rgb(110, 114, 134),
        Accent => ResolvedColor::rgb(8, 145, 178),
        GradientText => ResolvedColor::rgb(109, 40, 217),

        NavBackground => ResolvedColor::rgba(250, 250, 253, 0),
        NavBackgroundScrolled => ResolvedColor::rgba(250, 250, 253, 240),
        NavItem => ResolvedColor::rgb(40, 42, 60),
        NavItemActive => ResolvedColor::rgb(109, 40, 217),
        NavItemActiveBackground => ResolvedColor::rgba(124, 58, 237, 30),

        TypingCursor => ResolvedColor::rgb(8, 145, 178),

        CardBackground => ResolvedColor::rgba(255, 255, 255, 230),
        CardBorder => ResolvedColor::rgb(222, 218, 240),
        TagBackground => ResolvedColor::rgba(124, 58, 237, 25),
        TagText => ResolvedColor::rgb(91, 33, 182),
        SkillBarTrack => ResolvedColor::rgb(228, 228, 238),
        SkillBarFill => ResolvedColor::rgb(124, 58, 237),
        TimelineLine => ResolvedColor::rgba(124, 58, 237, 100),
        TimelineDot => ResolvedColor::rgb(8, 145, 178),
        StatNumber => ResolvedColor::rgb(109, 40, 217),

        InputBackground => ResolvedColor::rgb(255, 255, 255),
        InputBorder => ResolvedColor::rgb(204, 204, 220),
        ButtonPrimary => ResolvedColor::rgb(124, 58, 237),
        ButtonDisabled => ResolvedColor::rgb(170, 170, 186),
        ButtonText => ResolvedColor::rgb(255, 255, 255),
        ToastBackground => ResolvedColor::rgb(255, 255, 255),
        ToastText => ResolvedColor::rgb(22, 128, 61),
        ErrorText => ResolvedColor::rgb(200, 30, 30),

        BackdropHero => ResolvedColor::rgb(250, 250, 253),
        BackdropAbout => ResolvedColor::rgb(248, 247, 253),
        BackdropSkills => ResolvedColor::rgb(245, 250, 253),
        BackdropProjects => ResolvedColor::rgb(250, 246, 253),
        BackdropResume => ResolvedColor::rgb(246, 248, 252),
        BackdropContact => ResolvedColor::rgb(251, 247, 252),
        Particle => ResolvedColor::rgba(124, 58, 237, 60),
    }
}

/// egui widget visuals matching the page palette, for the status bar.
pub fn portfolio_visuals(mode: ThemeMode) -> egui::Visuals {
    let mut v = match mode {
        ThemeMode::Dark => egui::Visuals::dark(),
        ThemeMode::Light => egui::Visuals::light(),
    };
    v.panel_fill = resolve(ThemeToken::Background, mode);
    v.extreme_bg_color = resolve(ThemeToken::InputBackground, mode);
    v.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, resolve(ThemeToken::Border, mode));
    v.widgets.active.bg_fill = resolve(ThemeToken::ButtonPrimary, mode);
    v.selection.stroke = egui::Stroke::new(1.0, resolve(ThemeToken::Accent, mode));
    v.hyperlink_color = resolve(ThemeToken::Accent, mode);
    v.error_fg_color = resolve(ThemeToken::ErrorText, mode);
    v
}
