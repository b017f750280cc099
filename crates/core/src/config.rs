use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::content::PortfolioContent;
use crate::error::ConfigError;
use crate::model::registry::{DEFAULT_SECTIONS, SectionRegistry};
use crate::model::tracker::DEFAULT_HEADER_OFFSET;
use crate::model::typing::{PhraseQueue, TypingTimings};

/// Page bootstrap configuration.
///
/// Serializable so a host can ship its own copy next to the binary (or at
/// `/assets/portfolio.json` on the web) without code changes. Every field
/// falls back to the built-in sample portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Section ids in document order.
    pub sections: Vec<String>,
    pub tracker: TrackerConfig,
    pub typing: TypingConfig,
    pub contact: ContactConfig,
    pub content: PortfolioContent,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            sections: DEFAULT_SECTIONS.iter().map(|s| (*s).to_owned()).collect(),
            tracker: TrackerConfig::default(),
            typing: TypingConfig::default(),
            contact: ContactConfig::default(),
            content: PortfolioContent::default(),
        }
    }
}

impl PortfolioConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        let config: PortfolioConfig = serde_json::from_slice(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every construction-time invariant up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.registry()?;
        self.typing.phrase_queue()?;
        self.typing.timings().validate()?;
        if self.typing.cursor_blink_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "cursor_blink_ms",
            });
        }
        if self.contact.submit_delay_ms == 0 {
            warn!("contact.submit_delay_ms is 0; submissions complete on the next timer pass");
        }
        Ok(())
    }

    pub fn registry(&self) -> Result<SectionRegistry, ConfigError> {
        SectionRegistry::new(&self.sections)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Added to the raw scroll offset before testing containment, to account
    /// for the fixed header covering the top of the viewport.
    pub header_offset: f64,
    /// Scroll offset past which the nav bar switches to its opaque style.
    pub scrolled_threshold: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            header_offset: DEFAULT_HEADER_OFFSET,
            scrolled_threshold: 50.0,
        }
    }
}

impl TrackerConfig {
    /// Same behaviour for hosts measuring in terminal rows instead of pixels.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            header_offset: self.header_offset * factor,
            scrolled_threshold: self.scrolled_threshold * factor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    pub type_speed_ms: u64,
    pub delete_speed_ms: u64,
    pub delay_between_texts_ms: u64,
    pub cursor_blink_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        let timings = TypingTimings::default();
        Self {
            phrases: vec![
                "Full Stack Developer".into(),
                "React Specialist".into(),
                "UI/UX Enthusiast".into(),
                "Problem Solver".into(),
            ],
            type_speed_ms: timings.type_speed_ms,
            delete_speed_ms: timings.delete_speed_ms,
            delay_between_texts_ms: timings.delay_between_texts_ms,
            cursor_blink_ms: 500,
        }
    }
}

impl TypingConfig {
    pub fn timings(&self) -> TypingTimings {
        TypingTimings {
            type_speed_ms: self.type_speed_ms,
            delete_speed_ms: self.delete_speed_ms,
            delay_between_texts_ms: self.delay_between_texts_ms,
        }
    }

    pub fn phrase_queue(&self) -> Result<PhraseQueue, ConfigError> {
        PhraseQueue::new(self.phrases.iter().cloned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Simulated network latency of a form submission.
    pub submit_delay_ms: u64,
    /// How long the confirmation toast stays up.
    pub toast_duration_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 2000,
            toast_duration_ms: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = PortfolioConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sections.len(), 6);
        assert_eq!(config.typing.type_speed_ms, 100);
        assert_eq!(config.typing.delete_speed_ms, 50);
        assert_eq!(config.typing.delay_between_texts_ms, 2000);
        assert!((config.tracker.header_offset - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = br#"{ "typing": { "phrases": ["Rustacean"], "type_speed_ms": 80 } }"#;
        let config = PortfolioConfig::from_json(json).unwrap();
        assert_eq!(config.typing.phrases, vec!["Rustacean".to_owned()]);
        assert_eq!(config.typing.type_speed_ms, 80);
        assert_eq!(config.typing.delete_speed_ms, 50);
        assert_eq!(config.sections[0], "hero");
    }

    #[test]
    fn empty_phrases_rejected() {
        let json = br#"{ "typing": { "phrases": [] } }"#;
        let err = PortfolioConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPhraseQueue));
    }

    #[test]
    fn duplicate_sections_rejected() {
        let json = br#"{ "sections": ["hero", "about", "hero"] }"#;
        let err = PortfolioConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSection(ref id) if id == "hero"));
    }

    #[test]
    fn zero_type_speed_rejected() {
        let json = br#"{ "typing": { "type_speed_ms": 0 } }"#;
        let err = PortfolioConfig::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroInterval {
                name: "type_speed_ms"
            }
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = PortfolioConfig::from_json(b"{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn tracker_scaling_for_row_based_hosts() {
        let rows = TrackerConfig::default().scaled(0.05);
        assert!((rows.header_offset - 5.0).abs() < 1e-9);
        assert!((rows.scrolled_threshold - 2.5).abs() < 1e-9);
    }
}
