use folio_protocol::{SectionId, TypedText};
use tracing::{debug, trace};

use crate::config::PortfolioConfig;
use crate::error::{ConfigError, ContactFormError};
use crate::timers::{FiredTimer, Scheduler, TimerGuard};

use super::background::BackgroundVariant;
use super::contact::{ContactField, ContactForm, Toast};
use super::navigation::NavigationState;
use super::tracker::{ActiveSectionTracker, SectionLayout};
use super::typing_effect::TypingEffect;

/// What a scroll event changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollUpdate {
    pub active: Option<SectionId>,
    pub scrolled_changed: bool,
}

impl ScrollUpdate {
    pub fn is_empty(&self) -> bool {
        self.active.is_none() && !self.scrolled_changed
    }
}

/// All UI state of the landing page.
///
/// Owns the tracker and every timer-driven piece (typewriter, contact form,
/// toast). Dropping the page cancels all of its timers.
#[derive(Debug)]
pub struct Page {
    tracker: ActiveSectionTracker,
    navigation: NavigationState,
    background: BackgroundVariant,
    typing: TypingEffect,
    contact: ContactForm,
    toast: Option<(Toast, TimerGuard)>,
    toast_duration_ms: u64,
    scheduler: Scheduler,
}

impl Page {
    pub fn new(
        config: &PortfolioConfig,
        scheduler: &Scheduler,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        let registry = config.registry()?;
        let navigation = NavigationState::new(&registry, config.tracker.scrolled_threshold);
        let tracker = ActiveSectionTracker::new(registry, config.tracker.header_offset);
        let background = BackgroundVariant::for_section(tracker.active());
        let typing = TypingEffect::from_config(scheduler, &config.typing, now_ms)?;
        Ok(Self {
            tracker,
            navigation,
            background,
            typing,
            contact: ContactForm::new(scheduler, config.contact),
            toast: None,
            toast_duration_ms: config.contact.toast_duration_ms,
            scheduler: scheduler.clone(),
        })
    }

    pub fn active_section(&self) -> &SectionId {
        self.tracker.active()
    }

    pub fn tracker(&self) -> &ActiveSectionTracker {
        &self.tracker
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn background(&self) -> BackgroundVariant {
        self.background
    }

    pub fn typed_text(&self) -> TypedText {
        self.typing.display()
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref().map(|(t, _)| t)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Feed one scroll event through the nav bar and the tracker. The
    /// backdrop follows the active section.
    pub fn on_scroll<L: SectionLayout + ?Sized>(
        &mut self,
        scroll_offset: f64,
        layout: &L,
    ) -> ScrollUpdate {
        let scrolled_changed = self.navigation.on_scroll(scroll_offset);
        let active = self.tracker.on_scroll(scroll_offset, layout);
        if let Some(id) = &active {
            self.background = BackgroundVariant::for_section(id);
        }
        ScrollUpdate {
            active,
            scrolled_changed,
        }
    }

    /// Nav item activated: close the mobile menu and return the scroll
    /// offset that brings the section to the top, if it is laid out.
    pub fn select_section<L: SectionLayout + ?Sized>(
        &mut self,
        id: &str,
        layout: &L,
    ) -> Option<f64> {
        self.navigation.close_menu();
        self.scroll_target(id, layout)
    }

    pub fn scroll_target<L: SectionLayout + ?Sized>(&self, id: &str, layout: &L) -> Option<f64> {
        let id = self.tracker.registry().get(id)?;
        let target = layout.bounds(id).map(|b| b.top);
        debug!(section = %id, ?target, "scroll to section");
        target
    }

    pub fn toggle_menu(&mut self) {
        self.navigation.toggle_menu();
    }

    pub fn set_contact_field(&mut self, field: ContactField, value: impl Into<String>) {
        self.contact.set_field(field, value);
    }

    pub fn contact_field_mut(&mut self, field: ContactField) -> &mut String {
        self.contact.field_mut(field)
    }

    pub fn submit_contact(&mut self, now_ms: u64) -> Result<(), ContactFormError> {
        self.contact.submit(now_ms)
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    /// Dispatch one fired timer. Returns whether anything visible changed.
    pub fn on_timer(&mut self, fired: FiredTimer) -> bool {
        if self.typing.owns(&fired) {
            return self.typing.on_timer(fired);
        }
        if let Some(toast) = self.contact.on_timer(fired) {
            let expiry = self
                .scheduler
                .set_timeout_at(fired.deadline_ms.saturating_add(self.toast_duration_ms));
            self.toast = Some((toast, expiry));
            return true;
        }
        if self
            .toast
            .as_ref()
            .is_some_and(|(_, guard)| guard.id() == fired.id)
        {
            self.toast = None;
            return true;
        }
        trace!(?fired, "timer with no owner");
        false
    }

    /// Drain every timer due at `now_ms`. Returns whether anything visible
    /// changed.
    pub fn run_timers(&mut self, now_ms: u64) -> bool {
        let mut changed = false;
        while let Some(fired) = self.scheduler.pop_due(now_ms) {
            changed |= self.on_timer(fired);
        }
        changed
    }
}
