use folio_protocol::SectionId;

use super::registry::SectionRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: SectionId,
    pub label: String,
}

/// Menu label for a section id. Known ids get their fixed label, anything
/// else is shown capitalized.
pub fn menu_label(id: &str) -> String {
    match id {
        "hero" => "Home".to_owned(),
        "about" => "About".to_owned(),
        "skills" => "Skills".to_owned(),
        "projects" => "Projects".to_owned(),
        "resume" => "Resume".to_owned(),
        "contact" => "Contact".to_owned(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

/// Nav bar state apart from the active section, which the tracker owns.
#[derive(Debug, Clone)]
pub struct NavigationState {
    items: Vec<MenuItem>,
    scrolled_threshold: f64,
    scrolled: bool,
    menu_open: bool,
}

impl NavigationState {
    pub fn new(registry: &SectionRegistry, scrolled_threshold: f64) -> Self {
        let items = registry
            .iter()
            .map(|id| MenuItem {
                id: id.clone(),
                label: menu_label(id),
            })
            .collect();
        Self {
            items,
            scrolled_threshold,
            scrolled: false,
            menu_open: false,
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Whether the page has scrolled far enough for the opaque nav style.
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Returns whether the scrolled flag flipped.
    pub fn on_scroll(&mut self, scroll_offset: f64) -> bool {
        let scrolled = scroll_offset > self.scrolled_threshold;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }
}
