// Navigation selection for a browsing session. Free-text search and category
// selection are mutually exclusive.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavSelection {
    #[default]
    NoneSelected,
    CategorySelected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    CategoryClicked(String),
    SearchSubmitted,
}

/// Result of applying a [`NavEvent`]: the next state plus the highlight changes
/// a display needs to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub next: NavSelection,
    pub deactivated: Option<String>,
    pub activated: Option<String>,
}

impl NavSelection {
    pub fn active(&self) -> Option<&str> {
        match self {
            NavSelection::NoneSelected => None,
            NavSelection::CategorySelected(id) => Some(id),
        }
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active() == Some(id)
    }

    pub fn apply(&self, event: &NavEvent) -> SelectionChange {
        let deactivated = self.active().map(str::to_owned);
        match event {
            NavEvent::CategoryClicked(id) => SelectionChange {
                next: NavSelection::CategorySelected(id.clone()),
                deactivated,
                activated: Some(id.clone()),
            },
            NavEvent::SearchSubmitted => SelectionChange {
                next: NavSelection::NoneSelected,
                deactivated,
                activated: None,
            },
        }
    }
}
