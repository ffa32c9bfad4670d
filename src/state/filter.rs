/// Gallery category filter and per-item presence
///
/// Hiding an item is a two-step transition: the item first fades out while
/// it still occupies its place in the grid, and only leaves the layout once
/// the fade has elapsed. Each fade carries a token; a later transition on
/// the same item invalidates it, so a stale completion never hides an item
/// that has since been shown again.

use super::data::GalleryItem;

/// Filter sentinel matching every item
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Named(String),
}

impl Category {
    /// Map a filter button value to a category; "all" is the sentinel
    pub fn from_filter(value: &str) -> Self {
        if value == ALL {
            Category::All
        } else {
            Category::Named(value.to_string())
        }
    }

    pub fn matches(&self, item_category: &str) -> bool {
        match self {
            Category::All => true,
            Category::Named(name) => name == item_category,
        }
    }
}

/// Where an item is in its show/hide transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Shown,
    /// Filtered out, still in the layout until the fade completes
    FadingOut { token: u64 },
    Hidden,
}

/// A deferred layout removal waiting for its fade to elapse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingHide {
    pub index: usize,
    pub token: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    active: Category,
    presence: Vec<Presence>,
    next_token: u64,
}

impl FilterState {
    /// Start with every item shown under the "all" filter
    pub fn new(item_count: usize) -> Self {
        Self {
            active: Category::All,
            presence: vec![Presence::Shown; item_count],
            next_token: 0,
        }
    }

    pub fn active(&self) -> &Category {
        &self.active
    }

    /// Apply `category` and return the fades that need a completion.
    ///
    /// Items that match are shown immediately, cancelling any fade in
    /// flight. Items that stop matching start fading; items already fading
    /// or hidden are left as they are.
    pub fn set(&mut self, category: Category, items: &[GalleryItem]) -> Vec<PendingHide> {
        let mut pending = Vec::new();

        for (index, item) in items.iter().enumerate().take(self.presence.len()) {
            let visible = category.matches(&item.category);
            let presence = &mut self.presence[index];

            match (*presence, visible) {
                (_, true) => *presence = Presence::Shown,
                (Presence::Shown, false) => {
                    let token = self.next_token;
                    self.next_token += 1;
                    *presence = Presence::FadingOut { token };
                    pending.push(PendingHide { index, token });
                }
                (Presence::FadingOut { .. } | Presence::Hidden, false) => {}
            }
        }

        self.active = category;
        pending
    }

    /// Finish a fade. Returns `false` if the fade was superseded.
    pub fn complete(&mut self, hide: PendingHide) -> bool {
        match self.presence.get_mut(hide.index) {
            Some(presence) if *presence == (Presence::FadingOut { token: hide.token }) => {
                *presence = Presence::Hidden;
                true
            }
            _ => false,
        }
    }

    pub fn presence(&self, index: usize) -> Option<Presence> {
        self.presence.get(index).copied()
    }

    /// Final visibility of an item under the active filter
    #[cfg(test)]
    pub fn is_visible(&self, index: usize) -> bool {
        matches!(self.presence(index), Some(Presence::Shown))
    }

    /// Whether the item still takes up space in the grid
    pub fn in_layout(&self, index: usize) -> bool {
        matches!(
            self.presence(index),
            Some(Presence::Shown | Presence::FadingOut { .. })
        )
    }

    #[cfg(test)]
    pub fn visibility(&self) -> Vec<bool> {
        (0..self.presence.len()).map(|i| self.is_visible(i)).collect()
    }
}
