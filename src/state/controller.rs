/// View state of the gallery: active filter, item presence and the lightbox
///
/// The controller owns the gallery items for the lifetime of the window and
/// turns discrete UI events into state changes. It never touches widgets;
/// the UI layer reads it back to decide what to draw.

use tracing::{debug, info};

use super::data::{GalleryItem, ImageRef};
use super::filter::{Category, FilterState, PendingHide, Presence};
use super::lightbox::{Direction, LightboxState};

#[derive(Debug, Clone)]
pub struct ViewStateController {
    items: Vec<GalleryItem>,
    lightbox: LightboxState,
    filter: FilterState,
}

impl ViewStateController {
    pub fn new(items: Vec<GalleryItem>) -> Self {
        let filter = FilterState::new(items.len());
        Self {
            items,
            lightbox: LightboxState::new(),
            filter,
        }
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    // ========== Lightbox ==========

    /// Open the lightbox at `requested`, wrapping past either end.
    ///
    /// Returns `false` when the gallery is empty.
    pub fn open_lightbox(&mut self, requested: isize) -> bool {
        let opened = self.lightbox.open(requested, self.items.len());
        if opened {
            debug!(index = self.lightbox.current_index(), "lightbox opened");
        }
        opened
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox.close();
    }

    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.lightbox.navigate(direction, self.items.len())
    }

    pub fn is_lightbox_open(&self) -> bool {
        self.lightbox.is_open()
    }

    pub fn current_index(&self) -> usize {
        self.lightbox.current_index()
    }

    /// The image the open lightbox is showing
    pub fn current_image(&self) -> Option<&ImageRef> {
        if !self.lightbox.is_open() {
            return None;
        }
        self.items
            .get(self.lightbox.current_index())
            .map(|item| &item.image)
    }

    /// Escape key. Returns whether anything was dismissed.
    pub fn on_escape(&mut self) -> bool {
        self.dismiss()
    }

    /// Press on the dimmed area around the lightbox image
    pub fn on_overlay_click(&mut self) -> bool {
        self.dismiss()
    }

    fn dismiss(&mut self) -> bool {
        if !self.lightbox.is_open() {
            return false;
        }
        self.lightbox.close();
        true
    }

    // ========== Filter ==========

    /// Apply a category filter; returns the fades to complete later
    pub fn set_filter(&mut self, category: Category) -> Vec<PendingHide> {
        info!(?category, "gallery filter changed");
        self.filter.set(category, &self.items)
    }

    /// A fade scheduled by `set_filter` has elapsed
    pub fn complete_hide(&mut self, hide: PendingHide) -> bool {
        let applied = self.filter.complete(hide);
        if !applied {
            debug!(index = hide.index, token = hide.token, "stale fade ignored");
        }
        applied
    }

    pub fn is_filter_active(&self, category: &Category) -> bool {
        self.filter.active() == category
    }

    pub fn presence(&self, index: usize) -> Option<Presence> {
        self.filter.presence(index)
    }

    pub fn in_layout(&self, index: usize) -> bool {
        self.filter.in_layout(index)
    }

    #[cfg(test)]
    pub fn visibility(&self) -> Vec<bool> {
        self.filter.visibility()
    }
}
