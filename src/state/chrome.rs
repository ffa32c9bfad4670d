/// Page chrome: header scroll style, back-to-top, anchors and the mobile drawer

use std::time::Duration;

use super::data::Section;

/// Header appearance driven by the page scroll offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderState {
    threshold: f32,
    offset: f32,
}

impl HeaderState {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            offset: 0.0,
        }
    }

    pub fn on_scroll(&mut self, offset: f32) {
        self.offset = offset;
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Compact header style once the page has scrolled past the threshold
    pub fn is_scrolled(&self) -> bool {
        self.offset > self.threshold
    }

    pub fn show_back_to_top(&self) -> bool {
        self.is_scrolled()
    }
}

/// Navigation drawer shown instead of the inline nav on narrow windows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobileMenu {
    open: bool,
    breakpoint: f32,
}

impl MobileMenu {
    pub fn new(breakpoint: f32) -> Self {
        Self {
            open: false,
            breakpoint,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Narrow layouts show the menu toggle instead of inline links
    pub fn is_collapsed(&self, window_width: f32) -> bool {
        window_width <= self.breakpoint
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Returns whether the drawer was open
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn on_escape(&mut self) -> bool {
        self.close()
    }

    /// Widening past the breakpoint closes the drawer
    pub fn on_resize(&mut self, window_width: f32) -> bool {
        if window_width > self.breakpoint {
            self.close()
        } else {
            false
        }
    }
}

/// A resolved in-page link
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorTarget {
    pub id: String,
    /// Scroll offset of the section's top edge
    pub offset: f32,
}

/// Resolve `href` ("#gallery") against the page sections.
///
/// A bare "#", a non-fragment link and an unknown id all resolve to `None`.
pub fn resolve_anchor(href: &str, sections: &[Section]) -> Option<AnchorTarget> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }

    let mut offset = 0.0;
    for section in sections {
        if section.id == id {
            return Some(AnchorTarget {
                id: id.to_string(),
                offset,
            });
        }
        offset += section.height;
    }
    None
}

/// Eased scroll from one offset to another over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    from: f32,
    to: f32,
    duration: Duration,
}

impl SmoothScroll {
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    pub fn offset_at(&self, elapsed: Duration) -> f32 {
        if self.is_finished(elapsed) {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * ease_in_out_cubic(t)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
