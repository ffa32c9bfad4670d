/// State management module
///
/// Everything here is plain data and transitions, testable without a window:
/// - Site content loaded at start-up (data.rs)
/// - Lightbox index and wrap-around (lightbox.rs)
/// - Category filter and deferred hides (filter.rs)
/// - The gallery view-state controller tying both together (controller.rs)
/// - Header, back-to-top, anchors and mobile drawer (chrome.rs)
/// - Form validation and mock submission (forms.rs)

pub mod chrome;
pub mod controller;
pub mod data;
pub mod filter;
pub mod forms;
pub mod lightbox;

pub use controller::ViewStateController;
