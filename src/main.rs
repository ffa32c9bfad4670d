use iced::event::{self, Event};
use iced::keyboard::{self, key::Named, Key};
use iced::time::Instant;
use iced::widget::scrollable::AbsoluteOffset;
use iced::widget::{column, scrollable, Column, Stack};
use iced::{window, Element, Length, Size, Subscription, Task, Theme};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod state;
mod ui;

use config::SiteConfig;
use state::chrome::{self, HeaderState, MobileMenu, SmoothScroll};
use state::data::{SectionKind, SiteContent};
use state::filter::{Category, PendingHide};
use state::forms::{self, Form, FormKind};
use state::lightbox::Direction;
use state::ViewStateController;

/// An anchor or back-to-top scroll in progress.
/// `started` is stamped by the first animation frame.
#[derive(Debug, Clone, Copy)]
struct ActiveScroll {
    animation: SmoothScroll,
    started: Option<Instant>,
}

/// Main application state
struct HeritageSite {
    config: SiteConfig,
    content: SiteContent,
    /// Gallery filter and lightbox
    gallery: ViewStateController,
    header: HeaderState,
    menu: MobileMenu,
    window_width: f32,
    /// Fragment of the last followed anchor, shown in the window title
    fragment: Option<String>,
    scroll: Option<ActiveScroll>,
    /// Offset the page is pinned to while the drawer or lightbox is open
    scroll_lock: Option<f32>,
    contact: Form,
    donation: Form,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    PageScrolled(scrollable::Viewport),
    /// Animation frame while a smooth scroll runs
    Frame(Instant),
    AnchorClicked(String),
    BackToTop,
    MenuToggled,
    MenuOverlayPressed,
    DrawerLinkClicked(String),
    WindowResized(Size),
    EscapePressed,
    ArrowPressed(Direction),
    FilterSelected(Category),
    /// A filtered-out item finished fading
    FadeElapsed(PendingHide),
    GalleryItemPressed(usize),
    LightboxStep(Direction),
    LightboxClosed,
    LightboxOverlayPressed,
    FieldEdited(FormKind, usize, String),
    FormSubmitted(FormKind),
    SubmissionFinished(FormKind, bool),
}

fn page_id() -> scrollable::Id {
    scrollable::Id::new("page")
}

impl HeritageSite {
    fn new(config: SiteConfig, content: SiteContent) -> (Self, Task<Message>) {
        info!(
            sections = content.sections.len(),
            images = content.gallery.len(),
            "site content loaded"
        );

        let site = HeritageSite {
            gallery: ViewStateController::new(content.gallery.clone()),
            header: HeaderState::new(config.header_scroll_threshold),
            menu: MobileMenu::new(config.mobile_breakpoint),
            window_width: config.window_width,
            fragment: None,
            scroll: None,
            scroll_lock: None,
            contact: Form::contact(),
            donation: Form::donation(),
            config,
            content,
        };

        (site, Task::none())
    }

    fn title(&self) -> String {
        match &self.fragment {
            Some(id) => format!("{} · #{}", self.content.title, id),
            None => self.content.title.clone(),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.handle(message);
        self.sync_scroll_lock();
        task
    }

    fn handle(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PageScrolled(viewport) => self.on_page_scrolled(viewport.absolute_offset().y),
            Message::Frame(now) => self.advance_scroll(now),
            Message::AnchorClicked(href) => {
                self.follow_anchor(&href);
                Task::none()
            }
            Message::BackToTop => {
                self.start_scroll(0.0);
                Task::none()
            }
            Message::MenuToggled => {
                self.menu.toggle();
                Task::none()
            }
            Message::MenuOverlayPressed => {
                self.menu.close();
                Task::none()
            }
            Message::DrawerLinkClicked(href) => {
                self.menu.close();
                self.follow_anchor(&href);
                Task::none()
            }
            Message::WindowResized(size) => {
                self.window_width = size.width;
                if self.menu.on_resize(size.width) {
                    debug!(width = size.width, "drawer closed on resize");
                }
                Task::none()
            }
            Message::EscapePressed => {
                // Both overlays listen for Escape
                self.gallery.on_escape();
                self.menu.on_escape();
                Task::none()
            }
            Message::ArrowPressed(direction) | Message::LightboxStep(direction) => {
                self.gallery.navigate(direction);
                Task::none()
            }
            Message::FilterSelected(category) => {
                let delay = self.config.fade_out();
                let fades = self.gallery.set_filter(category);

                Task::batch(fades.into_iter().map(move |hide| {
                    Task::perform(async move { tokio::time::sleep(delay).await }, move |_| {
                        Message::FadeElapsed(hide)
                    })
                }))
            }
            Message::FadeElapsed(hide) => {
                self.gallery.complete_hide(hide);
                Task::none()
            }
            Message::GalleryItemPressed(index) => {
                self.gallery.open_lightbox(index as isize);
                Task::none()
            }
            Message::LightboxClosed => {
                self.gallery.close_lightbox();
                Task::none()
            }
            Message::LightboxOverlayPressed => {
                self.gallery.on_overlay_click();
                Task::none()
            }
            Message::FieldEdited(kind, index, value) => {
                self.form_mut(kind).on_input(index, value);
                Task::none()
            }
            Message::FormSubmitted(kind) => {
                let delay = self.config.submit_delay();
                match self.form_mut(kind).begin_submit() {
                    Some(submission) => Task::perform(forms::send(submission, delay), move |accepted| {
                        Message::SubmissionFinished(kind, accepted)
                    }),
                    None => Task::none(),
                }
            }
            Message::SubmissionFinished(kind, accepted) => {
                self.form_mut(kind).finish_submit(accepted);
                Task::none()
            }
        }
    }

    fn form_mut(&mut self, kind: FormKind) -> &mut Form {
        match kind {
            FormKind::Contact => &mut self.contact,
            FormKind::Donation => &mut self.donation,
        }
    }

    /// Track the page offset, or snap back while an overlay pins the page
    fn on_page_scrolled(&mut self, offset: f32) -> Task<Message> {
        if let Some(locked) = self.scroll_lock {
            if (offset - locked).abs() > 0.5 {
                return scrollable::scroll_to(page_id(), AbsoluteOffset { x: 0.0, y: locked });
            }
        }
        self.header.on_scroll(offset);
        Task::none()
    }

    /// Scroll to an in-page anchor; links that resolve to nothing are ignored
    fn follow_anchor(&mut self, href: &str) {
        match chrome::resolve_anchor(href, &self.content.sections) {
            Some(target) => {
                debug!(id = %target.id, offset = target.offset, "following anchor");
                self.start_scroll(target.offset);
                self.fragment = Some(target.id);
            }
            None => debug!(href, "anchor has no target"),
        }
    }

    fn start_scroll(&mut self, to: f32) {
        self.scroll = Some(ActiveScroll {
            animation: SmoothScroll::new(self.header.offset(), to, self.config.smooth_scroll()),
            started: None,
        });
    }

    fn advance_scroll(&mut self, now: Instant) -> Task<Message> {
        if self.scroll_lock.is_some() {
            self.scroll = None;
            return Task::none();
        }
        let Some(active) = self.scroll.as_mut() else {
            return Task::none();
        };

        let started = *active.started.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started);
        let offset = active.animation.offset_at(elapsed);
        if active.animation.is_finished(elapsed) {
            self.scroll = None;
        }

        scrollable::scroll_to(page_id(), AbsoluteOffset { x: 0.0, y: offset })
    }

    /// Pin the page while an overlay is open, release it once none is.
    /// Opening an overlay stops any anchor scroll where it is.
    fn sync_scroll_lock(&mut self) {
        let locked = self.menu.is_open() || self.gallery.is_lightbox_open();
        match (locked, self.scroll_lock) {
            (true, None) => {
                self.scroll = None;
                self.scroll_lock = Some(self.header.offset());
            }
            (false, Some(_)) => self.scroll_lock = None,
            _ => {}
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let sections = self.content.sections.iter().map(|section| {
            let extra = match section.kind {
                SectionKind::Text => None,
                SectionKind::Gallery => Some(ui::gallery::view(&self.content, &self.gallery)),
                SectionKind::Contact => Some(ui::forms::view(&self.contact)),
                SectionKind::Donate => Some(ui::forms::view(&self.donation)),
            };
            ui::page::section(section, extra)
        });

        let page = scrollable(Column::with_children(sections))
            .id(page_id())
            .on_scroll(Message::PageScrolled)
            .width(Length::Fill)
            .height(Length::Fill);

        let mut body = column![
            ui::header::view(&self.content, &self.header, &self.menu, self.window_width),
            page,
        ];
        if self.header.show_back_to_top() {
            body = body.push(ui::header::back_to_top());
        }

        let mut layers = Stack::new()
            .push(body)
            .width(Length::Fill)
            .height(Length::Fill);

        if self.menu.is_open() {
            layers = layers.push(ui::header::drawer(&self.content.nav));
        }
        if let Some(image) = self.gallery.current_image() {
            layers = layers.push(ui::lightbox::view(
                &self.content,
                image,
                self.gallery.current_index(),
                self.gallery.items().len(),
            ));
        }

        layers.into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let events = event::listen_with(handle_event);

        if self.scroll.is_some() {
            Subscription::batch([events, window::frames().map(Message::Frame)])
        } else {
            events
        }
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Keyboard and window events the site reacts to
fn handle_event(event: Event, status: event::Status, _window: window::Id) -> Option<Message> {
    let unclaimed = matches!(status, event::Status::Ignored);

    match event {
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(named),
            ..
        }) => match named {
            Named::Escape => Some(Message::EscapePressed),
            Named::ArrowLeft if unclaimed => Some(Message::ArrowPressed(Direction::Prev)),
            Named::ArrowRight if unclaimed => Some(Message::ArrowPressed(Direction::Next)),
            _ => None,
        },
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        _ => None,
    }
}

/// Configured content file, falling back to the bundled content
fn load_content(config: &SiteConfig) -> SiteContent {
    if let Some(path) = &config.content_path {
        match SiteContent::from_path(path) {
            Ok(content) => return content,
            Err(err) => warn!(%err, "falling back to bundled content"),
        }
    }

    SiteContent::bundled().unwrap_or_else(|err| {
        error!(%err, "bundled content is malformed");
        SiteContent::default()
    })
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("heritage_site=info")),
        )
        .init();

    let config = SiteConfig::load().unwrap_or_else(|err| {
        warn!(%err, "falling back to default config");
        SiteConfig::default()
    });
    let content = load_content(&config);
    let window_size = Size::new(config.window_width, config.window_height);

    iced::application(HeritageSite::title, HeritageSite::update, HeritageSite::view)
        .subscription(HeritageSite::subscription)
        .theme(HeritageSite::theme)
        .window_size(window_size)
        .centered()
        .run_with(move || HeritageSite::new(config, content))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> HeritageSite {
        let content = SiteContent::bundled().unwrap();
        HeritageSite::new(SiteConfig::default(), content).0
    }

    #[test]
    fn test_escape_closes_lightbox_and_drawer() {
        let mut site = site();
        let _ = site.update(Message::GalleryItemPressed(1));
        let _ = site.update(Message::MenuToggled);
        assert!(site.gallery.is_lightbox_open());
        assert!(site.menu.is_open());

        let _ = site.update(Message::EscapePressed);
        assert!(!site.gallery.is_lightbox_open());
        assert!(!site.menu.is_open());
    }

    #[test]
    fn test_overlay_locks_scroll_until_closed() {
        let mut site = site();
        site.header.on_scroll(120.0);

        let _ = site.update(Message::GalleryItemPressed(0));
        assert_eq!(site.scroll_lock, Some(120.0));

        let _ = site.update(Message::LightboxOverlayPressed);
        assert_eq!(site.scroll_lock, None);
    }

    #[test]
    fn test_opening_lightbox_stops_anchor_scroll() {
        let mut site = site();
        let _ = site.update(Message::AnchorClicked("#gallery".to_string()));
        assert!(site.scroll.is_some());

        let _ = site.update(Message::GalleryItemPressed(0));
        assert!(site.scroll.is_none());
        assert_eq!(site.scroll_lock, Some(0.0));

        let start = Instant::now();
        for ms in [0, 100, 1000] {
            let _ = site.update(Message::Frame(start + std::time::Duration::from_millis(ms)));
        }
        assert!(site.scroll.is_none());
        assert_eq!(site.header.offset(), 0.0);
        assert_eq!(site.scroll_lock, Some(0.0));
    }

    #[test]
    fn test_drawer_scroll_while_locked_keeps_pinned_offset() {
        let mut site = site();
        let _ = site.on_page_scrolled(200.0);
        let _ = site.update(Message::MenuToggled);
        assert_eq!(site.scroll_lock, Some(200.0));

        let _ = site.on_page_scrolled(650.0);
        assert_eq!(site.header.offset(), 200.0);

        // Within tolerance of the pinned offset
        let _ = site.on_page_scrolled(200.3);
        assert_eq!(site.header.offset(), 200.3);

        let _ = site.update(Message::MenuOverlayPressed);
        assert_eq!(site.scroll_lock, None);
        let _ = site.on_page_scrolled(650.0);
        assert_eq!(site.header.offset(), 650.0);
    }

    #[test]
    fn test_back_to_top_scrolls_to_zero() {
        let mut site = site();
        let _ = site.on_page_scrolled(900.0);
        assert!(site.header.show_back_to_top());

        let _ = site.update(Message::BackToTop);
        let active = site.scroll.expect("back-to-top starts a scroll");
        assert_eq!(active.animation.offset_at(std::time::Duration::ZERO), 900.0);
        assert_eq!(active.animation.offset_at(std::time::Duration::from_secs(5)), 0.0);

        let start = Instant::now();
        let _ = site.update(Message::Frame(start));
        let _ = site.update(Message::Frame(start + site.config.smooth_scroll()));
        assert!(site.scroll.is_none());
        assert!(site.fragment.is_none());
    }

    #[test]
    fn test_drawer_link_closes_drawer_and_sets_fragment() {
        let mut site = site();
        let _ = site.update(Message::MenuToggled);
        let _ = site.update(Message::DrawerLinkClicked("#gallery".to_string()));

        assert!(!site.menu.is_open());
        assert_eq!(site.fragment.as_deref(), Some("gallery"));
        assert!(site.scroll.is_some());
        assert!(site.title().ends_with("#gallery"));
    }

    #[test]
    fn test_bare_hash_is_ignored() {
        let mut site = site();
        let _ = site.update(Message::AnchorClicked("#".to_string()));
        assert!(site.scroll.is_none());
        assert!(site.fragment.is_none());
    }

    #[test]
    fn test_resize_past_breakpoint_closes_drawer() {
        let mut site = site();
        let _ = site.update(Message::WindowResized(Size::new(600.0, 800.0)));
        let _ = site.update(Message::MenuToggled);

        let _ = site.update(Message::WindowResized(Size::new(1280.0, 800.0)));
        assert!(!site.menu.is_open());
        assert_eq!(site.window_width, 1280.0);
    }

    #[test]
    fn test_arrow_keys_step_only_while_open() {
        let mut site = site();
        let _ = site.update(Message::ArrowPressed(Direction::Next));
        assert!(!site.gallery.is_lightbox_open());

        let _ = site.update(Message::GalleryItemPressed(0));
        let _ = site.update(Message::ArrowPressed(Direction::Prev));
        assert_eq!(site.gallery.current_index(), site.gallery.items().len() - 1);
    }

    #[test]
    fn test_invalid_form_does_not_submit() {
        let mut site = site();
        let _ = site.update(Message::FormSubmitted(FormKind::Contact));
        assert_eq!(site.contact.status(), &forms::SubmitStatus::Idle);
        assert!(site.contact.fields().iter().all(|f| f.error().is_some()));
    }

    #[test]
    fn test_filter_updates_gallery_visibility() {
        let mut site = site();
        let _ = site.update(Message::FilterSelected(Category::from_filter("history")));

        let visibility = site.gallery.visibility();
        for (visible, item) in visibility.iter().zip(site.gallery.items()) {
            assert_eq!(*visible, item.category == "history");
        }
    }

    #[test]
    fn test_handled_events() {
        let id = window::Id::unique();
        let escape = Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(Named::Escape),
            modified_key: Key::Named(Named::Escape),
            physical_key: keyboard::key::Physical::Code(keyboard::key::Code::Escape),
            location: keyboard::Location::Standard,
            modifiers: keyboard::Modifiers::default(),
            text: None,
        });
        assert!(matches!(
            handle_event(escape, event::Status::Captured, id),
            Some(Message::EscapePressed)
        ));

        let resized = Event::Window(window::Event::Resized(Size::new(800.0, 600.0)));
        assert!(matches!(
            handle_event(resized, event::Status::Ignored, id),
            Some(Message::WindowResized(_))
        ));
    }
}
