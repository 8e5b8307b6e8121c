pub mod home;
pub mod movie;
pub mod user;

use iced::Task;

use crate::app;

/// Which page is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Movie,
    User,
}

/// Actions that a screen can request from the app router.
///
/// Screens return these from `update()` instead of directly mutating
/// shared state — the app interprets them in one place.
pub enum Action {
    /// No side-effect.
    None,
    /// Return to the browse page.
    GoHome,
    /// Open the detail page for a movie.
    OpenMovie(u32),
    /// Open the detail page for a user.
    OpenUser(u32),
    /// Run an async Iced task that eventually produces an app::Message.
    RunTask(Task<app::Message>),
}
