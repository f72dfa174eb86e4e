use crate::core::Page;

#[cfg(feature = "tracing")]
use tracing::info;

/// Presentation side of the selector.
///
/// The view owns a window with a close control (which should dispatch
/// [`Action::Close`](crate::Action::Close)) and a scrollable list of rows.
pub trait SelectorView {
    /// Create the window chrome.
    fn open_window(&mut self, title: &str);

    /// Replace the list with `page`, set the title and scroll to the top.
    fn show_page(&mut self, page: &Page);

    /// Tear the window down.
    fn close_window(&mut self);
}

/// View that draws nothing, for hosts that poll [`FileSelector::page`](crate::FileSelector::page).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullView;

impl SelectorView for NullView {
    fn open_window(&mut self, _title: &str) {}

    fn show_page(&mut self, _page: &Page) {}

    fn close_window(&mut self) {}
}

/// Fire-and-forget sink for user-facing messages.
pub trait Notifier {
    /// Show `message` to the user.
    fn notify(&mut self, message: &str);
}

impl<F: FnMut(&str)> Notifier for F {
    fn notify(&mut self, message: &str) {
        self(message)
    }
}

/// Notifier that only logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, _message: &str) {
        #[cfg(feature = "tracing")]
        info!(event = "selector.notice", text = _message, "notice");
    }
}

/// Receives the path chosen by the user.
pub trait PickHandler {
    /// Called once with the full path of the chosen drive, folder or file.
    fn on_pick(&mut self, path: &str);
}

impl<F: FnMut(&str)> PickHandler for F {
    fn on_pick(&mut self, path: &str) {
        self(path)
    }
}
