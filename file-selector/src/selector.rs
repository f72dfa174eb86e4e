use std::fmt;

use crate::core::{Entry, Filter, PAGE_SIZE, Page, SelectorError};
use crate::events::{Action, ActionOutcome};
use crate::fs::{FileSystem, StdFileSystem};
use crate::host::{LogNotifier, Notifier, NullView, PickHandler, SelectorView};
use crate::paging::{self, previous_page_offset};
use crate::path::SelectorPath;
use crate::settings::SelectorSettings;

#[cfg(feature = "tracing")]
use tracing::{debug, trace, warn};

/// Notice shown the first time a folder-mode selector opens.
pub(crate) const FOLDER_HINT: &str = "Long-press a folder\nto choose it";

/// Parameters of [`FileSelector::open`].
///
/// ```
/// use file_selector::OpenRequest;
///
/// let request = OpenRequest::new("S:/music")
///     .filter("wav")
///     .on_pick(|path: &str| println!("{path}"));
/// # let _ = request;
/// ```
pub struct OpenRequest {
    path: String,
    filter: Filter,
    on_pick: Option<Box<dyn PickHandler>>,
}

impl OpenRequest {
    /// Start browsing at `path` (`""` = drive list) with no filter and no handler.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            filter: Filter::All,
            on_pick: None,
        }
    }

    /// Set the filter; accepts a [`Filter`] or its compact string form.
    pub fn filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Set the handler receiving the chosen path.
    pub fn on_pick(mut self, handler: impl PickHandler + 'static) -> Self {
        self.on_pick = Some(Box::new(handler));
        self
    }
}

impl fmt::Debug for OpenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRequest")
            .field("path", &self.path)
            .field("filter", &self.filter)
            .field("on_pick", &self.on_pick.is_some())
            .finish()
    }
}

struct Session {
    path: SelectorPath,
    filter: Filter,
    /// Matching entries shown through the end of the current page.
    shown: usize,
    on_pick: Option<Box<dyn PickHandler>>,
    page: Page,
}

enum Transition {
    Close,
    Enter(SelectorPath),
    Turn(usize),
    Pick(SelectorPath),
}

/// Modal, paged file and folder selector.
///
/// A selector holds at most one session. [`open`](Self::open) starts it,
/// [`dispatch`](Self::dispatch) (or [`press`](Self::press) /
/// [`long_press`](Self::long_press) on a row of the current page) drives it,
/// and it ends with [`close`](Self::close) or a pick. Every state change
/// re-reads the directory and hands the new [`Page`] to the [`SelectorView`].
pub struct FileSelector<F = StdFileSystem> {
    fs: F,
    view: Box<dyn SelectorView>,
    notifier: Box<dyn Notifier>,
    settings: SelectorSettings,
    session: Option<Session>,
}

impl<F: FileSystem> FileSelector<F> {
    /// Create a closed selector over `fs`, with a [`NullView`] and a [`LogNotifier`].
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            view: Box::new(NullView),
            notifier: Box::new(LogNotifier),
            settings: SelectorSettings::default(),
            session: None,
        }
    }

    /// Use `view` to present pages.
    pub fn with_view(mut self, view: impl SelectorView + 'static) -> Self {
        self.view = Box::new(view);
        self
    }

    /// Use `notifier` for user notices.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Start from previously saved settings.
    pub fn with_settings(mut self, settings: SelectorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Open a session and show its first page.
    ///
    /// An already open session is closed first; its handler is dropped without
    /// being called. A path longer than [`MAX_PATH_LEN`](crate::MAX_PATH_LEN)
    /// is refused and leaves the selector untouched.
    pub fn open(&mut self, request: OpenRequest) -> Result<(), SelectorError> {
        let path = SelectorPath::new(&request.path)?;
        if self.session.is_some() {
            trace_reopen(&path);
            self.close();
        }

        let folder_mode = request.filter.is_folder_mode();
        trace_open(&path, &request.filter);
        self.view.open_window(path.as_str());
        self.session = Some(Session {
            path,
            filter: request.filter,
            shown: 0,
            on_pick: request.on_pick,
            page: Page::default(),
        });
        self.refresh();

        if folder_mode && !self.settings.folder_hint_shown {
            self.settings.folder_hint_shown = true;
            self.notifier.notify(FOLDER_HINT);
        }
        Ok(())
    }

    /// Close the session, if any.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            self.view.close_window();
            trace_closed();
        }
    }

    /// Apply an action to the open session.
    pub fn dispatch(&mut self, action: Action) -> ActionOutcome {
        let Some(session) = self.session.as_mut() else {
            trace_ignored(&action);
            return ActionOutcome::Ignored;
        };
        trace_action(&action, &session.path);

        let transition = match action {
            Action::Close => Ok(Transition::Close),
            Action::Up => {
                SelectorPath::new(&self.fs.parent_of(session.path.as_str())).map(Transition::Enter)
            }
            Action::NextPage => Ok(Transition::Turn(session.shown)),
            Action::PreviousPage => Ok(Transition::Turn(previous_page_offset(
                session.shown,
                PAGE_SIZE,
            ))),
            Action::EnterDrive(letter) => Ok(Transition::Enter(SelectorPath::drive(letter))),
            Action::PickDrive(letter) => Ok(Transition::Pick(SelectorPath::drive(letter))),
            Action::EnterFolder(name) => session.path.join(&name).map(Transition::Enter),
            Action::PickFolder(name) | Action::PickFile(name) => {
                session.path.join(&name).map(Transition::Pick)
            }
        };

        match transition {
            Err(err) => {
                self.report(&err);
                ActionOutcome::Rejected
            }
            Ok(Transition::Close) => {
                self.close();
                ActionOutcome::Closed
            }
            Ok(Transition::Enter(path)) => {
                session.path = path;
                session.shown = 0;
                self.refresh();
                ActionOutcome::Refreshed
            }
            Ok(Transition::Turn(offset)) => {
                session.shown = offset;
                self.refresh();
                ActionOutcome::Refreshed
            }
            Ok(Transition::Pick(path)) => {
                self.pick(path);
                ActionOutcome::Picked
            }
        }
    }

    /// Run the normal action of row `index` of the current page.
    pub fn press(&mut self, index: usize) -> ActionOutcome {
        match self.entry(index).map(|e| e.action.clone()) {
            Some(action) => self.dispatch(action),
            None => ActionOutcome::Ignored,
        }
    }

    /// Run the long-press action of row `index`, if it has one.
    pub fn long_press(&mut self, index: usize) -> ActionOutcome {
        match self.entry(index).and_then(|e| e.long_press.clone()) {
            Some(action) => self.dispatch(action),
            None => ActionOutcome::Ignored,
        }
    }

    /// Whether a session is open.
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The page currently shown.
    pub fn page(&self) -> Option<&Page> {
        self.session.as_ref().map(|s| &s.page)
    }

    /// The path being browsed (`""` on the drive list).
    pub fn current_path(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.path.as_str())
    }

    /// Matching entries shown so far for the current path, through the current page.
    pub fn page_offset(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.shown)
    }

    /// Filter of the open session.
    pub fn filter(&self) -> Option<&Filter> {
        self.session.as_ref().map(|s| &s.filter)
    }

    /// Settings to persist between runs.
    pub fn settings(&self) -> &SelectorSettings {
        &self.settings
    }

    /// The enumeration backend.
    pub fn file_system(&self) -> &F {
        &self.fs
    }

    fn entry(&self, index: usize) -> Option<&Entry> {
        self.session.as_ref()?.page.entries.get(index)
    }

    fn refresh(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let build = paging::build_page(&self.fs, &session.path, &session.filter, session.shown);
        session.shown = build.shown;
        session.page = build.page;
        self.view.show_page(&session.page);
        if let Some(err) = build.error {
            self.report(&err);
        }
    }

    fn pick(&mut self, path: SelectorPath) {
        trace_pick(&path);
        if let Some(handler) = self.session.as_mut().and_then(|s| s.on_pick.as_mut()) {
            handler.on_pick(path.as_str());
        }
        self.close();
    }

    fn report(&mut self, err: &SelectorError) {
        trace_error(err);
        self.notifier.notify(err.notice());
    }
}

impl<F: fmt::Debug> fmt::Debug for FileSelector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("FileSelector");
        s.field("fs", &self.fs).field("settings", &self.settings);
        if let Some(session) = &self.session {
            s.field("path", &session.path)
                .field("filter", &session.filter)
                .field("shown", &session.shown);
        }
        s.finish_non_exhaustive()
    }
}

#[cfg(feature = "tracing")]
fn trace_open(path: &SelectorPath, filter: &Filter) {
    debug!(event = "selector.open", path = %path, ?filter, "selector opened");
}

#[cfg(not(feature = "tracing"))]
fn trace_open(_path: &SelectorPath, _filter: &Filter) {}

#[cfg(feature = "tracing")]
fn trace_reopen(path: &SelectorPath) {
    debug!(event = "selector.reopen", path = %path, "closing previous session");
}

#[cfg(not(feature = "tracing"))]
fn trace_reopen(_path: &SelectorPath) {}

#[cfg(feature = "tracing")]
fn trace_closed() {
    debug!(event = "selector.close", "selector closed");
}

#[cfg(not(feature = "tracing"))]
fn trace_closed() {}

#[cfg(feature = "tracing")]
fn trace_action(action: &Action, path: &SelectorPath) {
    trace!(event = "selector.action", ?action, path = %path, "action");
}

#[cfg(not(feature = "tracing"))]
fn trace_action(_action: &Action, _path: &SelectorPath) {}

#[cfg(feature = "tracing")]
fn trace_ignored(action: &Action) {
    trace!(event = "selector.ignored", ?action, "action on closed selector");
}

#[cfg(not(feature = "tracing"))]
fn trace_ignored(_action: &Action) {}

#[cfg(feature = "tracing")]
fn trace_pick(path: &SelectorPath) {
    debug!(event = "selector.pick", path = %path, "path chosen");
}

#[cfg(not(feature = "tracing"))]
fn trace_pick(_path: &SelectorPath) {}

#[cfg(feature = "tracing")]
fn trace_error(err: &SelectorError) {
    warn!(event = "selector.error", error = %err, "navigation failed");
}

#[cfg(not(feature = "tracing"))]
fn trace_error(_err: &SelectorError) {}
