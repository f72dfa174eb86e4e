#![deny(missing_docs)]
//! Paged, modal file and folder selector.
//!
//! The selector walks a drive → folder → file namespace supplied by a
//! [`FileSystem`] and hands the chosen path to a [`PickHandler`]. It owns the
//! traversal state and the paging algorithm only; rendering is delegated to a
//! [`SelectorView`] and user-facing messages to a [`Notifier`].
//!
//! Directory listings are shown [`PAGE_SIZE`] matching entries at a time. The
//! page position is a logical skip-count, not a stream handle: every page turn
//! re-reads the directory from its start and skips the entries already shown.
//!
//! Filters:
//! - `""` shows every file and folder
//! - a value starting with `/` selects folders: files are hidden and folders
//!   and drives get a long-press "choose" action
//! - anything else is an exact, case-sensitive extension (e.g. `"wav"`)
//!
//! ```
//! use file_selector::{FileSelector, OpenRequest, StdFileSystem};
//!
//! let fs = StdFileSystem::new().mount('W', std::env::temp_dir());
//! let mut selector = FileSelector::new(fs);
//! selector
//!     .open(OpenRequest::new("W:/").filter("/").on_pick(|path: &str| {
//!         println!("chose {path}");
//!     }))
//!     .unwrap();
//! assert_eq!(selector.current_path(), Some("W:"));
//! ```

mod core;
mod events;
mod fs;
mod host;
#[cfg(feature = "tracing")]
pub mod logging;
mod paging;
mod path;
mod selector;
mod settings;

pub use crate::core::{
    Entry, EntryKind, FOLDER_MARKER, Filter, MAX_NAME_LEN, MAX_PATH_LEN, PAGE_SIZE, Page,
    SelectorError,
};
pub use events::{Action, ActionOutcome};
pub use fs::{DirStream, FileSystem, StdFileSystem, extension_of, parent_path};
pub use host::{LogNotifier, NullView, Notifier, PickHandler, SelectorView};
pub use path::SelectorPath;
pub use selector::{FileSelector, OpenRequest};
pub use settings::SelectorSettings;
