use thiserror::Error;

use crate::events::Action;

/// Matching entries shown per directory page.
pub const PAGE_SIZE: usize = 10;

/// Longest accepted path, in bytes.
pub const MAX_PATH_LEN: usize = 256;

/// Longest accepted entry name, in bytes (folder marker included).
pub const MAX_NAME_LEN: usize = 128;

/// Leading character a [`DirStream`](crate::DirStream) puts in front of folder names.
pub const FOLDER_MARKER: char = '/';

/// Which entries of a directory the selector offers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    /// Every folder and every file.
    #[default]
    All,
    /// Folders only; folders and drives can be chosen by long-press.
    Folders,
    /// Folders plus files whose extension equals the value (case-sensitive, no dot).
    Extension(String),
}

impl Filter {
    /// Parse the compact filter form: `""` = all, leading `/` = folders, else an extension.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            Filter::All
        } else if raw.starts_with(FOLDER_MARKER) {
            Filter::Folders
        } else {
            Filter::Extension(raw.to_owned())
        }
    }

    /// Whether folders (and drives) are the pickable targets.
    pub fn is_folder_mode(&self) -> bool {
        matches!(self, Filter::Folders)
    }

    pub(crate) fn accepts_file(&self, extension: &str) -> bool {
        match self {
            Filter::All => true,
            Filter::Folders => false,
            Filter::Extension(ext) => ext == extension,
        }
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Filter::parse(value)
    }
}

impl From<Option<&str>> for Filter {
    fn from(value: Option<&str>) -> Self {
        value.map(Filter::parse).unwrap_or_default()
    }
}

/// Row type of a [`Page`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A storage volume on the drive list.
    Drive,
    /// Go to the parent directory.
    Up,
    /// Go back one page.
    PreviousPage,
    /// Go forward one page.
    NextPage,
    /// A sub-directory.
    Folder,
    /// A file accepted by the filter.
    File,
}

/// One labelled, actionable row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Row type.
    pub kind: EntryKind,
    /// Text shown to the user.
    pub label: String,
    /// Action for a normal press.
    pub action: Action,
    /// Action for a long press, when the row has one.
    pub long_press: Option<Action>,
}

impl Entry {
    pub(crate) fn drive(letter: char, pickable: bool) -> Self {
        Self {
            kind: EntryKind::Drive,
            label: letter.to_string(),
            action: Action::EnterDrive(letter),
            long_press: pickable.then_some(Action::PickDrive(letter)),
        }
    }

    pub(crate) fn up() -> Self {
        Self::control(EntryKind::Up, "Up", Action::Up)
    }

    pub(crate) fn previous_page() -> Self {
        Self::control(EntryKind::PreviousPage, "Previous page", Action::PreviousPage)
    }

    pub(crate) fn next_page() -> Self {
        Self::control(EntryKind::NextPage, "Next page", Action::NextPage)
    }

    pub(crate) fn folder(name: &str, pickable: bool) -> Self {
        Self {
            kind: EntryKind::Folder,
            label: name.to_owned(),
            action: Action::EnterFolder(name.to_owned()),
            long_press: pickable.then(|| Action::PickFolder(name.to_owned())),
        }
    }

    pub(crate) fn file(name: &str) -> Self {
        Self {
            kind: EntryKind::File,
            label: name.to_owned(),
            action: Action::PickFile(name.to_owned()),
            long_press: None,
        }
    }

    fn control(kind: EntryKind, label: &str, action: Action) -> Self {
        Self {
            kind,
            label: label.to_owned(),
            action,
            long_press: None,
        }
    }

    /// Whether the row counts towards paging (folders and files).
    pub fn is_matching(&self) -> bool {
        matches!(self.kind, EntryKind::Folder | EntryKind::File)
    }
}

/// Everything the view needs to draw one state of the selector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    /// Window title: the current path (empty on the drive list).
    pub title: String,
    /// Rows in display order.
    pub entries: Vec<Entry>,
}

impl Page {
    pub(crate) fn new(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            entries: Vec::new(),
        }
    }

    /// Labels of all rows, in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    /// Labels of the folder and file rows only.
    pub fn item_labels(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.is_matching())
            .map(|e| e.label.as_str())
            .collect()
    }

    /// Whether any row has the given kind.
    pub fn has(&self, kind: EntryKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }
}

/// Errors raised while navigating.
///
/// These never escape a [`FileSelector`](crate::FileSelector) action: they are
/// reported through the [`Notifier`](crate::Notifier). Only
/// [`FileSelector::open`](crate::FileSelector::open) returns one directly.
#[derive(Error, Debug)]
pub enum SelectorError {
    /// A directory could not be opened or read.
    #[error("cannot read path '{path}': {source}")]
    Enumeration {
        /// Directory being listed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A path would not fit the path limit.
    #[error("path too long: {len} bytes exceeds the {max} byte limit")]
    PathOverflow {
        /// Length of the rejected path.
        len: usize,
        /// The limit, [`MAX_PATH_LEN`].
        max: usize,
    },
    /// An entry name that is not a single path segment.
    #[error("'{name}' is not a valid entry name")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
}

impl SelectorError {
    pub(crate) fn enumeration(path: &str, source: std::io::Error) -> Self {
        SelectorError::Enumeration {
            path: path.to_owned(),
            source,
        }
    }

    /// Short message suitable for a user notice.
    pub fn notice(&self) -> &'static str {
        match self {
            SelectorError::Enumeration { .. } => "Cannot read the path\nin the file selector",
            SelectorError::PathOverflow { .. } => "The path is too long\nto open",
            SelectorError::InvalidName { .. } => "The name cannot be\nused in a path",
        }
    }
}
