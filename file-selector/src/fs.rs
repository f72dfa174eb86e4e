use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::core::FOLDER_MARKER;

#[cfg(feature = "tracing")]
use tracing::debug;

/// An open directory listing.
///
/// Dropping the stream closes it.
pub trait DirStream {
    /// Read the next raw name.
    ///
    /// Folder names start with [`FOLDER_MARKER`]; `Ok(None)` marks the end of
    /// the listing.
    fn read_next(&mut self) -> io::Result<Option<String>>;
}

/// Directory enumeration used by the selector.
///
/// Paths are plain strings in the selector's own form: `"S:"` for the root of
/// drive `S`, `"S:/music"` below it, or any other host-specific string.
pub trait FileSystem {
    /// Storage volume identifiers shown on the drive list.
    fn volumes(&self) -> Vec<char>;

    /// Open a directory for reading.
    fn open_dir(&self, path: &str) -> io::Result<Box<dyn DirStream + '_>>;

    /// Parent of `path`.
    ///
    /// The default strips the last separator-delimited segment and returns
    /// `""` (the drive list) once no separator is left, so both `"C:"` and
    /// `"/sd"` ascend to the drive list.
    fn parent_of(&self, path: &str) -> String {
        parent_path(path)
    }

    /// Extension of a file name, without the dot; `""` when there is none.
    fn extension_of<'n>(&self, name: &'n str) -> &'n str {
        extension_of(name)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn volumes(&self) -> Vec<char> {
        (**self).volumes()
    }

    fn open_dir(&self, path: &str) -> io::Result<Box<dyn DirStream + '_>> {
        (**self).open_dir(path)
    }

    fn parent_of(&self, path: &str) -> String {
        (**self).parent_of(path)
    }

    fn extension_of<'n>(&self, name: &'n str) -> &'n str {
        (**self).extension_of(name)
    }
}

/// Default [`FileSystem::parent_of`]: everything before the last `/` or `\`.
pub fn parent_path(path: &str) -> String {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rfind(['/', '\\']) {
        Some(i) => trimmed[..i].to_owned(),
        None => String::new(),
    }
}

/// Default [`FileSystem::extension_of`]: the text after the last `.`.
pub fn extension_of(name: &str) -> &str {
    name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
}

/// [`FileSystem`] over `std::fs`.
///
/// Drive letters are mounted onto host directories; `"S:/music"` resolves to
/// `<root of S>/music`. Paths that do not start with a mounted letter are used
/// as host paths unchanged.
///
/// Listings are read in one go when the stream is opened and ordered folders
/// first, then by case-insensitive name, so page boundaries stay put between
/// page turns. Entries that cannot be inspected are skipped.
#[derive(Clone, Debug, Default)]
pub struct StdFileSystem {
    mounts: IndexMap<char, PathBuf>,
}

impl StdFileSystem {
    /// A file system with no drives mounted.
    pub fn new() -> Self {
        Self::default()
    }

    /// A file system with the machine's usual locations mounted.
    ///
    /// On Windows every present drive letter is mounted onto itself. Elsewhere
    /// `R` is the filesystem root and `H` the home directory, when known.
    pub fn system() -> Self {
        let mut fs = Self::new();
        #[cfg(target_os = "windows")]
        {
            for letter in b'A'..=b'Z' {
                let root = format!("{}:\\", letter as char);
                if Path::new(&root).exists() {
                    fs = fs.mount(letter as char, root);
                }
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            fs = fs.mount('R', PathBuf::from(std::path::MAIN_SEPARATOR.to_string()));
            if let Some(home) = home_dir() {
                fs = fs.mount('H', home);
            }
        }
        fs
    }

    /// Mount `root` as drive `letter`, replacing an earlier mount of the same letter.
    pub fn mount(mut self, letter: char, root: impl Into<PathBuf>) -> Self {
        self.mounts.insert(letter, root.into());
        self
    }

    /// Host directory a selector path refers to.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let mut chars = path.chars();
        if let (Some(letter), Some(':')) = (chars.next(), chars.next()) {
            if let Some(root) = self.mounts.get(&letter) {
                let rest = chars.as_str().trim_start_matches(['/', '\\']);
                return if rest.is_empty() {
                    root.clone()
                } else {
                    root.join(rest)
                };
            }
        }
        PathBuf::from(path)
    }
}

impl FileSystem for StdFileSystem {
    fn volumes(&self) -> Vec<char> {
        self.mounts.keys().copied().collect()
    }

    fn open_dir(&self, path: &str) -> io::Result<Box<dyn DirStream + '_>> {
        let dir = self.resolve(path);
        let mut listed = Vec::new();
        for e in std::fs::read_dir(&dir)? {
            let e = match e {
                Ok(v) => v,
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    debug!(dir = %dir.display(), error = %_err, "skipping unreadable entry");
                    continue;
                }
            };
            let ft = match e.file_type() {
                Ok(v) => v,
                Err(_) => continue,
            };
            let name = e.file_name().to_string_lossy().to_string();
            let is_dir = ft.is_dir() || (ft.is_symlink() && e.path().is_dir());
            listed.push((is_dir, name));
        }
        listed.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| a.1.to_lowercase().cmp(&b.1.to_lowercase()))
        });
        let names = listed
            .into_iter()
            .map(|(is_dir, name)| {
                if is_dir {
                    format!("{FOLDER_MARKER}{name}")
                } else {
                    name
                }
            })
            .collect::<Vec<_>>();
        Ok(Box::new(StdDirStream {
            names: names.into_iter(),
        }))
    }
}

struct StdDirStream {
    names: std::vec::IntoIter<String>,
}

impl DirStream for StdDirStream {
    fn read_next(&mut self) -> io::Result<Option<String>> {
        Ok(self.names.next())
    }
}

#[cfg(not(target_os = "windows"))]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .filter(|p| Path::new(p).is_dir())
}
