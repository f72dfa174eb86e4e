use std::fmt;

use crate::core::{MAX_PATH_LEN, SelectorError};

pub(crate) const SEPARATORS: [char; 2] = ['/', '\\'];

/// Current location of the selector.
///
/// A growable string bounded by [`MAX_PATH_LEN`]. Trailing `/` and `\` are
/// trimmed on every assignment; the empty path stands for the drive list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SelectorPath(String);

impl SelectorPath {
    /// Build a path, trimming trailing separators.
    pub fn new(raw: &str) -> Result<Self, SelectorError> {
        let trimmed = raw.trim_end_matches(SEPARATORS);
        check_len(trimmed.len())?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Root of a drive, e.g. `"S:"`.
    pub fn drive(letter: char) -> Self {
        Self(format!("{letter}:"))
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the drive list (empty path).
    pub fn is_drive_list(&self) -> bool {
        self.0.is_empty()
    }

    /// `self + "/" + name`, with `name` appended as is.
    ///
    /// Refused when `name` is not a single path segment (empty, or holding a
    /// `/` or `\`) or when the result would not fit.
    pub fn join(&self, name: &str) -> Result<Self, SelectorError> {
        if name.is_empty() || name.contains(SEPARATORS) {
            return Err(SelectorError::InvalidName {
                name: name.to_owned(),
            });
        }
        check_len(self.0.len() + 1 + name.len())?;
        Ok(Self(format!("{}/{}", self.0, name)))
    }
}

fn check_len(len: usize) -> Result<(), SelectorError> {
    if len > MAX_PATH_LEN {
        return Err(SelectorError::PathOverflow {
            len,
            max: MAX_PATH_LEN,
        });
    }
    Ok(())
}

impl fmt::Display for SelectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
