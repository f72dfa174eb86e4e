//! Turning a directory listing into one page of rows.

use crate::core::{Entry, FOLDER_MARKER, Filter, MAX_NAME_LEN, PAGE_SIZE, Page, SelectorError};
use crate::fs::{DirStream, FileSystem};
use crate::path::{SEPARATORS, SelectorPath};

#[cfg(feature = "tracing")]
use tracing::trace;

/// Result of one refresh.
#[derive(Debug)]
pub(crate) struct PageBuild {
    pub(crate) page: Page,
    /// Matching entries shown through the end of this page.
    pub(crate) shown: usize,
    pub(crate) error: Option<SelectorError>,
}

/// Build the page for `path`, skipping the first `offset` matching entries.
///
/// Rows produced before an enumeration failure are kept.
pub(crate) fn build_page(
    fs: &dyn FileSystem,
    path: &SelectorPath,
    filter: &Filter,
    offset: usize,
) -> PageBuild {
    let mut page = Page::new(path.as_str());

    if path.is_drive_list() {
        let pickable = filter.is_folder_mode();
        page.entries
            .extend(fs.volumes().into_iter().map(|v| Entry::drive(v, pickable)));
        return PageBuild {
            page,
            shown: 0,
            error: None,
        };
    }

    page.entries.push(Entry::up());
    let mut shown = offset;
    let error = list_directory(fs, path, filter, offset, &mut page, &mut shown).err();
    trace_page_built(path, offset, shown, page.entries.len());
    PageBuild { page, shown, error }
}

fn list_directory(
    fs: &dyn FileSystem,
    path: &SelectorPath,
    filter: &Filter,
    offset: usize,
    page: &mut Page,
    shown: &mut usize,
) -> Result<(), SelectorError> {
    let mut stream = fs
        .open_dir(path.as_str())
        .map_err(|source| SelectorError::enumeration(path.as_str(), source))?;
    let mut read = || read_next(stream.as_mut(), path);

    if offset > 0 {
        page.entries.push(Entry::previous_page());
    }

    let mut skipped = 0;
    while skipped < offset {
        let Some(name) = read()? else {
            return Ok(());
        };
        if matching_entry(fs, filter, &name).is_some() {
            skipped += 1;
        }
    }

    let mut on_page = 0;
    while let Some(name) = read()? {
        let Some(entry) = matching_entry(fs, filter, &name) else {
            continue;
        };
        page.entries.push(entry);
        *shown += 1;
        on_page += 1;
        if on_page == PAGE_SIZE {
            page.entries.push(Entry::next_page());
            break;
        }
    }
    Ok(())
}

fn read_next(
    stream: &mut (dyn DirStream + '_),
    path: &SelectorPath,
) -> Result<Option<String>, SelectorError> {
    stream
        .read_next()
        .map_err(|source| SelectorError::enumeration(path.as_str(), source))
}

/// Row for a raw listing name, or `None` when the filter hides it.
fn matching_entry(fs: &dyn FileSystem, filter: &Filter, name: &str) -> Option<Entry> {
    if name.len() > MAX_NAME_LEN {
        return None;
    }
    let (folder, bare) = match name.strip_prefix(FOLDER_MARKER) {
        Some(bare) => (true, bare),
        None => (false, name),
    };
    // the label is appended to the path as one segment
    if bare.is_empty() || bare.contains(SEPARATORS) {
        return None;
    }
    if folder {
        Some(Entry::folder(bare, filter.is_folder_mode()))
    } else {
        filter
            .accepts_file(fs.extension_of(bare))
            .then(|| Entry::file(bare))
    }
}

/// Offset to skip when going back one page from `shown` matching entries.
///
/// `shown` counts through the end of the current page, so from a full page it
/// sits on a boundary and going back means two pages; from a partially filled
/// last page it does not, and rounding down lands on the page before it.
pub(crate) fn previous_page_offset(shown: usize, page_size: usize) -> usize {
    if shown <= 2 * page_size {
        0
    } else if shown % page_size == 0 {
        shown - 2 * page_size
    } else {
        (shown / page_size - 1) * page_size
    }
}

#[cfg(feature = "tracing")]
fn trace_page_built(path: &SelectorPath, offset: usize, shown: usize, rows: usize) {
    trace!(
        event = "selector.page_built",
        path = %path,
        offset, shown, rows, "page built"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_page_built(_path: &SelectorPath, _offset: usize, _shown: usize, _rows: usize) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntryKind;
    use crate::events::Action;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::io;

    #[derive(Default)]
    struct TestFs {
        dirs: HashMap<String, Vec<String>>,
        fail_read_at: Option<usize>,
        closed: Cell<usize>,
    }

    impl TestFs {
        fn with_dir(mut self, path: &str, names: &[&str]) -> Self {
            self.dirs
                .insert(path.to_owned(), names.iter().map(|s| s.to_string()).collect());
            self
        }
    }

    struct TestStream<'a> {
        names: std::vec::IntoIter<String>,
        reads: usize,
        fail_read_at: Option<usize>,
        closed: &'a Cell<usize>,
    }

    impl DirStream for TestStream<'_> {
        fn read_next(&mut self) -> io::Result<Option<String>> {
            if self.fail_read_at == Some(self.reads) {
                return Err(io::Error::other("read failure"));
            }
            self.reads += 1;
            Ok(self.names.next())
        }
    }

    impl Drop for TestStream<'_> {
        fn drop(&mut self) {
            self.closed.set(self.closed.get() + 1);
        }
    }

    impl FileSystem for TestFs {
        fn volumes(&self) -> Vec<char> {
            vec!['A', 'S']
        }

        fn open_dir(&self, path: &str) -> io::Result<Box<dyn DirStream + '_>> {
            let names = self
                .dirs
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such dir"))?;
            Ok(Box::new(TestStream {
                names: names.into_iter(),
                reads: 0,
                fail_read_at: self.fail_read_at,
                closed: &self.closed,
            }))
        }
    }

    fn numbered(prefix: &str, n: usize, suffix: &str) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i:02}{suffix}")).collect()
    }

    fn path(s: &str) -> SelectorPath {
        SelectorPath::new(s).unwrap()
    }

    #[test]
    fn previous_offset_collapses_small_offsets_to_the_first_page() {
        assert_eq!(previous_page_offset(0, 10), 0);
        assert_eq!(previous_page_offset(10, 10), 0);
        assert_eq!(previous_page_offset(20, 10), 0);
    }

    #[test]
    fn previous_offset_steps_two_pages_back_from_a_boundary() {
        assert_eq!(previous_page_offset(30, 10), 10);
        assert_eq!(previous_page_offset(50, 10), 30);
    }

    #[test]
    fn previous_offset_rounds_down_from_a_partial_page() {
        assert_eq!(previous_page_offset(25, 10), 10);
        assert_eq!(previous_page_offset(37, 10), 20);
    }

    #[test]
    fn drive_list_has_one_row_per_volume() {
        let fs = TestFs::default();
        let build = build_page(&fs, &path(""), &Filter::Folders, 0);
        assert_eq!(build.page.labels(), vec!["A", "S"]);
        assert!(build.page.entries.iter().all(|e| e.kind == EntryKind::Drive));
        assert_eq!(
            build.page.entries[1].long_press,
            Some(Action::PickDrive('S'))
        );
        assert_eq!(fs.closed.get(), 0);
    }

    #[test]
    fn first_page_stops_at_page_size_with_a_next_row() {
        let names = numbered("f", 25, ".wav");
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let fs = TestFs::default().with_dir("S:", &refs);

        let build = build_page(&fs, &path("S:"), &Filter::All, 0);

        assert_eq!(build.shown, 10);
        assert_eq!(build.page.entries.first().map(|e| e.kind), Some(EntryKind::Up));
        assert_eq!(build.page.entries.last().map(|e| e.kind), Some(EntryKind::NextPage));
        assert!(!build.page.has(EntryKind::PreviousPage));
        assert_eq!(build.page.item_labels(), refs[..10].to_vec());
        assert_eq!(fs.closed.get(), 1);
    }

    #[test]
    fn skip_counts_only_matching_entries() {
        let fs = TestFs::default().with_dir(
            "S:",
            &["a.txt", "b.wav", "c.txt", "/Live", "d.wav", "e.mp3", "f.wav"],
        );

        let build = build_page(&fs, &path("S:"), &Filter::parse("wav"), 2);

        assert_eq!(build.page.item_labels(), vec!["d.wav", "f.wav"]);
        assert!(build.page.has(EntryKind::PreviousPage));
        assert_eq!(build.shown, 4);
    }

    #[test]
    fn marker_only_and_overlong_names_are_ignored() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let fs = TestFs::default().with_dir("S:", &["/", "", long.as_str(), "/ok", "ok.wav"]);

        let build = build_page(&fs, &path("S:"), &Filter::All, 0);

        assert_eq!(build.page.item_labels(), vec!["ok", "ok.wav"]);
    }

    #[test]
    fn names_that_are_not_one_segment_are_hidden_and_not_counted() {
        let fs = TestFs::default().with_dir(
            "S:",
            &["foo\\", "/\\", "/a/b", "a\\b.wav", "foo", "/bar"],
        );

        let build = build_page(&fs, &path("S:"), &Filter::All, 1);

        assert_eq!(build.page.item_labels(), vec!["bar"]);
        assert_eq!(build.shown, 2);
    }

    #[test]
    fn read_failure_while_skipping_aborts_the_page() {
        let names = numbered("f", 15, "");
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut fs = TestFs::default().with_dir("S:", &refs);
        fs.fail_read_at = Some(3);

        let build = build_page(&fs, &path("S:"), &Filter::All, 10);

        assert_eq!(build.page.labels(), vec!["Up", "Previous page"]);
        assert!(matches!(build.error, Some(SelectorError::Enumeration { .. })));
        assert_eq!(build.shown, 10);
        assert_eq!(fs.closed.get(), 1);
    }

    #[test]
    fn read_failure_keeps_rows_emitted_so_far() {
        let mut fs = TestFs::default().with_dir("S:", &["a", "b", "c"]);
        fs.fail_read_at = Some(2);

        let build = build_page(&fs, &path("S:"), &Filter::All, 0);

        assert_eq!(build.page.item_labels(), vec!["a", "b"]);
        assert!(matches!(build.error, Some(SelectorError::Enumeration { .. })));
        assert_eq!(fs.closed.get(), 1);
    }

    #[test]
    fn open_failure_leaves_only_the_up_row() {
        let fs = TestFs::default();

        let build = build_page(&fs, &path("S:/missing"), &Filter::All, 10);

        assert_eq!(build.page.labels(), vec!["Up"]);
        assert!(build.error.is_some());
        assert_eq!(build.shown, 10);
    }

    #[test]
    fn skip_past_the_end_yields_an_empty_page() {
        let fs = TestFs::default().with_dir("S:", &["a", "b"]);

        let build = build_page(&fs, &path("S:"), &Filter::All, 10);

        assert_eq!(build.page.labels(), vec!["Up", "Previous page"]);
        assert!(build.error.is_none());
        assert_eq!(fs.closed.get(), 1);
    }
}
