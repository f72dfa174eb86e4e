#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

use file_selector::{DirStream, EntryKind, FileSelector, FileSystem, Page, SelectorView};

/// In-memory namespace with open/close accounting.
#[derive(Default)]
pub struct MemFs {
    volumes: Vec<char>,
    dirs: HashMap<String, Vec<String>>,
    fail_read_after: RefCell<HashMap<String, usize>>,
    opened: Cell<usize>,
    closed: Cell<usize>,
}

impl MemFs {
    pub fn new(volumes: &[char]) -> Self {
        Self {
            volumes: volumes.to_vec(),
            ..Self::default()
        }
    }

    pub fn dir<S: AsRef<str>>(mut self, path: &str, names: &[S]) -> Self {
        self.dirs.insert(
            path.to_owned(),
            names.iter().map(|n| n.as_ref().to_owned()).collect(),
        );
        self
    }

    /// Reads of `path` fail once `reads` names were returned.
    pub fn fail_read_after(self, path: &str, reads: usize) -> Self {
        self.break_reads(path, reads);
        self
    }

    /// Like [`MemFs::fail_read_after`], for streams opened from now on.
    pub fn break_reads(&self, path: &str, reads: usize) {
        self.fail_read_after
            .borrow_mut()
            .insert(path.to_owned(), reads);
    }

    pub fn opened(&self) -> usize {
        self.opened.get()
    }

    pub fn closed(&self) -> usize {
        self.closed.get()
    }
}

struct MemStream<'a> {
    names: std::vec::IntoIter<String>,
    reads: usize,
    fail_after: Option<usize>,
    closed: &'a Cell<usize>,
}

impl DirStream for MemStream<'_> {
    fn read_next(&mut self) -> io::Result<Option<String>> {
        if self.fail_after == Some(self.reads) {
            return Err(io::Error::other("device error"));
        }
        self.reads += 1;
        Ok(self.names.next())
    }
}

impl Drop for MemStream<'_> {
    fn drop(&mut self) {
        self.closed.set(self.closed.get() + 1);
    }
}

impl FileSystem for MemFs {
    fn volumes(&self) -> Vec<char> {
        self.volumes.clone()
    }

    fn open_dir(&self, path: &str) -> io::Result<Box<dyn DirStream + '_>> {
        let names = self
            .dirs
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_owned()))?;
        self.opened.set(self.opened.get() + 1);
        Ok(Box::new(MemStream {
            names: names.into_iter(),
            reads: 0,
            fail_after: self.fail_read_after.borrow().get(path).copied(),
            closed: &self.closed,
        }))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewCall {
    Open(String),
    Show(Page),
    Close,
}

pub struct RecordingView(Rc<RefCell<Vec<ViewCall>>>);

impl SelectorView for RecordingView {
    fn open_window(&mut self, title: &str) {
        self.0.borrow_mut().push(ViewCall::Open(title.to_owned()));
    }

    fn show_page(&mut self, page: &Page) {
        self.0.borrow_mut().push(ViewCall::Show(page.clone()));
    }

    fn close_window(&mut self) {
        self.0.borrow_mut().push(ViewCall::Close);
    }
}

/// Shared log of everything the selector sent to its host.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<ViewCall>>>,
    notices: Rc<RefCell<Vec<String>>>,
    picks: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    pub fn view(&self) -> RecordingView {
        RecordingView(self.calls.clone())
    }

    pub fn notifier(&self) -> impl FnMut(&str) + 'static {
        let notices = self.notices.clone();
        move |message: &str| notices.borrow_mut().push(message.to_owned())
    }

    pub fn pick_handler(&self) -> impl FnMut(&str) + 'static {
        let picks = self.picks.clone();
        move |path: &str| picks.borrow_mut().push(path.to_owned())
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.borrow().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }

    pub fn picks(&self) -> Vec<String> {
        self.picks.borrow().clone()
    }
}

pub fn selector(fs: MemFs) -> (FileSelector<MemFs>, Recorder) {
    let rec = Recorder::default();
    let sel = FileSelector::new(fs)
        .with_view(rec.view())
        .with_notifier(rec.notifier());
    (sel, rec)
}

/// Index of the first row of `kind` on the current page.
pub fn row(sel: &FileSelector<MemFs>, kind: EntryKind) -> usize {
    sel.page()
        .and_then(|p| p.entries.iter().position(|e| e.kind == kind))
        .unwrap_or_else(|| panic!("no {kind:?} row on the current page"))
}

/// Index of the row labelled `label` on the current page.
pub fn row_named(sel: &FileSelector<MemFs>, label: &str) -> usize {
    sel.page()
        .and_then(|p| p.entries.iter().position(|e| e.label == label))
        .unwrap_or_else(|| panic!("no row labelled {label:?}"))
}

pub fn items(sel: &FileSelector<MemFs>) -> Vec<String> {
    sel.page()
        .map(|p| p.item_labels().into_iter().map(str::to_owned).collect())
        .unwrap_or_default()
}

pub fn numbered(n: usize, suffix: &str) -> Vec<String> {
    (0..n).map(|i| format!("f{i:02}{suffix}")).collect()
}
