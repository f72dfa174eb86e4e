/// Transition requested by a row of a [`Page`](crate::Page) or by the window chrome.
///
/// Actions carry plain data (drive letters, entry names) so they can be
/// stored in a page, cloned by the view and fed back through
/// [`FileSelector::dispatch`](crate::FileSelector::dispatch).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Close control of the window.
    Close,
    /// Go to the parent of the current path.
    Up,
    /// Show the next page of the current directory.
    NextPage,
    /// Show the previous page of the current directory.
    PreviousPage,
    /// Browse the root of a drive.
    EnterDrive(char),
    /// Choose a drive (folder mode).
    PickDrive(char),
    /// Descend into a folder of the current directory.
    EnterFolder(String),
    /// Choose a folder of the current directory (folder mode).
    PickFolder(String),
    /// Choose a file of the current directory.
    PickFile(String),
}

/// What a dispatched [`Action`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// State changed and a new page was produced (possibly with an error notice).
    Refreshed,
    /// A path was chosen; the handler ran and the selector closed.
    Picked,
    /// The selector was closed without a choice.
    Closed,
    /// The action was refused (e.g. the path would overflow); state is unchanged.
    Rejected,
    /// Nothing to do: the selector is closed or the row has no such action.
    Ignored,
}
