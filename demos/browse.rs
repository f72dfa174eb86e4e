//! Terminal front-end for the file selector.
//!
//! Usage: `browse [START] [FILTER]`
//!
//! The working directory is mounted as drive `W`; other drives come from
//! `StdFileSystem::system()`. Type a row number to press it, `l<N>` to
//! long-press it and `q` to close.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use file_selector::{Action, ActionOutcome, FileSelector, OpenRequest, Page, SelectorView, StdFileSystem};

struct TerminalView;

impl SelectorView for TerminalView {
    fn open_window(&mut self, title: &str) {
        println!("== file selector: {} ==", display_title(title));
    }

    fn show_page(&mut self, page: &Page) {
        println!();
        println!("[{}]", display_title(&page.title));
        for (i, entry) in page.entries.iter().enumerate() {
            let hold = if entry.long_press.is_some() { " (hold to choose)" } else { "" };
            println!("{i:>3}  {:?}  {}{hold}", entry.kind, entry.label);
        }
    }

    fn close_window(&mut self) {
        println!("== closed ==");
    }
}

fn display_title(title: &str) -> &str {
    if title.is_empty() { "drives" } else { title }
}

enum Command {
    Quit,
    Press(usize),
    LongPress(usize),
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line == "q" {
        return Some(Command::Quit);
    }
    match line.strip_prefix('l') {
        Some(rest) => rest.trim().parse().ok().map(Command::LongPress),
        None => line.parse().ok().map(Command::Press),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    file_selector::logging::init_tracing();

    let mut args = std::env::args().skip(1);
    let start = args.next().unwrap_or_else(|| "W:".to_owned());
    let filter = args.next().unwrap_or_default();

    let fs = StdFileSystem::system().mount('W', std::env::current_dir()?);
    let mut selector = FileSelector::new(fs)
        .with_view(TerminalView)
        .with_notifier(|message: &str| eprintln!("! {}", message.replace('\n', " ")));

    let chosen = Rc::new(RefCell::new(None));
    let sink = chosen.clone();
    selector.open(
        OpenRequest::new(start)
            .filter(filter.as_str())
            .on_pick(move |path: &str| *sink.borrow_mut() = Some(path.to_owned())),
    )?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while selector.is_open() {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            selector.dispatch(Action::Close);
            break;
        };
        let outcome = match parse_command(&line) {
            Some(Command::Quit) => selector.dispatch(Action::Close),
            Some(Command::Press(i)) => selector.press(i),
            Some(Command::LongPress(i)) => selector.long_press(i),
            None => {
                eprintln!("? expected a row number, l<N> or q");
                continue;
            }
        };
        if outcome == ActionOutcome::Ignored {
            eprintln!("? nothing to do for that row");
        }
    }

    match chosen.borrow().as_deref() {
        Some(path) => println!("{path}"),
        None => println!("nothing chosen"),
    }
    Ok(())
}
