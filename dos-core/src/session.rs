//! Interactive read-eval loop over a [`CommandInvoker`].

use std::io::BufRead;

use tracing::{debug, info, warn};

use crate::console::Outputter;
use crate::error::DosResult;
use crate::invoker::{CommandInvoker, ExecuteCommand};

/// A running interpreter: prompt, read a line, dispatch, repeat.
pub struct Session {
    invoker: CommandInvoker,
}

impl Session {
    pub fn new(invoker: CommandInvoker) -> Self {
        Self { invoker }
    }

    pub fn invoker(&self) -> &CommandInvoker {
        &self.invoker
    }

    pub fn invoker_mut(&mut self) -> &mut CommandInvoker {
        &mut self.invoker
    }

    /// Runs until `exit`, end of input or a read error, then saves the drive.
    ///
    /// Input bytes that are not UTF-8 are replaced, so a garbled line is
    /// dispatched like any other line instead of ending the session.
    pub fn run<R: BufRead>(&mut self, mut input: R, out: &mut dyn Outputter) -> DosResult<()> {
        out.print_line(&format!("DOS Console {}", env!("CARGO_PKG_VERSION")));
        out.print_line("Type 'exit' to leave.");

        let mut buf = Vec::new();
        loop {
            out.new_line();
            out.print(&self.invoker.drive().prompt());

            buf.clear();
            match input.read_until(b'\n', &mut buf) {
                Ok(0) => {
                    debug!("end of input");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "reading input failed");
                    out.new_line();
                    out.print_line(&e.to_string());
                    break;
                }
            }

            let line = String::from_utf8_lossy(&buf);
            if line.trim().eq_ignore_ascii_case("exit") {
                break;
            }
            self.invoker.execute_command(&line, out);
        }

        out.new_line();
        out.print_line("Goodbye!");
        self.invoker.drive().save()
    }

    /// Executes each line in order without prompting, then saves the drive.
    pub fn run_lines<I, S>(&mut self, lines: I, out: &mut dyn Outputter) -> DosResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut count = 0usize;
        for line in lines {
            self.invoker.execute_command(line.as_ref(), out);
            count += 1;
        }
        info!(count, "executed batch");
        self.invoker.drive().save()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, BufReader, Cursor, Read};

    use super::*;
    use crate::command::CommandRegistry;
    use crate::console::HeadlessConsole;
    use crate::fs::{Drive, DriveStore, JsonFileStore};
    use crate::testing::sample_drive;

    /// Reader whose device has gone away.
    struct Unreadable;

    impl Read for Unreadable {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
        }
    }

    fn session() -> Session {
        let (drive, _) = sample_drive();
        Session::new(CommandInvoker::new(drive, CommandRegistry::standard()))
    }

    #[test]
    fn test_run_stops_at_exit() {
        let mut session = session();
        let mut out = HeadlessConsole::new();
        session
            .run(Cursor::new("mkdir first\nEXIT\nmkdir second\n"), &mut out)
            .unwrap();

        let drive = session.invoker().drive();
        assert!(drive.resolve("first").is_some());
        assert!(drive.resolve("second").is_none());
        assert!(out.output().ends_with("\nGoodbye!\n"));
    }

    #[test]
    fn test_run_stops_at_end_of_input() {
        let mut session = session();
        let mut out = HeadlessConsole::new();
        session.run(Cursor::new("cd subDir1"), &mut out).unwrap();

        assert_eq!(session.invoker().drive().current_path(), "C:\\subDir1");
        assert!(out.output().contains("C:\\subDir1> "));
        assert!(out.output().ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_run_prints_banner_and_prompt() {
        let mut session = session();
        let mut out = HeadlessConsole::new();
        session.run(Cursor::new(""), &mut out).unwrap();

        let text = out.output();
        assert!(text.starts_with("DOS Console "));
        assert!(text.contains("\nC:> \nGoodbye!\n"));
    }

    #[test]
    fn test_run_lines() {
        let mut session = session();
        let mut out = HeadlessConsole::new();
        session
            .run_lines(["md a", "cd a", "mf note hello", "cd"], &mut out)
            .unwrap();

        assert_eq!(out.output(), "C:\\a\n");
        let drive = session.invoker().drive();
        let note = drive.resolve("C:\\a\\note").unwrap();
        assert_eq!(drive.content(note), Some("hello"));
    }

    #[test]
    fn test_run_survives_invalid_utf8_line() {
        let mut session = session();
        let mut out = HeadlessConsole::new();
        session
            .run(Cursor::new(&b"mkdir a\n\xff\xfe\nmkdir b\nexit\n"[..]), &mut out)
            .unwrap();

        let drive = session.invoker().drive();
        assert!(drive.resolve("a").is_some());
        assert!(drive.resolve("b").is_some());
        assert!(out.output().contains("is not recognized as an internal or external command"));
        assert!(out.output().ends_with("\nGoodbye!\n"));
    }

    #[test]
    fn test_run_saves_after_read_error() {
        let path = std::env::temp_dir().join(format!("dos-core-session-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let store = JsonFileStore::new(&path);
        assert_eq!(store.path(), path.as_path());

        let drive = Drive::with_store('C', Box::new(store.clone())).unwrap();
        let mut session = Session::new(CommandInvoker::new(drive, CommandRegistry::standard()));
        let mut out = HeadlessConsole::new();
        let input = BufReader::new(Cursor::new("mkdir kept\n").chain(Unreadable));
        session.run(input, &mut out).unwrap();

        assert!(out.output().contains("device unplugged"));
        assert!(out.output().ends_with("Goodbye!\n"));
        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.entries.len(), 1);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_invoker_mut_reaches_drive() {
        let mut session = session();
        session.invoker_mut().drive_mut().set_label("WORK");
        let mut out = HeadlessConsole::new();
        session.run_lines(["cd subDir2"], &mut out).unwrap();
        assert_eq!(session.invoker().drive().label(), "WORK");
        assert_eq!(session.invoker().drive().current_path(), "C:\\subDir2");
    }
}
