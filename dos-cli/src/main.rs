//! DOS CLI - an interactive shell on a simulated in-memory drive.
//!
//! Usage:
//!   dosbox [options]
//!
//! Examples:
//!   dosbox                               # Empty C: drive, interactive prompt
//!   dosbox --store c.json                # Restore from and save to c.json
//!   dosbox --import ./files              # Copy a real directory into C:\
//!   dosbox -c "md tmp" -c "dir"          # Run commands without prompting

use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::sync::Once;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use tracing::debug;
use tracing_subscriber::{
    filter::Directive, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use dos_core::{configure_system, Outputter, SystemConfig};

/// DOS shell simulator
#[derive(Parser, Debug)]
#[command(name = "dosbox")]
#[command(about = "Interactive DOS shell on an in-memory drive")]
struct Args {
    /// Drive letter
    #[arg(short, long, default_value_t = 'C')]
    drive: char,

    /// Volume label
    #[arg(short, long)]
    label: Option<String>,

    /// JSON file the drive is restored from and saved to
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Real directory copied into the drive at startup
    #[arg(short, long)]
    import: Option<PathBuf>,

    /// Command to run instead of the interactive prompt (repeatable)
    #[arg(short = 'c', long = "command")]
    commands: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let level = if verbose { "debug" } else { "warn" };
        let mut filter = EnvFilter::from_default_env();

        if std::env::var("RUST_LOG").is_err() {
            for directive in [format!("dos_core={}", level), format!("dosbox={}", level)] {
                if let Ok(directive) = directive.parse::<Directive>() {
                    filter = filter.add_directive(directive);
                }
            }
        }

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    });
}

/// Buffered reader that pulls input one line at a time through `read_line`.
///
/// The session reads stdin through this, so the stdin lock is held only while
/// a line is being read and no bytes beyond that line are buffered here.
/// `TerminalConsole::read_single_character` can then lock stdin itself.
struct LineReader<F> {
    read_line: F,
    buf: Vec<u8>,
    pos: usize,
}

impl<F> LineReader<F>
where
    F: FnMut(&mut Vec<u8>) -> io::Result<usize>,
{
    fn new(read_line: F) -> Self {
        Self {
            read_line,
            buf: Vec::new(),
            pos: 0,
        }
    }
}

impl<F> Read for LineReader<F>
where
    F: FnMut(&mut Vec<u8>) -> io::Result<usize>,
{
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl<F> BufRead for LineReader<F>
where
    F: FnMut(&mut Vec<u8>) -> io::Result<usize>,
{
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.buf.len() {
            self.buf.clear();
            self.pos = 0;
            (self.read_line)(&mut self.buf)?;
        }
        Ok(&self.buf[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.buf.len());
    }
}

fn stdin_lines() -> LineReader<impl FnMut(&mut Vec<u8>) -> io::Result<usize>> {
    LineReader::new(|buf: &mut Vec<u8>| io::stdin().lock().read_until(b'\n', buf))
}

/// Console writing straight to stdout.
struct TerminalConsole;

impl Outputter for TerminalConsole {
    fn print(&mut self, text: &str) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        let _ = handle.write_all(text.as_bytes());
        let _ = handle.flush();
    }

    fn new_line(&mut self) {
        self.print("\n");
    }

    fn read_single_character(&mut self) -> char {
        if enable_raw_mode().is_ok() {
            let key = read_key();
            let _ = disable_raw_mode();
            if let Some(ch) = key {
                return ch;
            }
        }

        // Not a TTY: take the last character of the next line
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => line.trim_end_matches(['\r', '\n']).chars().last().unwrap_or('\n'),
            Err(_) => '\0',
        }
    }
}

/// Block until a character or Enter is pressed.
fn read_key() -> Option<char> {
    loop {
        match event::read().ok()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char(c) => return Some(c),
                KeyCode::Enter => return Some('\n'),
                _ => {}
            },
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!(?args, "starting");

    let config = SystemConfig {
        drive_letter: args.drive,
        label: args.label,
        store: args.store,
        import_from: args.import,
    };

    let mut session = match configure_system(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to start: {}", e);
            return Err(e.into());
        }
    };

    let mut console = TerminalConsole;
    if args.commands.is_empty() {
        session.run(stdin_lines(), &mut console)?;
    } else {
        session.run_lines(&args.commands, &mut console)?;
    }

    Ok(())
}
