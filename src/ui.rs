//! UI module for styled terminal output.
//!
//! Status lines go to stderr, colored when the terminal allows it. In verbose
//! mode only errors are printed here since tracing already reports the rest.

use colored::{ColoredString, Colorize};
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Console configuration, decided once at startup
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,
    pub verbose: bool,
}

impl UiConfig {
    pub fn new(verbose: bool) -> Self {
        Self {
            colors_enabled: should_use_colors(),
            verbose,
        }
    }
}

/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise color only on a terminal.
fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::env::var_os("FORCE_COLOR").is_some() || io::stderr().is_terminal()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Warning,
    Error,
}

impl Tone {
    fn plain_marker(self) -> &'static str {
        match self {
            Tone::Success => "*",
            Tone::Warning => "!",
            Tone::Error => "Error:",
        }
    }

    fn paint(self, text: &str) -> ColoredString {
        match self {
            Tone::Success => text.green(),
            Tone::Warning => text.yellow(),
            Tone::Error => text.red(),
        }
    }

    fn colored_marker(self) -> ColoredString {
        let marker = match self {
            Tone::Success => "✓",
            Tone::Warning => "!",
            Tone::Error => "✗",
        };
        self.paint(marker).bold()
    }
}

/// Styled status writer
pub struct Ui {
    config: UiConfig,
    writer: Box<dyn Write>,
}

impl Ui {
    /// Create a new UI writing to stderr
    pub fn new(config: UiConfig) -> Self {
        colored::control::set_override(config.colors_enabled);
        Self {
            config,
            writer: Box::new(io::stderr()),
        }
    }

    /// Create UI with custom writer (for testing)
    pub fn with_writer(config: UiConfig, writer: Box<dyn Write>) -> Self {
        Self { config, writer }
    }

    fn emit(&mut self, tone: Tone, msg: &str) {
        // Errors are the only lines verbose mode keeps.
        if self.config.verbose && tone != Tone::Error {
            return;
        }
        let _ = if self.config.colors_enabled {
            writeln!(self.writer, "{} {}", tone.colored_marker(), tone.paint(msg))
        } else {
            writeln!(self.writer, "{} {}", tone.plain_marker(), msg)
        };
    }

    pub fn success(&mut self, msg: &str) {
        self.emit(Tone::Success, msg);
    }

    pub fn warning(&mut self, msg: &str) {
        self.emit(Tone::Warning, msg);
    }

    pub fn error(&mut self, msg: &str) {
        self.emit(Tone::Error, msg);
    }

    /// Announce that `--overwrite` is about to remove `path`.
    pub fn replacing(&mut self, path: &Path) {
        self.warning(&format!("Replacing existing {}", path.display()));
    }

    /// Closing line of a batch that ran to completion.
    pub fn batch_done(&mut self, renamed: usize, total: usize) {
        self.success(&format!("Renamed {} of {} entries", renamed, total));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn plain_ui(verbose: bool) -> (Ui, Arc<Mutex<Vec<u8>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let config = UiConfig {
            colors_enabled: false,
            verbose,
        };
        let ui = Ui::with_writer(config, Box::new(SharedBuffer(buffer.clone())));
        (ui, buffer)
    }

    fn contents(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_plain_markers() {
        let (mut ui, buffer) = plain_ui(false);
        ui.batch_done(2, 3);
        ui.replacing(Path::new("/data/b"));
        ui.error("boom");

        assert_eq!(
            contents(&buffer),
            "* Renamed 2 of 3 entries\n! Replacing existing /data/b\nError: boom\n"
        );
    }

    #[test]
    fn test_verbose_keeps_only_errors() {
        let (mut ui, buffer) = plain_ui(true);
        ui.success("hidden");
        ui.replacing(Path::new("/data/b"));
        ui.error("This error should appear");

        assert_eq!(contents(&buffer), "Error: This error should appear\n");
    }
}
