//! Colored console output

use std::io::{self, Write};

use crossterm::style::{style, ResetColor, Stylize};

use super::level::Level;

/// Wrap a formatted line in the color escape for its level, followed by a reset
pub fn colorize(level: Level, line: &str) -> String {
    let (fg, bg) = level.colors();
    let styled = style(line).with(fg);
    match bg {
        Some(bg) => format!("{}{}", styled.on(bg), ResetColor),
        None => format!("{}{}", styled, ResetColor),
    }
}

/// Where formatted lines are echoed
pub struct Console {
    writer: Option<Box<dyn Write + Send>>,
    color: bool,
}

impl Console {
    /// Colored output on stdout
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()), true)
    }

    /// Echo to an arbitrary writer
    pub fn new(writer: Box<dyn Write + Send>, color: bool) -> Self {
        Self {
            writer: Some(writer),
            color,
        }
    }

    /// Swallow all output
    pub fn disabled() -> Self {
        Self {
            writer: None,
            color: false,
        }
    }

    /// Print a log line. Write errors are ignored.
    pub fn emit(&mut self, level: Level, line: &str) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        let _ = if self.color {
            writeln!(writer, "{}", colorize(level, line))
        } else {
            writeln!(writer, "{}", line)
        };
        let _ = writer.flush();
    }

    /// Print an uncolored notice (e.g. archival messages)
    pub fn notice(&mut self, text: &str) {
        if let Some(writer) = self.writer.as_mut() {
            let _ = writeln!(writer, "{}", text);
            let _ = writer.flush();
        }
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("enabled", &self.writer.is_some())
            .field("color", &self.color)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Writer that appends into a shared buffer
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_colorize_wraps_and_resets() {
        let colored = colorize(Level::Info, "hello");
        assert!(colored.starts_with('\u{1b}'));
        assert!(colored.contains("hello"));
        assert!(colored.ends_with("\u{1b}[0m"));

        let critical = colorize(Level::Critical, "down");
        assert!(critical.contains("down"));
        assert!(critical.ends_with("\u{1b}[0m"));
    }

    #[test]
    fn test_colorize_differs_per_level() {
        let colored: Vec<String> = Level::ALL.iter().map(|l| colorize(*l, "x")).collect();
        for (i, a) in colored.iter().enumerate() {
            for b in &colored[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_emit_plain() {
        let capture = Capture::default();
        let mut console = Console::new(Box::new(capture.clone()), false);
        console.emit(Level::Error, "[t] [ERROR] boom");
        assert_eq!(capture.text(), "[t] [ERROR] boom\n");
    }

    #[test]
    fn test_emit_colored() {
        let capture = Capture::default();
        let mut console = Console::new(Box::new(capture.clone()), true);
        console.emit(Level::Critical, "down");
        assert_eq!(capture.text(), format!("{}\n", colorize(Level::Critical, "down")));
    }

    #[test]
    fn test_disabled_console_is_silent() {
        let mut console = Console::disabled();
        console.emit(Level::Info, "nothing");
        console.notice("nothing");
    }
}
