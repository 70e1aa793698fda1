//! Log levels, their severities and console colors

use std::fmt;
use std::str::FromStr;

use crossterm::style::Color;

use super::error::LogError;

/// Severity level of a log message, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// All levels in increasing severity
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Get the display name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Numeric severity (DEBUG = 1 ... CRITICAL = 5)
    pub fn severity(&self) -> u8 {
        match self {
            Level::Debug => 1,
            Level::Info => 2,
            Level::Warning => 3,
            Level::Error => 4,
            Level::Critical => 5,
        }
    }

    /// Foreground and optional background color used on the console
    pub fn colors(&self) -> (Color, Option<Color>) {
        match self {
            Level::Debug => (Color::Blue, None),
            Level::Info => (Color::Green, None),
            Level::Warning => (Color::Yellow, None),
            Level::Error => (Color::Red, None),
            Level::Critical => (Color::White, Some(Color::DarkRed)),
        }
    }

    /// Parse a configured level name, falling back to DEBUG when it is unknown
    pub fn from_config(name: &str) -> Level {
        name.parse().unwrap_or(Level::Debug)
    }

    /// Whether a message at this level passes the given threshold
    pub fn passes(&self, minimum: Level) -> bool {
        self.severity() >= minimum.severity()
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == upper)
            .ok_or_else(|| LogError::UnknownLevel(s.to_string()))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        let severities: Vec<u8> = Level::ALL.iter().map(Level::severity).collect();
        assert_eq!(severities, vec![1, 2, 3, 4, 5]);
        assert!(Level::Debug < Level::Critical);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("Warning".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!(" CRITICAL ".parse::<Level>().unwrap(), Level::Critical);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("WARN".parse::<Level>().is_err());
        assert!("".parse::<Level>().is_err());
    }

    #[test]
    fn test_from_config_falls_back_to_debug() {
        assert_eq!(Level::from_config("error"), Level::Error);
        assert_eq!(Level::from_config("verbose"), Level::Debug);
    }

    #[test]
    fn test_passes_threshold() {
        for (i, low) in Level::ALL.iter().enumerate() {
            for high in &Level::ALL[i..] {
                assert!(high.passes(*low));
                if high != low {
                    assert!(!low.passes(*high));
                }
            }
        }
    }

    #[test]
    fn test_from_tracing_level() {
        assert_eq!(Level::from(tracing::Level::TRACE), Level::Debug);
        assert_eq!(Level::from(tracing::Level::WARN), Level::Warning);
        assert_eq!(Level::from(tracing::Level::ERROR), Level::Error);
    }

    #[test]
    fn test_critical_has_background() {
        assert_eq!(
            Level::Critical.colors(),
            (Color::White, Some(Color::DarkRed))
        );
        assert!(Level::Info.colors().1.is_none());
    }
}
