use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ordering key of a level. Larger values are more severe.
pub type Importance = i64;

/// Display color attached to a level.
///
/// Colors are presentation only; filtering never looks at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Terminal default, no escape codes.
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    #[serde(alias = "gray")]
    Grey,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Default => "default",
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
            Color::Grey => "grey",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown color: {0}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" | "none" => Ok(Color::Default),
            "black" => Ok(Color::Black),
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "blue" => Ok(Color::Blue),
            "magenta" | "purple" => Ok(Color::Magenta),
            "cyan" => Ok(Color::Cyan),
            "white" => Ok(Color::White),
            "grey" | "gray" => Ok(Color::Grey),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

/// A named severity.
///
/// Levels are plain values and cloning one is cheap. Equality and hashing
/// mean identity (same name, color and importance); severity is compared on
/// importance alone through [`Level::severity_cmp`] and [`Level::passes`].
/// Only [`LevelRegistry`] creates levels besides the four built-ins, which
/// keeps names unique and upper case.
///
/// [`LevelRegistry`]: crate::registry::LevelRegistry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Level {
    name: Cow<'static, str>,
    color: Color,
    importance: Importance,
}

impl Level {
    pub const DEBUG: Level = Level::builtin("DEBUG", Color::Magenta, -1);
    pub const INFO: Level = Level::builtin("INFO", Color::Cyan, 0);
    pub const WARN: Level = Level::builtin("WARN", Color::Yellow, 1);
    /// Passes every sink filter.
    pub const ERROR: Level = Level::builtin("ERROR", Color::Red, Importance::MAX);

    pub const BUILTINS: [Level; 4] = [Level::DEBUG, Level::INFO, Level::WARN, Level::ERROR];

    const fn builtin(name: &'static str, color: Color, importance: Importance) -> Self {
        Self {
            name: Cow::Borrowed(name),
            color,
            importance,
        }
    }

    /// `name` must already be canonical (trimmed, upper case).
    pub(crate) fn custom(name: String, color: Color, importance: Importance) -> Self {
        Self {
            name: Cow::Owned(name),
            color,
            importance,
        }
    }

    /// Upper-cases and trims a level name.
    pub fn canonical_name(name: &str) -> String {
        name.trim().to_uppercase()
    }

    pub fn is_builtin_name(canonical: &str) -> bool {
        Self::BUILTINS.iter().any(|level| level.name() == canonical)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn importance(&self) -> Importance {
        self.importance
    }

    /// Orders two levels by importance only; names and colors are ignored.
    pub fn severity_cmp(&self, other: &Level) -> Ordering {
        self.importance.cmp(&other.importance)
    }

    /// True when a sink with the given minimum importance accepts this level.
    pub fn passes(&self, min_importance: Importance) -> bool {
        self.importance >= min_importance
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The level argument of a logging call.
///
/// `Bare` produces entries without a severity; they bypass importance
/// filtering. `Name` is resolved case-insensitively through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LevelSpec {
    #[default]
    Bare,
    Level(Level),
    Name(String),
}

impl From<Level> for LevelSpec {
    fn from(level: Level) -> Self {
        LevelSpec::Level(level)
    }
}

impl From<&Level> for LevelSpec {
    fn from(level: &Level) -> Self {
        LevelSpec::Level(level.clone())
    }
}

impl From<&str> for LevelSpec {
    fn from(name: &str) -> Self {
        LevelSpec::Name(name.to_string())
    }
}

impl From<String> for LevelSpec {
    fn from(name: String) -> Self {
        LevelSpec::Name(name)
    }
}

impl<T: Into<LevelSpec>> From<Option<T>> for LevelSpec {
    fn from(level: Option<T>) -> Self {
        level.map_or(LevelSpec::Bare, Into::into)
    }
}
