use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What `register` does when the name already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with `RegistryError::DuplicateLevel`.
    #[default]
    Reject,
    /// Replace the stored color and importance.
    Overwrite,
}

/// What `resolve` does with a level name it has never seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownLevelPolicy {
    /// Register it with green color and the importance of INFO.
    #[default]
    AutoRegister,
    /// Fail with `RegistryError::UnknownLevel`.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistryPolicy {
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
    #[serde(default)]
    pub on_unknown: UnknownLevelPolicy,
}

impl RegistryPolicy {
    /// Rejects both duplicates and unknown names.
    pub const STRICT: RegistryPolicy = RegistryPolicy {
        on_duplicate: DuplicatePolicy::Reject,
        on_unknown: UnknownLevelPolicy::Reject,
    };
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Reject => f.write_str("reject"),
            DuplicatePolicy::Overwrite => f.write_str("overwrite"),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            other => Err(format!(
                "'{other}' is not a duplicate policy. Valid values: reject, overwrite"
            )),
        }
    }
}

impl fmt::Display for UnknownLevelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownLevelPolicy::AutoRegister => f.write_str("auto_register"),
            UnknownLevelPolicy::Reject => f.write_str("reject"),
        }
    }
}

impl FromStr for UnknownLevelPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "auto_register" | "register" => Ok(UnknownLevelPolicy::AutoRegister),
            "reject" => Ok(UnknownLevelPolicy::Reject),
            other => Err(format!(
                "'{other}' is not an unknown-level policy. Valid values: auto_register, reject"
            )),
        }
    }
}
