use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Level '{name}' is already registered")]
    DuplicateLevel { name: String },

    #[error("Unknown level '{name}'")]
    UnknownLevel { name: String },

    #[error("Level name must not be empty")]
    EmptyName,

    #[error("Built-in level '{name}' cannot be redefined")]
    ReservedLevel { name: String },
}
