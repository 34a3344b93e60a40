use std::fmt;

// Domain-level errors for loadout tuning data.
#[derive(Debug)]
pub enum LoadoutError {
    Malformed(serde_json::Error),
    DuplicateId(String),
}

impl fmt::Display for LoadoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadoutError::Malformed(err) => write!(f, "malformed loadout catalogue: {err}"),
            LoadoutError::DuplicateId(id) => write!(f, "duplicate loadout id {id:?}"),
        }
    }
}

impl std::error::Error for LoadoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadoutError::Malformed(err) => Some(err),
            LoadoutError::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for LoadoutError {
    fn from(err: serde_json::Error) -> Self {
        LoadoutError::Malformed(err)
    }
}
