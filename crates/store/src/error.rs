use thiserror::Error;

/// Failures of the layout store
///
/// `EmptyName`, `DuplicateName`, `NotFound` and `IdOutOfRange` are refusals
/// meant for the user; `Io` and `Corrupt` come from the backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("layout name must not be empty")]
    EmptyName,

    #[error("a layout named {0:?} already exists")]
    DuplicateName(String),

    #[error("no layout named {0:?}")]
    NotFound(String),

    #[error("layout {0:?} holds block ids out of range")]
    IdOutOfRange(String),

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored layouts are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether this is a refusal caused by the request rather than the backend
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            StoreError::EmptyName
                | StoreError::DuplicateName(_)
                | StoreError::NotFound(_)
                | StoreError::IdOutOfRange(_)
        )
    }
}
