use thiserror::Error;

/// A dataset record that cannot be turned into a clan page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record #{index} has no name")]
    MissingName { index: usize },
    #[error("record #{index} ({name}) has no izithakazelo")]
    MissingPraises { index: usize, name: String },
    #[error("record #{index} ({name}) has a name that is not a safe file name")]
    UnsafeName { index: usize, name: String },
}
