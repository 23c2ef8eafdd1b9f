use thiserror::Error;

#[derive(Error, Debug)]
pub enum PagekeepError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Title cannot be empty")]
    InvalidTitle,

    #[error("A page with id {0} already exists")]
    DuplicateId(String),

    #[error("Parent page not found: {0}")]
    UnknownParent(String),

    #[error("Moving {page} under {parent} would make it its own ancestor")]
    CyclicParent { page: String, parent: String },

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("\"{0}\" matches more than one page, use the page id instead")]
    AmbiguousSelector(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Remote save failed: {0}")]
    Remote(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for PagekeepError {
    fn from(err: reqwest::Error) -> Self {
        PagekeepError::Remote(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PagekeepError>;
