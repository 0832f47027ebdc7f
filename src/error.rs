use thiserror::Error;

pub type Result<T> = std::result::Result<T, InspectError>;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Failed to write {path}: {source}")]
    Report {
        path: String,
        #[source]
        source: Box<InspectError>,
    },
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::object::find::existing::Error> for InspectError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        InspectError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for InspectError {
    fn from(err: gix::object::commit::Error) -> Self {
        InspectError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for InspectError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        InspectError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for InspectError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        InspectError::HeadPeel(Box::new(err))
    }
}

impl From<gix::discover::Error> for InspectError {
    fn from(err: gix::discover::Error) -> Self {
        InspectError::GitDiscover(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for InspectError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        InspectError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for InspectError {
    fn from(err: gix::objs::decode::Error) -> Self {
        InspectError::ObjectDecode(Box::new(err))
    }
}
