pub mod repo;

pub use repo::{CommitRef, GitRepo, TreeFile};
