use crate::error::{InspectError, Result};
use gix::revision::walk::Sorting;
use gix::traverse::commit::simple::CommitTimeOrder;
use gix::traverse::tree::Recorder;
use gix::{discover, ObjectId, Repository};
use std::path::{Path, PathBuf};

/// A commit reached by the log walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitRef {
    pub id: ObjectId,
    /// Committer time, seconds since the epoch.
    pub committed_at: i64,
}

/// A file-content entry of a commit's tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFile {
    pub path: String,
    pub id: ObjectId,
}

impl TreeFile {
    /// Last path component.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commits reachable from HEAD, newest commit time first, capped at
    /// `max_count` when given.
    pub fn commits(&self, max_count: Option<usize>) -> Result<Vec<CommitRef>> {
        let mut head = self.repo.head()?;
        let head_commit = head.peel_to_commit_in_place()?;

        let walk = self
            .repo
            .rev_walk([head_commit.id])
            .sorting(Sorting::ByCommitTime(CommitTimeOrder::NewestFirst))
            .all()
            .map_err(|e| InspectError::GitRepo(format!("Failed to walk commits: {e}")))?;

        let mut commits = Vec::new();
        for info in walk.take(max_count.unwrap_or(usize::MAX)) {
            let info =
                info.map_err(|e| InspectError::GitRepo(format!("Failed to walk commits: {e}")))?;
            let commit = self.repo.find_commit(info.id)?;
            commits.push(CommitRef {
                id: info.id,
                committed_at: commit.time()?.seconds,
            });
        }
        Ok(commits)
    }

    /// Every blob entry of the commit's tree, breadth-first. Symlinks are
    /// included and read as their target path; trees and submodules are not.
    pub fn tree_files(&self, commit_id: ObjectId) -> Result<Vec<TreeFile>> {
        let tree = self.repo.find_commit(commit_id)?.tree()?;

        let mut recorder = Recorder::default();
        tree.traverse()
            .breadthfirst(&mut recorder)
            .map_err(|e| InspectError::GitRepo(format!("Failed to traverse tree of {commit_id}: {e}")))?;

        Ok(recorder
            .records
            .into_iter()
            .filter(|entry| entry.mode.is_blob() || entry.mode.is_link())
            .map(|entry| TreeFile {
                path: entry.filepath.to_string(),
                id: entry.oid,
            })
            .collect())
    }

    /// Blob content as text; invalid UTF-8 is replaced rather than rejected.
    pub fn read_text(&self, blob_id: ObjectId) -> Result<String> {
        let object = self.repo.find_object(blob_id)?;
        Ok(String::from_utf8_lossy(object.data.as_slice()).into_owned())
    }
}
