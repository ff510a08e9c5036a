mod contents;
mod error;
mod repository;

pub use contents::{CommitSummary, ContentsFile, PutContentsRequest, PutContentsResponse};
pub use error::GithubErrorBody;
pub use repository::{RepositoryInfo, RepositoryPermissions};
