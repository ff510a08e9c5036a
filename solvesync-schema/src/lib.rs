pub mod bridge;
pub mod github;

pub use bridge::{
    ActionReply, AutoSyncUpdate, HostSignal, KeyChord, OpenSessionRequest, OpenSessionResponse,
    SnapshotBody, TargetUpdate,
};
pub use github::{
    CommitSummary, ContentsFile, GithubErrorBody, PutContentsRequest, PutContentsResponse,
    RepositoryInfo, RepositoryPermissions,
};
