mod config_store;
mod event;
mod extractor;
mod locks;
mod pipeline;
mod reporter;
mod service;

pub use config_store::{ConfigStore, RepoTarget, SharedConfigStore};
pub use event::{StagedSubmission, SubmissionEvent};
pub use extractor::{ExtractedSource, SnapshotExtractor, SourceExtractor};
pub use locks::PathLocks;
pub use pipeline::{SyncOutcome, SyncPipeline};
pub use reporter::{RecordOutcome, ResultReporter, SyncRecord};
pub use service::SyncService;
