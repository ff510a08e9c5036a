mod reply;
mod session;
mod signal;

pub use reply::{ActionReply, AutoSyncUpdate, TargetUpdate};
pub use session::{OpenSessionRequest, OpenSessionResponse, SnapshotBody};
pub use signal::{HostSignal, KeyChord};
