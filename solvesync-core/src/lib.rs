pub mod classify;
pub mod codec;
pub mod header;
pub mod path;

pub use classify::{Classification, Family, SqlDialect, classify};
pub use codec::{DecodeError, decode_content, encode_content};
pub use header::{HeaderInput, SYNCHRONIZER_ID, comment_prefix, compose, humanize_slug};
pub use path::{ResolveError, extension_for, normalize_slug, resolve_path};
