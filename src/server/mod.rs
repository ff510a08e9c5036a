pub mod guards;
pub mod router;
pub mod routes;

pub use router::{BridgeState, bridge_router};
