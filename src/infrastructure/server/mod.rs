//! Server lifecycle helpers

mod shutdown;

pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
