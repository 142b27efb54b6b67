//! Infrastructure layer - external concerns

pub mod database;
pub mod object_store;
pub mod server;
pub mod storage;

pub use database::{init_database, DatabaseConfig, DatabaseStorage};
pub use object_store::{build_object_path, FsObjectStore, MemoryObjectStore, ObjectStore};
pub use server::{ShutdownCoordinator, ShutdownSignal};
pub use storage::InMemoryStorage;
