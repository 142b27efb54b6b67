//! Object storage for uploaded gallery images

pub mod fs;
pub mod memory;
pub mod traits;

pub use fs::FsObjectStore;
pub use memory::MemoryObjectStore;
pub use traits::{build_object_path, ObjectStore};
