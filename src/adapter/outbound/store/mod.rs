//! Rate-limit timestamp stores.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
