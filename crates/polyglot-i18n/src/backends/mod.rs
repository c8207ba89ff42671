//! Built-in translation backends

pub mod file;
pub mod memory;
pub mod yaml;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use yaml::YamlBackend;
