pub mod app_config;
pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
