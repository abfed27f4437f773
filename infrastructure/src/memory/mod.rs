//! In-process state adapters
//!
//! - [`InMemorySharedMemory`]: shared memory block for the agents
//! - [`InMemoryHistoryStore`]: bounded history of moderation runs

mod history_store;
mod shared_memory;

pub use history_store::InMemoryHistoryStore;
pub use shared_memory::InMemorySharedMemory;
