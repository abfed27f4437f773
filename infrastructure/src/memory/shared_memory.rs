//! Shared memory block kept in process

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use threadsense_application::{DispatchError, SharedMemoryPort};
use threadsense_domain::AgentDecision;

/// One shared block per process, holding the latest decisions per thread run
pub struct InMemorySharedMemory {
    id: String,
    blocks: Mutex<HashMap<String, Vec<AgentDecision>>>,
}

impl InMemorySharedMemory {
    /// Create a block with an id derived from the current time.
    pub fn new() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        Self::with_id(format!("block-{nanos:x}"))
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            blocks: Mutex::new(HashMap::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Decisions last recorded under `memory_id`.
    pub fn last_recorded(&self, memory_id: &str) -> Option<Vec<AgentDecision>> {
        self.blocks.lock().ok()?.get(memory_id).cloned()
    }
}

impl Default for InMemorySharedMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SharedMemoryPort for InMemorySharedMemory {
    async fn acquire(&self) -> Result<String, DispatchError> {
        Ok(self.id.clone())
    }

    async fn record(
        &self,
        memory_id: &str,
        decisions: &[AgentDecision],
    ) -> Result<(), DispatchError> {
        if memory_id != self.id {
            return Err(DispatchError::Other(format!("unknown memory block {memory_id}")));
        }
        let mut blocks = self
            .blocks
            .lock()
            .map_err(|_| DispatchError::Other("shared memory lock poisoned".to_string()))?;
        blocks.insert(memory_id.to_string(), decisions.to_vec());
        Ok(())
    }
}
