use crate::types::ChatMessage;

/// One transcript item produced while an agent run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentEvent {
    pub author: String,
    pub message: ChatMessage,
}
