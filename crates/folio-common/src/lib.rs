pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, StoreError};
pub use events::{Event, EventBus};
pub use id::{new_correlation_id, ConversationId};
pub use types::{PersonaMode, Role, Suggestion, Turn};
