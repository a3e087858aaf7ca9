//! Change-notification surface: event trait, pub/sub bus, change entries.

pub mod bus;
pub mod change;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use change::{ChangedEntry, EntryState};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
