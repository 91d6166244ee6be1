//! Change-notification transport.
//!
//! Stores publish small change events here; UI layers, persistence hooks and
//! tests subscribe to them. Delivery is in-process and best-effort.

pub mod bus;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
