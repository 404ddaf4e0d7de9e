// Event-driven change notification components
//
// Store mutations publish collection snapshots here; WebSocket clients
// and other observers subscribe per collection.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::{collections, StoreEvent};

// Internal modules
mod bus;
mod events;
