//! In-memory persistence for development, demos and tests
//!
//! Every repository operation takes the one store-wide lock, so rotation,
//! code replacement and consumption are atomic across users, sessions and
//! codes alike.

mod store;


pub use store::InMemoryStore;
