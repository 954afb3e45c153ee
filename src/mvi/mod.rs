//! Model-View-Intent (MVI) primitives for the catalog store.
//!
//! This module provides base traits for implementing unidirectional
//! data flow between the coordinator and the entity store.
//!
//! # Architecture
//!
//! ```text
//! Coordinator ──→ Intent ──→ Reducer ──→ State ──→ View
//!      ↑                                            │
//!      └────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot of the normalized store
//! - **Intent**: Lifecycle events of a remote operation (start/success/failure)
//! - **Reducer**: Pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::StoreState;
