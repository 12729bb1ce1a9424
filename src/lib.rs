#![deny(missing_docs)]
//! A bounded, double ended ring queue for staging messages, timers and
//! pending work in networking code.
//!
//! Storage is allocated once, through a pluggable [`Strategy`], and never
//! grows, so the worst case memory use of a queue is known up front.

pub mod alloc;
pub mod error;
mod position;
mod queue;
mod snapshot;
mod store;

pub use self::alloc::{Budget, Heap, Pool, Strategy};
pub use error::{Error, Result};
pub use queue::{builder, Builder, Cursor, CursorMut, Drain, Iter, RingQueue};
pub use snapshot::{Encoding, Snapshot};
