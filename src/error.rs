//! Errors

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Ring queue errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Tried to enqueue (or pad through `set`) beyond the fixed capacity
    #[error("capacity exceeded, the queue holds at most {capacity} items")]
    CapacityExceeded {
        /// Capacity of the queue
        capacity: usize,
    },

    /// Tried to dequeue from an empty queue
    #[error("the queue is empty")]
    Empty,

    /// `get` with a slot past the current occupancy
    #[error("slot {slot} is out of range for a queue of size {size}")]
    IndexOutOfRange {
        /// Requested logical slot
        slot: usize,
        /// Occupancy at the time of the call
        size: usize,
    },

    /// The allocation strategy could not provide storage
    #[error("out of memory, failed to allocate {bytes} bytes")]
    OutOfMemory {
        /// Number of bytes requested (saturated on overflow)
        bytes: usize,
    },

    /// An allocation strategy returned a store with the wrong number of slots
    #[error("allocation strategy returned {len} slots, {expected} were requested")]
    StoreLength {
        /// Slots requested
        expected: usize,
        /// Slots returned
        len: usize,
    },

    /// A cursor was used after the queue it is bound to changed structure
    #[error("cursor invalidated by a queue mutation")]
    Invalidated,

    /// A snapshot holds more items than its declared capacity
    #[error("snapshot holds {len} items but has a capacity of {capacity}")]
    SnapshotOverflow {
        /// Declared capacity
        capacity: usize,
        /// Number of items in the snapshot
        len: usize,
    },

    /// Serde json error
    #[error("failed to encode / decode snapshot: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Postcard error
    #[error("failed to encode / decode snapshot: {0}")]
    Postcard(#[from] postcard::Error),
}
