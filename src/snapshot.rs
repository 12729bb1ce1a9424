//! Serde support.
//!
//! A queue serializes as its capacity and its items in front to rear
//! order. The physical layout is not part of the encoding, a restored
//! queue starts at the first slot.
use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer as _};

use crate::alloc::{Heap, Strategy};
use crate::error::{Error, Result};
use crate::queue::{Items, RingQueue};

/// Format a queue is encoded in
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Encoding {
    /// JSON text, for logs and debugging
    Json,
    /// Compact binary (postcard)
    Postcard,
}

impl Encoding {
    fn to_bytes<T: Serialize + ?Sized>(self, value: &T) -> Result<Box<[u8]>> {
        let bytes = match self {
            Self::Json => serde_json::to_vec(value)?,
            Self::Postcard => postcard::to_stdvec(value)?,
        };
        Ok(bytes.into_boxed_slice())
    }

    fn from_bytes<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T> {
        let value = match self {
            Self::Json => serde_json::from_slice(bytes)?,
            Self::Postcard => postcard::from_bytes(bytes)?,
        };
        Ok(value)
    }
}

/// Owned, serializable copy of a queue's contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    /// Capacity of the queue
    pub capacity: usize,
    /// Items, front to rear
    pub items: Vec<T>,
}

impl<T: Default> Snapshot<T> {
    /// Rebuild a queue on the heap
    pub fn into_queue(self) -> Result<RingQueue<T>> {
        self.into_queue_with(Heap)
    }

    /// Rebuild a queue with storage from `strategy`.
    ///
    /// Fails with [`Error::SnapshotOverflow`] if there are more items
    /// than the capacity allows.
    pub fn into_queue_with<A: Strategy<T>>(self, strategy: A) -> Result<RingQueue<T, A>> {
        if self.items.len() > self.capacity {
            return Err(Error::SnapshotOverflow {
                capacity: self.capacity,
                len: self.items.len(),
            });
        }

        let mut queue = RingQueue::with_strategy(self.capacity, strategy)?;
        queue.try_extend(self.items);
        Ok(queue)
    }
}

impl<T, A: Strategy<T>> RingQueue<T, A> {
    /// Owned copy of the contents
    pub fn snapshot(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        Snapshot {
            capacity: self.capacity(),
            items: self.iter().cloned().collect(),
        }
    }

    /// Capacity and items, front to rear, in the given encoding
    pub fn encode(&self, encoding: Encoding) -> Result<Box<[u8]>>
    where
        T: Serialize,
    {
        encoding.to_bytes(self)
    }
}

impl<T: Default> RingQueue<T> {
    /// Decode a queue produced by [`RingQueue::encode`] onto the heap
    pub fn decode(encoding: Encoding, bytes: impl AsRef<[u8]>) -> Result<Self>
    where
        T: DeserializeOwned,
    {
        encoding
            .from_bytes::<Snapshot<T>>(bytes.as_ref())?
            .into_queue()
    }
}

impl<T: Serialize, A: Strategy<T>> Serialize for Items<'_, T, A> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

// Same shape as `Snapshot`, so either can be read back as the other
impl<T: Serialize, A: Strategy<T>> Serialize for RingQueue<T, A> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Snapshot", 2)?;
        state.serialize_field("capacity", &self.capacity())?;
        state.serialize_field("items", &Items(self))?;
        state.end()
    }
}
