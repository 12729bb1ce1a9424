use crate::alloc::{Heap, Strategy};
use crate::error::Result;
use crate::queue::RingQueue;

const DEFAULT_CAPACITY: usize = 64;

/// Queue configuration
/// ```
/// use std::rc::Rc;
/// use ringq::Pool;
///
/// # fn run() -> ringq::Result<()> {
/// let pool = Rc::new(Pool::new());
/// let queue = ringq::builder()
///     .capacity(128)
///     .strategy(Rc::clone(&pool))
///     .build::<u64>()?;
///
/// assert_eq!(queue.capacity(), 128);
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
#[derive(Debug, Copy, Clone)]
pub struct Builder<A = Heap> {
    capacity: usize,
    strategy: A,
}

impl<A> Builder<A> {
    /// Maximum number of items the queue holds
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Allocation strategy for the backing store
    pub fn strategy<B>(self, strategy: B) -> Builder<B> {
        Builder {
            capacity: self.capacity,
            strategy,
        }
    }

    /// Allocate the queue
    pub fn build<T>(self) -> Result<RingQueue<T, A>>
    where
        A: Strategy<T>,
    {
        RingQueue::with_strategy(self.capacity, self.strategy)
    }
}

/// Start configuring a queue.
/// Defaults to a capacity of 64 on the heap.
pub fn builder() -> Builder {
    Builder {
        capacity: DEFAULT_CAPACITY,
        strategy: Heap,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::alloc::Budget;
    use crate::error::Error;

    #[test]
    fn defaults() {
        let queue = builder().build::<u8>().unwrap();
        assert_eq!(queue.capacity(), DEFAULT_CAPACITY);
        assert!(queue.is_empty());
    }

    #[test]
    fn with_budget() {
        let budget = Budget::new(Heap, 10);
        let err = builder().capacity(11).strategy(&budget).build::<u8>().unwrap_err();
        assert!(matches!(err, Error::OutOfMemory { bytes: 11 }));

        let queue = builder().capacity(10).strategy(&budget).build::<u8>().unwrap();
        assert_eq!(queue.capacity(), 10);
        assert_eq!(budget.remaining(), 0);
    }
}
