use crate::future::Future;

/// Write-capable owner of a cell's outcome. The producer keeps the
/// `Promise` to itself and hands [`Future`] handles to consumers; the
/// write capability is never cloned.
#[derive(Debug)]
pub struct Promise<T, E> {
    future: Future<T, E>,
}

impl<T, E> Promise<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Creates a pending promise.
    pub fn new() -> Self {
        Self {
            future: Future::pending(),
        }
    }

    /// Creates a promise whose outcome is already a success. A convenience
    /// for lifting an immediate value into a chain; nothing is notified at
    /// construction because no observer can exist yet.
    pub fn resolved(value: T) -> Self {
        Self {
            future: Future::ready(Ok(value)),
        }
    }

    /// Returns a read-only handle to the underlying cell. Call as often as
    /// needed; every handle points at the same cell.
    pub fn future(&self) -> Future<T, E> {
        self.future.clone()
    }

    /// Sets the outcome to success. First write wins: the return value
    /// reports whether this call set the outcome, and a later call is a
    /// harmless no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use promise_cell::Promise;
    /// use futures::executor::block_on;
    /// use std::thread;
    ///
    /// let promise = Promise::<String, String>::new();
    /// let future = promise.future();
    /// let waiter = thread::spawn(move || block_on(async { future.await }));
    /// promise.resolve("🍓".into());
    /// assert_eq!(waiter.join().unwrap(), Ok("🍓".to_string()));
    /// ```
    pub fn resolve(&self, value: T) -> bool {
        self.future.complete(Ok(value))
    }

    /// Sets the outcome to failure, under the same first-write-wins rule.
    pub fn reject(&self, error: E) -> bool {
        self.future.complete(Err(error))
    }
}

impl<T, E> Default for Promise<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
