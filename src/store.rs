//! Integration point for an external save operation. The store adapts its
//! completion callback into a fresh cell; all resolution logic stays in the
//! standard chaining contract.

use crate::future::{Future, Outcome};
use crate::promise::Promise;
use std::sync::Arc;

/// Completion callback handed to a [`Store`]; call it exactly once with the
/// outcome of the save.
pub type SaveDone<T, E> = Box<dyn FnOnce(Outcome<T, E>) + Send>;

/// An external collaborator that persists a value and reports back through
/// `done`. Implementations must invoke `done` exactly once.
pub trait Store<T, E>: Send + Sync {
    fn save(&self, value: T, done: SaveDone<T, E>);
}

impl<T, E, S> Store<T, E> for Arc<S>
where
    S: Store<T, E> + ?Sized,
{
    fn save(&self, value: T, done: SaveDone<T, E>) {
        (**self).save(value, done)
    }
}

impl<T, E> Future<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Chains a save through `store`: the success value is submitted once,
    /// and the store's outcome — the saved value or its error — is
    /// forwarded verbatim. An upstream failure skips the store entirely.
    pub fn saved<S>(&self, store: S) -> Future<T, E>
    where
        S: Store<T, E> + 'static,
    {
        self.chained(move |value| {
            let promise = Promise::new();
            let future = promise.future();
            store.save(
                value,
                Box::new(move |outcome| match outcome {
                    Ok(value) => {
                        promise.resolve(value);
                    }
                    Err(error) => {
                        promise.reject(error);
                    }
                }),
            );
            Ok(future)
        })
    }
}
