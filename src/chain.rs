//! Combinators that sequence dependent steps across cells. Stages are wired
//! together on the inline target so a pure value-transform chain adds no
//! dispatch latency between stages.

use crate::dispatch::Target;
use crate::future::Future;
use crate::promise::Promise;

impl<T, E> Future<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Sequences this cell with `step`, which maps the success value to a
    /// new cell. The returned handle settles with the terminal outcome of
    /// the composed pipeline: a failure of this cell short-circuits (the
    /// step never runs), a synchronous `Err` from the step rejects, and the
    /// inner cell's outcome is forwarded unchanged otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use promise_cell::{Promise, Target};
    ///
    /// let promise = Promise::<i32, String>::new();
    /// let doubled = promise
    ///     .future()
    ///     .chained(|value| Ok(Promise::resolved(value * 2).future()));
    /// doubled.on_success(Target::Inline, |value| assert_eq!(value, 10));
    /// promise.resolve(5);
    /// ```
    pub fn chained<U, F>(&self, step: F) -> Future<U, E>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> Result<Future<U, E>, E> + Send + 'static,
    {
        let promise = Promise::<U, E>::new();
        let result = promise.future();

        self.observe(Target::Inline, move |outcome| match outcome {
            Ok(value) => match step(value) {
                Ok(next) => {
                    next.observe(Target::Inline, move |outcome| match outcome {
                        Ok(value) => {
                            promise.resolve(value);
                        }
                        Err(error) => {
                            promise.reject(error);
                        }
                    });
                }
                Err(error) => {
                    promise.reject(error);
                }
            },
            Err(error) => {
                promise.reject(error);
            }
        });

        result
    }

    /// Runs `action` for its side effect and passes this cell's success
    /// value through unchanged. An `Err` from the action rejects the
    /// returned handle; an upstream failure skips the action entirely.
    pub fn performing<F>(&self, action: F) -> Future<T, E>
    where
        F: FnOnce(T) -> Result<(), E> + Send + 'static,
    {
        let source = self.clone();
        self.chained(move |value| {
            action(value)?;
            Ok(source)
        })
    }
}
