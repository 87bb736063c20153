use crate::dispatch::Target;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

/// The resolved state of a cell: `Ok` carries the success value, `Err` the
/// caller-chosen failure payload.
pub type Outcome<T, E> = Result<T, E>;

type OutcomeFn<T, E> = Box<dyn FnOnce(Outcome<T, E>) + Send>;
type ValueFn<T> = Box<dyn FnOnce(T) + Send>;
type ErrorFn<E> = Box<dyn FnOnce(E) + Send>;

/// Read-only handle to an eventually-known [`Outcome`]. Cloning yields
/// another handle to the same cell; only the owning [`Promise`] can set the
/// outcome.
///
/// Handles also implement [`std::future::Future`], so a cell can be
/// `.await`ed instead of observed.
///
/// [`Promise`]: crate::Promise
#[derive(Debug)]
pub struct Future<T, E> {
    inner: Arc<Mutex<Inner<T, E>>>,
}

impl<T, E> Clone for Future<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct Inner<T, E> {
    outcome: Option<Outcome<T, E>>,
    observers: Vec<(Target, OutcomeFn<T, E>)>,
    success_observers: Vec<(Target, ValueFn<T>)>,
    failure_observers: Vec<(Target, ErrorFn<E>)>,
    wakers: Vec<Waker>,
}

impl<T, E> std::fmt::Debug for Inner<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inner")
            .field("resolved", &self.outcome.is_some())
            .field("observers", &self.observers.len())
            .field("success_observers", &self.success_observers.len())
            .field("failure_observers", &self.failure_observers.len())
            .finish()
    }
}

impl<T, E> Future<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub(crate) fn pending() -> Self {
        Self::with_outcome(None)
    }

    pub(crate) fn ready(outcome: Outcome<T, E>) -> Self {
        // No observers can exist yet, so nothing fires here.
        Self::with_outcome(Some(outcome))
    }

    fn with_outcome(outcome: Option<Outcome<T, E>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                outcome,
                observers: Vec::new(),
                success_observers: Vec::new(),
                failure_observers: Vec::new(),
                wakers: Vec::new(),
            })),
        }
    }

    /// Registers `callback` to run on `target` with the eventual outcome.
    /// If the outcome is already set the callback is dispatched right away;
    /// either way it is invoked exactly once.
    pub fn observe<F>(&self, target: Target, callback: F)
    where
        F: FnOnce(Outcome<T, E>) + Send + 'static,
    {
        let mut inner = self.inner.lock().unwrap();
        match inner.outcome.clone() {
            Some(outcome) => {
                drop(inner);
                target.run(move || callback(outcome));
            }
            None => inner.observers.push((target, Box::new(callback))),
        }
    }

    /// Like [`observe`](Self::observe), but only fires on a success outcome.
    /// Returns a handle to the same cell so registrations chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use promise_cell::{Promise, Target};
    ///
    /// let promise = Promise::<i32, String>::resolved(3);
    /// promise
    ///     .future()
    ///     .on_success(Target::Inline, |value| assert_eq!(value, 3))
    ///     .on_failure(Target::Inline, |_error| unreachable!());
    /// ```
    pub fn on_success<F>(&self, target: Target, callback: F) -> Self
    where
        F: FnOnce(T) + Send + 'static,
    {
        let mut inner = self.inner.lock().unwrap();
        match inner.outcome.clone() {
            Some(outcome) => {
                drop(inner);
                if let Ok(value) = outcome {
                    target.run(move || callback(value));
                }
            }
            None => inner.success_observers.push((target, Box::new(callback))),
        }
        self.clone()
    }

    /// Like [`observe`](Self::observe), but only fires on a failure outcome.
    pub fn on_failure<F>(&self, target: Target, callback: F) -> Self
    where
        F: FnOnce(E) + Send + 'static,
    {
        let mut inner = self.inner.lock().unwrap();
        match inner.outcome.clone() {
            Some(outcome) => {
                drop(inner);
                if let Err(error) = outcome {
                    target.run(move || callback(error));
                }
            }
            None => inner.failure_observers.push((target, Box::new(callback))),
        }
        self.clone()
    }

    /// Single fan-out point. First write wins; returns whether this call set
    /// the outcome. All observer lists are drained into a snapshot under the
    /// lock and dispatched after it is released, so a callback may freely
    /// observe or resolve this or any other cell.
    pub(crate) fn complete(&self, outcome: Outcome<T, E>) -> bool {
        let (observers, success_observers, failure_observers, wakers) = {
            let mut inner = self.inner.lock().unwrap();
            if inner.outcome.is_some() {
                return false;
            }
            inner.outcome = Some(outcome.clone());
            (
                std::mem::take(&mut inner.observers),
                std::mem::take(&mut inner.success_observers),
                std::mem::take(&mut inner.failure_observers),
                std::mem::take(&mut inner.wakers),
            )
        };

        for (target, callback) in observers {
            let outcome = outcome.clone();
            target.run(move || callback(outcome));
        }
        match outcome {
            Ok(value) => {
                for (target, callback) in success_observers {
                    let value = value.clone();
                    target.run(move || callback(value));
                }
            }
            Err(error) => {
                for (target, callback) in failure_observers {
                    let error = error.clone();
                    target.run(move || callback(error));
                }
            }
        }
        for waker in wakers {
            waker.wake();
        }
        true
    }
}

impl<T, E> std::future::Future for Future<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    type Output = Outcome<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut inner = self.inner.lock().unwrap();
        match inner.outcome.clone() {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                // Park every caller's waker; complete() wakes them all.
                inner.wakers.push(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}
