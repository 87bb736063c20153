//! Dispatch policy for observer callbacks. A callback either runs inline on
//! the thread that triggers it, or is handed to a [`SerialQueue`] — a single
//! worker thread draining an mpsc channel of boxed tasks, so everything
//! submitted to one queue runs serially in submission order.

use crate::Error;
use std::sync::mpsc::{channel, Sender};
use std::thread;

type Task = Box<dyn FnOnce() + Send>;

/// Where a registered callback runs once the outcome is known.
#[derive(Debug, Clone)]
pub enum Target {
    /// Defer onto the queue's worker thread; the resolver does not wait for
    /// the callback to finish.
    Serial(SerialQueue),
    /// Run in place, on whatever thread performs the resolution or the late
    /// registration. Keep these callbacks fast and non-blocking.
    Inline,
}

impl Target {
    pub(crate) fn run(&self, task: impl FnOnce() + Send + 'static) {
        match self {
            Target::Serial(queue) => queue.submit(task),
            Target::Inline => task(),
        }
    }
}

/// A cloneable handle to a dedicated worker thread. The worker exits once
/// every handle has been dropped and the backlog is drained.
///
/// # Examples
///
/// ```
/// use promise_cell::{Promise, SerialQueue, Target};
/// use std::sync::mpsc;
///
/// let queue = SerialQueue::new().unwrap();
/// let promise = Promise::<i32, String>::new();
/// let (tx, rx) = mpsc::channel();
/// promise.future().on_success(Target::Serial(queue), move |value| {
///     tx.send(value).unwrap();
/// });
/// promise.resolve(7);
/// assert_eq!(rx.recv().unwrap(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct SerialQueue {
    sender: Sender<Task>,
}

impl SerialQueue {
    pub fn new() -> Result<Self, Error> {
        let (sender, receiver) = channel::<Task>();
        thread::Builder::new()
            .name("promise-cell-queue".into())
            .spawn(move || {
                while let Ok(task) = receiver.recv() {
                    task();
                }
            })?;
        Ok(Self { sender })
    }

    /// Submits a task to the worker. If the worker is gone the task is
    /// silently dropped; errors never cross the observer boundary.
    pub fn submit(&self, task: impl FnOnce() + Send + 'static) {
        let _ = self.sender.send(Box::new(task));
    }
}
