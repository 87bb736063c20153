//! A write-once promise/future cell.
//!
//! A [`Promise`] is the producer half: it resolves or rejects its outcome
//! exactly once. The [`Future`] handle it hands out lets any number of
//! consumers observe that outcome, before or after it is known — a late
//! observer is replayed the already-fixed outcome. Dependent asynchronous
//! steps compose through [`Future::chained`] without manual callback
//! bookkeeping.
//!
//! Every observer registration names a dispatch [`Target`]: `Inline` runs
//! the callback on whatever thread resolves the cell (or registers late),
//! `Serial` defers it onto a [`SerialQueue`] worker.
//!
//! # Examples
//!
//! ```
//! use promise_cell::{Promise, Target};
//! use std::thread;
//!
//! let promise = Promise::<String, String>::new();
//! let future = promise.future();
//!
//! future.on_success(Target::Inline, |value| println!("got {value}"));
//!
//! let producer = thread::spawn(move || promise.resolve("🍓".into()));
//! producer.join().expect("the producer thread has panicked");
//! ```

use thiserror::Error;

mod chain;
mod dispatch;
mod future;
mod promise;
mod store;

pub use dispatch::{SerialQueue, Target};
pub use future::{Future, Outcome};
pub use promise::Promise;
pub use store::{SaveDone, Store};

/// Failures of the crate's own machinery. Outcome failures stay in the
/// caller-chosen `E` payload and never pass through here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to spawn dispatch worker: {0}")]
    Spawn(#[from] std::io::Error),
}
