use futures::executor::block_on;
use promise_cell::{Promise, SaveDone, SerialQueue, Store, Target};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

#[test]
fn observer_fires_when_resolved_from_another_thread() {
    let promise = Promise::<i32, String>::new();
    let future = promise.future();
    let (tx, rx) = mpsc::channel();

    future.on_success(Target::Inline, move |value| tx.send(value).unwrap());

    thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        promise.resolve(42);
    });

    assert_eq!(rx.recv().unwrap(), 42);
}

#[test]
fn awaiting_a_handle_yields_the_outcome() {
    let promise = Promise::<String, String>::new();
    let future = promise.future();

    let waiter = thread::spawn(move || block_on(async { future.await }));
    thread::sleep(Duration::from_millis(20));
    promise.resolve("🍓".into());

    assert_eq!(waiter.join().unwrap(), Ok("🍓".to_string()));
}

#[test]
fn rejection_reaches_every_waiter() {
    let promise = Promise::<i32, String>::new();
    let one = promise.future();
    let two = promise.future();

    let w1 = thread::spawn(move || block_on(async { one.await }));
    let w2 = thread::spawn(move || block_on(async { two.await }));
    promise.reject("gone".into());

    assert_eq!(w1.join().unwrap(), Err("gone".to_string()));
    assert_eq!(w2.join().unwrap(), Err("gone".to_string()));
}

#[derive(Default)]
struct LedgerStore {
    entries: Mutex<Vec<String>>,
}

impl Store<String, String> for LedgerStore {
    fn save(&self, value: String, done: SaveDone<String, String>) {
        self.entries.lock().unwrap().push(value.clone());
        done(Ok(value));
    }
}

#[test]
fn full_pipeline_chains_transform_side_effect_and_save() {
    let store = Arc::new(LedgerStore::default());
    let queue = SerialQueue::new().unwrap();
    let actions = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = mpsc::channel();

    let promise = Promise::<i32, String>::new();
    let counter = actions.clone();
    promise
        .future()
        .chained(|value| Ok(Promise::resolved(format!("user-{value}")).future()))
        .performing(move |_name| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .saved(store.clone())
        .on_success(Target::Serial(queue), move |name| {
            tx.send(name).unwrap();
        });

    thread::spawn(move || promise.resolve(7));

    assert_eq!(rx.recv().unwrap(), "user-7");
    assert_eq!(actions.load(Ordering::SeqCst), 1);
    assert_eq!(*store.entries.lock().unwrap(), vec!["user-7".to_string()]);
}

#[test]
fn pipeline_short_circuits_into_the_failure_observer() {
    let store = Arc::new(LedgerStore::default());
    let (tx, rx) = mpsc::channel();

    let promise = Promise::<i32, String>::new();
    promise
        .future()
        .chained(|value| Ok(Promise::resolved(value.to_string()).future()))
        .saved(store.clone())
        .on_success(Target::Inline, |_name| panic!("must not fire"))
        .on_failure(Target::Inline, move |error| tx.send(error).unwrap());

    promise.reject("auth".into());

    assert_eq!(rx.recv().unwrap(), "auth");
    assert!(store.entries.lock().unwrap().is_empty());
}
