//! Trailing-edge debounce
//!
//! Values pushed in quick succession collapse into one: the last value is
//! emitted once no new value has arrived for the configured delay.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Delay used for search inputs
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Debounces values pushed from the input side
///
/// Dropping the debouncer stops its task; a value still waiting for its
/// quiet period is discarded.
#[derive(Debug)]
pub struct Debouncer<T> {
    input: watch::Sender<Option<T>>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawn a debouncer; settled values arrive on the returned receiver
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input, mut changes) = watch::channel::<Option<T>>(None);
        let (output, settled) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            'outer: while changes.changed().await.is_ok() {
                loop {
                    tokio::select! {
                        changed = changes.changed() => {
                            if changed.is_err() {
                                break 'outer;
                            }
                        }
                        _ = tokio::time::sleep(delay) => {
                            let value = changes.borrow_and_update().clone();
                            if let Some(value) = value
                                && output.send(value).is_err()
                            {
                                break 'outer;
                            }
                            break;
                        }
                    }
                }
            }
        });

        (Self { input, task }, settled)
    }

    /// Push a new value, restarting the quiet period
    pub fn push(&self, value: T) {
        self.input.send_replace(Some(value));
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
