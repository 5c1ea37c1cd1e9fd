//! Cancellation for work started by a view.
//!
//! A view creates one [`ViewScope`] when it mounts and wraps every fetch in
//! [`ViewScope::run`]. Closing the scope (or dropping it with the view) aborts
//! everything still in flight, so a late response resolves to `None` instead
//! of being written into state that no longer exists.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::{AbortHandle, Abortable};
use futures::FutureExt;

#[derive(Default)]
struct Handles {
    closed: bool,
    live: Vec<AbortHandle>,
}

#[derive(Default)]
pub struct ViewScope {
    handles: Mutex<Handles>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    fn handles(&self) -> MutexGuard<'_, Handles> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `fut` under this scope. Resolves to `None` if the scope closes first.
    pub fn run<F: Future>(&self, fut: F) -> impl Future<Output = Option<F::Output>> {
        let (handle, registration) = AbortHandle::new_pair();
        {
            let mut handles = self.handles();
            if handles.closed {
                handle.abort();
            } else {
                handles.live.push(handle);
            }
        }
        Abortable::new(fut, registration).map(Result::ok)
    }

    pub fn close(&self) {
        let mut handles = self.handles();
        if handles.closed {
            return;
        }
        handles.closed = true;
        let aborted = handles.live.len();
        for handle in handles.live.drain(..) {
            handle.abort();
        }
        tracing::trace!(aborted, "view scope closed");
    }

    pub fn is_closed(&self) -> bool {
        self.handles().closed
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.close();
    }
}
