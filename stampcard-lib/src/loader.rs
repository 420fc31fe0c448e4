//! Lazily initialised shared resource.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use log::debug;
use tokio::sync::Mutex;

use crate::error::LoadError;

type LoadFuture<T> = Shared<BoxFuture<'static, Result<Arc<T>, LoadError>>>;

enum Slot<T> {
    Empty,
    Pending(LoadFuture<T>),
    Ready(Arc<T>),
    Failed(LoadError),
}

/// Observable state of a [`SharedLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Empty,
    Pending,
    Ready,
    Failed,
}

/// A value loaded at most once and shared by every caller.
///
/// The first [`get_or_load`](Self::get_or_load) starts the load; callers
/// arriving while it runs wait on the same operation. A failure is kept and
/// returned to every later caller until [`reset`](Self::reset).
///
/// # Example
///
/// ```
/// use stampcard_lib::loader::SharedLoader;
///
/// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// # rt.block_on(async {
/// let loader = SharedLoader::new();
/// let value = loader.get_or_load(|| async { Ok(42) }).await.unwrap();
/// assert_eq!(*value, 42);
///
/// // Already loaded: the initialiser is not called again.
/// let again = loader.get_or_load(|| async { Ok(0) }).await.unwrap();
/// assert_eq!(*again, 42);
/// # });
/// ```
pub struct SharedLoader<T> {
    slot: Mutex<Slot<T>>,
}

impl<T> Default for SharedLoader<T> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(Slot::Empty),
        }
    }
}

impl<T> std::fmt::Debug for SharedLoader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedLoader").finish_non_exhaustive()
    }
}

impl<T: Send + Sync + 'static> SharedLoader<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the loaded value, join the load in flight, or start one with `init`.
    pub async fn get_or_load<F, Fut>(&self, init: F) -> Result<Arc<T>, LoadError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, LoadError>> + Send + 'static,
    {
        let pending = {
            let mut slot = self.slot.lock().await;
            match &*slot {
                Slot::Ready(value) => return Ok(Arc::clone(value)),
                Slot::Failed(err) => return Err(err.clone()),
                Slot::Pending(fut) => {
                    debug!("joining in-flight load");
                    fut.clone()
                }
                Slot::Empty => {
                    debug!("starting load");
                    let fut: LoadFuture<T> = init().map(|r| r.map(Arc::new)).boxed().shared();
                    *slot = Slot::Pending(fut.clone());
                    fut
                }
            }
        };

        let result = pending.clone().await;

        // Settle the slot unless it was reset or replaced while we waited.
        let mut slot = self.slot.lock().await;
        let current = matches!(&*slot, Slot::Pending(fut) if fut.ptr_eq(&pending));
        if current {
            *slot = match &result {
                Ok(value) => Slot::Ready(Arc::clone(value)),
                Err(err) => {
                    debug!("load failed: {}", err.message);
                    Slot::Failed(err.clone())
                }
            };
        }
        result
    }

    /// The loaded value, if ready.
    pub async fn get(&self) -> Option<Arc<T>> {
        match &*self.slot.lock().await {
            Slot::Ready(value) => Some(Arc::clone(value)),
            _ => None,
        }
    }

    pub async fn state(&self) -> LoadState {
        match &*self.slot.lock().await {
            Slot::Empty => LoadState::Empty,
            Slot::Pending(_) => LoadState::Pending,
            Slot::Ready(_) => LoadState::Ready,
            Slot::Failed(_) => LoadState::Failed,
        }
    }

    /// Forget the value or failure so the next call loads again.
    pub async fn reset(&self) {
        *self.slot.lock().await = Slot::Empty;
    }
}
