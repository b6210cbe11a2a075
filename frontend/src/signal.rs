//! Observable values shared between services, state facades and components.
//!
//! A [`Signal`] is the writable side held by its owner; everything else gets a
//! [`ReadSignal`] that can read the current value or await the next change.

use tokio::sync::watch;

#[derive(Debug)]
pub struct Signal<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Signal<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the value and notify subscribers
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    pub fn read_only(&self) -> ReadSignal<T> {
        ReadSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl<T: Clone + PartialEq> Signal<T> {
    /// Replace the value only when it differs; returns whether subscribers were notified
    pub fn set_if_changed(&self, value: T) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }
}

impl<T: Clone + Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Read-only view of a [`Signal`]
#[derive(Debug, Clone)]
pub struct ReadSignal<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone> ReadSignal<T> {
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Wait for the next change and return the new value.
    ///
    /// Returns `None` once the owning signal has been dropped.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

/// Holds a `bool` signal at `true` until dropped.
///
/// The flag is reset even when the owning future is aborted mid-await.
#[must_use]
pub struct LoadingGuard<'a> {
    flag: &'a Signal<bool>,
}

impl<'a> LoadingGuard<'a> {
    pub fn start(flag: &'a Signal<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
