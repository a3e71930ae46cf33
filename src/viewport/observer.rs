//! Region resize observation as a subscription
//!
//! An observer calls back with the new region size every time it changes.
//! Dropping the returned `Subscription` stops the callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use super::scale::RegionSize;

pub type ResizeCallback = Rc<dyn Fn(RegionSize)>;

/// Something that can report the size of the preview region
pub trait RegionObserver {
    /// Start observing; the callback also receives the current size if known
    fn observe(&self, callback: ResizeCallback) -> Subscription;
}

/// Handle for an active observation; unsubscribes on drop
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to release
    pub fn empty() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Region driven by hand, for native hosts and tests
#[derive(Clone, Default)]
pub struct ManualRegion {
    size: Rc<RefCell<Option<RegionSize>>>,
    subscribers: Rc<RefCell<Vec<ResizeCallback>>>,
}

impl ManualRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> Option<RegionSize> {
        *self.size.borrow()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Set a new size and notify every subscriber
    pub fn resize(&self, width: f64, height: f64) {
        let region = RegionSize::new(width, height);
        *self.size.borrow_mut() = Some(region);
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            subscriber(region);
        }
    }
}

impl RegionObserver for ManualRegion {
    fn observe(&self, callback: ResizeCallback) -> Subscription {
        self.subscribers.borrow_mut().push(callback.clone());
        if let Some(region) = self.size() {
            callback(region);
        }

        let subscribers = Rc::clone(&self.subscribers);
        Subscription::new(move || {
            subscribers
                .borrow_mut()
                .retain(|item| !Rc::ptr_eq(item, &callback));
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_drop_unsubscribes() {
        let region = ManualRegion::new();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let sub = region.observe(Rc::new(move |_: RegionSize| seen.set(seen.get() + 1)));

        region.resize(800.0, 600.0);
        assert_eq!(calls.get(), 1);
        assert_eq!(region.subscriber_count(), 1);

        drop(sub);
        region.resize(900.0, 600.0);
        assert_eq!(calls.get(), 1);
        assert_eq!(region.subscriber_count(), 0);
    }

    #[test]
    fn test_observe_reports_current_size() {
        let region = ManualRegion::new();
        region.resize(640.0, 480.0);
        let last = Rc::new(Cell::new(RegionSize::default()));
        let seen = last.clone();
        let _sub = region.observe(Rc::new(move |size: RegionSize| seen.set(size)));
        assert_eq!(last.get(), RegionSize::new(640.0, 480.0));
    }
}
