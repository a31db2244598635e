//! # Function-backed subscriber (`SubscriberFn`)
//!
//! [`SubscriberFn`] wraps a synchronous closure `F: Fn(&T)` so plain callbacks can
//! be registered without implementing [`Subscribe`] by hand.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use ringcast::{Subscribe, SubscriberFn};
//!
//! let sub: Arc<dyn Subscribe<u32>> = SubscriberFn::arc("printer", |n: &u32| {
//!     let _ = n + 1;
//! });
//! assert_eq!(sub.name(), "printer");
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::subscribers::Subscribe;

/// Closure-backed subscriber.
pub struct SubscriberFn<F> {
    name: &'static str,
    f: F,
}

impl<F> SubscriberFn<F> {
    /// Creates a new function-backed subscriber.
    ///
    /// Prefer [`SubscriberFn::arc`] when you immediately need an `Arc`.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }

    /// Creates the subscriber and returns it as a shared handle.
    pub fn arc(name: &'static str, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<T, F> Subscribe<T> for SubscriberFn<F>
where
    T: Send + Sync + 'static,
    F: Fn(&T) + Send + Sync + 'static,
{
    async fn on_event(&self, item: &T) {
        (self.f)(item)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_closure_is_invoked() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let sub = SubscriberFn::new("counter", move |n: &usize| {
            h.fetch_add(*n, Ordering::SeqCst);
        });

        Subscribe::<usize>::on_event(&sub, &3).await;
        Subscribe::<usize>::on_event(&sub, &4).await;

        assert_eq!(hits.load(Ordering::SeqCst), 7);
        assert_eq!(Subscribe::<usize>::name(&sub), "counter");
        assert_eq!(Subscribe::<usize>::initial_capacity(&sub), None);
    }
}
