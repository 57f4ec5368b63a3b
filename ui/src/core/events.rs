//! In-process fan-out of "content changed" notifications.
//!
//! The event-bus bridge publishes into a [`ContentEvents`] hub provided at the
//! app root; views hold a [`Subscription`] for as long as they are mounted.
//! Dropping (or cancelling) the subscription unregisters it.

use std::cell::RefCell;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures_channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures_util::Stream;

/// A node in the content store changed. Carries what the backend told us,
/// but subscribers are not expected to filter on it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentChanged {
    pub address: String,
    pub uuid: Option<String>,
    pub language: Option<String>,
}

/// Cheaply clonable handle to the shared hub.
#[derive(Clone, Default)]
pub struct ContentEvents {
    subscribers: Rc<RefCell<Vec<UnboundedSender<ContentChanged>>>>,
}

impl ContentEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded();
        self.subscribers.borrow_mut().push(tx);
        Subscription { rx }
    }

    /// Deliver `event` to every live subscriber and return how many got it.
    pub fn publish(&self, event: ContentChanged) -> usize {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|tx| tx.unbounded_send(event.clone()).is_ok());
        subscribers.len()
    }

    /// Number of live subscriptions (closed ones are pruned first).
    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }
}

/// Stream of notifications for one view.
pub struct Subscription {
    rx: UnboundedReceiver<ContentChanged>,
}

impl Subscription {
    /// Stop receiving. Already-queued events are dropped.
    pub fn cancel(mut self) {
        self.rx.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.rx.close();
    }
}

impl Stream for Subscription {
    type Item = ContentChanged;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}
