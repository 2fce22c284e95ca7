//! Topic membership.
//!
//! A `Topic` keeps its subscribers in the order they subscribed; publishing
//! walks that order. A client id appears at most once per topic, so a
//! repeated subscribe is a no-op that keeps the original position.
//!
//! Concurrency note: callers must synchronize access to `Topic` (via the
//! broker lock) when modifying subscriptions.

pub type SubscriberId = String;

#[derive(Debug, Default)]
pub struct Topic {
    pub name: String,
    subscribers: Vec<SubscriberId>,
}

impl Topic {
    /// Create a new topic with the given name and no subscribers.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscribers: Vec::new(),
        }
    }

    /// Add a subscriber. Duplicate adds are ignored.
    pub fn subscribe(&mut self, id: SubscriberId) {
        if !self.subscribers.contains(&id) {
            self.subscribers.push(id);
        }
    }

    /// Remove a subscriber from the topic.
    pub fn unsubscribe(&mut self, id: &SubscriberId) {
        self.subscribers.retain(|s| s != id);
    }

    /// Whether `id` currently holds a subscription here.
    pub fn contains(&self, id: &SubscriberId) -> bool {
        self.subscribers.contains(id)
    }

    /// Subscribers in the order they joined.
    pub fn subscribers(&self) -> &[SubscriberId] {
        &self.subscribers
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
