use log::trace;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// A value held by the store. Identity, not content, decides whether a `set`
/// notifies: callers must pass a freshly allocated `Arc` to trigger delivery.
pub type StoreValue = Arc<dyn Any + Send + Sync>;

/// A subscriber callback. Identity of the `Arc` is what `unsubscribe` matches
/// on, so callers keep the same `Arc` around for the subscribe/unsubscribe
/// pairing.
pub type StoreSubscriber = Arc<dyn Fn(&StoreValue) + Send + Sync>;

#[derive(Default)]
struct StoreEntry {
    value: Option<StoreValue>,
    subscribers: Vec<StoreSubscriber>,
}

/// Reactive key/value registry shared by all plugin instances of one editor.
///
/// One `PluginStore` is constructed at editor-mount time and passed by
/// reference to every collaborating component; it is torn down with the
/// owning editor and never persisted.
///
/// Notification is synchronous and FIFO in subscription order. There is no
/// re-entrancy guard: a subscriber that calls [`set`](Self::set) on the key it
/// is reacting to recurses synchronously (the internal lock is released
/// before callbacks run, so this cannot deadlock).
pub struct PluginStore {
    items: RwLock<HashMap<String, StoreEntry>>,
}

impl PluginStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }

    /// The current value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<StoreValue> {
        self.items.read().get(key).and_then(|e| e.value.clone())
    }

    /// Typed accessor: the current value for `key`, downcast to `T`.
    pub fn get_as<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.get(key).and_then(|v| v.downcast::<T>().ok())
    }

    /// Replace the value for `key`, notifying that key's subscribers if (and
    /// only if) `value` is a different allocation from the stored one.
    ///
    /// Replacing a value with the same `Arc` is silent by contract; pass a
    /// fresh container to signal a change.
    pub fn set(&self, key: &str, value: StoreValue) {
        let to_notify = {
            let mut items = self.items.write();
            let entry = items.entry(key.to_owned()).or_default();
            let changed = match &entry.value {
                Some(old) => !same_allocation(old, &value),
                None => true,
            };
            entry.value = Some(value.clone());
            if changed {
                entry.subscribers.clone()
            } else {
                Vec::new()
            }
        };
        // Lock is released: subscribers may freely read or re-enter `set`.
        trace!(
            "store set {key:?}: notifying {} subscriber(s)",
            to_notify.len()
        );
        for subscriber in &to_notify {
            subscriber(&value);
        }
    }

    /// Register `subscriber` for `key`, keeping subscription order. Adding the
    /// same `Arc` twice retains a single registration.
    pub fn subscribe(&self, key: &str, subscriber: StoreSubscriber) {
        let mut items = self.items.write();
        let entry = items.entry(key.to_owned()).or_default();
        if !entry
            .subscribers
            .iter()
            .any(|s| same_subscriber(s, &subscriber))
        {
            entry.subscribers.push(subscriber);
        }
    }

    /// Remove the exact `subscriber` registration for `key`. Unknown
    /// callbacks are a no-op.
    pub fn unsubscribe(&self, key: &str, subscriber: &StoreSubscriber) {
        let mut items = self.items.write();
        if let Some(entry) = items.get_mut(key) {
            entry.subscribers.retain(|s| !same_subscriber(s, subscriber));
        }
    }

    /// Number of live subscriptions for `key`.
    pub fn subscriber_count(&self, key: &str) -> usize {
        self.items
            .read()
            .get(key)
            .map_or(0, |e| e.subscribers.len())
    }
}

impl Default for PluginStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PluginStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let items = self.items.read();
        f.debug_struct("PluginStore")
            .field("keys", &items.keys().collect::<Vec<_>>())
            .finish()
    }
}

// Compare data addresses only; comparing fat pointers would also compare
// vtable addresses, which are not unique across codegen units.
fn same_allocation(a: &StoreValue, b: &StoreValue) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

fn same_subscriber(a: &StoreSubscriber, b: &StoreSubscriber) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_as_downcasts_to_the_stored_type() {
        let store = PluginStore::new();
        store.set("count", Arc::new(7_u32));

        assert_eq!(store.get_as::<u32>("count").as_deref(), Some(&7));
        assert!(store.get_as::<String>("count").is_none());
    }

    #[test]
    fn setting_the_same_arc_is_silent() {
        let store = PluginStore::new();
        let hits = Arc::new(std::sync::atomic::AtomicUsize::new(0));

        let hits_in_cb = hits.clone();
        store.subscribe(
            "k",
            Arc::new(move |_| {
                hits_in_cb.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }),
        );

        let value: StoreValue = Arc::new(1_u32);
        store.set("k", value.clone());
        store.set("k", value);
        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
