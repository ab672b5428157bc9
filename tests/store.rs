use parking_lot::Mutex;
use richtext_kit::store::{PluginStore, StoreSubscriber, StoreValue};
use std::sync::Arc;

fn recording_subscriber(log: Arc<Mutex<Vec<String>>>, tag: &str) -> StoreSubscriber {
    let tag = tag.to_owned();
    Arc::new(move |value: &StoreValue| {
        let rendered = value
            .clone()
            .downcast::<u32>()
            .map(|v| v.to_string())
            .unwrap_or_else(|_| "?".to_owned());
        log.lock().push(format!("{tag}:{rendered}"));
    })
}

#[test]
fn n_sets_with_fresh_values_notify_exactly_n_times_in_order() {
    let store = PluginStore::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let first = recording_subscriber(log.clone(), "first");
    let second = recording_subscriber(log.clone(), "second");
    store.subscribe("counter", first);
    store.subscribe("counter", second);

    for n in 1..=3_u32 {
        store.set("counter", Arc::new(n));
    }

    // Three changed sets, two subscribers, subscription order per set.
    assert_eq!(
        *log.lock(),
        vec![
            "first:1", "second:1", //
            "first:2", "second:2", //
            "first:3", "second:3",
        ]
    );
}

#[test]
fn subscribe_then_unsubscribe_before_any_set_delivers_nothing() {
    let store = PluginStore::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let subscriber = recording_subscriber(log.clone(), "s");
    store.subscribe("k", subscriber.clone());
    store.unsubscribe("k", &subscriber);

    store.set("k", Arc::new(1_u32));
    store.set("k", Arc::new(2_u32));

    assert!(log.lock().is_empty());
}

#[test]
fn duplicate_subscribe_of_the_same_callback_is_retained_once() {
    let store = PluginStore::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let subscriber = recording_subscriber(log.clone(), "s");
    store.subscribe("k", subscriber.clone());
    store.subscribe("k", subscriber.clone());
    assert_eq!(store.subscriber_count("k"), 1);

    store.set("k", Arc::new(9_u32));
    assert_eq!(*log.lock(), vec!["s:9"]);

    // One unsubscribe fully removes it.
    store.unsubscribe("k", &subscriber);
    assert_eq!(store.subscriber_count("k"), 0);
}

#[test]
fn unsubscribing_a_never_registered_callback_is_a_no_op() {
    let store = PluginStore::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let registered = recording_subscriber(log.clone(), "in");
    let stranger = recording_subscriber(log.clone(), "out");
    store.subscribe("k", registered);

    store.unsubscribe("k", &stranger);
    store.unsubscribe("other", &stranger);

    store.set("k", Arc::new(5_u32));
    assert_eq!(*log.lock(), vec!["in:5"]);
}

#[test]
fn notification_only_reaches_subscribers_of_the_set_key() {
    let store = PluginStore::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    store.subscribe("a", recording_subscriber(log.clone(), "a"));
    store.subscribe("b", recording_subscriber(log.clone(), "b"));

    store.set("a", Arc::new(1_u32));
    assert_eq!(*log.lock(), vec!["a:1"]);
}

#[test]
fn reentrant_set_from_a_subscriber_recurses_synchronously() {
    let store = Arc::new(PluginStore::new());
    let log = Arc::new(Mutex::new(Vec::new()));

    let store_in_cb = store.clone();
    let log_in_cb = log.clone();
    let chaser: StoreSubscriber = Arc::new(move |value: &StoreValue| {
        let n = *value.clone().downcast::<u32>().expect("u32 value");
        log_in_cb.lock().push(n);
        // Chase the value up to 3, re-entering `set` on the same key.
        if n < 3 {
            store_in_cb.set("k", Arc::new(n + 1));
        }
    });
    store.subscribe("k", chaser);

    store.set("k", Arc::new(1_u32));

    // Each nested set delivered before the outer call returned.
    assert_eq!(*log.lock(), vec![1, 2, 3]);
    assert_eq!(store.get_as::<u32>("k").as_deref(), Some(&3));
}

#[test]
fn subscribers_registered_mid_stream_only_see_later_sets() {
    let store = PluginStore::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    store.set("k", Arc::new(1_u32));
    store.subscribe("k", recording_subscriber(log.clone(), "late"));
    store.set("k", Arc::new(2_u32));

    assert_eq!(*log.lock(), vec!["late:2"]);
}
