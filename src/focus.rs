use crate::document::BlockKey;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

/// Registry of focus-capable blocks that are currently mounted.
///
/// Interactions that span frames (resize drags in particular) check
/// [`has`](Self::has) before touching a block's geometry, so a block deleted
/// from the document mid-interaction turns the rest of the interaction into a
/// no-op instead of a stale read.
pub struct BlockKeyStore {
    keys: RwLock<HashSet<BlockKey>>,
}

impl BlockKeyStore {
    pub fn new() -> Self {
        Self {
            keys: RwLock::new(HashSet::new()),
        }
    }

    /// Insert `key`. Inserting a present key is a no-op.
    pub fn add(&self, key: BlockKey) {
        self.keys.write().insert(key);
    }

    /// Remove `key`. Removing an absent key is a no-op, and a removed key is
    /// absent regardless of how many times it was added.
    pub fn remove(&self, key: &BlockKey) {
        self.keys.write().remove(key);
    }

    pub fn has(&self, key: &BlockKey) -> bool {
        self.keys.read().contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.read().is_empty()
    }
}

impl Default for BlockKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BlockKeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockKeyStore")
            .field("keys", &self.keys.read())
            .finish()
    }
}

/// Scoped registration of a focus-capable block.
///
/// Construction registers the key, drop deregisters it, pairing the
/// registration with the wrapped renderable's lifetime. As long as mounts own
/// a guard, mount/unmount pairing is deterministic and the registry cannot
/// leak.
pub struct FocusGuard {
    store: Arc<BlockKeyStore>,
    key: BlockKey,
}

impl FocusGuard {
    pub fn new(store: Arc<BlockKeyStore>, key: BlockKey) -> Self {
        store.add(key.clone());
        Self { store, key }
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }
}

impl Drop for FocusGuard {
    fn drop(&mut self) {
        self.store.remove(&self.key);
    }
}

impl std::fmt::Debug for FocusGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusGuard").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_registers_for_its_lifetime() {
        let store = Arc::new(BlockKeyStore::new());
        let key = BlockKey::new("b1");

        {
            let _guard = FocusGuard::new(store.clone(), key.clone());
            assert!(store.has(&key));
        }
        assert!(!store.has(&key));
    }
}
