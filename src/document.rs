use crate::error::EditorResult;
use crate::selection::SelectionSnapshot;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of an addressable unit of document content.
///
/// Keys are owned by the external document model; [`BlockKey::random`] is only
/// used when the host asks the toolkit to mint one for a freshly inserted
/// block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Mint a fresh, globally unique key.
    pub fn random() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// The persisted per-block data map, owned by the host document.
pub type BlockData = Map<String, Value>;

/// Persisted dimensions of a resizable block.
///
/// Only the width is stored; height is re-derived from the block's aspect
/// ratio at render time, so `{ "width": n }` is the entire persisted shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockDimensionData {
    pub width: f32,
}

impl BlockDimensionData {
    pub fn new(width: f32) -> Self {
        Self { width }
    }

    /// Read the dimension data back out of a block's data map, if present.
    pub fn from_block_data(data: &BlockData) -> Option<Self> {
        let width = data.get("width")?.as_f64()?;
        Some(Self {
            width: width as f32,
        })
    }

    /// Merge the dimension data into a block's data map.
    pub fn write_to(&self, data: &mut BlockData) {
        data.insert("width".to_owned(), Value::from(f64::from(self.width)));
    }
}

/// Seam to the external document/text engine.
///
/// The toolkit never mutates document content directly; it reads the current
/// selection and per-block data, and commits finalized block dimensions back
/// through this trait as a data-map patch.
pub trait DocumentHost {
    /// The latest selection snapshot.
    fn selection(&self) -> SelectionSnapshot;

    /// Read access to a block's persisted data map.
    fn block_data(&self, key: &BlockKey) -> Option<BlockData>;

    /// Apply a data-map patch to one block, producing the next immutable
    /// document state inside the host.
    fn update_block_data(&mut self, key: &BlockKey, patch: BlockData) -> EditorResult<()>;
}
