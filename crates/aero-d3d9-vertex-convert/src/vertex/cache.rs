use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

use super::attrib::AttributeKey;
use super::format_map::{resolve_for_caps, ConversionDescriptor};
use crate::caps::DeclTypeCaps;

/// Every attribute format resolved for one capability set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTable {
    caps: DeclTypeCaps,
    entries: [ConversionDescriptor; AttributeKey::COUNT],
}

impl ResolvedTable {
    pub fn build(caps: DeclTypeCaps) -> Self {
        let entries = std::array::from_fn(|index| {
            let key = AttributeKey::from_index(index);
            let desc = resolve_for_caps(key, caps);
            trace!(
                ?key,
                native_format = %desc.native_format,
                required_caps = desc.required_caps.bits(),
                "resolved D3D9 vertex format"
            );
            desc
        });
        Self { caps, entries }
    }

    /// The capability set this table was built for.
    pub fn caps(&self) -> DeclTypeCaps {
        self.caps
    }

    pub fn get(&self, key: AttributeKey) -> &ConversionDescriptor {
        &self.entries[key.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, &ConversionDescriptor)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, desc)| (AttributeKey::from_index(index), desc))
    }

    /// Number of entries that use an optional (caps-gated) declaration type.
    pub fn optional_type_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|desc| !desc.required_caps.is_empty())
            .count()
    }
}

/// Memoizes the [`ResolvedTable`] for the most recently seen capability set.
///
/// A caps change rebuilds the whole table; entries are never patched individually. The new table
/// is built outside the lock and published with a single swap, so readers always see a complete
/// table.
#[derive(Debug, Default)]
pub struct VertexFormatCache {
    table: RwLock<Option<Arc<ResolvedTable>>>,
    rebuilds: AtomicU64,
}

impl VertexFormatCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache with the table for `caps` already built.
    pub fn with_caps(caps: DeclTypeCaps) -> Self {
        let cache = Self::new();
        cache.table(caps);
        cache
    }

    pub fn get(&self, caps: DeclTypeCaps, key: AttributeKey) -> ConversionDescriptor {
        *self.table(caps).get(key)
    }

    /// The table for `caps`, rebuilding it if the cached one was built for different caps.
    pub fn table(&self, caps: DeclTypeCaps) -> Arc<ResolvedTable> {
        if let Some(table) = self.cached_table_for(caps) {
            return table;
        }

        let table = Arc::new(ResolvedTable::build(caps));
        let mut slot = self.table.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = slot.as_ref().filter(|t| t.caps() == caps) {
            // Another thread published the same table while we were building ours.
            return Arc::clone(existing);
        }
        debug!(
            previous_caps = ?slot.as_ref().map(|t| t.caps()),
            ?caps,
            optional_types = table.optional_type_count(),
            "rebuilt D3D9 vertex format table"
        );
        *slot = Some(Arc::clone(&table));
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
        table
    }

    /// Caps of the currently cached table, if any.
    pub fn cached_caps(&self) -> Option<DeclTypeCaps> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|t| t.caps())
    }

    /// How many times a table has been built and published.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds.load(Ordering::Relaxed)
    }

    fn cached_table_for(&self, caps: DeclTypeCaps) -> Option<Arc<ResolvedTable>> {
        let slot = self.table.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().filter(|t| t.caps() == caps).map(Arc::clone)
    }
}
