use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::atomic::{AtomicU32, Ordering};

use arrow::array::ArrayRef;
use rustc_hash::FxHashMap;
use sciql_result::{Error, Result};
use sciql_types::ColumnId;

/// In-memory registry of materialised columns addressed by handle.
///
/// Operators receive and return [`ColumnId`]s; a handle that does not resolve
/// is reported as [`Error::MissingObject`].
pub struct ColumnCatalog {
    next_id: AtomicU32,
    columns: RwLock<FxHashMap<ColumnId, ArrayRef>>,
}

impl Default for ColumnCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnCatalog {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU32::new(1),
            columns: RwLock::new(FxHashMap::default()),
        }
    }

    /// Register a column and hand out a fresh handle for it.
    pub fn register(&self, column: ArrayRef) -> Result<ColumnId> {
        let id = self
            .next_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |cur| cur.checked_add(1))
            .map_err(|_| Error::Internal("column handle space overflow".to_string()))?;
        self.write()?.insert(id, column);
        tracing::trace!(column = id, "registered column");
        Ok(id)
    }

    pub fn get(&self, id: ColumnId) -> Result<ArrayRef> {
        self.read()?
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::MissingObject(format!("column {id}")))
    }

    pub fn remove(&self, id: ColumnId) -> Result<ArrayRef> {
        self.write()?
            .remove(&id)
            .ok_or_else(|| Error::MissingObject(format!("column {id}")))
    }

    pub fn contains(&self, id: ColumnId) -> Result<bool> {
        Ok(self.read()?.contains_key(&id))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, FxHashMap<ColumnId, ArrayRef>>> {
        self.columns
            .read()
            .map_err(|_| Error::Internal("column catalog read lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, FxHashMap<ColumnId, ArrayRef>>> {
        self.columns
            .write()
            .map_err(|_| Error::Internal("column catalog write lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int32Array;
    use std::sync::Arc;

    #[test]
    fn register_get_remove() {
        let catalog = ColumnCatalog::new();
        let a = catalog.register(Arc::new(Int32Array::from(vec![1, 2]))).unwrap();
        let b = catalog.register(Arc::new(Int32Array::from(vec![3]))).unwrap();
        assert_ne!(a, b);
        assert_eq!(catalog.len().unwrap(), 2);
        assert_eq!(catalog.get(a).unwrap().len(), 2);

        catalog.remove(a).unwrap();
        assert!(!catalog.contains(a).unwrap());
        assert!(catalog.contains(b).unwrap());
        assert!(matches!(catalog.get(a), Err(Error::MissingObject(_))));
        assert!(matches!(catalog.remove(a), Err(Error::MissingObject(_))));
    }

    #[test]
    fn poisoned_catalog_reports_internal_error() {
        let catalog = Arc::new(ColumnCatalog::new());
        let id = catalog.register(Arc::new(Int32Array::from(vec![1]))).unwrap();
        let writer = Arc::clone(&catalog);
        let joined: std::thread::Result<()> = std::thread::spawn(move || {
            let _guard = writer.columns.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(joined.is_err());

        assert!(matches!(catalog.contains(id), Err(Error::Internal(_))));
        assert!(matches!(catalog.len(), Err(Error::Internal(_))));
        assert!(matches!(catalog.is_empty(), Err(Error::Internal(_))));
        assert!(matches!(catalog.get(id), Err(Error::Internal(_))));
    }
}
