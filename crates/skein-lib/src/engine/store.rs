//! Normalized result storage.
//!
//! One row per fetched object. Root is row 0. Link values are stored as
//! row references, so an object fetched once is never copied.

use indexmap::IndexMap;

use crate::Value;
use crate::denormalize::ResultProxy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowId(u32);

impl RowId {
    pub const ROOT: RowId = RowId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Slot {
    Value(Value),
    /// Optional link without a target.
    Null,
    Ref(RowId),
    Refs(Vec<RowId>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Store {
    rows: Vec<IndexMap<String, Slot>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Store holding just the (empty) root row.
    pub fn new() -> Self {
        Self {
            rows: vec![IndexMap::new()],
        }
    }

    pub fn push_row(&mut self) -> RowId {
        let index = u32::try_from(self.rows.len()).expect("store holds at most u32::MAX rows");
        let id = RowId(index);
        self.rows.push(IndexMap::new());
        id
    }

    pub fn set(&mut self, row: RowId, key: impl Into<String>, slot: Slot) {
        self.rows[row.index()].insert(key.into(), slot);
    }

    pub fn get(&self, row: RowId, key: &str) -> Option<&Slot> {
        self.rows.get(row.index())?.get(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Proxy positioned at the root row.
    pub fn proxy(&self) -> StoreProxy<'_> {
        StoreProxy {
            store: self,
            row: RowId::ROOT,
        }
    }
}

/// [`ResultProxy`] over a [`Store`], positioned at one row. Data-type
/// values come back whole from [`ResultProxy::value`].
#[derive(Clone, Copy, Debug)]
pub struct StoreProxy<'a> {
    store: &'a Store,
    row: RowId,
}

impl<'a> StoreProxy<'a> {
    fn at(&self, row: RowId) -> Self {
        Self {
            store: self.store,
            row,
        }
    }

    fn slot(&self, key: &str) -> Option<&'a Slot> {
        self.store.get(self.row, key)
    }
}

impl ResultProxy for StoreProxy<'_> {
    fn value(&self, key: &str) -> Option<Value> {
        match self.slot(key)? {
            Slot::Value(value) => Some(value.clone()),
            Slot::Null => Some(Value::Null),
            Slot::Ref(_) | Slot::Refs(_) => None,
        }
    }

    fn object(&self, key: &str) -> Option<Option<Self>> {
        match self.slot(key)? {
            Slot::Ref(target) => Some(Some(self.at(*target))),
            Slot::Null => Some(None),
            Slot::Value(_) | Slot::Refs(_) => None,
        }
    }

    fn list(&self, key: &str) -> Option<Vec<Self>> {
        match self.slot(key)? {
            Slot::Refs(targets) => Some(targets.iter().map(|&row| self.at(row)).collect()),
            _ => None,
        }
    }
}
