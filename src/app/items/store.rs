//! 商品存储（进程内、非持久化）
//!
//! 商品按 id 存放在有序映射中。id 单调递增分配且从不复用，
//! 所以按 id 遍历就是插入顺序。

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::debug;

use super::model::{Item, ItemPatch};

/// 存储错误类型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("item {0} not found")]
    NotFound(u64),
}

#[derive(Debug)]
struct StoreState {
    items: BTreeMap<u64, Item>,
    next_id: u64,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// 商品存储句柄，克隆后共享同一份数据
///
/// 写操作持有写锁，读操作持有读锁，读者不会看到写了一半的状态。
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    state: Arc<RwLock<StoreState>>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    // 写锁中途 panic 不会留下半成品状态，直接接管被毒化的锁
    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 按插入顺序返回全部商品的快照
    pub fn list(&self) -> Vec<Item> {
        self.read().items.values().cloned().collect()
    }

    pub fn get(&self, id: u64) -> Result<Item, ItemError> {
        self.read()
            .items
            .get(&id)
            .cloned()
            .ok_or(ItemError::NotFound(id))
    }

    /// 分配新 id 并追加商品，总是成功
    pub fn create(&self, name: String, description: Option<String>, price: f64) -> Item {
        let mut state = self.write();

        let id = state.next_id;
        state.next_id += 1;

        let item = Item {
            id,
            name,
            description,
            price,
            created_at: Utc::now(),
        };
        state.items.insert(id, item.clone());

        debug!("商品已创建: id={}, name={}", item.id, item.name);
        item
    }

    /// 只覆盖补丁中提供的字段，`id` 和 `created_at` 不变
    pub fn update(&self, id: u64, patch: ItemPatch) -> Result<Item, ItemError> {
        let mut state = self.write();
        let item = state.items.get_mut(&id).ok_or(ItemError::NotFound(id))?;

        patch.apply_to(item);

        debug!("商品已更新: id={}", id);
        Ok(item.clone())
    }

    /// 删除商品并返回被删除的记录
    pub fn delete(&self, id: u64) -> Result<Item, ItemError> {
        let removed = self
            .write()
            .items
            .remove(&id)
            .ok_or(ItemError::NotFound(id))?;

        debug!("商品已删除: id={}, name={}", removed.id, removed.name);
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    fn laptop(store: &ItemStore) -> Item {
        store.create("Laptop".to_string(), None, 1499.99)
    }

    #[test]
    fn test_empty_store() {
        let store = ItemStore::new();
        assert!(store.list().is_empty());
        assert!(store.is_empty());
        assert_eq!(store.get(1), Err(ItemError::NotFound(1)));
        assert_eq!(store.get(42), Err(ItemError::NotFound(42)));
    }

    #[test]
    fn test_laptop_lifecycle() {
        let store = ItemStore::new();

        let created = laptop(&store);
        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Laptop");
        assert_eq!(created.description, None);
        assert_eq!(created.price, 1499.99);

        let patch = ItemPatch {
            price: Some(1299.99),
            ..Default::default()
        };
        let updated = store.update(1, patch).unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "Laptop");
        assert_eq!(updated.description, None);
        assert_eq!(updated.price, 1299.99);
        assert_eq!(updated.created_at, created.created_at);

        let deleted = store.delete(1).unwrap();
        assert_eq!(deleted.name, "Laptop");
        assert_eq!(store.get(1), Err(ItemError::NotFound(1)));
    }

    #[test]
    fn test_ids_are_strictly_increasing() {
        let store = ItemStore::new();
        let ids: Vec<u64> = (0..20)
            .map(|i| store.create(format!("item-{}", i), None, i as f64).id)
            .collect();

        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ids.first(), Some(&1));
    }

    #[test]
    fn test_deleted_ids_are_never_reused() {
        let store = ItemStore::new();
        let a = store.create("a".to_string(), None, 1.0);
        let b = store.create("b".to_string(), None, 2.0);

        store.delete(b.id).unwrap();
        store.delete(a.id).unwrap();
        assert!(store.is_empty());

        let c = store.create("c".to_string(), None, 3.0);
        assert_eq!(c.id, 3);
        assert_eq!(store.get(b.id), Err(ItemError::NotFound(b.id)));
    }

    #[test]
    fn test_delete_missing_item() {
        let store = ItemStore::new();
        laptop(&store);
        assert_eq!(store.delete(99), Err(ItemError::NotFound(99)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_missing_item() {
        let store = ItemStore::new();
        let patch = ItemPatch {
            name: Some("Phone".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update(5, patch), Err(ItemError::NotFound(5)));
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let store = ItemStore::new();
        let created = store.create("Desk".to_string(), Some("oak".to_string()), 250.0);

        let updated = store.update(created.id, ItemPatch::default()).unwrap();
        assert_eq!(updated, created);
        assert_eq!(store.get(created.id).unwrap(), created);
    }

    #[test]
    fn test_update_description_can_be_cleared() {
        let store = ItemStore::new();
        let created = store.create("Desk".to_string(), Some("oak".to_string()), 250.0);

        let patch = ItemPatch {
            description: Some(None),
            ..Default::default()
        };
        let updated = store.update(created.id, patch).unwrap();
        assert_eq!(updated.description, None);
        assert_eq!(updated.name, "Desk");
        assert_eq!(updated.price, 250.0);
    }

    #[test]
    fn test_update_keeps_insertion_order() {
        let store = ItemStore::new();
        for name in ["first", "second", "third"] {
            store.create(name.to_string(), None, 1.0);
        }

        let patch = ItemPatch {
            name: Some("renamed".to_string()),
            ..Default::default()
        };
        store.update(1, patch).unwrap();
        store.delete(2).unwrap();

        let names: Vec<String> = store.list().into_iter().map(|item| item.name).collect();
        assert_eq!(names, vec!["renamed", "third"]);
    }

    #[test]
    fn test_price_is_not_range_checked() {
        let store = ItemStore::new();
        assert_eq!(store.create("free".to_string(), None, 0.0).price, 0.0);
        assert_eq!(store.create("refund".to_string(), None, -10.5).price, -10.5);
    }

    #[test]
    fn test_create_then_get_round_trip() {
        let store = ItemStore::new();
        let created = store.create("Mouse".to_string(), Some("wireless".to_string()), 29.9);
        assert_eq!(store.get(created.id).unwrap(), created);
    }

    #[test]
    fn test_list_len_tracks_creates_and_deletes() {
        let store = ItemStore::new();
        for i in 0..10 {
            store.create(format!("item-{}", i), None, 1.0);
        }
        for id in [2, 4, 6] {
            store.delete(id).unwrap();
        }
        assert!(store.delete(4).is_err());
        assert_eq!(store.list().len(), 7);
    }

    #[test]
    fn test_concurrent_creates_get_unique_ids() {
        let store = ItemStore::new();
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                thread::spawn(move || {
                    (0..100)
                        .map(|i| store.create(format!("t{}-{}", t, i), None, 1.0).id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id), "id {} assigned twice", id);
            }
        }
        assert_eq!(ids.len(), 800);
        assert_eq!(store.len(), 800);
        assert_eq!(store.create("last".to_string(), None, 1.0).id, 801);
    }
}
