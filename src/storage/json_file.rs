use super::{sorted_records, EntityStore, StoreError};
use crate::framework::ActorEntity;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A collection persisted as a pretty-printed JSON array of records.
///
/// A missing or empty file reads as an empty collection. Writes go to a temporary
/// sibling file that is then renamed over the original, so a crash mid-write leaves
/// the previous contents intact.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _entity: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _entity: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl<T: ActorEntity> EntityStore<T> for JsonFileStore<T> {
    async fn load_all(&self) -> Result<HashMap<T::Id, T>, StoreError> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Store file missing, starting empty");
                return Ok(HashMap::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            warn!(path = %self.path.display(), "Store file is empty");
            return Ok(HashMap::new());
        }

        let records: Vec<T> = serde_json::from_slice(&data).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        let mut items = HashMap::with_capacity(records.len());
        for record in records {
            let id = record.id().clone();
            if items.insert(id.clone(), record).is_some() {
                warn!(path = %self.path.display(), %id, "Duplicate record, keeping the last one");
            }
        }
        Ok(items)
    }

    async fn replace_all(&self, items: &HashMap<T::Id, T>) -> Result<(), StoreError> {
        let records = sorted_records(items);
        let json = serde_json::to_vec_pretty(&records).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), records = records.len(), "Store written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InventoryItem, Order, OrderItem, OrderStatus};

    fn flour(quantity: f64) -> InventoryItem {
        InventoryItem {
            id: "flour".into(),
            name: "Flour".into(),
            unit: "kg".into(),
            quantity,
        }
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::<InventoryItem>::new(dir.path().join("inventory.json"));

        let items = store.load_all().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn empty_file_loads_as_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, "  \n").unwrap();
        let store = JsonFileStore::<InventoryItem>::new(path);

        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn written_records_use_wire_field_names_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("inventory.json");
        let store = JsonFileStore::<InventoryItem>::new(&path);

        let mut items = HashMap::new();
        items.insert("flour".to_string(), flour(5.0));
        store.replace_all(&items).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"ingredient_id\": \"flour\""));
        assert!(!dir.path().join("nested").join("inventory.json.tmp").exists());

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded, items);
    }

    #[tokio::test]
    async fn orders_persist_status_and_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        let store = JsonFileStore::<Order>::new(&path);

        let order = Order {
            id: "order1".into(),
            customer_name: "Ann".into(),
            items: vec![OrderItem {
                product_id: "bread".into(),
                quantity: 2,
            }],
            status: OrderStatus::Closed,
            created_at: "2024-01-02 03:04:05".into(),
        };
        let mut items = HashMap::new();
        items.insert(order.id.clone(), order);
        store.replace_all(&items).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"order_id\": \"order1\""));
        assert!(raw.contains("\"status\": \"closed\""));
        assert!(raw.contains("\"created_at\": \"2024-01-02 03:04:05\""));
    }

    #[tokio::test]
    async fn malformed_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::<InventoryItem>::new(path);

        assert!(matches!(
            store.load_all().await,
            Err(StoreError::Json { .. })
        ));
    }
}
