use parking_lot::RwLock;

use super::{check_record, RawRecord, RecordStore, StoreResult};

/// Хранилище в памяти процесса с той же семантикой, что и
/// [`FlatFileStore`](super::FlatFileStore): только дозапись, первый
/// совпавший ключ.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn append(
        &self,
        key: &str,
        value: &str,
    ) -> StoreResult<()> {
        check_record(key, value)?;
        self.records
            .write()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn find_first(
        &self,
        key: &str,
    ) -> StoreResult<Option<RawRecord>> {
        let records = self.records.read();
        Ok(records
            .iter()
            .enumerate()
            .find(|(_, (k, _))| k == key)
            .map(|(idx, (k, v))| RawRecord {
                line: idx + 1,
                key: k.clone(),
                value: v.clone(),
            }))
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
