use serde_json::Value;

use crate::db::Database;
use crate::error::StorageError;
use crate::models::{Record, RecordJson};

/// Numeric fields that read as 0 when stored as `null`.
const ZERO_WHEN_NULL: [&str; 3] = ["amount", "salaryNet", "swilePayment"];

/// What was read back from the store.
#[derive(Debug, Default)]
pub(crate) struct Loaded {
    pub(crate) records: Vec<Record>,
    /// One message per stored entry that could not be read.
    pub(crate) skipped: Vec<String>,
}

/// Read the whole collection stored under `key`. A missing key is an empty
/// collection and text that is not a JSON array is `StorageError::Corrupt`.
/// Entries are read one by one, so a single bad entry is skipped and
/// reported instead of taking the rest of the collection with it.
pub(crate) fn load_records(db: &Database, key: &str) -> Result<Loaded, StorageError> {
    let Some(text) = db.get(key)? else {
        return Ok(Loaded::default());
    };
    let entries: Vec<Value> = serde_json::from_str(&text).map_err(StorageError::Corrupt)?;

    let mut loaded = Loaded::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RecordJson>(fill_nulls(entry)) {
            Ok(row) => loaded.records.push(Record::from(row)),
            Err(err) => loaded.skipped.push(format!("entry {}: {err}", index + 1)),
        }
    }
    Ok(loaded)
}

/// Null amounts become 0 and a null transport default is treated as absent.
fn fill_nulls(mut entry: Value) -> Value {
    if let Value::Object(map) = &mut entry {
        for field in ZERO_WHEN_NULL {
            if map.get(field).is_some_and(Value::is_null) {
                map.insert(field.to_string(), Value::from(0));
            }
        }
        if map.get("transportDefault").is_some_and(Value::is_null) {
            map.remove("transportDefault");
        }
    }
    entry
}

/// Replace the stored collection with `records` in one write.
pub(crate) fn save_records(db: &Database, key: &str, records: &[Record]) -> Result<(), StorageError> {
    let rows: Vec<RecordJson> = records.iter().map(RecordJson::from).collect();
    let text = serde_json::to_string(&rows).map_err(StorageError::Serialize)?;
    db.set(key, &text)?;
    Ok(())
}

pub(crate) fn clear_records(db: &Database, key: &str) -> Result<(), StorageError> {
    db.remove(key)?;
    Ok(())
}
