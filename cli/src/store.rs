use crate::snip::SnipRecord;
use anyhow::{anyhow, bail, Result};
use snip_core::{DocId, DocumentStore, Error};

/// Sled-backed store for snip records, keyed by uuid bytes.
pub struct SnipStore {
    snips: sled::Tree,
}

impl SnipStore {
    pub fn open(db: &sled::Db) -> Result<Self> {
        Ok(Self {
            snips: db.open_tree("snips")?,
        })
    }

    pub fn insert(&self, rec: &SnipRecord) -> Result<()> {
        let value = bincode::serialize(rec)?;
        self.snips.insert(rec.id.as_bytes(), value)?;
        Ok(())
    }

    pub fn get(&self, id: DocId) -> Result<SnipRecord> {
        match self.snips.get(id.as_bytes())? {
            Some(value) => Ok(bincode::deserialize(&value)?),
            None => bail!(Error::UnknownDocument(id)),
        }
    }

    pub fn remove(&self, id: DocId) -> Result<()> {
        self.snips.remove(id.as_bytes())?;
        Ok(())
    }

    pub fn ids(&self) -> Result<Vec<DocId>> {
        let mut ids = Vec::new();
        for row in self.snips.iter() {
            let (key, _) = row?;
            ids.push(DocId::from_slice(&key).map_err(|_| anyhow!("malformed key in snip tree"))?);
        }
        Ok(ids)
    }

    /// List records in key order, all of them when `limit` is zero.
    pub fn list(&self, limit: usize) -> Result<Vec<SnipRecord>> {
        let mut records = Vec::new();
        for row in self.snips.iter() {
            let (_, value) = row?;
            records.push(bincode::deserialize::<SnipRecord>(&value)?);
            if limit != 0 && records.len() == limit {
                break;
            }
        }
        Ok(records)
    }

    /// Resolve a full uuid or a unique hyphenated-form prefix to an id.
    /// Ambiguous and unknown prefixes are errors, never panics.
    pub fn resolve(&self, prefix: &str) -> Result<DocId> {
        if prefix.is_empty() || prefix.len() > 36 {
            bail!(Error::MalformedId(prefix.to_owned()));
        }
        if let Ok(id) = prefix.parse::<DocId>() {
            // full id supplied, verify it exists
            self.get(id)?;
            return Ok(id);
        }

        let mut matched: Option<DocId> = None;
        for id in self.ids()? {
            if id.hyphenated().to_string().starts_with(prefix) {
                if matched.is_some() {
                    bail!(Error::AmbiguousId(prefix.to_owned()));
                }
                matched = Some(id);
            }
        }
        matched.ok_or_else(|| anyhow!("no snip matching id {prefix:?}"))
    }
}

impl DocumentStore for SnipStore {
    fn text(&self, id: DocId) -> snip_core::Result<String> {
        match self.snips.get(id.as_bytes())? {
            Some(value) => {
                let rec: SnipRecord = bincode::deserialize(&value)?;
                Ok(rec.text)
            }
            None => Err(Error::UnknownDocument(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (sled::Db, SnipStore) {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let store = SnipStore::open(&db).unwrap();
        (db, store)
    }

    #[test]
    fn insert_and_get_round_trip() {
        let (_db, store) = temp_store();
        let rec = SnipRecord::new("test".into(), "some body text".into());
        store.insert(&rec).unwrap();
        let got = store.get(rec.id).unwrap();
        assert_eq!(got.name, "test");
        assert_eq!(got.text, "some body text");
    }

    #[test]
    fn resolve_by_prefix() {
        let (_db, store) = temp_store();
        let rec = SnipRecord::new("test".into(), "body".into());
        store.insert(&rec).unwrap();
        let prefix = &rec.id.hyphenated().to_string()[..8];
        assert_eq!(store.resolve(prefix).unwrap(), rec.id);
        assert!(store.resolve("zzzzzzzz").is_err());
        assert!(store.resolve("").is_err());
    }
}
