use async_trait::async_trait;
use parking_lot::Mutex;
use sqlx::Database;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::marker::PhantomData;
use translation_core_api::LanguageCode;
use uuid::Uuid;

use super::{CreateBatch, DeleteByOwner, LoadByOwner, UpdateBatch};
use crate::models::ShadowRow;

/// Shadow row store kept in memory, enforcing the (owner_id, language)
/// uniqueness a real table would.
pub struct InMemoryShadowRepository<DB: Database> {
    rows: Mutex<BTreeMap<Uuid, ShadowRow>>,
    failing_language: Mutex<Option<LanguageCode>>,
    failing_delete: Mutex<bool>,
    _db: PhantomData<fn() -> DB>,
}

impl<DB: Database> Default for InMemoryShadowRepository<DB> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            failing_language: Mutex::new(None),
            failing_delete: Mutex::new(false),
            _db: PhantomData,
        }
    }
}

impl<DB: Database> InMemoryShadowRepository<DB> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored row, ordered by id.
    pub fn rows(&self) -> Vec<ShadowRow> {
        self.rows.lock().values().cloned().collect()
    }

    pub fn rows_of(&self, owner_id: Uuid) -> Vec<ShadowRow> {
        self.rows
            .lock()
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect()
    }

    pub fn insert(&self, row: ShadowRow) {
        self.rows.lock().insert(row.id, row);
    }

    /// Makes every write of a row in `language` fail.
    pub fn fail_writes_for(&self, language: Option<LanguageCode>) {
        *self.failing_language.lock() = language;
    }

    pub fn fail_deletes(&self, fail: bool) {
        *self.failing_delete.lock() = fail;
    }

    fn check_writable(&self, row: &ShadowRow) -> Result<(), Box<dyn Error + Send + Sync>> {
        match self.failing_language.lock().as_ref() {
            Some(language) if *language == row.language => {
                Err(format!("write rejected for language '{language}'").into())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<DB: Database> LoadByOwner<DB, ShadowRow> for InMemoryShadowRepository<DB> {
    async fn load_by_owner(
        &self,
        owner_id: Uuid,
        language: Option<&LanguageCode>,
    ) -> Result<Vec<ShadowRow>, Box<dyn Error + Send + Sync>> {
        Ok(self
            .rows
            .lock()
            .values()
            .filter(|r| r.owner_id == owner_id)
            .filter(|r| language.map_or(true, |l| r.language == *l))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl<DB: Database> CreateBatch<DB, ShadowRow> for InMemoryShadowRepository<DB> {
    async fn create_batch(
        &self,
        items: Vec<ShadowRow>,
    ) -> Result<Vec<ShadowRow>, Box<dyn Error + Send + Sync>> {
        for item in &items {
            self.check_writable(item)?;
        }
        let mut rows = self.rows.lock();
        let mut batch: BTreeSet<(Uuid, &LanguageCode)> = BTreeSet::new();
        for item in &items {
            let duplicate = !batch.insert((item.owner_id, &item.language))
                || rows
                    .values()
                    .any(|r| r.owner_id == item.owner_id && r.language == item.language);
            if duplicate || rows.contains_key(&item.id) {
                return Err(format!(
                    "duplicate shadow row for owner {} and language '{}'",
                    item.owner_id, item.language
                )
                .into());
            }
        }
        for item in &items {
            rows.insert(item.id, item.clone());
        }
        Ok(items)
    }
}

#[async_trait]
impl<DB: Database> UpdateBatch<DB, ShadowRow> for InMemoryShadowRepository<DB> {
    async fn update_batch(
        &self,
        items: Vec<ShadowRow>,
    ) -> Result<Vec<ShadowRow>, Box<dyn Error + Send + Sync>> {
        for item in &items {
            self.check_writable(item)?;
        }
        let mut rows = self.rows.lock();
        for item in &items {
            if !rows.contains_key(&item.id) {
                return Err(format!("shadow row {} does not exist", item.id).into());
            }
        }
        for item in &items {
            rows.insert(item.id, item.clone());
        }
        Ok(items)
    }
}

#[async_trait]
impl<DB: Database> DeleteByOwner<DB> for InMemoryShadowRepository<DB> {
    async fn delete_by_owner(
        &self,
        owner_ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if *self.failing_delete.lock() {
            return Err("delete rejected".into());
        }
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|_, r| !owner_ids.contains(&r.owner_id));
        Ok(before - rows.len())
    }
}
