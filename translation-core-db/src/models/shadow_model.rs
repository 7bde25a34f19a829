use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};
use translation_core_api::{LanguageCode, ResolvedConfig, TranslationError, TranslationResult};
use uuid::Uuid;

use super::shadow_row::ShadowRow;
use crate::naming::NameScheme;
use crate::utils::fingerprint;

/// # Documentation
/// Definition of a shadow model: where the translations of one entity type
/// live and how they point back at their owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowModel {
    /// Globally unique model name, e.g. `PostLocalized`
    pub name: String,

    /// Entity the rows belong to, e.g. `Post`
    pub owner_entity: String,

    pub table_name: String,

    /// Column referencing the owner's primary key
    pub foreign_key: String,

    /// Column holding the language code
    pub language_field: String,

    /// Name of the relation from a shadow row back to its owner
    pub back_relation: String,

    /// Translated value columns, in configuration order
    pub columns: Vec<String>,
}

impl ShadowModel {
    pub fn from_config(config: &ResolvedConfig, scheme: &NameScheme) -> Self {
        Self {
            name: config.model_name.clone(),
            owner_entity: config.entity_name.clone(),
            table_name: config.table_name.clone(),
            foreign_key: config.foreign_key.clone(),
            language_field: config.language_field.clone(),
            back_relation: "owner".to_string(),
            columns: config
                .translation_attributes
                .iter()
                .map(|field| scheme.shadow_column(field))
                .collect(),
        }
    }

    /// A transient row with every value column set to its empty default.
    pub fn new_row(&self, owner_id: Uuid, language: LanguageCode) -> ShadowRow {
        let mut row = ShadowRow::new(owner_id, language);
        for column in &self.columns {
            row.set_column(column.clone(), Some(String::new()));
        }
        row
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn fingerprint(&self) -> TranslationResult<i64> {
        fingerprint(self)
    }
}

struct RegisteredModel {
    model: Arc<ShadowModel>,
    fingerprint: i64,
}

/// Registry of shadow model definitions, keyed by model name.
///
/// Each name is defined at most once; later requests with an identical
/// definition get the same `Arc` back.
#[derive(Default)]
pub struct ShadowModelRegistry {
    models: RwLock<HashMap<String, RegisteredModel>>,
}

static GLOBAL_REGISTRY: OnceLock<ShadowModelRegistry> = OnceLock::new();

impl ShadowModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static ShadowModelRegistry {
        GLOBAL_REGISTRY.get_or_init(ShadowModelRegistry::new)
    }

    /// Returns the registered model named like `model`, defining it first if needed.
    pub fn ensure(&self, model: ShadowModel) -> TranslationResult<Arc<ShadowModel>> {
        let fingerprint = model.fingerprint()?;

        if let Some(existing) = self.models.read().get(&model.name) {
            return Self::check_same(existing, &model.name, fingerprint);
        }

        let mut models = self.models.write();
        if let Some(existing) = models.get(&model.name) {
            return Self::check_same(existing, &model.name, fingerprint);
        }

        info!(
            model = %model.name,
            table = %model.table_name,
            foreign_key = %model.foreign_key,
            "Defining shadow model"
        );
        let name = model.name.clone();
        let model = Arc::new(model);
        models.insert(
            name,
            RegisteredModel {
                model: model.clone(),
                fingerprint,
            },
        );
        Ok(model)
    }

    /// Registers a statically declared model. Same rules as [`ensure`](Self::ensure).
    pub fn declare(&self, model: ShadowModel) -> TranslationResult<Arc<ShadowModel>> {
        self.ensure(model)
    }

    pub fn resolve(&self, name: &str) -> Option<Arc<ShadowModel>> {
        self.models.read().get(name).map(|r| r.model.clone())
    }

    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }

    fn check_same(
        existing: &RegisteredModel,
        name: &str,
        fingerprint: i64,
    ) -> TranslationResult<Arc<ShadowModel>> {
        if existing.fingerprint == fingerprint {
            debug!(model = %name, "Reusing shadow model definition");
            Ok(existing.model.clone())
        } else {
            Err(TranslationError::Configuration(format!(
                "Shadow model '{name}' is already defined with a different table, key or columns"
            )))
        }
    }
}

/// Produces the shadow model for a configuration, defining it on first use
/// when dynamic definition is enabled.
pub struct ShadowModelProvider<'a> {
    registry: &'a ShadowModelRegistry,
}

impl<'a> ShadowModelProvider<'a> {
    pub fn new(registry: &'a ShadowModelRegistry) -> Self {
        Self { registry }
    }

    pub fn ensure_shadow_model(
        &self,
        config: &ResolvedConfig,
        scheme: &NameScheme,
    ) -> TranslationResult<Arc<ShadowModel>> {
        if config.dynamic_shadow_model {
            return self.registry.ensure(ShadowModel::from_config(config, scheme));
        }

        let model = self.registry.resolve(&config.model_name).ok_or_else(|| {
            TranslationError::Configuration(format!(
                "Shadow model '{}' is not declared and dynamic definition is disabled",
                config.model_name
            ))
        })?;
        for field in &config.translation_attributes {
            let column = scheme.shadow_column(field);
            if !model.has_column(&column) {
                return Err(TranslationError::Configuration(format!(
                    "Shadow model '{}' has no column '{column}'",
                    model.name
                )));
            }
        }
        Ok(model)
    }
}
