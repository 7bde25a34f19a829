//! Keeps a primary entity and its per-language shadow rows in step across
//! construction, load, save and delete.
//!
//! The entity owns a [`TranslationSync`] collaborator (usually shared through
//! an `Arc`) and calls its hooks explicitly from its own lifecycle.

pub mod construct;
pub mod delete;
pub mod load;
pub mod save;

use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;
use translation_core_api::{
    LanguageCode, LanguageContext, ResolvedConfig, RuleSet, TranslationConfig, TranslationResult,
};

use crate::bridge::PropertyBridge;
use crate::models::{
    AttributeStore, ShadowModel, ShadowModelProvider, ShadowModelRegistry, Translatable,
    TranslationState,
};
use crate::naming::NameScheme;
use crate::projection::RuleProjector;
use crate::relation::{RelationRegistrar, RelationSet};

pub struct TranslationSync<E: Translatable> {
    config: Arc<ResolvedConfig>,
    scheme: NameScheme,
    model: Arc<ShadowModel>,
    rules: RuleSet,
    virtual_names: Arc<BTreeSet<String>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Translatable> TranslationSync<E> {
    /// Attaches the behavior to `E`, defining its shadow model in the global registry.
    pub fn attach(config: &TranslationConfig) -> TranslationResult<Self> {
        Self::attach_with_registry(config, ShadowModelRegistry::global())
    }

    pub fn attach_with_registry(
        config: &TranslationConfig,
        registry: &ShadowModelRegistry,
    ) -> TranslationResult<Self> {
        let config = config.resolve(E::ENTITY_NAME, E::TABLE_NAME)?;
        let scheme = NameScheme::new(config.localized_prefix.clone());
        let model = ShadowModelProvider::new(registry).ensure_shadow_model(&config, &scheme)?;

        let entity_rules = E::rules();
        let projected = RuleProjector::new(
            &config.languages,
            &config.translation_attributes,
            config.force_overwrite,
        )
        .project(&entity_rules);
        let mut rules = RuleSet::new(entity_rules);
        rules.extend(projected);

        let virtual_names: BTreeSet<String> = config
            .translation_attributes
            .iter()
            .flat_map(|field| {
                config
                    .languages
                    .iter()
                    .map(move |language| NameScheme::virtual_attr(field, language.as_str()))
            })
            .collect();

        debug!(
            entity = E::ENTITY_NAME,
            model = %model.name,
            languages = config.languages.len(),
            rules = rules.rules().len(),
            "Attached translation behavior"
        );

        Ok(Self {
            config: Arc::new(config),
            scheme,
            model,
            rules,
            virtual_names: Arc::new(virtual_names),
            _entity: PhantomData,
        })
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn name_scheme(&self) -> &NameScheme {
        &self.scheme
    }

    pub fn shadow_model(&self) -> &Arc<ShadowModel> {
        &self.model
    }

    /// Entity rules followed by the rules projected onto virtual attributes.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Fresh per-instance state with both relations registered, the localized
    /// one scoped to the context language.
    pub fn new_state(&self, ctx: &LanguageContext) -> TranslationState {
        let mut relations = RelationSet::default();
        let registrar = self.registrar();
        registrar.register_internationalized(&mut relations);
        registrar.register_localized(&mut relations, self.effective_language(ctx));
        TranslationState::new(AttributeStore::new(self.virtual_names.clone()), relations)
    }

    /// Runs the entity rules and the projected rules for the active scenario.
    pub fn validate(&self, entity: &E) -> TranslationResult<()> {
        self.rules
            .validate(entity.scenario(), |name| entity.attribute(name).ok().flatten())
    }

    fn registrar(&self) -> RelationRegistrar<'_> {
        RelationRegistrar::new(&self.config, &self.model)
    }

    /// The context language when configured, else the default language.
    fn effective_language(&self, ctx: &LanguageContext) -> &LanguageCode {
        self.config
            .languages
            .get(ctx.current().as_str())
            .unwrap_or(&self.config.default_language)
    }
}
