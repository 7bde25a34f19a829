//! A minimal `Post` entity with translatable `title` and `body`, for tests.

use translation_core_api::{
    LanguageContext, LanguageSet, Rule, RuleKind, TranslationConfig, TranslationError,
    TranslationResult,
};
use uuid::Uuid;

use crate::models::{Identifiable, ShadowModelRegistry, Translatable, TranslationState};
use crate::sync::TranslationSync;

#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub title: Option<String>,
    pub body: Option<String>,
    pub author: Option<String>,
    pub is_new: bool,
    pub scenario: String,
    pub translations: TranslationState,
}

impl Post {
    /// A new post in the `create` scenario, constructed through the sync hooks.
    pub fn create(sync: &TranslationSync<Post>, ctx: &LanguageContext) -> Self {
        Self::with_scenario(sync, ctx, "create")
    }

    pub fn with_scenario(sync: &TranslationSync<Post>, ctx: &LanguageContext, scenario: &str) -> Self {
        let mut post = Post {
            id: Uuid::new_v4(),
            title: None,
            body: None,
            author: None,
            is_new: true,
            scenario: scenario.to_string(),
            translations: sync.new_state(ctx),
        };
        sync.after_construct(&mut post);
        post
    }

    /// A post as the storage layer would hand it back, before any translation overlay.
    pub fn stored(sync: &TranslationSync<Post>, ctx: &LanguageContext, id: Uuid, title: &str) -> Self {
        let mut post = Self::with_scenario(sync, ctx, "update");
        post.id = id;
        post.title = Some(title.to_string());
        post.author = Some("editor@example.com".to_string());
        post.is_new = false;
        post
    }
}

impl Identifiable for Post {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Translatable for Post {
    const ENTITY_NAME: &'static str = "Post";
    const TABLE_NAME: &'static str = "post";

    fn rules() -> Vec<Rule> {
        vec![
            Rule::new(["title", "author"], RuleKind::Required),
            Rule::new(["title"], RuleKind::Length { min: None, max: Some(64) }),
            Rule::new(["author"], RuleKind::Email),
        ]
    }

    fn is_new_record(&self) -> bool {
        self.is_new
    }

    fn scenario(&self) -> &str {
        &self.scenario
    }

    fn has_field(&self, name: &str) -> bool {
        matches!(name, "id" | "title" | "body" | "author")
    }

    fn field(&self, name: &str) -> TranslationResult<Option<String>> {
        match name {
            "id" => Ok(Some(self.id.to_string())),
            "title" => Ok(self.title.clone()),
            "body" => Ok(self.body.clone()),
            "author" => Ok(self.author.clone()),
            _ => Err(TranslationError::unknown_attribute(Self::ENTITY_NAME, name)),
        }
    }

    fn set_field(&mut self, name: &str, value: Option<String>) -> TranslationResult<()> {
        match name {
            "title" => self.title = value,
            "body" => self.body = value,
            "author" => self.author = value,
            _ => return Err(TranslationError::unknown_attribute(Self::ENTITY_NAME, name)),
        }
        Ok(())
    }

    fn can_write_field(&self, name: &str) -> bool {
        self.has_field(name) && name != "id"
    }

    fn translation_state(&self) -> &TranslationState {
        &self.translations
    }

    fn translation_state_mut(&mut self) -> &mut TranslationState {
        &mut self.translations
    }
}

/// `title` and `body` translated into `en` (default) and `fr`.
pub fn post_config() -> TranslationConfig {
    let mut config = TranslationConfig::new(
        ["title", "body"],
        LanguageSet::new(["en", "fr"]).expect("valid languages"),
    );
    config.default_language = Some("en".to_string());
    config
}

/// Attaches `config` to `Post` using a private registry.
pub fn post_sync(config: &TranslationConfig) -> TranslationSync<Post> {
    TranslationSync::attach_with_registry(config, &ShadowModelRegistry::new())
        .expect("valid post configuration")
}

pub fn context(language: &str) -> LanguageContext {
    LanguageContext::new(language.parse().expect("valid language code"))
}
