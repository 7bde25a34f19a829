use sqlx::Database;
use std::collections::BTreeMap;
use tracing::{debug, warn};
use translation_core_api::{LanguageCode, TranslationError, TranslationResult};

use super::TranslationSync;
use crate::models::{ShadowRow, Translatable};
use crate::naming::NameScheme;
use crate::repository::ShadowRowRepository;

impl<E: Translatable> TranslationSync<E> {
    /// Writes one shadow row per configured language after the entity was saved.
    ///
    /// The default language takes the entity's own field values, every other
    /// language its virtual attributes. Null values leave the column as it is.
    /// Rows are written without validation, one language at a time in
    /// configuration order; a failure returns `PartialSave` and leaves the rows
    /// already written in place. The entity's own field values are read before
    /// the first row is written. Call this before the entity stops reporting
    /// itself as a new record.
    pub async fn after_save<DB, R>(&self, entity: &E, repo: &R) -> TranslationResult<Vec<ShadowRow>>
    where
        DB: Database,
        R: ShadowRowRepository<DB> + ?Sized,
    {
        let owner_id = entity.get_id();

        let mut existing: BTreeMap<LanguageCode, ShadowRow> = if entity.is_new_record() {
            BTreeMap::new()
        } else {
            repo.load_by_owner(owner_id, None)
                .await
                .map_err(TranslationError::Storage)?
                .into_iter()
                .map(|row| (row.language.clone(), row))
                .collect()
        };

        let primary_values = self
            .config
            .translation_attributes
            .iter()
            .map(|field| entity.field(field))
            .collect::<TranslationResult<Vec<_>>>()?;

        let mut committed: Vec<LanguageCode> = Vec::new();
        let mut saved = Vec::with_capacity(self.config.languages.len());

        for language in &self.config.languages {
            let (mut row, is_new) = match existing.remove(language) {
                Some(row) => (row, false),
                None => (self.model.new_row(owner_id, language.clone()), true),
            };

            for (field, primary) in self.config.translation_attributes.iter().zip(&primary_values) {
                let value = if *language == self.config.default_language {
                    primary.clone()
                } else {
                    entity
                        .translation_state()
                        .attributes()
                        .get(&NameScheme::virtual_attr(field, language.as_str()))
                        .map(str::to_string)
                };
                if let Some(value) = value {
                    row.set_column(self.scheme.shadow_column(field), Some(value));
                }
            }

            let result = if is_new {
                repo.create_batch(vec![row]).await
            } else {
                repo.update_batch(vec![row]).await
            };

            match result {
                Ok(rows) => {
                    debug!(
                        entity = E::ENTITY_NAME,
                        %owner_id,
                        language = %language,
                        inserted = is_new,
                        "Saved shadow row"
                    );
                    committed.push(language.clone());
                    saved.extend(rows);
                }
                Err(source) => {
                    warn!(
                        entity = E::ENTITY_NAME,
                        %owner_id,
                        language = %language,
                        committed = committed.len(),
                        "Shadow row save failed"
                    );
                    return Err(TranslationError::PartialSave {
                        committed,
                        failed: language.clone(),
                        source,
                    });
                }
            }
        }

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::Postgres;
    use std::error::Error;
    use translation_core_api::{LanguageCode, LanguageSet, TranslationError};

    use crate::bridge::PropertyBridge;
    use crate::repository::InMemoryShadowRepository;
    use crate::test_utils::{context, post_config, post_sync, Post};

    fn row_title(rows: &[crate::ShadowRow], language: &str) -> Option<String> {
        rows.iter()
            .find(|r| r.language == language)
            .and_then(|r| r.column("localized_title"))
            .map(str::to_string)
    }

    #[tokio::test]
    async fn test_create_save_and_reload_round_trip() -> Result<(), Box<dyn Error + Send + Sync>> {
        let sync = post_sync(&post_config());
        let repo = InMemoryShadowRepository::<Postgres>::new();
        let ctx = context("en");

        let mut post = Post::create(&sync, &ctx);
        assert_eq!(post.attribute("title_en")?, Some(String::new()));
        assert_eq!(post.attribute("title_fr")?, Some(String::new()));

        post.set_attribute("title", Some("Hello".to_string()))?;
        post.set_attribute("title_fr", Some("Bonjour".to_string()))?;
        post.author = Some("editor@example.com".to_string());
        sync.validate(&post)?;
        sync.after_save(&post, &repo).await?;
        post.is_new = false;

        let mut reloaded = Post::stored(&sync, &ctx, post.id, "Hello");
        sync.load_internationalized(&mut reloaded, &repo, &ctx).await?;
        assert_eq!(reloaded.attribute("title_en")?.as_deref(), Some("Hello"));
        assert_eq!(reloaded.attribute("title_fr")?.as_deref(), Some("Bonjour"));

        let mut french = Post::stored(&sync, &ctx, post.id, "Hello");
        sync.localized(&mut french, "fr");
        sync.load_localized(&mut french, &repo, &ctx).await?;
        assert_eq!(french.title.as_deref(), Some("Bonjour"));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_rewrites_rows_in_place() -> Result<(), Box<dyn Error + Send + Sync>> {
        let sync = post_sync(&post_config());
        let repo = InMemoryShadowRepository::<Postgres>::new();
        let ctx = context("en");

        let mut post = Post::create(&sync, &ctx);
        post.title = Some("Hello".to_string());
        post.set_translation("title", "fr", Some("Bonjour".to_string()))?;
        let first = sync.after_save(&post, &repo).await?;
        post.is_new = false;

        post.title = Some("Hi".to_string());
        post.set_translation("title", "fr", Some("Salut".to_string()))?;
        let second = sync.after_save(&post, &repo).await?;

        let stored = repo.rows_of(post.id);
        assert_eq!(stored.len(), 2);
        assert_eq!(row_title(&stored, "en").as_deref(), Some("Hi"));
        assert_eq!(row_title(&stored, "fr").as_deref(), Some("Salut"));

        let mut first_ids: Vec<_> = first.iter().map(|r| r.id).collect();
        let mut second_ids: Vec<_> = second.iter().map(|r| r.id).collect();
        first_ids.sort();
        second_ids.sort();
        assert_eq!(first_ids, second_ids);
        Ok(())
    }

    #[tokio::test]
    async fn test_null_values_leave_columns_untouched() -> Result<(), Box<dyn Error + Send + Sync>> {
        let sync = post_sync(&post_config());
        let repo = InMemoryShadowRepository::<Postgres>::new();
        let ctx = context("en");

        let mut post = Post::create(&sync, &ctx);
        post.title = Some("Hello".to_string());
        post.set_translation("title", "fr", Some("Bonjour".to_string()))?;
        sync.after_save(&post, &repo).await?;

        let mut later = Post::stored(&sync, &ctx, post.id, "Hello again");
        later.set_translation("title", "fr", None)?;
        sync.after_save(&later, &repo).await?;

        let stored = repo.rows_of(post.id);
        assert_eq!(row_title(&stored, "en").as_deref(), Some("Hello again"));
        assert_eq!(row_title(&stored, "fr").as_deref(), Some("Bonjour"));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_language_reports_committed_rows() -> Result<(), Box<dyn Error + Send + Sync>> {
        let sync = post_sync(&post_config());
        let repo = InMemoryShadowRepository::<Postgres>::new();
        let ctx = context("en");
        let fr: LanguageCode = "fr".parse()?;
        repo.fail_writes_for(Some(fr.clone()));

        let mut post = Post::create(&sync, &ctx);
        post.title = Some("Hello".to_string());
        let err = sync.after_save(&post, &repo).await.unwrap_err();

        match err {
            TranslationError::PartialSave { committed, failed, .. } => {
                assert_eq!(committed, vec!["en".parse::<LanguageCode>()?]);
                assert_eq!(failed, fr);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(repo.rows_of(post.id).len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_unreadable_field_fails_before_any_row_is_written() -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut config = post_config();
        config.translation_attributes.push("summary".to_string());
        config.languages = LanguageSet::new(["fr", "en"])?;
        let sync = post_sync(&config);
        let repo = InMemoryShadowRepository::<Postgres>::new();

        let mut post = Post::create(&sync, &context("en"));
        post.title = Some("Hello".to_string());
        let err = sync.after_save(&post, &repo).await.unwrap_err();

        assert!(err.is_unknown_attribute());
        assert!(repo.rows_of(post.id).is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_translations_do_not_block_save() -> Result<(), Box<dyn Error + Send + Sync>> {
        let sync = post_sync(&post_config());
        let repo = InMemoryShadowRepository::<Postgres>::new();
        let ctx = context("en");

        let mut post = Post::create(&sync, &ctx);
        post.title = Some("Hello".to_string());
        post.author = Some("editor@example.com".to_string());

        sync.validate(&post)?;
        let saved = sync.after_save(&post, &repo).await?;
        assert_eq!(saved.len(), 2);
        assert_eq!(row_title(&saved, "fr").as_deref(), Some(""));
        Ok(())
    }

    #[test]
    fn test_forced_required_rule_applies_per_language() {
        let mut config = post_config();
        config.force_overwrite = true;
        let sync = post_sync(&config);

        let mut post = Post::create(&sync, &context("en"));
        post.title = Some("Hello".to_string());
        post.author = Some("editor@example.com".to_string());

        match sync.validate(&post).unwrap_err() {
            TranslationError::Validation(violations) => {
                let attributes: Vec<_> = violations.iter().map(|v| v.attribute.as_str()).collect();
                assert_eq!(attributes, vec!["title_en", "title_fr"]);
            }
            other => panic!("unexpected error: {other}"),
        }

        post.set_translation("title", "en", Some("Hello".to_string())).unwrap();
        post.set_translation("title", "fr", Some("Bonjour".to_string())).unwrap();
        assert!(sync.validate(&post).is_ok());
    }

    #[test]
    fn test_required_primary_field_still_blocks_save() {
        let sync = post_sync(&post_config());
        let mut post = Post::create(&sync, &context("en"));
        post.author = Some("editor@example.com".to_string());

        let err = sync.validate(&post).unwrap_err();
        assert!(matches!(err, TranslationError::Validation(ref v) if v.len() == 1 && v[0].attribute == "title"));
    }
}
