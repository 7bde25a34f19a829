use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use translation_core_api::LanguageCode;
use translation_core_db::models::{ShadowModel, ShadowRow};

/// A trait for converting a database row into a model whose columns are
/// only known at runtime.
pub trait TryFromModelRow<R>: Sized {
    /// Performs the conversion, reading the columns `model` defines.
    fn try_from_model_row(row: &R, model: &ShadowModel) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

impl TryFromModelRow<PgRow> for ShadowRow {
    fn try_from_model_row(row: &PgRow, model: &ShadowModel) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let language: String = row.try_get(model.language_field.as_str())?;
        let mut shadow_row = ShadowRow {
            id: row.try_get("id")?,
            owner_id: row.try_get(model.foreign_key.as_str())?,
            language: language.parse::<LanguageCode>()?,
            columns: Default::default(),
        };
        for column in &model.columns {
            let value: Option<String> = row.try_get(column.as_str())?;
            shadow_row.set_column(column.clone(), value);
        }
        Ok(shadow_row)
    }
}

/// Double-quotes an identifier for interpolation into SQL.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("post_localized"), "\"post_localized\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
