//! Category entity and its validation rules.

use crate::error::{AppError, Result};

/// Store-assigned identifier of a category.
pub type CategoryId = i64;

/// Placeholder id carried by a category that has not been persisted yet.
pub const UNASSIGNED_ID: CategoryId = 0;

/// Maximum category name length in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum category description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

// == Category ==
/// A category record.
///
/// The id is fixed once the store assigns it; name and description change
/// only through [`Category::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: String,
}

impl Category {
    // == Factory ==
    /// Builds a new, not yet persisted category.
    ///
    /// Fails with [`AppError::Validation`] when the name is blank or either
    /// field is too long.
    pub fn create(name: impl Into<String>, description: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let description = description.into();
        validate_fields(&name, &description)?;

        Ok(Self {
            id: UNASSIGNED_ID,
            name,
            description,
        })
    }

    /// Rehydrates a persisted row. Used by store adapters; performs no validation.
    pub fn restore(id: CategoryId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }

    // == Update ==
    /// Replaces name and description in place. The id is unchanged.
    pub fn update(&mut self, name: impl Into<String>, description: impl Into<String>) -> Result<()> {
        let name = name.into();
        let description = description.into();
        validate_fields(&name, &description)?;

        self.name = name;
        self.description = description;
        Ok(())
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Checks name and description against the category constraints.
pub fn validate_fields(name: &str, description: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Category name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "Category name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        )));
    }
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(AppError::Validation(format!(
            "Category description exceeds maximum length of {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid_category() {
        let category = Category::create("Tech", "desc").unwrap();

        assert_eq!(category.name(), "Tech");
        assert_eq!(category.description(), "desc");
        assert_eq!(category.id(), UNASSIGNED_ID);
    }

    #[test]
    fn test_create_allows_empty_description() {
        let category = Category::create("Tech", "").unwrap();
        assert_eq!(category.description(), "");
    }

    #[test]
    fn test_create_rejects_empty_name() {
        assert!(matches!(Category::create("", "desc"), Err(AppError::Validation(_))));
        assert!(matches!(Category::create("   ", "desc"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_create_rejects_long_fields() {
        let long_name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(Category::create(long_name, ""), Err(AppError::Validation(_))));

        let long_description = "x".repeat(MAX_DESCRIPTION_LENGTH + 1);
        assert!(matches!(
            Category::create("Tech", long_description),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_update_keeps_id() {
        let mut category = Category::restore(7, "Tech", "desc");

        category.update("Tech2", "desc2").unwrap();

        assert_eq!(category.id(), 7);
        assert_eq!(category.name(), "Tech2");
        assert_eq!(category.description(), "desc2");
    }

    #[test]
    fn test_rejected_update_leaves_category_untouched() {
        let mut category = Category::restore(7, "Tech", "desc");

        assert!(category.update("", "desc2").is_err());
        assert_eq!(category, Category::restore(7, "Tech", "desc"));
    }
}
