//! Request DTOs for the category API
//!
//! Defines the structure of incoming HTTP request bodies. `name` and
//! `description` are optional on the wire so that a null or missing field
//! reaches validation instead of failing deserialization.

use serde::Deserialize;

use crate::models::CategoryId;

/// Request body for POST /api/categories
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CreateCategoryRequest {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }
}

/// Request body for PUT /api/categories/:id
///
/// The body repeats the id so a request aimed at the wrong path is rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategoryRequest {
    pub id: CategoryId,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateCategoryRequest {
    pub fn new(id: CategoryId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialize() {
        let json = r#"{"name": "Tech", "description": "desc"}"#;
        let req: CreateCategoryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name.as_deref(), Some("Tech"));
        assert_eq!(req.description.as_deref(), Some("desc"));
    }

    #[test]
    fn test_create_request_accepts_missing_and_null_fields() {
        let req: CreateCategoryRequest = serde_json::from_str(r#"{"name": "Tech"}"#).unwrap();
        assert!(req.description.is_none());

        let req: CreateCategoryRequest =
            serde_json::from_str(r#"{"name": null, "description": "d"}"#).unwrap();
        assert!(req.name.is_none());

        let req: CreateCategoryRequest = serde_json::from_str(r#"{"description": "d"}"#).unwrap();
        assert!(req.name.is_none());
    }

    #[test]
    fn test_update_request_requires_id() {
        let result = serde_json::from_str::<UpdateCategoryRequest>(r#"{"name": "Tech"}"#);
        assert!(result.is_err());

        let req: UpdateCategoryRequest =
            serde_json::from_str(r#"{"id": 3, "name": "Tech", "description": ""}"#).unwrap();
        assert_eq!(req.id, 3);
    }
}
