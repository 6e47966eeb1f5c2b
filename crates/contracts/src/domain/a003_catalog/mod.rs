use serde::{Deserialize, Serialize};

/// Lists served by `/get_dynamic_data/<kind>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Categories,
    Models,
    DisplayTypes,
    PopMaterials,
}

impl CatalogKind {
    pub fn path(&self) -> &'static str {
        match self {
            CatalogKind::Categories => "/get_dynamic_data/categories",
            CatalogKind::Models => "/get_dynamic_data/models",
            CatalogKind::DisplayTypes => "/get_dynamic_data/display_types",
            CatalogKind::PopMaterials => "/get_dynamic_data/pop_materials",
        }
    }

    /// Query parameter naming the parent value, if the list depends on one
    pub fn parent_param(&self) -> Option<&'static str> {
        match self {
            CatalogKind::Categories => None,
            CatalogKind::Models | CatalogKind::DisplayTypes => Some("category"),
            CatalogKind::PopMaterials => Some("model"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DynamicDataResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Reply of `/get_model_image/{category}/{model}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelImageResponse {
    pub success: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ModelImageResponse {
    pub fn guide_url(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.image_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_params() {
        assert_eq!(CatalogKind::Categories.parent_param(), None);
        assert_eq!(CatalogKind::Models.parent_param(), Some("category"));
        assert_eq!(CatalogKind::DisplayTypes.parent_param(), Some("category"));
        assert_eq!(CatalogKind::PopMaterials.parent_param(), Some("model"));
    }

    #[test]
    fn test_guide_url_requires_success_and_url() {
        let resp: ModelImageResponse =
            serde_json::from_str(r#"{"success": true, "image_url": "/img/s95f.png"}"#).unwrap();
        assert_eq!(resp.guide_url(), Some("/img/s95f.png"));

        let resp: ModelImageResponse =
            serde_json::from_str(r#"{"success": true, "image_url": ""}"#).unwrap();
        assert_eq!(resp.guide_url(), None);

        let resp: ModelImageResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(resp.guide_url(), None);
    }
}
