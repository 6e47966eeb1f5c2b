use std::collections::BTreeMap;

use contracts::domain::a003_catalog::{CatalogKind, DynamicDataResponse, ModelImageResponse};

use crate::shared::api_utils::{api_url, get_json, path_segment, with_query, ApiError};

/// One option list; `parent` is the category or model it depends on
pub async fn fetch_list(kind: CatalogKind, parent: Option<&str>) -> Result<Vec<String>, ApiError> {
    let mut query = BTreeMap::new();
    if let (Some(param), Some(value)) = (kind.parent_param(), parent) {
        query.insert(param, value);
    }
    let url = with_query(&api_url(kind.path()), &query);

    let resp: DynamicDataResponse = get_json(&url).await?;
    if !resp.success {
        return Err(ApiError::Business(
            resp.message
                .unwrap_or_else(|| format!("Failed to load {}", kind.path())),
        ));
    }
    Ok(resp.data)
}

/// Guide image for a model, `None` when there is none
pub async fn fetch_guide_url(category: &str, model: &str) -> Result<Option<String>, ApiError> {
    let url = api_url(&format!(
        "/get_model_image/{}/{}",
        path_segment(category),
        path_segment(model)
    ));
    let resp: ModelImageResponse = get_json(&url).await?;
    Ok(resp.guide_url().map(str::to_string))
}
