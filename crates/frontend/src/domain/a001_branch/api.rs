use contracts::domain::a001_branch::{BranchByCodeResponse, BranchDto, BranchesResponse};
use serde::Serialize;

use crate::shared::api_utils::{api_url, get_json, with_query, ApiError};

#[derive(Serialize)]
struct SearchQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
}

#[derive(Serialize)]
struct CodeQuery<'a> {
    code: &'a str,
}

/// Full branch list, or the server-side search when `search` is given
pub async fn fetch_branches(search: Option<&str>) -> Result<Vec<BranchDto>, ApiError> {
    let url = with_query(&api_url("/get_branches"), &SearchQuery { search });
    let resp: BranchesResponse = get_json(&url).await?;
    if !resp.success {
        return Err(ApiError::Business(
            resp.message
                .unwrap_or_else(|| "Failed to load branches".to_string()),
        ));
    }
    Ok(resp.branches)
}

/// Exact lookup; `Ok(None)` when the server knows no branch with that code
pub async fn fetch_branch_by_code(code: &str) -> Result<Option<BranchDto>, ApiError> {
    let url = with_query(&api_url("/get_branch_by_code"), &CodeQuery { code });
    let resp: BranchByCodeResponse = get_json(&url).await?;
    Ok(resp.branch.filter(|_| resp.success))
}
