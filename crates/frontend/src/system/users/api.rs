use contracts::shared::api_message::ApiMessage;
use contracts::system::users::{
    ChangeAdminPasswordRequest, ManageUserBranchesRequest, ManageUserRequest, UserBranch,
    UserBranchesResponse,
};

use crate::shared::api_utils::{api_url, ensure_success, get_json, path_segment, post_json, ApiError};

/// Add, edit or delete a user; returns the server message
pub async fn manage_user(request: &ManageUserRequest) -> Result<String, ApiError> {
    let reply: ApiMessage = post_json(&api_url("/manage_user"), request).await?;
    ensure_success(reply)
}

pub async fn manage_user_branches(request: &ManageUserBranchesRequest) -> Result<String, ApiError> {
    let reply: ApiMessage = post_json(&api_url("/manage_user_branches"), request).await?;
    ensure_success(reply)
}

/// Branches assigned to a user
pub async fn fetch_user_branches(user_id: i64) -> Result<Vec<UserBranch>, ApiError> {
    let url = api_url(&format!("/get_user_branches/{}", path_segment(&user_id.to_string())));
    let resp: UserBranchesResponse = get_json(&url).await?;
    if !resp.success {
        return Err(ApiError::Business(
            resp.message
                .unwrap_or_else(|| "Failed to load branches".to_string()),
        ));
    }
    Ok(resp.branches)
}

pub async fn change_admin_password(request: &ChangeAdminPasswordRequest) -> Result<String, ApiError> {
    let reply: ApiMessage = post_json(&api_url("/change_admin_password"), request).await?;
    ensure_success(reply)
}
