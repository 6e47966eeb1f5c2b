//! Friendlier texts for database errors surfaced by the branch endpoints

pub const DUPLICATE_CODE_MESSAGE: &str =
    "This branch code is already used. Please choose a different code.";
pub const DUPLICATE_BRANCH_MESSAGE: &str = "This branch already exists for this user.";
pub const SHOP_CODE_TAKEN_MESSAGE: &str = "Branch code already exists. Please use a different code.";

pub fn friendly_branch_error(message: &str) -> String {
    if message.contains("UNIQUE constraint failed") {
        DUPLICATE_CODE_MESSAGE.to_string()
    } else if message.contains("already exists") {
        DUPLICATE_BRANCH_MESSAGE.to_string()
    } else if message.contains("shop_code") {
        SHOP_CODE_TAKEN_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_errors_are_mapped() {
        assert_eq!(
            friendly_branch_error("UNIQUE constraint failed: branches.shop_code"),
            DUPLICATE_CODE_MESSAGE
        );
        assert_eq!(
            friendly_branch_error("Branch Mall already exists"),
            DUPLICATE_BRANCH_MESSAGE
        );
        assert_eq!(
            friendly_branch_error("duplicate key value violates shop_code_key"),
            SHOP_CODE_TAKEN_MESSAGE
        );
    }

    #[test]
    fn test_other_errors_pass_through() {
        assert_eq!(friendly_branch_error("User not found"), "User not found");
    }
}
