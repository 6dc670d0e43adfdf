use serde::{Deserialize, Serialize};

/// The authenticated caller, handed explicitly to every operation that needs one.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentUser {
    pub user_id: String,
    pub email: Option<String>,
}
