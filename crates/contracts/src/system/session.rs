use serde::{Deserialize, Serialize};

/// Identity of the signed-in user, passed explicitly to every upstream call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: String,
    pub designation_id: String,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>, designation_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            designation_id: designation_id.into(),
        }
    }

    /// Query parameters understood by the ERP API
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("userId", self.user_id.clone()),
            ("designationId", self.designation_id.clone()),
        ]
    }
}
