//! Query parameters for list endpoints

use serde::{Deserialize, Serialize};

use crate::repository::FindQuery;

/// Default number of rows returned by a list endpoint
pub const DEFAULT_LIST_LIMIT: u64 = 100;

/// Query parameters accepted by the list route
///
/// # Example
///
/// `GET /users/?offset=20&limit=10&order_by=-last_name,first_name`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListParams {
    /// Rows to skip
    #[serde(default)]
    pub offset: u64,

    /// Maximum rows to return
    #[serde(default = "default_limit")]
    pub limit: u64,

    /// Comma-separated order-by fields; leading `-` means descending
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

fn default_limit() -> u64 {
    DEFAULT_LIST_LIMIT
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: default_limit(),
            order_by: None,
        }
    }
}

impl ListParams {
    /// Translate into a repository query configuration
    pub fn to_find_query(&self) -> FindQuery {
        let mut query = FindQuery::new().offset(self.offset).limit(self.limit);
        if let Some(ref order_by) = self.order_by {
            query = query.order_by(order_by);
        }
        query
    }
}
