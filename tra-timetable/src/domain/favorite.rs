//! Saved origin-destination routes.

use serde::{Deserialize, Serialize};

/// A user-saved route. Two routes are the same favorite when their origin
/// and destination IDs match; names are display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRoute {
    pub origin_id: String,
    pub origin_name: String,
    pub dest_id: String,
    pub dest_name: String,
}

impl FavoriteRoute {
    pub fn new(
        origin_id: impl Into<String>,
        origin_name: impl Into<String>,
        dest_id: impl Into<String>,
        dest_name: impl Into<String>,
    ) -> Self {
        Self {
            origin_id: origin_id.into(),
            origin_name: origin_name.into(),
            dest_id: dest_id.into(),
            dest_name: dest_name.into(),
        }
    }

    /// Whether this route runs between the given station IDs.
    pub fn is_route(&self, origin_id: &str, dest_id: &str) -> bool {
        self.origin_id == origin_id && self.dest_id == dest_id
    }

    /// Whether two favorites name the same route.
    pub fn same_route(&self, other: &FavoriteRoute) -> bool {
        self.is_route(&other.origin_id, &other.dest_id)
    }
}
