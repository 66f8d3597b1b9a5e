use crate::domain::ports::PageController;
use serde::{Deserialize, Serialize};

/// State of the search/filter bar on the claims listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub search: String,
    pub status: String,
    pub insurer: String,
}

impl SearchFilters {
    /// Listing location for the current filters. Empty fields are left out.
    pub fn location(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in [
            ("search", &self.search),
            ("status", &self.status),
            ("insurer", &self.insurer),
        ] {
            if !value.is_empty() {
                query.append_pair(key, value);
            }
        }
        format!("/?{}", query.finish())
    }

    pub fn apply(&self, page: &dyn PageController) {
        page.navigate(&self.location());
    }

    /// Clears every filter and returns to the unfiltered listing.
    pub fn reset(&mut self, page: &dyn PageController) {
        *self = Self::default();
        page.navigate("/");
    }
}
