// Legacy API event endpoint
//
// Recent events from stat/event, windowed by hours and paginated with
// `_start` / `_limit`.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::LegacyEvent;

/// Window and paging parameters for `stat/event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventQuery {
    /// Maximum number of events returned.
    #[serde(rename = "_limit")]
    pub limit: u32,
    /// Offset into the result set.
    #[serde(rename = "_start")]
    pub start: u32,
    /// How many hours of history to include.
    pub within: u32,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            limit: 200,
            start: 0,
            within: 1,
        }
    }
}

impl LegacyClient {
    /// List recent events.
    ///
    /// `POST /api/s/{site}/stat/event` with `{"_limit", "_start", "within"}`
    pub async fn list_events(&self, query: &EventQuery) -> Result<Vec<LegacyEvent>, Error> {
        let url = self.site_url("stat/event")?;
        info!("Downloading recent events...");
        debug!(?query, "listing events");
        self.post(url, query).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_query_body() {
        let body = serde_json::to_value(EventQuery::default()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "_limit": 200, "_start": 0, "within": 1 })
        );
    }
}
