use tracing::debug;

use crate::error::Result;
use crate::query::ListQuery;
use crate::resource::Resource;
use crate::rest::ConsoleHttpClient;
use crate::types::{Identity, Page};

impl ConsoleHttpClient {
    /// GET /api/get-{kinds} - One page of a collection.
    ///
    /// `scope` "" lists every organization visible to the caller.
    pub async fn list<R: Resource>(&self, scope: &str, query: &ListQuery) -> Result<Page<R>> {
        let endpoint = format!("get-{}", R::KIND.plural());
        let envelope = self.get::<Vec<R>>(&endpoint, &query.to_pairs(scope)).await?;
        let total = envelope.total();
        let rows = envelope.data.unwrap_or_default();
        let total = total.unwrap_or(rows.len() as u64);
        debug!(kind = %R::KIND, rows = rows.len(), total, "page received");
        Ok(Page { rows, total })
    }

    /// POST /api/add-{kind} - Create a row.
    pub async fn add<R: Resource>(&self, row: &R) -> Result<()> {
        let endpoint = format!("add-{}", R::KIND.singular());
        self.post(&endpoint, &[], row).await?;
        Ok(())
    }

    /// POST /api/delete-{kind} - Delete a row, identified by its owner and name.
    pub async fn delete<R: Resource>(&self, row: &R) -> Result<()> {
        let endpoint = format!("delete-{}", R::KIND.singular());
        self.post(&endpoint, &[], row).await?;
        Ok(())
    }

    /// POST /api/stop-session?id={owner/name} - Ask the server to disconnect a session.
    pub async fn stop_session(&self, id: &Identity) -> Result<()> {
        let id = id.to_string();
        self.post_discard("stop-session", &[("id", id.as_str())])
            .await
    }
}
