//! Create, delete and disconnect actions on list rows.
//!
//! Mutations never refetch the list. A create navigates away to the new
//! row's detail page; a delete patches the controller's rows in place; a
//! session disconnect changes nothing locally and waits for the next refresh.

use std::sync::Arc;

use tracing::{info, warn};

use crate::columns::{NewRow, RowFactory};
use crate::config::Account;
use crate::controller::ListController;
use crate::error::{ConsoleError, Result};
use crate::notify::{Navigator, Notice, Notifier, Route, RouteMode};
use crate::resource::Resource;
use crate::rest::ConsoleHttpClient;
use crate::types::{Identity, Session};
use crate::utils::{now_rfc3339, random_name};

/// Row mutation gateway for one list page.
pub struct RowGateway<R: Resource> {
    client: ConsoleHttpClient,
    account: Account,
    owner: String,
    factory: Option<RowFactory<R>>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl<R: Resource> RowGateway<R> {
    /// Gateway sharing the page's client, notifier and row factory.
    ///
    /// New rows are created in the account's own organization.
    pub fn for_page(
        page: &ListController<R>,
        account: Account,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            client: page.client().clone(),
            owner: account.owner.clone(),
            account,
            factory: page.binding().factory,
            notifier: page.notifier(),
            navigator,
        }
    }

    /// Build the default row the Add button would create.
    pub fn new_row(&self) -> Result<R> {
        let factory = self.factory.ok_or_else(|| {
            ConsoleError::Binding(format!("{} cannot be created from the list", R::KIND))
        })?;
        Ok(factory(&NewRow {
            owner: self.owner.clone(),
            suffix: random_name(),
            now: now_rfc3339(),
        }))
    }

    /// Create a default row and navigate to its detail page.
    pub async fn create(&self) -> Result<Route> {
        let row = self.new_row()?;
        self.create_row(row).await
    }

    /// Create `row` and navigate to its detail page in add mode.
    ///
    /// The list state is left alone: the page is navigated away from.
    pub async fn create_row(&self, row: R) -> Result<Route> {
        let id = row.identity();
        let label = R::KIND.label();
        match self.client.add(&row).await {
            Ok(()) => {
                info!(kind = %R::KIND, %id, "row added");
                let route = Route::detail(R::KIND, &id, RouteMode::Add);
                self.navigator.navigate(&route);
                self.notifier
                    .notify(Notice::success(format!("{label} added successfully")));
                Ok(route)
            }
            Err(e) => {
                warn!(kind = %R::KIND, %id, error = %e, "add failed");
                self.notifier.notify(Notice::error(format!(
                    "Failed to add {label}: {}",
                    e.user_message()
                )));
                Err(e)
            }
        }
    }

    /// Delete the row at `index` of the page's current rows.
    ///
    /// On success the row is removed locally and the total drops by one.
    /// Rows owned by another organization are refused without a request
    /// unless the account administers every organization.
    pub async fn delete(&self, page: &mut ListController<R>, index: usize) -> Result<R> {
        let ticket = page.begin_delete(index)?;
        let id = ticket.row.identity();
        let label = R::KIND.label();

        if !self.account.can_delete(ticket.row.owner()) {
            let e = ConsoleError::Forbidden(format!(
                "{id} belongs to another organization"
            ));
            self.notifier.notify(Notice::error(format!(
                "Failed to delete {label}: {}",
                e.user_message()
            )));
            return Err(e);
        }

        match self.client.delete(&ticket.row).await {
            Ok(()) => {
                info!(kind = %R::KIND, %id, index, "row deleted");
                page.complete_delete(&ticket);
                self.notifier
                    .notify(Notice::success(format!("{label} deleted successfully")));
                Ok(ticket.row)
            }
            Err(e) => {
                warn!(kind = %R::KIND, %id, error = %e, "delete failed");
                self.notifier.notify(Notice::error(format!(
                    "Failed to delete {label}: {}",
                    e.user_message()
                )));
                Err(e)
            }
        }
    }
}

impl RowGateway<Session> {
    /// Ask the server to disconnect a live session.
    ///
    /// Fire-and-forget: no local state changes and failures are only logged;
    /// the next refresh of the page shows the new status.
    pub async fn disconnect(&self, id: &Identity) {
        match self.client.stop_session(id).await {
            Ok(()) => info!(%id, "disconnect requested"),
            Err(e) => warn!(%id, error = %e, "disconnect request failed"),
        }
    }
}
