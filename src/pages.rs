//! Command handlers: each one opens a list page, drives it through the
//! requested triggers and prints the outcome.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use listview::{
    Account, Completion, ConsoleConfig, ConsoleHttpClient, FixedFilter, Identity, ListController,
    Navigator, Notifier, Route, RowGateway, Session, SessionStatus, Trigger, TracingNotifier,
    SESSION_STATUS_PARAM,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cli::{ListArgs, SessionListArgs};
use crate::error::CtlError;
use crate::output::{render_page, TableRow};

/// Prints detail-page routes to stdout so scripts can pick up new rows.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, route: &Route) {
        println!("{}", route.path);
    }
}

/// Everything a command needs to open pages against one console.
pub struct Console {
    config: ConsoleConfig,
    account: Account,
    json: bool,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    cancel: CancellationToken,
}

impl Console {
    pub fn new(config: ConsoleConfig, account: Account, json: bool, cancel: CancellationToken) -> Self {
        Self {
            config,
            account,
            json,
            notifier: Arc::new(TracingNotifier),
            navigator: Arc::new(PrintNavigator),
            cancel,
        }
    }

    #[cfg(test)]
    fn with_observers(mut self, notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        self.notifier = notifier;
        self.navigator = navigator;
        self
    }

    /// A page that has not fetched anything yet.
    fn new_page<R: TableRow>(&self) -> Result<ListController<R>, CtlError> {
        let scope = self
            .account
            .request_scope(self.config.scope_override.as_deref());
        Ok(ListController::new(
            ConsoleHttpClient::new(&self.config),
            R::binding()?,
            scope,
            self.config.page_size,
            Arc::clone(&self.notifier),
        ))
    }

    /// Tear `page` down when the process is interrupted.
    fn link_cancel<R: TableRow>(&self, page: &ListController<R>) {
        let global = self.cancel.clone();
        let local = page.cancel_token();
        tokio::spawn(async move {
            tokio::select! {
                _ = global.cancelled() => local.cancel(),
                _ = local.cancelled() => {}
            }
        });
    }

    /// Open a page in the state `args` describes with a single request.
    ///
    /// Every trigger but the last only updates page state; the last one is
    /// fetched. Returns `None` when interrupted before the page arrived.
    pub async fn open_page<R: TableRow>(
        &self,
        args: &ListArgs,
        extra: Vec<Trigger>,
    ) -> Result<Option<ListController<R>>, CtlError> {
        let mut page = self.new_page::<R>()?;
        self.link_cancel(&page);

        let mut triggers = args.triggers(self.config.page_size);
        triggers.extend(extra);
        let last = triggers.pop().unwrap_or(Trigger::Mount);
        for trigger in triggers {
            page.begin(trigger)?;
        }

        let kind = R::KIND;
        match page.fetch(last).await? {
            Completion::Committed => {}
            Completion::Denied => return Ok(Some(page)),
            Completion::Failed => return Err(CtlError::LoadFailed(kind)),
            Completion::Stale | Completion::Discarded => return Ok(None),
        }

        if let Some(field) = &args.client_sort {
            page.sort_visible(field, args.client_order)?;
        }
        Ok(Some(page))
    }

    fn render<R: TableRow>(&self, page: &ListController<R>) -> Result<(), CtlError> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        render_page(page, self.json, &mut out)?;
        out.flush()?;

        let p = page.pagination();
        info!(
            kind = %R::KIND,
            page = p.current,
            pages = p.page_count(),
            total = p.total,
            "listed"
        );
        Ok(())
    }

    // --- Commands ---

    pub async fn list<R: TableRow>(&self, args: &ListArgs, extra: Vec<Trigger>) -> Result<(), CtlError> {
        let Some(mut page) = self.open_page::<R>(args, extra).await? else {
            return Ok(());
        };
        let rendered = self.render(&page);
        page.teardown();
        rendered
    }

    pub async fn add<R: TableRow>(&self) -> Result<(), CtlError> {
        let page = self.new_page::<R>()?;
        let gateway = RowGateway::for_page(&page, self.account.clone(), Arc::clone(&self.navigator));
        let route = gateway.create().await?;
        debug!(path = %route.path, "navigated to new row");
        Ok(())
    }

    /// Delete `id` from the page `args` describes.
    pub async fn delete<R: TableRow>(
        &self,
        id: &str,
        args: &ListArgs,
        extra: Vec<Trigger>,
    ) -> Result<(), CtlError> {
        let identity = Identity::parse(id)?;
        let Some(mut page) = self.open_page::<R>(args, extra).await? else {
            return Ok(());
        };
        if !page.is_authorized() {
            return Err(CtlError::AccessDenied(R::KIND));
        }

        let index = page
            .rows()
            .iter()
            .position(|row| row.identity() == identity)
            .ok_or_else(|| CtlError::NotOnPage(identity.to_string()))?;

        let gateway = RowGateway::for_page(&page, self.account.clone(), Arc::clone(&self.navigator));
        gateway.delete(&mut page, index).await?;
        info!(
            kind = %R::KIND,
            %identity,
            remaining = page.pagination().total,
            "deleted"
        );
        page.teardown();
        Ok(())
    }

    /// Delete a finished session. Live sessions can only be disconnected.
    pub async fn delete_session(&self, id: &str, args: &SessionListArgs) -> Result<(), CtlError> {
        if args.status != SessionStatus::Disconnected {
            return Err(CtlError::LiveSession(id.to_string()));
        }
        self.delete::<Session>(id, &args.list, session_triggers(args)).await
    }

    pub async fn disconnect(&self, id: &str) -> Result<(), CtlError> {
        let identity = Identity::parse(id)?;
        let page = self.new_page::<Session>()?;
        let gateway = RowGateway::for_page(&page, self.account.clone(), Arc::clone(&self.navigator));
        gateway.disconnect(&identity).await;
        Ok(())
    }

    /// Print the session page, then re-fetch it every `interval` until
    /// interrupted.
    pub async fn watch(&self, args: &SessionListArgs, interval: Duration) -> Result<(), CtlError> {
        let Some(mut page) = self
            .open_page::<Session>(&args.list, session_triggers(args))
            .await?
        else {
            return Ok(());
        };
        self.render(&page)?;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }
            match page.fetch(Trigger::Refresh).await? {
                Completion::Committed | Completion::Denied => {
                    if let Some(field) = &args.list.client_sort {
                        page.sort_visible(field, args.list.client_order)?;
                    }
                    self.render(&page)?;
                }
                Completion::Failed => warn!("refresh failed, keeping previous rows"),
                Completion::Stale => {}
                Completion::Discarded => break,
            }
        }

        page.teardown();
        info!("watch stopped");
        Ok(())
    }
}

/// Triggers selecting the online or history session list and the protocol filter.
pub fn session_triggers(args: &SessionListArgs) -> Vec<Trigger> {
    let mut triggers = vec![Trigger::Domain {
        key: SESSION_STATUS_PARAM.to_string(),
        value: Some(args.status.as_param().to_string()),
    }];
    if let Some(protocol) = &args.protocol {
        triggers.push(Trigger::Select(Some(FixedFilter::new("protocol", protocol.clone()))));
    }
    triggers
}
