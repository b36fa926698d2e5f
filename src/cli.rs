use clap::{Args, Parser, Subcommand};
use listview::{FixedFilter, SessionStatus, SortOrder, SortSpec, Trigger, SESSION_PROTOCOLS};

/// consolectl: list, add and delete console resources from the terminal.
#[derive(Parser, Debug)]
#[command(name = "consolectl", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Console server URL (overrides CONSOLE_URL)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Bearer token (overrides CONSOLE_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Organization to list when signed in as a built-in administrator
    #[arg(long, global = true)]
    pub scope: Option<String>,

    /// Output rows as JSON lines instead of TSV
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Virtual machines
    Machines {
        #[command(subcommand)]
        action: RowAction,
    },

    /// Cloud providers
    Providers {
        #[command(subcommand)]
        action: RowAction,
    },

    /// Remote sessions
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },
}

/// Actions on machines and providers.
#[derive(Subcommand, Debug)]
pub enum RowAction {
    /// Show one page of the collection
    List(ListArgs),

    /// Create a row with default values
    Add,

    /// Delete a row shown on the given page
    Delete(DeleteArgs),
}

/// Actions on sessions.
#[derive(Subcommand, Debug)]
pub enum SessionAction {
    /// Show one page of sessions
    List(SessionListArgs),

    /// Delete a finished session shown on the given page (requires --status disconnected)
    Delete(SessionDeleteArgs),

    /// Ask the server to disconnect a live session
    Disconnect {
        /// Session identity as owner/name
        id: String,
    },

    /// Re-fetch the session page periodically until interrupted
    Watch(WatchArgs),
}

/// Page, sort, search and selector options shared by every list.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Rows per page (defaults to CONSOLE_PAGE_SIZE or 10)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Server-sorted column
    #[arg(long)]
    pub sort_field: Option<String>,

    /// Sort direction: ascend or descend
    #[arg(long)]
    pub sort_order: Option<SortOrder>,

    /// Column to search
    #[arg(long, requires = "search_text")]
    pub search_column: Option<String>,

    /// Text to search for
    #[arg(long, requires = "search_column")]
    pub search_text: Option<String>,

    /// Pin the `type` field, overriding any search
    #[arg(long = "type")]
    pub type_filter: Option<String>,

    /// Reorder the fetched page by a client-sorted column
    #[arg(long)]
    pub client_sort: Option<String>,

    /// Direction for --client-sort
    #[arg(long, default_value = "ascend")]
    pub client_order: SortOrder,
}

impl ListArgs {
    /// Triggers that bring a fresh page into the requested state, in order.
    pub fn triggers(&self, default_page_size: u32) -> Vec<Trigger> {
        let mut triggers = vec![Trigger::Paginate {
            current: self.page,
            page_size: self.page_size.unwrap_or(default_page_size),
        }];
        if let Some(field) = &self.sort_field {
            triggers.push(Trigger::Sort(SortSpec::new(
                field.clone(),
                self.sort_order.unwrap_or(SortOrder::Ascend),
            )));
        }
        if let (Some(column), Some(text)) = (&self.search_column, &self.search_text) {
            triggers.push(Trigger::Search {
                column: column.clone(),
                text: text.clone(),
            });
        }
        if let Some(value) = &self.type_filter {
            triggers.push(Trigger::Select(Some(FixedFilter::new("type", value.clone()))));
        }
        triggers
    }
}

/// Arguments for `delete` on machines and providers.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Row identity as owner/name
    pub id: String,

    #[command(flatten)]
    pub list: ListArgs,
}

/// Arguments for `sessions list`.
#[derive(Args, Debug, Clone)]
pub struct SessionListArgs {
    /// Online (connected) or history (disconnected) sessions
    #[arg(long, default_value = "connected", value_parser = parse_status)]
    pub status: SessionStatus,

    /// Only sessions using this protocol
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(SESSION_PROTOCOLS.iter().copied()))]
    pub protocol: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

/// Arguments for `sessions delete`.
#[derive(Args, Debug)]
pub struct SessionDeleteArgs {
    /// Session identity as owner/name
    pub id: String,

    #[command(flatten)]
    pub list: SessionListArgs,
}

/// Arguments for `sessions watch`.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Refresh interval in milliseconds
    #[arg(long, default_value = "5000")]
    pub interval_ms: u64,

    #[command(flatten)]
    pub list: SessionListArgs,
}

fn parse_status(s: &str) -> Result<SessionStatus, String> {
    match s {
        "connected" | "online" => Ok(SessionStatus::Connected),
        "disconnected" | "history" => Ok(SessionStatus::Disconnected),
        other => Err(format!("unknown session status: {other}")),
    }
}
