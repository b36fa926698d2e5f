pub mod columns;
pub mod config;
pub mod controller;
pub mod error;
pub mod mutation;
pub mod notify;
pub mod query;
pub mod resource;
pub mod rest;
pub mod types;
pub mod utils;

// ---- Top-level re-exports for ergonomic usage ----

// Configuration + errors
pub use config::{Account, ConsoleConfig};
pub use error::{ConsoleError, Result};

// REST client
pub use rest::ConsoleHttpClient;

// List page core
pub use controller::{Completion, DeleteTicket, FetchTicket, ListController, ListState, Phase, Trigger};
pub use mutation::RowGateway;
pub use query::{Filter, FixedFilter, ListQuery, SearchSpec, SortSpec};

// Column binding
pub use columns::{Column, Comparator, FilterPrecedence, NewRow, RowFactory, SortMode, TableBinding};
pub use resource::{Resource, SESSION_PROTOCOLS, SESSION_STATUS_PARAM};

// Notifications + navigation
pub use notify::{Navigator, Notice, NoticeLevel, NoticeLog, Notifier, Route, RouteLog, RouteMode, TracingNotifier};

// Rows + wire types
pub use types::{
    Envelope, Identity, Machine, Page, Pagination, Provider, ResourceKind, Session, SessionStatus,
    SortOrder,
};
