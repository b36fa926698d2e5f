//! Console connection settings from `.env`, the environment and flags.

use listview::config::BUILT_IN_ORG;
use listview::{Account, ConsoleConfig};

use crate::cli::Cli;

/// Read `CONSOLE_*` variables (after loading `.env`) and apply flag overrides.
pub fn load(cli: &Cli) -> (ConsoleConfig, Account) {
    let _ = dotenvy::dotenv(); // load .env if present
    from_lookup(cli, |key| std::env::var(key).ok())
}

fn from_lookup(cli: &Cli, var: impl Fn(&str) -> Option<String>) -> (ConsoleConfig, Account) {
    let mut config = ConsoleConfig::default();
    if let Some(url) = cli.server.clone().or_else(|| var("CONSOLE_URL")) {
        config.server_url = url;
    }
    config.access_token = cli.token.clone().or_else(|| var("CONSOLE_TOKEN"));
    config.scope_override = cli.scope.clone();
    if let Some(size) = var("CONSOLE_PAGE_SIZE").and_then(|s| s.parse::<u32>().ok()) {
        config.page_size = size.max(1);
    }

    let account = Account::new(
        var("CONSOLE_OWNER").unwrap_or_else(|| BUILT_IN_ORG.to_string()),
        var("CONSOLE_USER").unwrap_or_else(|| "admin".to_string()),
        var("CONSOLE_ADMIN")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(true),
    );

    (config, account)
}
