//! Command-line definition

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mizan_domain::ResourceKind;

#[derive(Debug, Parser)]
#[command(name = "mizan", version, about = "Back-office client for the distribution API")]
pub struct Cli {
    /// Config file (JSON or TOML); overrides environment and probed files
    #[arg(long, global = true, env = "MIZAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "MIZAN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// List records of a resource
    List {
        resource: ResourceKind,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Show one record by slug
    Show { resource: ResourceKind, slug: String },
    /// Create a record from a JSON object
    Create {
        resource: ResourceKind,
        /// Record fields as a JSON object
        record: String,
        /// List re-fetched after the change
        #[command(flatten)]
        refresh: QueryArgs,
    },
    /// Replace the record at `slug` with a JSON object
    Update {
        resource: ResourceKind,
        slug: String,
        /// Record fields as a JSON object
        record: String,
        #[command(flatten)]
        refresh: QueryArgs,
    },
    /// Delete the record at `slug`
    Delete {
        resource: ResourceKind,
        slug: String,
        #[command(flatten)]
        refresh: QueryArgs,
    },
    /// Check whether the slug derived from `name` is free
    CheckSlug { resource: ResourceKind, name: String },
    /// Aggregate dashboard figures
    Dashboard,
    /// Stock loaded on a representative's car
    CarStock { rep: String },
}

impl Command {
    /// Stable identifier used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "auth::login",
            Self::Logout => "auth::logout",
            Self::Whoami => "auth::whoami",
            Self::List { .. } => "resources::list",
            Self::Show { .. } => "resources::show",
            Self::Create { .. } => "resources::create",
            Self::Update { .. } => "resources::update",
            Self::Delete { .. } => "resources::delete",
            Self::CheckSlug { .. } => "resources::check_slug",
            Self::Dashboard => "dashboard::stats",
            Self::CarStock { .. } => "dashboard::car_stock",
        }
    }
}

/// Filters and paging shared by `list`, `create`, `update` and `delete`
#[derive(Debug, Clone, Default, Args)]
pub struct QueryArgs {
    /// Filter as `key=value`; repeatable. An empty value is ignored.
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub filters: Vec<(String, String)>,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub per_page: Option<u32>,
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) =
        raw.split_once('=').ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty filter key in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_with_filters() {
        let cli = Cli::try_parse_from([
            "mizan",
            "list",
            "customers",
            "--filter",
            "name=Ali",
            "--filter",
            "city=",
            "--page",
            "2",
        ])
        .unwrap();

        let Command::List { resource, query } = cli.command else {
            panic!("expected list");
        };
        assert_eq!(resource, ResourceKind::Customers);
        assert_eq!(
            query.filters,
            vec![("name".to_string(), "Ali".to_string()), ("city".to_string(), String::new())]
        );
        assert_eq!(query.page, Some(2));
    }

    #[test]
    fn rejects_filters_without_equals() {
        assert!(Cli::try_parse_from(["mizan", "list", "orders", "--filter", "name"]).is_err());
        assert!(Cli::try_parse_from(["mizan", "list", "orders", "--filter", "=x"]).is_err());
    }

    #[test]
    fn resource_names_accept_snake_case() {
        let cli = Cli::try_parse_from(["mizan", "show", "sale_returns", "r-1"]).unwrap();
        assert!(matches!(cli.command, Command::Show { resource: ResourceKind::SaleReturns, .. }));
    }

    #[test]
    fn global_config_flag() {
        let cli = Cli::try_parse_from(["mizan", "whoami", "--config", "/etc/mizan.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/mizan.toml")));
        assert_eq!(cli.command.name(), "auth::whoami");
    }
}
