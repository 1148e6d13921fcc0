use anyhow::bail;
use clap::{Args, Parser, Subcommand, ValueEnum};

use partshop_api::ApiClient;
use partshop_cli::{init_tracing, load_settings};
use partshop_core::access::{Capability, Role};
use partshop_core::table::{SortSpec, TablePage, TableQuery, TableRow};
use partshop_core::traits::AdminApi;

#[derive(Debug, Parser)]
#[command(name = "partshop-admin", about = "Partshop dealer, staff and SLA administration")]
struct Cli {
    /// Role to act as; defaults to `session.role` from the config.
    #[arg(long, global = true)]
    role: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List dealers
    Dealers(ListArgs),
    /// List employees
    Employees(ListArgs),
    /// List storefront users
    AppUsers(ListArgs),
    /// List SLA violations
    Sla(ListArgs),
    /// Enable or disable a dealer
    ToggleDealer { id: String, state: Toggle },
    /// Enable or disable an employee
    ToggleEmployee { id: String, state: Toggle },
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Case-insensitive text filter over every column
    #[arg(long)]
    search: Option<String>,
    /// `column` or `column:asc|desc`
    #[arg(long, value_parser = parse_sort)]
    sort: Option<SortSpec>,
    /// 1-based page number
    #[arg(long, value_parser = parse_page)]
    page: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Toggle {
    On,
    Off,
}

fn parse_sort(s: &str) -> Result<SortSpec, String> { s.parse().map_err(|e: partshop_core::Error| e.to_string()) }

fn parse_page(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("pages start at 1".to_string()),
        Ok(page) => Ok(page),
        Err(e) => Err(e.to_string()),
    }
}

impl ListArgs {
    fn query(&self, page_size: usize) -> TableQuery {
        let mut query = TableQuery::new(page_size);
        if let Some(needle) = &self.search {
            query = query.search(needle);
        }
        if let Some(sort) = &self.sort {
            query = query.sort(sort.clone());
        }
        if let Some(page) = self.page {
            query = query.page(page);
        }
        query
    }
}

fn print_page<T: TableRow>(page: &TablePage<'_, T>, row: impl Fn(&T) -> String) {
    for r in &page.rows {
        println!("  {}", row(*r));
    }
    println!("📊 page {}/{} · {} matching rows", page.page, page.total_pages, page.total);
}

fn require(role: &Role, capability: Capability) -> anyhow::Result<()> {
    if !role.can(capability) {
        bail!("role '{}' is not allowed to {:?}", role, capability);
    }
    Ok(())
}

fn status(active: bool) -> &'static str { if active { "🟢" } else { "⚪" } }

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let settings = load_settings()?;
    let role = Role::parse(cli.role.as_deref().or(settings.session.role.as_deref()).unwrap_or_default());
    let api = ApiClient::new(&settings.api)?;
    let page_size = settings.tables.page_size;

    match cli.command {
        Command::Dealers(list) => {
            let dealers = api.dealers().await?;
            let can_toggle = role.can(Capability::ToggleDealer);
            print_page(&list.query(page_size).apply(&dealers), |d| {
                let action = match (can_toggle, d.is_active) {
                    (false, _) => "",
                    (true, true) => " [disable]",
                    (true, false) => " [enable]",
                };
                format!("{} {} <{}> {}{}", status(d.is_active), d.name, d.email, d.city.as_deref().unwrap_or("-"), action)
            });
        }
        Command::Employees(list) => {
            let employees = api.employees().await?;
            print_page(&list.query(page_size).apply(&employees), |e| {
                format!("{} {} <{}> {}", status(e.is_active), e.name, e.email, e.role)
            });
        }
        Command::AppUsers(list) => {
            let users = api.app_users().await?;
            print_page(&list.query(page_size).apply(&users), |u| {
                format!("{} {} {}", status(u.is_active), u.name, u.phone.as_deref().unwrap_or("-"))
            });
        }
        Command::Sla(list) => {
            require(&role, Capability::ViewReports)?;
            let violations = api.sla_violations().await?;
            print_page(&list.query(page_size).apply(&violations), |v| {
                format!("{} {} +{:.1}h (expected {:.1}h)", v.order_id, v.stage, v.overrun_hours(), v.expected_hours)
            });
        }
        Command::ToggleDealer { id, state } => {
            require(&role, Capability::ToggleDealer)?;
            let dealer = api.set_dealer_active(&id, state == Toggle::On).await?;
            println!("✅ {} is now {}", dealer.name, if dealer.is_active { "enabled" } else { "disabled" });
        }
        Command::ToggleEmployee { id, state } => {
            require(&role, Capability::ToggleEmployee)?;
            let employee = api.set_employee_active(&id, state == Toggle::On).await?;
            println!("✅ {} is now {}", employee.name, if employee.is_active { "enabled" } else { "disabled" });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use partshop_core::table::SortDirection;

    use super::*;

    #[test]
    fn command_definition_is_consistent() { Cli::command().debug_assert(); }

    #[test]
    fn list_flags_parse_anywhere() {
        let cli = Cli::try_parse_from(["partshop-admin", "dealers", "--search", "pune", "--sort", "city:desc", "--page", "2", "--role", "Super-Admin"]).unwrap();
        assert_eq!(cli.role.as_deref(), Some("Super-Admin"));
        let Command::Dealers(list) = cli.command else { panic!("expected dealers") };
        assert_eq!(list.search.as_deref(), Some("pune"));
        assert_eq!(list.page, Some(2));
        let sort = list.sort.unwrap();
        assert_eq!(sort.column, "city");
        assert_eq!(sort.direction, SortDirection::Descending);
    }

    #[test]
    fn bad_flags_are_rejected() {
        assert!(Cli::try_parse_from(["partshop-admin", "dealers", "--bogus", "x"]).is_err());
        assert!(Cli::try_parse_from(["partshop-admin", "dealers", "--search"]).is_err());
        assert!(Cli::try_parse_from(["partshop-admin", "dealers", "--page", "0"]).is_err());
        assert!(Cli::try_parse_from(["partshop-admin", "dealers", "--sort", "city:sideways"]).is_err());
        assert!(Cli::try_parse_from(["partshop-admin", "toggle-dealer", "d1", "maybe"]).is_err());
    }

    #[test]
    fn toggle_takes_id_and_state() {
        let cli = Cli::try_parse_from(["partshop-admin", "toggle-employee", "e7", "off"]).unwrap();
        match cli.command {
            Command::ToggleEmployee { id, state } => {
                assert_eq!(id, "e7");
                assert_eq!(state, Toggle::Off);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
