use chrono::Utc;
use clap::{Parser, Subcommand};

use partshop_api::ApiClient;
use partshop_cli::{init_tracing, load_settings};
use partshop_core::traits::OrderApi;
use partshop_orders::returns::{self, ReturnDraft};
use partshop_orders::reviews::ReviewDraft;
use partshop_orders::timeline::{current_stage, timeline};

#[derive(Debug, Parser)]
#[command(name = "partshop-orders", about = "Track an order, request returns and post reviews")]
struct Cli {
    order_id: String,

    /// Defaults to `timeline`
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the order's stages and items
    Timeline,
    /// Open a return for one order item
    Return {
        item_id: String,
        quantity: u32,
        #[arg(required = true, num_args = 1..)]
        reason: Vec<String>,
    },
    /// Withdraw a return nobody has acted on yet
    CancelReturn { return_id: String },
    /// Review a delivered product from this order
    Review {
        product_id: String,
        rating: u8,
        title: String,
        comment: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let settings = load_settings()?;
    let api = ApiClient::new(&settings.api)?;
    let order = api.order(&cli.order_id).await?;

    match cli.command.unwrap_or(Command::Timeline) {
        Command::Timeline => {
            println!("📦 Order {}: {}", order.id, current_stage(&order));
            for entry in timeline(&order) {
                println!("  {}  {}", entry.at.format("%Y-%m-%d %H:%M"), entry.stage);
            }
            for item in &order.items {
                println!("  • {} × {} ({})", item.quantity, item.name, item.id);
            }
        }
        Command::Return { item_id, quantity, reason } => {
            let mut draft = ReturnDraft::new(&order);
            draft.select(&item_id, quantity)?;
            draft.reason(&reason.join(" "));
            let created = draft.submit(&api, Utc::now(), settings.returns.window_days).await?;
            println!("✅ Return {} opened ({:?})", created.id, created.status);
        }
        Command::CancelReturn { return_id } => {
            let current = api.return_request(&return_id).await?;
            let cancelled = returns::cancel(&api, &current).await?;
            println!("✅ Return {} is now {:?}", cancelled.id, cancelled.status);
        }
        Command::Review { product_id, rating, title, comment } => {
            let draft = ReviewDraft::new(rating, &title, &comment.join(" "));
            let review = draft.submit(&api, &order, &product_id).await?;
            println!("✅ Review {} posted ({}★)", review.id, review.rating);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() { Cli::command().debug_assert(); }

    #[test]
    fn timeline_is_the_default() {
        let cli = Cli::try_parse_from(["partshop-orders", "o1"]).unwrap();
        assert_eq!(cli.order_id, "o1");
        assert!(cli.command.is_none());
    }

    #[test]
    fn return_reason_collects_trailing_words() {
        let cli = Cli::try_parse_from(["partshop-orders", "o1", "return", "i1", "2", "wrong", "size"]).unwrap();
        match cli.command {
            Some(Command::Return { item_id, quantity, reason }) => {
                assert_eq!(item_id, "i1");
                assert_eq!(quantity, 2);
                assert_eq!(reason.join(" "), "wrong size");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(Cli::try_parse_from(["partshop-orders", "o1", "return", "i1", "two", "x"]).is_err());
        assert!(Cli::try_parse_from(["partshop-orders", "o1", "return", "i1", "2"]).is_err());
    }
}
