use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use partshop_api::ApiClient;
use partshop_cli::{init_tracing, load_settings};
use partshop_search::{FlowContext, FlowError, GuidedSearch, SearchSession, SearchState, StepKind};

#[derive(Debug, Parser)]
#[command(name = "partshop-search", about = "Guided brand, model, category and variant search")]
struct Cli {
    /// Query to classify before prompting
    query: Vec<String>,
}

/// `(id, label)` pairs the current step offers.
fn options(state: &SearchState) -> Vec<(String, String)> {
    fn pairs<'a>(it: impl Iterator<Item = (&'a String, &'a String)>) -> Vec<(String, String)> {
        it.map(|(id, name)| (id.clone(), name.clone())).collect()
    }
    match state {
        SearchState::Brand(step) => pairs(step.brands().iter().map(|b| (&b.id, &b.name))),
        SearchState::Model(step) => pairs(step.models().iter().map(|m| (&m.id, &m.name))),
        SearchState::Category(step) => pairs(step.categories().iter().map(|c| (&c.id, &c.name))),
        SearchState::Variant(step) => pairs(step.variants().iter().map(|v| (&v.id, &v.name))),
        SearchState::Search | SearchState::Closed(_) => Vec::new(),
    }
}

fn render(flow: &GuidedSearch) {
    let path = flow.path();
    let crumbs: Vec<&str> = [
        path.brand.as_ref().map(|b| b.name.as_str()),
        path.model.as_ref().map(|m| m.name.as_str()),
        path.category.as_ref().map(|c| c.name.as_str()),
    ]
    .into_iter()
    .flatten()
    .collect();

    println!();
    if crumbs.is_empty() {
        println!("── {} ──", flow.step());
    } else {
        println!("── {} ── {}", flow.step(), crumbs.join(" › "));
    }
    if let Some(error) = flow.error() {
        println!("❌ {}", error);
    }
    for (i, (_, label)) in options(flow.state()).iter().enumerate() {
        println!("  {:>2}. {}", i + 1, label);
    }
}

/// Print errors the next render will not already show as the banner.
fn report(flow: &GuidedSearch, error: &FlowError) {
    if flow.error() != Some(error) {
        println!("❌ {}", error);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = load_settings()?;
    let api = ApiClient::new(&settings.api)?;
    let mut session = SearchSession::new(api, FlowContext::from_settings(&settings));

    println!("🔍 Guided part search");
    println!("Type a brand, model or part number. Pick options by number, 'b' goes back, 'q' quits.");

    let mut initial = Some(cli.query.join(" ")).filter(|q| !q.trim().is_empty());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        render(session.flow());
        let step = session.flow().step();

        let input = match initial.take() {
            Some(query) if step == StepKind::Search => query,
            _ => {
                stdout.write_all(b"> ").await?;
                stdout.flush().await?;
                match lines.next_line().await? {
                    Some(line) => line.trim().to_string(),
                    None => break,
                }
            }
        };

        match input.as_str() {
            "q" | "quit" => break,
            "b" | "back" => {
                if !session.back() {
                    println!("Nothing to go back to.");
                }
                continue;
            }
            _ => {}
        }

        if step == StepKind::Search {
            match session.submit(&input).await {
                Ok(Some(link)) => {
                    println!("✅ {}", link);
                    break;
                }
                Ok(None) => continue,
                Err(error) => {
                    report(session.flow(), &error);
                    continue;
                }
            }
        }

        let choices = options(session.flow().state());
        let Some((id, _)) = input.parse::<usize>().ok().and_then(|n| n.checked_sub(1)).and_then(|i| choices.get(i)) else {
            println!("Enter a number between 1 and {}.", choices.len());
            continue;
        };

        let outcome = match step {
            StepKind::Brand => session.choose_brand(id).await,
            StepKind::Model => session.choose_model(id).await,
            StepKind::Category => session.choose_category(id).await,
            StepKind::Variant => match session.choose_variant(id) {
                Ok(link) => {
                    println!("✅ {}", link);
                    break;
                }
                Err(error) => Err(error),
            },
            StepKind::Search | StepKind::Closed => Ok(()),
        };
        if let Err(error) = outcome {
            report(session.flow(), &error);
        }
    }
    Ok(())
}
