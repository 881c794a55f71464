//! Agent catalog commands

use colored::*;
use eyre::{Context, Result};
use serde::Serialize;

use super::{client, print_structured, term_width, truncate};
use crate::api::SimilarAgents;
use crate::catalog::engine::CategorizedResult;
use crate::catalog::filter::{Dimension, FilterSelection};
use crate::catalog::loader::{self, CatalogView, Directory, LoadEvent, LoadState};
use crate::catalog::{Agent, CatalogStore, FilterOptionSet};
use crate::cli::{AgentsAction, OutputFormat};
use crate::config::Config;
use crate::notify::Notifier;

pub fn run(action: AgentsAction, config: &Config, notifier: &dyn Notifier) -> Result<()> {
    match action {
        AgentsAction::List {
            access,
            pricing,
            category,
            industry,
            format,
        } => {
            let requested = [
                (Dimension::AccessModel, access),
                (Dimension::PricingModel, pricing),
                (Dimension::Category, category),
                (Dimension::Industry, industry),
            ];
            list(&requested, OutputFormat::resolve(format), config, notifier)
        }
        AgentsAction::Filters { dimension, format } => {
            let dimension = dimension.map(|d| d.parse::<Dimension>()).transpose()?;
            filters(dimension, OutputFormat::resolve(format), config, notifier)
        }
        AgentsAction::Show { id, format } => show(&id, OutputFormat::resolve(format), config, notifier),
    }
}

#[derive(Serialize)]
struct ListOutput<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    filters: &'a FilterSelection,
    total: usize,
    groups: CategorizedResult<'a>,
}

fn list(
    requested: &[(Dimension, Option<String>)],
    format: OutputFormat,
    config: &Config,
    notifier: &dyn Notifier,
) -> Result<()> {
    let mut directory = loader::load(client(config), notifier)?;

    for (dimension, value) in requested {
        match value {
            Some(value) => directory.selection_mut().set_filter(*dimension, value.as_str()),
            None => directory.selection_mut().reset_filter(*dimension),
        }
    }

    let view = directory.view();

    if format != OutputFormat::Text {
        let (status, error, groups) = match view {
            CatalogView::Loading => ("loading", None, CategorizedResult::default()),
            CatalogView::Failed(reason) => ("failed", Some(reason), CategorizedResult::default()),
            CatalogView::Empty => ("empty", None, CategorizedResult::default()),
            CatalogView::Results(groups) => ("loaded", None, groups),
        };
        let output = ListOutput {
            status,
            error,
            filters: directory.selection(),
            total: groups.total(),
            groups,
        };
        return print_structured(format, &output);
    }

    print_active_filters(directory.selection());
    if directory.options().is_failed() {
        println!("{}", "Filter options unavailable; values are matched as given.".dimmed());
        println!();
    }

    match view {
        CatalogView::Loading => println!("{}", "Loading agents...".dimmed()),
        CatalogView::Failed(_) => {
            println!("{}", "Agents could not be loaded.".red().bold());
            println!("  Check your connection or {} and try again.", "api.base_url".cyan());
        }
        CatalogView::Empty => {
            println!("{}", "No agents match the selected filters.".yellow());
        }
        CatalogView::Results(groups) => {
            let catalog_size = directory.catalog().loaded().map(CatalogStore::len).unwrap_or_default();
            print_groups(&groups, catalog_size);
        }
    }

    Ok(())
}

fn print_active_filters(selection: &FilterSelection) {
    if selection.is_unconstrained() {
        return;
    }

    let shown: Vec<String> = Dimension::ALL
        .into_iter()
        .map(|dim| {
            let value = selection.display_value(dim);
            if selection.get(dim).is_some() {
                value.cyan().to_string()
            } else {
                value.dimmed().to_string()
            }
        })
        .collect();
    println!("{} {}", "Filters:".bold(), shown.join(" | "));
    println!();
}

fn print_groups(groups: &CategorizedResult, catalog_size: usize) {
    let width = term_width().saturating_sub(4).max(20);

    for (category, agents) in groups.iter() {
        println!("{} {}", category.bold().magenta(), format!("({})", agents.len()).dimmed());
        for agent in agents {
            println!(
                "  {} {} {} {}",
                "●".green(),
                agent.name.bold(),
                agent.id.dimmed(),
                format!("♥ {}", agent.saved_by_count).red()
            );
            let description = if agent.short_description.is_empty() {
                "No description provided."
            } else {
                agent.short_description.as_str()
            };
            println!("    {}", truncate(description, width).dimmed());
        }
        println!();
    }

    println!(
        "{} of {} agents in {} categories",
        groups.total().to_string().bold(),
        catalog_size,
        groups.len().to_string().bold()
    );
}

fn filters(
    only: Option<Dimension>,
    format: OutputFormat,
    config: &Config,
    notifier: &dyn Notifier,
) -> Result<()> {
    let api = client(config);
    let mut directory = Directory::new();
    directory.apply(LoadEvent::Options(api.fetch_filter_options()), notifier);

    let options = match directory.options() {
        LoadState::Loaded(options) => options,
        LoadState::Failed(reason) => {
            if format == OutputFormat::Text {
                println!("{}", "Filter options could not be loaded.".red().bold());
            } else {
                print_structured(format, &serde_json::json!({ "status": "failed", "error": reason }))?;
            }
            return Ok(());
        }
        LoadState::Loading => return Ok(()),
    };

    if format != OutputFormat::Text {
        return match only {
            Some(dimension) => print_structured(format, &dimension.options(options)),
            None => print_structured(format, options),
        };
    }

    match only {
        Some(dimension) => print_options(options, &[dimension]),
        None => print_options(options, &Dimension::ALL),
    }
    Ok(())
}

fn print_options(options: &FilterOptionSet, dimensions: &[Dimension]) {
    for &dimension in dimensions {
        println!(
            "{} {}",
            dimension.label().bold(),
            format!("(--{}, unset: {})", dimension, dimension.sentinel()).dimmed()
        );
        let values = dimension.options(options);
        if values.is_empty() {
            println!("  {}", "(none)".dimmed());
        }
        for value in values {
            println!("  {} {}", "•".cyan(), value);
        }
        println!();
    }
}

fn show(id: &str, format: OutputFormat, config: &Config, notifier: &dyn Notifier) -> Result<()> {
    let api = client(config);
    let similar = match api.fetch_similar(id) {
        Ok(similar) => similar,
        Err(e) => {
            notifier.error("Failed to load agent details.");
            return Err(e).context(format!("Failed to load agent {}", id));
        }
    };

    if format != OutputFormat::Text {
        return print_structured(format, &similar);
    }

    print_agent(&similar);
    Ok(())
}

fn print_agent(similar: &SimilarAgents) {
    let agent = &similar.agent;
    let name = if agent.name.is_empty() { "Unknown Agent" } else { agent.name.as_str() };

    println!("{} {}", name.green().bold(), agent.id.dimmed());
    println!(
        "{}",
        or_default(&agent.short_description, "No short description available.")
    );
    println!();

    println!("  {} {}", "Category:".bold(), or_default(&agent.category, "Uncategorized"));
    println!("  {} {}", "Industry:".bold(), or_default(&agent.industry, "Unknown Industry"));
    println!("  {} {}", "Access:".bold(), or_default(&agent.access_model, "-"));
    println!("  {} {}", "Pricing:".bold(), or_default(&agent.pricing_model, "-"));
    println!("  {} {}", "Tried by:".bold(), agent.tried_by);
    println!("  {} {}", "Saved by:".bold(), agent.saved_by_count);
    if let Some(ref url) = agent.website_url {
        println!("  {} {}", "Website:".bold(), url.cyan());
    }

    println!();
    println!("{}", "Description:".bold());
    println!(
        "  {}",
        or_default(&agent.description, "No detailed description available.")
    );

    print_list("Key Features:", &agent.key_features, "No key features available.");
    print_list("Use Cases:", &agent.use_cases, "No use cases available.");

    if !similar.best_matches.is_empty() {
        println!();
        println!("{}", "Similar Agents:".bold());
        for other in &similar.best_matches {
            print_similar(other);
        }
    }
}

fn print_list(heading: &str, items: &[String], empty: &str) {
    println!();
    println!("{}", heading.bold());
    if items.is_empty() {
        println!("  {}", empty.dimmed());
    }
    for item in items {
        println!("  {} {}", "✓".green(), item);
    }
}

fn print_similar(agent: &Agent) {
    println!(
        "  {} {} {} {}",
        "→".blue(),
        agent.name.bold(),
        agent.id.dimmed(),
        or_default(&agent.category, "Uncategorized").magenta()
    );
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}
