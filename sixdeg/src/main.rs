use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use commands::command_argument_builder;
use indicatif::{ProgressBar, ProgressStyle};
use sixdeg_spider::client::FetchClient;
use sixdeg_spider::config::{DEFAULT_USER_AGENT, Seeds, SpiderConfig};
use sixdeg_spider::crawler::ProfileCrawler;
use sixdeg_spider::proxy::ProxyHarvester;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

mod commands;
mod handlers;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    let outcome = match chosen_command.subcommand() {
        Some(("discover", primary_command)) => handle_discover(primary_command, quiet).await,
        Some(("proxies", primary_command)) => handle_proxies(primary_command).await,
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn handle_discover(args: &ArgMatches, quiet: bool) -> Result<()> {
    let seeds = load_seeds(args)?;
    let depth = *args.get_one::<u32>("depth").expect("has default");
    let delay_min = *args.get_one::<u64>("delay-min").expect("has default");
    let delay_max = *args.get_one::<u64>("delay-max").expect("has default");
    if delay_max < delay_min {
        bail!("--delay-max must be at least --delay-min");
    }
    let terms: Vec<String> = args
        .get_many::<String>("term")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let mut config = SpiderConfig::default()
        .with_search_terms(terms)
        .with_seed_profiles(seeds.clone())
        .with_delay_ms(delay_min, delay_max);
    if let Some(base) = args.get_one::<Url>("base") {
        config = config.with_profile_base(base.as_str().to_string());
    }

    let mut crawler = ProfileCrawler::new(config.clone());
    if let Some(listing) = args.get_one::<Url>("proxies-from") {
        let client = FetchClient::new(config.user_agent.clone(), config.retry.clone());
        let pool = ProxyHarvester::new(client, listing.as_str().to_string())
            .harvest()
            .await
            .context("proxy harvest failed; refusing to crawl with a partial pool")?;
        if !quiet {
            println!("Routing fetches through {} harvested proxies", pool.len());
        }
        crawler = crawler.with_proxy_pool(pool);
    }

    let spinner = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!(
            "Discovering profiles from {} seed(s), depth {}...",
            seeds.len(),
            depth
        ));
        Some(pb)
    };

    let people = crawler.build_profile_list(Seeds::Many(seeds), depth).await;

    if let Some(pb) = spinner {
        pb.finish_with_message(format!("Discovered {} profiles", people.len()));
    }

    let report = serde_json::to_string_pretty(&people)?;
    match args.get_one::<PathBuf>("output") {
        Some(path) => {
            fs::write(path, report)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if !quiet {
                println!("Profile list saved to {}", path.display());
            }
        }
        None => println!("{report}"),
    }
    Ok(())
}

async fn handle_proxies(args: &ArgMatches) -> Result<()> {
    let endpoint = args.get_one::<Url>("url").expect("required");
    let pages = *args.get_one::<u32>("pages").expect("has default");
    let tier = args.get_one::<String>("tier").expect("has default");

    let client = FetchClient::new(DEFAULT_USER_AGENT.to_string(), Default::default());
    let pool = ProxyHarvester::new(client, endpoint.as_str().to_string())
        .with_pages(pages)
        .with_tier(tier.clone())
        .harvest()
        .await
        .context("proxy harvest failed; no partial pool is kept")?;

    println!("{}", serde_json::to_string_pretty(&pool)?);
    Ok(())
}

/// Resolve seeds from either repeated `--seed` flags or a seeds file.
fn load_seeds(args: &ArgMatches) -> Result<Vec<String>> {
    if let Some(path) = args.get_one::<PathBuf>("seeds-file") {
        return handlers::load_seeds_from_file(path);
    }

    let seeds: Vec<String> = args
        .get_many::<String>("seed")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    if seeds.is_empty() {
        bail!("either --seed or --seeds-file must be provided");
    }
    Ok(seeds)
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
