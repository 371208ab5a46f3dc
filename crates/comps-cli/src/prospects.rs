//! `prospects` and `categories` command handlers.

use anyhow::Context;
use comps_core::{AppConfig, CategoriesFile, CategoryConfig, Coordinate};
use comps_directory::{ChainSizeScope, DirectoryClient};
use comps_news::NewsClient;
use comps_prospects::{ProspectPipeline, ProspectScore, ProspectSettings};

/// Categories from the configured YAML file, or the built-in list if the
/// file is missing or invalid.
pub(crate) fn load_categories_or_default(config: &AppConfig) -> CategoriesFile {
    match comps_core::load_categories(&config.categories_path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(
                path = %config.categories_path.display(),
                error = %e,
                "falling back to built-in categories"
            );
            CategoriesFile::default()
        }
    }
}

/// Picks the categories to rank: the one named by `filter` (case-insensitive)
/// or all of them.
///
/// # Errors
///
/// Returns an error if `filter` names no configured category.
pub(crate) fn select_categories(
    file: &CategoriesFile,
    filter: Option<&str>,
) -> anyhow::Result<Vec<CategoryConfig>> {
    let Some(wanted) = filter else {
        return Ok(file.categories.clone());
    };
    let wanted = wanted.trim();
    file.categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(wanted))
        .cloned()
        .map(|c| vec![c])
        .ok_or_else(|| anyhow::anyhow!("category '{wanted}' is not configured"))
}

/// Metro scope for chain-size lookups. The result cap stays at the
/// directory default; `COMPS_SEARCH_LIMIT` only bounds the candidate search.
pub(crate) fn chain_scope(config: &AppConfig) -> ChainSizeScope {
    ChainSizeScope {
        location: config.chain_metro_location.clone(),
        radius_meters: config.chain_radius_meters,
        categories: config.chain_categories.clone(),
        ..ChainSizeScope::default()
    }
}

/// # Errors
///
/// Returns an error if either API key is missing or a client cannot be built.
pub(crate) fn build_pipeline(
    config: &AppConfig,
) -> anyhow::Result<ProspectPipeline<DirectoryClient, NewsClient>> {
    let directory = DirectoryClient::new(
        config.require_yelp_api_key()?,
        config.http_timeout_secs,
        &config.user_agent,
    )?
    .with_chain_scope(chain_scope(config));
    let news = NewsClient::new(
        config.require_news_api_key()?,
        config.http_timeout_secs,
        &config.user_agent,
    )?
    .with_window_days(config.news_window_days);

    let settings = ProspectSettings {
        radius_meters: config.search_radius_meters,
        limit: config.search_limit,
        max_concurrent_candidates: config.max_concurrent_candidates,
    };
    Ok(ProspectPipeline::with_settings(directory, news, settings))
}

/// Ranks prospects for one or all categories and prints a table per
/// category. Ctrl-C abandons the in-flight ranking.
///
/// # Errors
///
/// Returns an error if the coordinate is invalid, the category is unknown,
/// a client cannot be built, or a directory search fails.
pub(crate) async fn run_prospects(
    config: &AppConfig,
    lat: f64,
    lon: f64,
    category: Option<&str>,
) -> anyhow::Result<()> {
    let coordinate = Coordinate::new(lat, lon)?;
    let categories = select_categories(&load_categories_or_default(config), category)?;
    let pipeline = build_pipeline(config)?;

    for category in &categories {
        tracing::info!(category = %category.name, %coordinate, "ranking prospects");

        let ranked = tokio::select! {
            result = pipeline.rank(&category.name, coordinate) => {
                result.context("unable to load prospects")?
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("interrupted; abandoning in-flight ranking");
                return Ok(());
            }
        };

        print_prospects(&category.display_label(), &ranked);
    }

    Ok(())
}

pub(crate) fn run_categories(config: &AppConfig) {
    let file = load_categories_or_default(config);
    println!("{:<20}LABEL", "NAME");
    for category in &file.categories {
        println!("{:<20}{}", category.name, category.display_label());
    }
}

fn print_prospects(label: &str, ranked: &[ProspectScore]) {
    println!();
    println!("## {label}");
    if ranked.is_empty() {
        println!("no prospects found");
        return;
    }
    println!(
        "{:<6}{:<36}{:<8}{:<11}{:<6}{:<8}{:<9}PHONE",
        "RANK", "NAME", "SCORE", "LOCATIONS", "NEWS", "RATING", "REVIEWS"
    );
    for line in format_rows(ranked) {
        println!("{line}");
    }
}

pub(crate) fn format_rows(ranked: &[ProspectScore]) -> Vec<String> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{:<6}{:<36}{:<8}{:<11}{:<6}{:<8.1}{:<9}{}",
                i + 1,
                truncate(&p.name, 34),
                p.formatted_score(),
                p.chain_count,
                p.news_hits,
                p.candidate.rating,
                p.candidate.review_count,
                p.candidate.phone.as_deref().unwrap_or("-")
            )
        })
        .collect()
}

fn truncate(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let mut cut: String = name.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
