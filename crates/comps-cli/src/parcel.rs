//! `locate` and `parcel` command handlers.

use anyhow::Context;
use comps_core::AppConfig;
use comps_parcel::{Bbl, Borough, GeoClient, OpenDataClient, ParcelReport};

/// Accepts a borough code (`1`-`5`) or a borough or county name. Unknown
/// names are rejected rather than guessed.
pub(crate) fn parse_borough(raw: &str) -> anyhow::Result<Borough> {
    let trimmed = raw.trim();
    if let Ok(code) = trimmed.parse::<u8>() {
        return Borough::from_code(code)
            .ok_or_else(|| anyhow::anyhow!("borough code must be 1-5, got {code}"));
    }
    Borough::from_name(trimmed).ok_or_else(|| anyhow::anyhow!("unknown borough '{trimmed}'"))
}

/// # Errors
///
/// Returns an error if no GeoClient key is configured or the lookup fails.
pub(crate) async fn run_locate(
    config: &AppConfig,
    house: &str,
    street: &str,
    borough: &str,
) -> anyhow::Result<()> {
    let key = config.require_geoclient_key()?;
    let borough = parse_borough(borough)?;
    let client = GeoClient::new(key, config.http_timeout_secs, &config.user_agent)?;

    let found = client.locate(house, street, borough).await?;
    println!("bbl:       {}", found.bbl);
    println!("borough:   {}", found.bbl.borough);
    println!("block:     {}", found.bbl.padded_block());
    println!("lot:       {}", found.bbl.padded_lot());
    if let (Some(lat), Some(lon)) = (found.latitude, found.longitude) {
        println!("location:  {lat},{lon}");
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the BBL does not parse or any Open Data lookup fails.
pub(crate) async fn run_parcel(config: &AppConfig, bbl: &str) -> anyhow::Result<()> {
    let bbl: Bbl = bbl.parse()?;
    let client = OpenDataClient::new(
        config.open_data_app_token.as_deref(),
        config.http_timeout_secs,
        &config.user_agent,
    )?;

    let report = client
        .parcel_report(&bbl)
        .await
        .with_context(|| format!("unable to load parcel {bbl}"))?;

    for line in summarize_report(&bbl, &report) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn summarize_report(bbl: &Bbl, report: &ParcelReport) -> Vec<String> {
    let mut lines = vec![format!("# Parcel {bbl} ({})", bbl.borough)];

    match &report.lot {
        Some(lot) => {
            for (label, value) in [
                ("land use", &lot.land_use),
                ("zoning", &lot.zoning),
                ("lot area", &lot.lot_area),
                ("bldg area", &lot.building_area),
                ("year built", &lot.year_built),
                ("units", &lot.total_units),
            ] {
                let value = value.as_deref().unwrap_or("-");
                lines.push(format!("{:<13}{value}", format!("{label}:")));
            }
        }
        None => lines.push("no PLUTO record".to_string()),
    }

    lines.push(format!(
        "violations:  {} ({} open)",
        report.violations.len(),
        report.open_violation_count()
    ));

    lines.push(format!("documents:   {}", report.documents.len()));
    for doc in &report.documents {
        let parties: Vec<&str> = report
            .parties
            .iter()
            .filter(|p| p.document_id == doc.document_id)
            .map(|p| p.party_name.as_str())
            .collect();
        lines.push(format!(
            "  {} {} [{}]",
            doc.document_id,
            doc.good_through_date.as_deref().unwrap_or("-"),
            parties.join("; ")
        ));
    }

    lines.push(format!("contacts:    {}", report.contacts.len()));
    for contact in &report.contacts {
        lines.push(format!(
            "  {:<18}{}  {}",
            contact.contact_type,
            contact.name.as_deref().unwrap_or("-"),
            contact.phone.as_deref().unwrap_or("")
        ));
    }

    lines
}
