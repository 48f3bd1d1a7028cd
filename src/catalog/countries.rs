use crate::prelude::*;
use anyhow::anyhow;
use once_cell::sync::Lazy;
use reqwest::Client;
use std::collections::{HashMap, HashSet};

const CATALOG_URL: &str =
    "https://raw.githubusercontent.com/lukes/ISO-3166-Countries-with-Regional-Codes/master/all/all.csv";

/// First-run preselection for the Europe scope.
pub const DEFAULT_EUROPE_COUNTRIES: [&str; 18] = [
    "Austria",
    "Belgium",
    "Czechia",
    "Denmark",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "Iceland",
    "Ireland",
    "Italy",
    "Netherlands",
    "Portugal",
    "Slovak Republic",
    "Slovenia",
    "Spain",
    "Switzerland",
    "United Kingdom",
];

/// Added to the Europe defaults to form the first-run preselection for the World scope.
pub const DEFAULT_WORLD_EXTRAS: [&str; 6] = [
    "United States",
    "Canada",
    "Egypt",
    "Japan",
    "New Zealand",
    "Turkey",
];

// Formal ISO names mapped to the display names used everywhere else, so that
// persisted identifiers stay stable across catalog refreshes.
static RENAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("United States of America", "United States"),
        (
            "United Kingdom of Great Britain and Northern Ireland",
            "United Kingdom",
        ),
        ("Russian Federation", "Russia"),
        ("Netherlands, Kingdom of the", "Netherlands"),
        ("Slovakia", "Slovak Republic"),
        ("Korea (Republic of)", "South Korea"),
        ("Viet Nam", "Vietnam"),
        ("Türkiye", "Turkey"),
    ])
});

/// All selectable countries plus the Europe subset, both in dataset order.
pub struct CountryCatalog {
    pub world: Vec<String>,
    pub europe: Vec<String>,
}

pub async fn fetch_country_catalog(client: &Client) -> Result<CountryCatalog> {
    tracing::info!("Downloading country catalog.");
    let response = client.get(CATALOG_URL).send().await?;
    if !response.status().is_success() {
        let err = format!(
            "Country catalog request failed with status {}",
            response.status()
        );
        tracing::error!(err);
        return Err(anyhow!(err));
    }

    let catalog = parse_catalog(&response.text().await?)?;
    tracing::info!(
        "Loaded {} countries, {} in Europe.",
        catalog.world.len(),
        catalog.europe.len()
    );

    Ok(catalog)
}

pub fn parse_catalog(csv: &str) -> Result<CountryCatalog> {
    let mut lines = csv.lines();
    let header = match lines.next() {
        Some(header) => split_csv_row(header),
        None => {
            let err = "Country catalog is empty";
            tracing::error!(err);
            return Err(anyhow!(err));
        }
    };

    let name_idx = column_index(&header, "name")?;
    let region_idx = column_index(&header, "region")?;

    let mut world = Vec::new();
    let mut europe = Vec::new();
    let mut seen = HashSet::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_csv_row(line);
        let (Some(name), Some(region)) = (fields.get(name_idx), fields.get(region_idx)) else {
            continue;
        };

        let name = match RENAMES.get(name.as_str()) {
            Some(renamed) => renamed.to_string(),
            None => name.clone(),
        };
        if !seen.insert(name.clone()) {
            continue;
        }

        if region == "Europe" {
            europe.push(name.clone());
        }
        world.push(name);
    }

    if world.is_empty() {
        let err = "Country catalog contains no countries";
        tracing::error!(err);
        return Err(anyhow!(err));
    }

    Ok(CountryCatalog { world, europe })
}

fn column_index(header: &[String], column: &str) -> Result<usize> {
    match header.iter().position(|field| field == column) {
        Some(idx) => Ok(idx),
        None => {
            let err = format!("Country catalog is missing the '{}' column", column);
            tracing::error!(err);
            Err(anyhow!(err))
        }
    }
}

// The dataset quotes names containing commas ("Bonaire, Sint Eustatius and Saba"),
// so a plain split(',') would shear those rows.
fn split_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}
