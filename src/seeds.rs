//! The curated set of Wikinews articles to process.
//!
//! The built-in list spans five categories and a range of article lengths.
//! A different set can be supplied as a JSON array or YAML sequence of
//! `{date, title, url, category}` objects.

use crate::models::ArticleDescriptor;
use chrono::NaiveDate;
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

const BUILTIN: &[(&str, &str, &str, &str)] = &[
    (
        "2022-06-03",
        "Scientists discover seagrass off Australia is world's largest plant",
        "https://en.wikinews.org/wiki/Scientists_discover_seagrass_off_Australia_is_world%27s_largest_plant",
        "Science & Environment",
    ),
    (
        "2022-09-26",
        "United Kingdom buries Queen Elizabeth II after state funeral",
        "https://en.wikinews.org/wiki/United_Kingdom_buries_Queen_Elizabeth_II_after_state_funeral",
        "Politics & Policy",
    ),
    (
        "2023-08-13",
        "US: Tulsa residents approve $814 million infrastructure package",
        "https://en.wikinews.org/wiki/US%3A_Tulsa_residents_approve_%24814_million_infrastructure_package",
        "Politics & Policy",
    ),
    (
        "2025-02-10",
        "UK heavy metal band Black Sabbath announces final performance with original lineup",
        "https://en.wikinews.org/wiki/UK_heavy_metal_band_Black_Sabbath_announces_final_performance_with_original_lineup",
        "Entertainment",
    ),
    (
        "2025-02-19",
        "78th British Academy Film Awards held in London",
        "https://en.wikinews.org/wiki/78th_British_Academy_Film_Awards_held_in_London",
        "Entertainment",
    ),
    (
        "2025-03-10",
        "India defeats New Zealand to win 2025 Champions Trophy",
        "https://en.wikinews.org/wiki/India_defeats_New_Zealand_to_win_2025_Champions_Trophy",
        "Sports",
    ),
    (
        "2025-04-20",
        "Ryan Gosling cast in upcoming Star Wars film",
        "https://en.wikinews.org/wiki/Ryan_Gosling_cast_in_upcoming_Star_Wars_film",
        "Entertainment",
    ),
    (
        "2025-04-23",
        "Researchers film colossal squid in its natural habitat for the first time",
        "https://en.wikinews.org/wiki/Researchers_film_colossal_squid_in_its_natural_habitat_for_the_first_time",
        "Science & Environment",
    ),
    (
        "2025-05-16",
        "Thai officials seize 238 tons of illegal e-waste at Bangkok port",
        "https://en.wikinews.org/wiki/Thai_officials_seize_238_tons_of_illegal_e-waste_at_Bangkok_port",
        "Science & Environment",
    ),
    (
        "2025-07-10",
        "20-year-old astrophotographer captures rare solar eclipse on Saturn",
        "https://en.wikinews.org/wiki/20-year-old_astrophotographer_captures_rare_solar_eclipse_on_Saturn",
        "Science & Environment",
    ),
    (
        "2023-05-01",
        "Microsoft, Nware sign 10-year cloud gaming deal",
        "https://en.wikinews.org/wiki/Microsoft,_Nware_sign_10-year_cloud_gaming_deal",
        "Business & Technology",
    ),
    (
        "2018-06-30",
        "FIFA World Cup 2018 Last 16: France, Uruguay send Argentina, Portugal home",
        "https://en.wikinews.org/wiki/FIFA_World_Cup_2018_Last_16:_France,_Uruguay_send_Argentina,_Portugal_home",
        "Sports",
    ),
    (
        "2021-07-14",
        "European Union to reduce carbon emissions by 55% of 1990 levels by 2030",
        "https://en.wikinews.org/wiki/European_Union_to_reduce_carbon_emissions_by_55%_of_1990_levels_by_2030",
        "Politics & Policy",
    ),
    (
        "2024-11-15",
        "SpaceX will return stranded astronauts in February 2025, NASA announces",
        "https://en.wikinews.org/wiki/SpaceX_will_return_stranded_astronauts_in_February_2025,_NASA_announces",
        "Business & Technology",
    ),
    (
        "2023-12-17",
        "GSK rejects three Unilever bids to buy consumer healthcare arm, says unit was fundamentally undervalued",
        "https://en.wikinews.org/wiki/GSK_rejects_three_Unilever_bids_to_buy_consumer_healthcare_arm,_says_%22fundamentally_undervalued%22",
        "Business & Technology",
    ),
];

/// The built-in seed list.
pub fn default_seeds() -> Vec<ArticleDescriptor> {
    BUILTIN
        .iter()
        .map(|(date, title, url, category)| ArticleDescriptor {
            date: date.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            category: category.to_string(),
        })
        .collect()
}

/// Parse seeds from text; `json` selects JSON over YAML.
pub fn parse_seeds(text: &str, json: bool) -> Result<Vec<ArticleDescriptor>, Box<dyn Error>> {
    let seeds: Vec<ArticleDescriptor> = if json {
        serde_json::from_str(text)?
    } else {
        serde_yaml::from_str(text)?
    };
    for seed in &seeds {
        validate(seed)?;
    }
    Ok(seeds)
}

fn validate(seed: &ArticleDescriptor) -> Result<(), Box<dyn Error>> {
    NaiveDate::parse_from_str(&seed.date, "%Y-%m-%d")
        .map_err(|e| format!("seed {:?}: bad date {:?}: {e}", seed.title, seed.date))?;
    url::Url::parse(&seed.url)
        .map_err(|e| format!("seed {:?}: bad url {:?}: {e}", seed.title, seed.url))?;
    Ok(())
}

/// Load seeds from a file, choosing JSON for `.json` and YAML otherwise.
#[instrument(level = "info")]
pub async fn load_seeds(path: &str) -> Result<Vec<ArticleDescriptor>, Box<dyn Error>> {
    let text = tokio::fs::read_to_string(path).await?;
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let seeds = parse_seeds(&text, is_json)?;
    info!(count = seeds.len(), "Loaded seed descriptors");
    Ok(seeds)
}
