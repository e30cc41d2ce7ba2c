//! Schedule link generation
//!
//! Builds the lolesports schedule page URLs for a [`CrawlConfig`]. Each link is
//! assembled in four steps:
//!
//! 1. Site root (`base_url`, or the English locale root)
//! 2. Region path and year: `na-lcs/na_2017_`
//! 3. Split: `spring/schedule/`
//! 4. Week or playoff bracket: `regular_season/3`, `playoffs/Finals`
//!
//! Generation is pure: no page is requested here.

mod week;

pub use week::{apply_week, clean_up_links, PLAYOFF_BRACKETS};

use crate::config::{CrawlConfig, Region, Split};
use crate::{Advised, Advisory, ConfigError, Result};
use chrono::Datelike;

/// Site root used when the configuration does not override it
pub const DEFAULT_BASE_URL: &str = "https://www.lolesports.com/en_US/";

/// Generates every schedule link selected by `config`
///
/// The result may be empty when cleanup removed every link; that case is
/// reported through [`Advisory::AllLinksRemoved`] rather than an error.
///
/// # Example
///
/// ```
/// use riftcrawl::config::{CrawlConfig, Region, Split, WeekSpec};
/// use riftcrawl::links::generate;
///
/// let config = CrawlConfig::new(Region::Lck, Split::Spring, WeekSpec::Single(3)).with_year(2018);
/// let links = generate(&config).unwrap();
/// assert_eq!(
///     links.value,
///     vec!["https://www.lolesports.com/en_US/lck/lck_2018_spring/schedule/regular_season/3"]
/// );
/// ```
pub fn generate(config: &CrawlConfig) -> Result<Advised<Vec<String>>> {
    let base = resolve_base(config.base_url.as_deref())?;

    let mut advisories = Vec::new();
    let year = match config.year {
        Some(year) => year,
        None => {
            let year = chrono::Local::now().year();
            advisories.push(Advisory::YearDefaulted(year));
            year
        }
    };

    let prefixes = schedule_prefixes(base, config.region, year, config.split);
    let mut links = apply_week(&prefixes, config.region, &config.week)?;
    advisories.append(&mut links.advisories);

    tracing::debug!(
        "Generated {} schedule links for {} {} {}",
        links.value.len(),
        config.region,
        config.split,
        config.week
    );

    Ok(Advised {
        value: links.value,
        advisories,
    })
}

/// Picks the site root, rejecting an explicitly empty override
fn resolve_base(base_url: Option<&str>) -> Result<&str> {
    match base_url {
        None => Ok(DEFAULT_BASE_URL),
        Some("") => Err(ConfigError::InvalidBaseExtension(
            "base url must not be empty".to_string(),
        )
        .into()),
        Some(base) => Ok(base),
    }
}

/// Builds the schedule prefixes, one per region and split
///
/// With `Split::All` every spring prefix comes before every summer prefix;
/// within a split the regions keep the order of [`Region::CONCRETE`].
pub fn schedule_prefixes(base: &str, region: Region, year: i32, split: Split) -> Vec<String> {
    let regional: Vec<String> = region
        .expand()
        .into_iter()
        .filter_map(Region::path_segment)
        .map(|segment| format!("{}{}{}_", base, segment, year))
        .collect();

    split
        .segments()
        .iter()
        .flat_map(|split| {
            regional
                .iter()
                .map(move |prefix| format!("{}{}/schedule/", prefix, split))
        })
        .collect()
}
