//! Week selector resolution and dead-link cleanup

use crate::config::{Region, WeekSpec};
use crate::{Advised, Advisory, HarvestError, Result};

/// Playoff bracket labels, URL-encoded, in the order their links are generated
pub const PLAYOFF_BRACKETS: [&str; 7] = [
    "Wild%20Card",
    "Round%201",
    "Round%202",
    "Round%203",
    "Finals",
    "Quarterfinals",
    "Semifinals",
];

/// Number of regular-season weeks every region plays
const REGULAR_WEEKS: u32 = 9;

/// Appends the week or bracket path to every schedule prefix
///
/// Links are ordered per week, then per prefix: week 1 for every prefix, then
/// week 2 for every prefix, and so on. Selectors that include playoff brackets
/// are passed through [`clean_up_links`].
pub fn apply_week(
    prefixes: &[String],
    region: Region,
    week: &WeekSpec,
) -> Result<Advised<Vec<String>>> {
    match week {
        WeekSpec::Single(week) => Ok(Advised::new(regular_season(prefixes, *week..=*week))),

        WeekSpec::Range { start, end } => {
            if *start == 0 || start > end {
                return Err(HarvestError::WeekResolution(format!(
                    "week range {}..={} is empty or starts before week 1",
                    start, end
                )));
            }
            Ok(Advised::new(regular_season(prefixes, *start..=*end)))
        }

        WeekSpec::All => {
            let mut links = regular_season(prefixes, 1..=REGULAR_WEEKS);
            if region.has_tenth_week() {
                links.extend(regular_season(prefixes, 10..=10));
            }
            links.extend(playoffs(prefixes, &PLAYOFF_BRACKETS));
            Ok(clean_up_links(links))
        }

        WeekSpec::Playoffs => Ok(clean_up_links(playoffs(prefixes, &PLAYOFF_BRACKETS))),

        WeekSpec::Named(bracket) => Ok(clean_up_links(playoffs(prefixes, &[bracket.as_str()]))),
    }
}

fn regular_season(prefixes: &[String], weeks: std::ops::RangeInclusive<u32>) -> Vec<String> {
    weeks
        .flat_map(move |week| {
            prefixes
                .iter()
                .map(move |prefix| format!("{}regular_season/{}", prefix, week))
        })
        .collect()
}

fn playoffs(prefixes: &[String], brackets: &[&str]) -> Vec<String> {
    brackets
        .iter()
        .flat_map(move |bracket| {
            prefixes
                .iter()
                .map(move |prefix| format!("{}playoffs/{}", prefix, bracket))
        })
        .collect()
}

/// Removes links known to be dead
///
/// A link is dropped when it contains both an encoded space and a hyphen: the
/// hyphenated leagues (`na-lcs`, `eu-lcs`, `na-academy`) have no pages for the
/// multi-word brackets. An empty result carries [`Advisory::AllLinksRemoved`].
pub fn clean_up_links(links: Vec<String>) -> Advised<Vec<String>> {
    let before = links.len();
    let kept: Vec<String> = links
        .into_iter()
        .filter(|link| !(link.contains("%20") && link.contains('-')))
        .collect();

    if kept.len() != before {
        tracing::debug!("Cleanup removed {} of {} links", before - kept.len(), before);
    }

    if kept.is_empty() {
        Advised::new(kept).with_advisory(Advisory::AllLinksRemoved)
    } else {
        Advised::new(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes() -> Vec<String> {
        vec!["a/".to_string(), "b/".to_string()]
    }

    #[test]
    fn test_range_is_ordered_per_week_then_prefix() {
        let links = apply_week(&prefixes(), Region::Na, &WeekSpec::Range { start: 1, end: 2 })
            .unwrap()
            .value;
        assert_eq!(
            links,
            vec![
                "a/regular_season/1",
                "b/regular_season/1",
                "a/regular_season/2",
                "b/regular_season/2",
            ]
        );
    }

    #[test]
    fn test_invalid_range() {
        let result = apply_week(&prefixes(), Region::Na, &WeekSpec::Range { start: 3, end: 2 });
        assert!(matches!(result, Err(HarvestError::WeekResolution(_))));
    }

    #[test]
    fn test_playoffs_order() {
        let links = apply_week(&["x/".to_string()], Region::Lck, &WeekSpec::Playoffs)
            .unwrap()
            .value;
        let expected: Vec<String> = PLAYOFF_BRACKETS
            .iter()
            .map(|b| format!("x/playoffs/{}", b))
            .collect();
        assert_eq!(links, expected);
    }

    #[test]
    fn test_named_bracket() {
        let advised = apply_week(&prefixes(), Region::Na, &WeekSpec::Named("Finals".into())).unwrap();
        assert_eq!(advised.value, vec!["a/playoffs/Finals", "b/playoffs/Finals"]);
        assert!(advised.advisories.is_empty());
    }

    #[test]
    fn test_cleanup_keeps_unhyphenated() {
        let advised = clean_up_links(vec![
            "lck/playoffs/Round%201".to_string(),
            "na-lcs/playoffs/Round%201".to_string(),
            "na-lcs/playoffs/Finals".to_string(),
        ]);
        assert_eq!(
            advised.value,
            vec!["lck/playoffs/Round%201", "na-lcs/playoffs/Finals"]
        );
        assert!(advised.advisories.is_empty());
    }

    #[test]
    fn test_cleanup_everything_removed() {
        let advised = clean_up_links(vec!["na-lcs/playoffs/Wild%20Card".to_string()]);
        assert!(advised.value.is_empty());
        assert_eq!(advised.advisories, vec![Advisory::AllLinksRemoved]);
    }
}
