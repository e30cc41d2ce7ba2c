use crate::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Competitive region whose schedule is crawled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Na,
    Eu,
    Lms,
    Lck,
    Academy,
    /// Every concrete region, in the order of [`Region::CONCRETE`]
    All,
}

impl Region {
    /// Concrete regions in the order their links are generated
    pub const CONCRETE: [Region; 5] = [
        Region::Na,
        Region::Eu,
        Region::Lms,
        Region::Lck,
        Region::Academy,
    ];

    /// Expands `All` into the concrete regions; any other region yields itself
    pub fn expand(self) -> Vec<Region> {
        match self {
            Region::All => Self::CONCRETE.to_vec(),
            region => vec![region],
        }
    }

    /// Path fragment identifying the region's league and schedule slug
    ///
    /// Returns `None` for `All`, which has no page of its own.
    pub fn path_segment(self) -> Option<&'static str> {
        match self {
            Region::Na => Some("na-lcs/na_"),
            Region::Eu => Some("eu-lcs/eu_"),
            Region::Lms => Some("lms/lms_"),
            Region::Lck => Some("lck/lck_"),
            Region::Academy => Some("na-academy/na_academy_"),
            Region::All => None,
        }
    }

    /// Whether the regular season of this selection runs to a tenth week
    pub fn has_tenth_week(self) -> bool {
        matches!(self, Region::Lms | Region::Lck | Region::All)
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "na" => Ok(Region::Na),
            "eu" => Ok(Region::Eu),
            "lms" => Ok(Region::Lms),
            "lck" => Ok(Region::Lck),
            "acad" | "academy" => Ok(Region::Academy),
            "all" => Ok(Region::All),
            _ => Err(ConfigError::InvalidRegion(s.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Na => "na",
            Region::Eu => "eu",
            Region::Lms => "lms",
            Region::Lck => "lck",
            Region::Academy => "academy",
            Region::All => "all",
        };
        f.write_str(name)
    }
}

/// Half of the competitive year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Spring,
    Summer,
    /// Spring followed by summer
    All,
}

impl Split {
    /// Path segments for this split, in generation order
    pub fn segments(self) -> &'static [&'static str] {
        match self {
            Split::Spring => &["spring"],
            Split::Summer => &["summer"],
            Split::All => &["spring", "summer"],
        }
    }
}

impl FromStr for Split {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spring" => Ok(Split::Spring),
            "summer" => Ok(Split::Summer),
            "all" => Ok(Split::All),
            _ => Err(ConfigError::InvalidSplit(s.to_string())),
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Split::Spring => "spring",
            Split::Summer => "summer",
            Split::All => "all",
        };
        f.write_str(name)
    }
}

/// Which weeks or playoff brackets to crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekSpec {
    /// One regular-season week
    Single(u32),

    /// Regular-season weeks `start..=end`
    Range { start: u32, end: u32 },

    /// Every regular-season week plus every playoff bracket
    All,

    /// Every playoff bracket
    Playoffs,

    /// A single playoff bracket, taken verbatim from the config
    Named(String),
}

impl WeekSpec {
    /// Weeks one through `end`, the shape produced by the `flag` config key
    pub fn up_to(end: u32) -> Self {
        WeekSpec::Range { start: 1, end }
    }
}

impl fmt::Display for WeekSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekSpec::Single(week) => write!(f, "week {}", week),
            WeekSpec::Range { start, end } => write!(f, "weeks {}..={}", start, end),
            WeekSpec::All => f.write_str("all weeks and playoffs"),
            WeekSpec::Playoffs => f.write_str("playoffs"),
            WeekSpec::Named(token) => write!(f, "playoffs/{}", token),
        }
    }
}

/// A fully resolved crawl request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    pub region: Region,
    pub split: Split,
    pub week: WeekSpec,

    /// Site root override; `None` uses the lolesports English locale root
    pub base_url: Option<String>,

    /// Season year; `None` uses the current calendar year
    pub year: Option<i32>,
}

impl CrawlConfig {
    pub fn new(region: Region, split: Split, week: WeekSpec) -> Self {
        Self {
            region,
            split,
            week,
            base_url: None,
            year: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}
