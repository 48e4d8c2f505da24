use anyhow::{Context, Result};

pub const ENV_LOG: &str = "GRADEPOINTD_LOG";
pub const ENV_MAX_LINE_BYTES: &str = "GRADEPOINTD_MAX_LINE_BYTES";
pub const ENV_MAX_COURSES: &str = "GRADEPOINTD_MAX_COURSES";

const DEFAULT_LOG: &str = "info";
const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;
const DEFAULT_MAX_COURSES: usize = 10_000;

/// Sidecar settings. The grading engine itself takes no configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_filter: String,
    pub max_line_bytes: usize,
    pub max_courses: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG.to_string(),
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            max_courses: DEFAULT_MAX_COURSES,
        }
    }
}

impl Config {
    /// Reads `.env` when present, then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let log_filter = lookup(ENV_LOG)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.log_filter);
        let max_line_bytes = parse_limit(&lookup, ENV_MAX_LINE_BYTES, defaults.max_line_bytes)?;
        let max_courses = parse_limit(&lookup, ENV_MAX_COURSES, defaults.max_courses)?;
        Ok(Self {
            log_filter,
            max_line_bytes,
            max_courses,
        })
    }
}

fn parse_limit<F>(lookup: &F, key: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let n: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a positive integer, got {raw:?}"))?;
    if n == 0 {
        anyhow::bail!("{key} must be greater than zero");
    }
    Ok(n)
}
