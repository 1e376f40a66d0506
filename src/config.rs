//! User-tunable settings and their bounds

use crate::error::ConfigError;
use std::time::Duration;

pub const SPEED_MIN_MS: u64 = 10;
pub const SPEED_MAX_MS: u64 = 1000;
pub const SPEED_STEP_MS: u64 = 10;

pub const ARRAY_SIZE_MIN: usize = 10;
pub const ARRAY_SIZE_MAX: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Pacing delay for sorting and graph runs
    pub speed_ms: u64,
    /// Length of generated arrays
    pub array_size: usize,
    /// Pacing delay for tree runs
    pub tree_speed_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            speed_ms: 80,
            array_size: 40,
            tree_speed_ms: 500,
        }
    }
}

impl Config {
    /// Parse `--speed <ms>`, `--tree-speed <ms>` and `--size <n>` on top of
    /// the defaults. `args` excludes the program name.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let flag = flag.as_ref();
            let value = match flag {
                "--speed" | "--tree-speed" | "--size" => args
                    .next()
                    .map(|v| v.as_ref().to_string())
                    .unwrap_or_default(),
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            };
            let number: u64 = value.parse().map_err(|_| ConfigError::InvalidArgument {
                flag: flag.to_string(),
                value: value.clone(),
            })?;
            match flag {
                "--speed" => config.speed_ms = number,
                "--tree-speed" => config.tree_speed_ms = number,
                _ => config.array_size = number as usize,
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check("speed_ms", self.speed_ms, SPEED_MIN_MS, SPEED_MAX_MS)?;
        check("tree_speed_ms", self.tree_speed_ms, SPEED_MIN_MS, SPEED_MAX_MS)?;
        check(
            "array_size",
            self.array_size as u64,
            ARRAY_SIZE_MIN as u64,
            ARRAY_SIZE_MAX as u64,
        )
    }

    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    pub fn tree_speed(&self) -> Duration {
        Duration::from_millis(self.tree_speed_ms)
    }
}

fn check(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Move a delay one notch faster (`faster = true`) or slower, within bounds
pub fn adjust_speed(current_ms: u64, faster: bool) -> u64 {
    let next = if faster {
        current_ms.saturating_sub(SPEED_STEP_MS)
    } else {
        current_ms.saturating_add(SPEED_STEP_MS)
    };
    next.clamp(SPEED_MIN_MS, SPEED_MAX_MS)
}
