//! Runner configuration: defaults, then `DICE_*` environment variables, then
//! command-line flags.

use anyhow::{anyhow, bail, Result};

use crate::types::{DEFAULT_ANGLE_STEP, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, MAX_BOARD_DIMENSION};

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    /// Layout seed
    pub seed: u64,
    /// Degrees advanced per tick
    pub angle_step: f32,
    /// Log file; logging is off when unset
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            seed: 1,
            angle_step: DEFAULT_ANGLE_STEP,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by `DICE_*` variables. Unparseable values are
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let log_path = get("DICE_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            width: parse_var(&get, "DICE_WIDTH").unwrap_or(defaults.width),
            height: parse_var(&get, "DICE_HEIGHT").unwrap_or(defaults.height),
            seed: parse_var(&get, "DICE_SEED").unwrap_or(defaults.seed),
            angle_step: parse_var(&get, "DICE_ANGLE_STEP").unwrap_or(defaults.angle_step),
            log_path,
        }
    }

    /// Apply `--width N --height N --seed N --angle-step DEG --log PATH`.
    ///
    /// `args` excludes the program name.
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut it = args.iter();
        while let Some(flag) = it.next() {
            let mut value = || {
                it.next()
                    .map(String::as_str)
                    .ok_or_else(|| anyhow!("missing value for {}", flag))
            };
            match flag.as_str() {
                "--width" => self.width = parse_flag(flag, value()?)?,
                "--height" => self.height = parse_flag(flag, value()?)?,
                "--seed" => self.seed = parse_flag(flag, value()?)?,
                "--angle-step" => self.angle_step = parse_flag(flag, value()?)?,
                "--log" => self.log_path = Some(value()?.to_string()),
                other => bail!("unknown argument: {}", other),
            }
        }
        Ok(())
    }

    /// Reject settings the game would otherwise silently clamp.
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if v == 0 || v > MAX_BOARD_DIMENSION {
                bail!("{} must be between 1 and {}, got {}", name, MAX_BOARD_DIMENSION, v);
            }
        }
        if !(self.angle_step.is_finite() && self.angle_step > 0.0) {
            bail!("angle step must be a positive number of degrees, got {}", self.angle_step);
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    get(key).and_then(|s| s.trim().parse().ok())
}

fn parse_flag<T: std::str::FromStr>(flag: &str, v: &str) -> Result<T> {
    v.parse()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}
