use std::{env, ops::RangeInclusive, time::Duration};

use rand::Rng;

use crate::error::{Error, Result};

const NUM_PHILOSOPHERS: usize = 5;
const SIMULATION_TIME: Duration = Duration::from_secs(20);
const THINKING_TIME: RangeInclusive<u64> = 1000..=2000; // ミリ秒
const EATING_TIME: RangeInclusive<u64> = 1000..=1000;

const ENV_PHILOSOPHERS: &str = "DINING_PHILOSOPHERS";
const ENV_DURATION: &str = "DINING_DURATION_SECS";
const ENV_THINK: &str = "DINING_THINK_MS";
const ENV_EAT: &str = "DINING_EAT_MS";

// 考える時間・食べる時間の範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delay {
    pub min: Duration,
    pub max: Duration,
}

impl Delay {
    pub fn new(min: Duration, max: Duration) -> Self {
        Delay { min, max }
    }

    pub fn fixed(d: Duration) -> Self {
        Delay { min: d, max: d }
    }

    pub const ZERO: Delay = Delay {
        min: Duration::ZERO,
        max: Duration::ZERO,
    };

    fn from_millis(range: RangeInclusive<u64>) -> Self {
        Delay::new(
            Duration::from_millis(*range.start()),
            Duration::from_millis(*range.end()),
        )
    }

    // min..=max から一様に選ぶ
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

// 実行パラメータ。検証後はプロセス終了まで変更しない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub philosophers: usize,
    pub duration: Duration,
    pub think: Delay,
    pub eat: Delay,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            philosophers: NUM_PHILOSOPHERS,
            duration: SIMULATION_TIME,
            think: Delay::from_millis(THINKING_TIME),
            eat: Delay::from_millis(EATING_TIME),
        }
    }
}

impl Config {
    // デフォルト値を DINING_* 環境変数で上書きしてから検証する
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(v) = lookup(ENV_PHILOSOPHERS) {
            config.philosophers = parse_num(ENV_PHILOSOPHERS, &v)?;
        }
        if let Some(v) = lookup(ENV_DURATION) {
            config.duration = Duration::from_secs(parse_num(ENV_DURATION, &v)?);
        }
        if let Some(v) = lookup(ENV_THINK) {
            config.think = parse_delay(ENV_THINK, &v)?;
        }
        if let Some(v) = lookup(ENV_EAT) {
            config.eat = parse_delay(ENV_EAT, &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.philosophers < 1 {
            return Err(Error::NoPhilosophers);
        }
        for (name, delay) in [("think", self.think), ("eat", self.eat)] {
            if delay.min > delay.max {
                return Err(Error::InvalidDelay {
                    name,
                    min: delay.min,
                    max: delay.max,
                });
            }
        }
        Ok(())
    }
}

fn parse_num<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::InvalidEnv {
        key,
        value: value.to_string(),
    })
}

// "500" または "500-1500" (ミリ秒)
fn parse_delay(key: &'static str, value: &str) -> Result<Delay> {
    match value.split_once('-') {
        Some((min, max)) => Ok(Delay::new(
            Duration::from_millis(parse_num(key, min)?),
            Duration::from_millis(parse_num(key, max)?),
        )),
        None => Ok(Delay::fixed(Duration::from_millis(parse_num(key, value)?))),
    }
}
