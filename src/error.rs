use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("at least one philosopher is required")]
    NoPhilosophers,
    #[error("invalid {name} delay: min {min:?} is greater than max {max:?}")]
    InvalidDelay {
        name: &'static str,
        min: Duration,
        max: Duration,
    },
    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("failed to spawn philosopher thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("philosopher {0} panicked")]
    Panicked(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
