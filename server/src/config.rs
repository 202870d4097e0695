use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context};
use connect4::{DEFAULT_DEPTH, MAX_DEPTH};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_THINK_MS: u64 = 600;
const DEFAULT_STATIC_DIR: &str = "web/dist";

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub depth: usize,
    /// Pause before answering so the computer appears to think.
    pub think_delay: Duration,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            depth: DEFAULT_DEPTH,
            think_delay: Duration::from_millis(DEFAULT_THINK_MS),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(addr) = lookup("CONNECT4_ADDR") {
            config.addr = addr
                .parse()
                .with_context(|| format!("invalid CONNECT4_ADDR {addr:?}"))?;
        }
        if let Some(depth) = lookup("CONNECT4_DEPTH") {
            config.depth = depth
                .parse()
                .with_context(|| format!("invalid CONNECT4_DEPTH {depth:?}"))?;
            ensure!(
                (1..=MAX_DEPTH).contains(&config.depth),
                "CONNECT4_DEPTH must be between 1 and {MAX_DEPTH}, got {}",
                config.depth
            );
        }
        if let Some(ms) = lookup("CONNECT4_THINK_MS") {
            let ms: u64 = ms
                .parse()
                .with_context(|| format!("invalid CONNECT4_THINK_MS {ms:?}"))?;
            config.think_delay = Duration::from_millis(ms);
        }
        if let Some(dir) = lookup("CONNECT4_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        Ok(config)
    }
}
