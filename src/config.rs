use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub capture: CaptureConfig,
    pub playback: PlaybackConfig,
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Milliseconds between detection ticks
    pub detect_interval_ms: u64,
    /// Per-tick probability of the simulated detector firing
    pub detect_probability: f64,
    /// Detection history cap
    pub history_limit: usize,
    /// Milliseconds between synthetic frames
    pub frame_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Milliseconds each sign stays on screen
    pub step_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Simulated network latency before a canned reply
    pub reply_delay_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "able-service".to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8087,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            detect_interval_ms: 2000,
            detect_probability: 0.7,
            history_limit: 8,
            frame_interval_ms: 100,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { step_ms: 800 }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self { reply_delay_ms: 1000 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            capture: CaptureConfig::default(),
            playback: PlaybackConfig::default(),
            assistant: AssistantConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
