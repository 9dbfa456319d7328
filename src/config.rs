use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use crate::translator::{HttpTranslator, QueryTranslator};

/// Command line options.
#[derive(Parser, Debug, Clone)]
#[command(name = "rusty-lens", version, about = "Explore cleaned datasets and their insights")]
pub struct Config {
    /// Analysis result (.json) or cleaned export (.csv) to open at start-up.
    pub file: Option<PathBuf>,

    /// Endpoint of the natural-language query translator. Without it, free
    /// text queries are only matched as text.
    #[arg(long, env = "RUSTY_LENS_TRANSLATOR_URL")]
    pub translator_url: Option<String>,

    /// Timeout for one translator request.
    #[arg(long, default_value_t = 20)]
    pub translator_timeout_secs: u64,

    /// How long transient notices stay visible.
    #[arg(long, default_value_t = 4)]
    pub notice_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file: None,
            translator_url: None,
            translator_timeout_secs: 20,
            notice_secs: 4,
        }
    }
}

impl Config {
    pub fn translator(&self) -> Option<Arc<dyn QueryTranslator>> {
        let url = self.translator_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        let timeout = Duration::from_secs(self.translator_timeout_secs);
        Some(Arc::new(HttpTranslator::new(url, timeout)))
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_secs)
    }
}
