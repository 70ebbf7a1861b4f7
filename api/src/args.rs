use std::path::PathBuf;

use clap::Parser;
use forkcast_core::domain::common::{AnnotatorConfig, ForkcastConfig, LlmConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "forkcast-api", about = "Forkcast backend API server")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000,http://127.0.0.1:3000"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    /// Required; the process refuses to start without it.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long, env = "GEMINI_PRIMARY_MODEL", default_value = "gemini-1.5-pro")]
    pub primary_model: String,

    #[arg(long, env = "GEMINI_FALLBACK_MODEL", default_value = "gemini-1.5-flash")]
    pub fallback_model: String,

    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value_t = 60)]
    pub request_timeout_secs: u64,

    /// TTF used for annotation labels; bitmap fallback when unset.
    #[arg(long, env = "LABEL_FONT_PATH")]
    pub label_font_path: Option<PathBuf>,
}

impl From<Args> for ForkcastConfig {
    fn from(args: Args) -> Self {
        ForkcastConfig {
            llm: LlmConfig {
                gemini_api_key: args.llm.gemini_api_key,
                primary_model: args.llm.primary_model,
                fallback_model: args.llm.fallback_model,
                request_timeout_secs: args.llm.request_timeout_secs,
            },
            annotator: AnnotatorConfig {
                font_path: args.llm.label_font_path,
            },
        }
    }
}
