use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "bpserve-server")]
#[command(author, version, about = "BP recommender model server", long_about = None)]
pub struct Cli {
    /// Configuration file path (ignored if it does not exist)
    #[arg(short, long, env = "MODEL_SERVER_CONFIG", default_value = "bpserve.yaml")]
    pub config: String,

    /// Listen address
    #[arg(long, env = "MODEL_SERVER_HOST")]
    pub host: Option<String>,

    /// Listen port
    #[arg(short, long, env = "MODEL_SERVER_PORT")]
    pub port: Option<u16>,

    /// Model artifact path (defaults to bp_recommender.model next to the executable)
    #[arg(short, long, env = "MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
