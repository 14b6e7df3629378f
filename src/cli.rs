use clap::Parser;

/// CodeAid server: AI code assistant HTTP API
#[derive(Debug, Parser)]
#[command(name = "codeaid")]
#[command(version)]
#[command(about = "AI code assistant HTTP API", long_about = None)]
pub struct Args {
    /// Bind address (default: HOST env or 0.0.0.0)
    #[arg(long = "host")]
    pub host: Option<String>,

    /// Bind port (default: PORT env or 8000)
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Model name (default: CODEAID_MODEL env, config, or gemini-1.5-flash)
    #[arg(short = 'm', long = "model")]
    pub model: Option<String>,

    /// Provider (default: config/provider or "google")
    #[arg(long = "provider")]
    pub provider: Option<String>,

    /// Provider call timeout in seconds (default: 30)
    #[arg(long = "timeout-secs")]
    pub timeout_secs: Option<u64>,
}
