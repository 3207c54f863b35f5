use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "termchat")]
#[command(
    about = "Interactive AI chat in your terminal, with streaming output, typing animation and markdown rendering"
)]
#[command(version)]
pub struct Args {
    /// Model name (e.g., openrouter/auto)
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// System prompt
    #[arg(short = 's', long)]
    pub system: Option<String>,

    /// Provider name from the config file
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Disable final pretty markdown render (keep only the typing stream)
    #[arg(long)]
    pub no_render: bool,

    /// Disable the typing animation
    #[arg(long)]
    pub no_typing: bool,

    /// Disable emoji shortcodes in the markdown render
    #[arg(long)]
    pub no_emoji: bool,

    /// Typing delay per character in milliseconds (0 writes immediately)
    #[arg(short = 'd', long = "delay", value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Markdown render width in columns (defaults to the terminal width)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Print debug logs to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
