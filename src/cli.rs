use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "agentdir",
    about = "Browse, filter and wishlist agents in the AI agent directory",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/agentdir/logs/agentdir.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to agentdir.yaml config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the agent catalog
    Agents {
        #[command(subcommand)]
        action: AgentsAction,
    },

    /// Manage your wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },

    /// Log in, log out, show the current user
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Send a message to the directory team
    Contact {
        /// Your name
        #[arg(long)]
        name: String,

        /// Your email address
        #[arg(long)]
        email: String,

        /// Message body
        #[arg(long)]
        message: String,
    },

    /// Newsletter subscription
    Newsletter {
        #[command(subcommand)]
        action: NewsletterAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum AgentsAction {
    /// List agents grouped by category
    List {
        /// Only agents with this access model
        #[arg(long)]
        access: Option<String>,

        /// Only agents with this pricing model
        #[arg(long)]
        pricing: Option<String>,

        /// Only agents in this category
        #[arg(long)]
        category: Option<String>,

        /// Only agents for this industry
        #[arg(long)]
        industry: Option<String>,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show the values each filter accepts
    Filters {
        /// Only this dimension (access, pricing, category, industry)
        dimension: Option<String>,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show one agent and similar agents
    Show {
        /// Agent id
        id: String,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Subcommand)]
pub enum WishlistAction {
    /// Add an agent to the wishlist, or remove it if already there
    Toggle {
        /// Agent id
        agent_id: String,
    },
}

#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Subcommand)]
pub enum NewsletterAction {
    /// Subscribe an email address
    Subscribe {
        /// Email address
        email: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Get a config value
    Get {
        /// Config key (api.base_url, api.timeout_secs, log_level)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (api.base_url, api.timeout_secs, log_level)
        key: String,

        /// Value to set
        value: String,
    },
}
