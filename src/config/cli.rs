use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "wego")]
#[command(about = "Call WeChat Official Account APIs from the command line")]
pub struct CliConfig {
    #[arg(long, short, default_value = "wego.toml")]
    pub config: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the OAuth authorize URL
    CodeUrl {
        /// Path relative to register_url; omit to use redirect_url
        #[arg(long)]
        redirect: Option<String>,
        #[arg(long, default_value = "STATE")]
        state: String,
    },
    /// Fetch a raw global access token response
    Token,
    /// Show a user's profile
    UserInfo {
        #[arg(long)]
        openid: String,
    },
    /// List user groups
    Groups,
    /// Show the current menus
    Menus,
    /// List WeChat callback server IPs
    Servers,
    /// Create a scene QR code; temporary when --expire is given
    Qrcode {
        #[arg(long)]
        scene_id: u32,
        #[arg(long)]
        expire: Option<u32>,
    },
    /// Shorten a long URL
    ShortUrl {
        #[arg(long)]
        url: String,
    },
    /// Subscription changes over a date range (YYYY-MM-DD)
    UserSummary {
        #[arg(long)]
        begin: String,
        #[arg(long)]
        end: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommand_arguments() {
        let cli = CliConfig::parse_from([
            "wego", "--config", "prod.toml", "qrcode", "--scene-id", "42", "--expire", "600",
        ]);

        assert_eq!(cli.config, "prod.toml");
        assert!(!cli.verbose);
        match cli.command {
            Command::Qrcode { scene_id, expire } => {
                assert_eq!(scene_id, 42);
                assert_eq!(expire, Some(600));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_code_url_defaults() {
        let cli = CliConfig::parse_from(["wego", "code-url"]);
        assert_eq!(cli.config, "wego.toml");
        assert!(matches!(
            cli.command,
            Command::CodeUrl { redirect: None, ref state } if state == "STATE"
        ));
    }
}
