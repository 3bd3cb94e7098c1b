use clap::Parser;
use serde_json::Value;
use wego::utils::error::ErrorSeverity;
use wego::utils::{logger, validation::Validate};
use wego::{CliConfig, Command, LogFormat, WeChatApi, WeChatConfig, WeChatError};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入設定檔
    let config = match WeChatConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose, None);
            exit_with(&e);
        }
    };

    // 初始化日誌
    if cli.json_logs || config.log_format() == LogFormat::Json {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting wego CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    // 呼叫 API 並輸出結果
    match run(config, cli.command).await {
        Ok(output) => println!("{}", output),
        Err(e) => exit_with(&e),
    }
}

async fn run(config: WeChatConfig, command: Command) -> wego::Result<String> {
    let api = WeChatApi::new(config)?;

    let data: Value = match command {
        Command::CodeUrl { redirect, state } => {
            return Ok(api.get_code_url(redirect.as_deref(), &state));
        }
        Command::Token => api.get_global_access_token().await?,
        Command::UserInfo { openid } => api.get_userinfo(&openid).await?,
        Command::Groups => api.get_all_groups().await?,
        Command::Menus => api.get_menus().await?,
        Command::Servers => api.get_wechat_servers_list().await?,
        Command::Qrcode { scene_id, expire } => match expire {
            Some(expire) => api.create_scene_qrcode(scene_id, expire).await?,
            None => api.create_limit_scene_qrcode(scene_id).await?,
        },
        Command::ShortUrl { url } => api.create_short_url(&url).await?,
        Command::UserSummary { begin, end } => {
            api.get_variation_number_of_user(&begin, &end).await?
        }
    };

    Ok(serde_json::to_string_pretty(&data)?)
}

fn exit_with(e: &WeChatError) -> ! {
    tracing::error!(
        "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
