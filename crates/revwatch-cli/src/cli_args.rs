use clap::{ArgAction, Parser};
use revwatch_runtime::{DEFAULT_REVIEW_API_ENDPOINT, DEFAULT_TELEGRAM_API_BASE};

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

fn parse_non_negative_i64(value: &str) -> Result<i64, String> {
    let parsed = value
        .parse::<i64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed < 0 {
        return Err("value must not be negative".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "revwatch",
    about = "Watches a review-status API and announces verdict changes to a Telegram chat",
    version
)]
pub struct Cli {
    #[arg(
        long = "api-token",
        env = "API_TOKEN",
        hide_env_values = true,
        help = "OAuth token for the review-status API"
    )]
    pub api_token: Option<String>,

    #[arg(
        long = "bot-token",
        env = "BOT_TOKEN",
        hide_env_values = true,
        help = "Telegram bot token used to deliver notifications"
    )]
    pub bot_token: Option<String>,

    #[arg(
        long = "chat-id",
        env = "CHAT_ID",
        allow_hyphen_values = true,
        help = "Telegram chat id that receives notifications"
    )]
    pub chat_id: Option<String>,

    #[arg(
        long,
        env = "REVWATCH_ENDPOINT",
        default_value = DEFAULT_REVIEW_API_ENDPOINT,
        help = "Review-status API endpoint"
    )]
    pub endpoint: String,

    #[arg(
        long = "telegram-api-base",
        env = "REVWATCH_TELEGRAM_API_BASE",
        default_value = DEFAULT_TELEGRAM_API_BASE,
        help = "Base URL for the Telegram Bot API"
    )]
    pub telegram_api_base: String,

    #[arg(
        long = "poll-interval-seconds",
        env = "REVWATCH_POLL_INTERVAL_SECONDS",
        default_value_t = 600,
        value_parser = parse_positive_u64,
        help = "Delay between poll cycles in seconds"
    )]
    pub poll_interval_seconds: u64,

    #[arg(
        long = "request-timeout-ms",
        env = "REVWATCH_REQUEST_TIMEOUT_MS",
        default_value_t = 10_000,
        value_parser = parse_positive_u64,
        help = "Timeout for each HTTP request in milliseconds"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long = "from-date",
        env = "REVWATCH_FROM_DATE",
        default_value_t = 0,
        value_parser = parse_non_negative_i64,
        conflicts_with = "lookback_seconds",
        help = "Initial Unix timestamp cursor; 0 requests the full history"
    )]
    pub from_date: i64,

    #[arg(
        long = "lookback-seconds",
        env = "REVWATCH_LOOKBACK_SECONDS",
        help = "Start the cursor this many seconds before now instead of --from-date"
    )]
    pub lookback_seconds: Option<u64>,

    #[arg(
        long = "poll-once",
        env = "REVWATCH_POLL_ONCE",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Run a single poll cycle and exit"
    )]
    pub poll_once: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn unit_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn unit_explicit_flags_are_parsed() {
        let cli = Cli::try_parse_from([
            "revwatch",
            "--api-token",
            "api",
            "--bot-token",
            "bot",
            "--chat-id",
            "-100",
            "--poll-interval-seconds",
            "30",
            "--lookback-seconds",
            "86400",
            "--poll-once",
        ])
        .expect("parse");
        assert_eq!(cli.api_token.as_deref(), Some("api"));
        assert_eq!(cli.bot_token.as_deref(), Some("bot"));
        assert_eq!(cli.chat_id.as_deref(), Some("-100"));
        assert_eq!(cli.poll_interval_seconds, 30);
        assert_eq!(cli.lookback_seconds, Some(86_400));
        assert!(cli.poll_once);
    }

    #[test]
    fn regression_zero_poll_interval_is_rejected() {
        let error = Cli::try_parse_from(["revwatch", "--poll-interval-seconds", "0"])
            .expect_err("zero interval");
        assert!(error.to_string().contains("greater than 0"));
    }

    #[test]
    fn regression_from_date_conflicts_with_lookback() {
        let result = Cli::try_parse_from([
            "revwatch",
            "--from-date",
            "100",
            "--lookback-seconds",
            "60",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn regression_negative_from_date_is_rejected() {
        let result = Cli::try_parse_from(["revwatch", "--from-date=-5"]);
        assert!(result.is_err());
    }
}
