use affiliate_calc::config::Environment;
use affiliate_calc::domain::ports::UsageTracker;
use affiliate_calc::utils::{logger, validation::Validate};
use affiliate_calc::{
    render_report, AccessDecision, AccessGate, AppConfig, AppError, CalculationInputs,
    CalculationMode, CalculatorSession, CliConfig, EarningsEngine, Insights, LogTracker,
    WhopClient,
};
use anyhow::Context;
use clap::Parser;

const EXIT_CONFIG_ERROR: i32 = 1;
const EXIT_NO_RESULT: i32 = 2;
const EXIT_ACCESS_DENIED: i32 = 3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => AppConfig::default(),
    };
    // 日誌尚未初始化，錯誤只能直接輸出到 stderr
    let mut config = match config.with_env_overrides() {
        Ok(config) => config,
        Err(e) => fail(&e, EXIT_CONFIG_ERROR),
    };

    if cli.fail_closed {
        config.access.fail_open_on_entitlement_error = false;
    }

    // 初始化日誌
    if config.app.environment == Environment::Production && !cli.verbose {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let info = config.app_info();
    tracing::info!("🚀 Starting {} v{} ({})", info.name, info.version, info.environment);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e, EXIT_CONFIG_ERROR);
    }

    let mode = cli.calculation_mode();
    if let Err(e) = config.ensure_mode_enabled(mode) {
        fail(&e, EXIT_CONFIG_ERROR);
    }

    let tracker = LogTracker::new(config.analytics_enabled());

    if cli.skip_access_check {
        tracing::warn!("⚠️ Access check skipped");
    } else {
        let identity = WhopClient::new(&config.whop)?
            .with_demo_user(config.access.demo_user_id.clone());
        let gate = AccessGate::new(
            identity,
            tracker,
            config.whop.access_pass_id.clone(),
            config.access.fail_open_on_entitlement_error,
        );

        match gate.authorize(cli.user_token.as_deref()).await {
            AccessDecision::Granted(grant) => {
                if let Some(user) = &grant.user {
                    tracing::info!("👤 Welcome, {}", user.username);
                }
            }
            AccessDecision::Denied { reason } => {
                fail(&AppError::AccessDeniedError { reason }, EXIT_ACCESS_DENIED);
            }
        }
    }

    let inputs = CalculationInputs::from_text(&cli.raw_inputs());
    let mut session = CalculatorSession::new(mode);

    let Some(result) = session.submit(&inputs).copied() else {
        if let Err(e) = EarningsEngine::try_compute(mode, &inputs) {
            tracing::debug!("No result: {}", e);
        }
        eprintln!("❌ Please fill in the required fields with numbers greater than 0:");
        eprintln!("   {}", required_fields_hint(mode));
        std::process::exit(EXIT_NO_RESULT);
    };

    tracker.record(
        "calculation_performed",
        serde_json::json!({ "mode": mode.as_str() }),
    );

    if cli.json {
        let output = serde_json::json!({
            "mode": mode,
            "result": result,
            "insights": Insights::from_result(&result),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_report(&result));
    }

    Ok(())
}

fn required_fields_hint(mode: CalculationMode) -> &'static str {
    match mode {
        CalculationMode::Earnings => "--price and --commission",
        CalculationMode::ItemsNeeded => "--target-income, --price and --commission",
    }
}

fn fail(e: &AppError, exit_code: i32) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(exit_code);
}
