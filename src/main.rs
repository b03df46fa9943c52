use anyhow::Context;
use car_expense_tracker::app::{navigate, register_account, submit_expense, Navigation, Route};
use car_expense_tracker::config::cli::{Command, OutputFormat};
use car_expense_tracker::report::{self, ExportFormat};
use car_expense_tracker::utils::error::ErrorSeverity;
use car_expense_tracker::utils::{logger, validation::Validate};
use car_expense_tracker::{
    CliConfig, Dashboard, HttpExpenseApi, LocalStorage, Session, TrackerConfig, TrackerError,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting car-expense-tracker");

    // 載入配置，命令列參數覆蓋設定檔
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TrackerConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?
        }
        None => TrackerConfig::default(),
    };
    cli.apply_overrides(&mut config);

    if cli.verbose {
        tracing::debug!("API base URL: {}", config.api.base_url);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let session = config.session();

    // 執行指令

    if let Err(e) = run(&cli.command, &config, &session).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        if e.is_retryable() {
            tracing::warn!("🔄 Error is transient, the command can be retried");
            eprintln!("🔄 Temporary failure, try the command again");
        }

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

/// 需要登入的指令先經過路由守衛
fn require(route: Route, session: &Session) -> car_expense_tracker::Result<()> {
    match route.guard(session) {
        Navigation::Render(_) => Ok(()),
        Navigation::Redirect { to, from } => Err(TrackerError::AuthenticationError {
            message: format!("{} requires sign-in, redirected to {}", from, to),
        }),
    }
}

async fn run(command: &Command, config: &TrackerConfig, session: &Session) -> car_expense_tracker::Result<()> {
    let today = chrono::Local::now().date_naive();

    match command {
        Command::Route { path } => {
            match navigate(path, session) {
                Navigation::Render(route) => println!("render {}", route),
                Navigation::Redirect { to, from } => println!("redirect {} -> {}", from, to),
            }
            Ok(())
        }

        Command::Summary { month, format } => {
            require(Route::ViewExpenses, session)?;
            let dashboard = Dashboard::new(HttpExpenseApi::new(config)?);
            let snapshot = dashboard.load(session).await?;
            let summary = snapshot.summarize(*month, today);

            match format {
                OutputFormat::Text => println!("{}", report::render_summary(&summary)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            }
            Ok(())
        }

        Command::List { month } => {
            require(Route::ViewExpenses, session)?;
            let dashboard = Dashboard::new(HttpExpenseApi::new(config)?);
            let snapshot = dashboard.load(session).await?;
            let summary = snapshot.summarize(*month, today);

            println!("{}", report::render_expense_lists(&summary.expenses));
            Ok(())
        }

        Command::Add(args) => {
            require(Route::AddExpense, session)?;
            let api = HttpExpenseApi::new(config)?;
            submit_expense(&api, session, &args.clone().into()).await?;

            println!("✅ Success! Expense added");
            Ok(())
        }

        Command::Register(args) => {
            let api = HttpExpenseApi::new(config)?;
            register_account(&api, &args.clone().into()).await?;

            println!("✅ Success! You can now log in");
            Ok(())
        }

        Command::Export {
            output,
            month,
            formats,
        } => {
            require(Route::ViewExpenses, session)?;
            let formats = if formats.is_empty() {
                &config.export.formats
            } else {
                formats
            };
            let formats = ExportFormat::parse_list(formats)?;
            let output_path = output
                .clone()
                .unwrap_or_else(|| config.export.output_path.clone());

            let dashboard = Dashboard::new(HttpExpenseApi::new(config)?);
            let snapshot = dashboard.load(session).await?;
            let summary = snapshot.summarize(*month, today);

            let storage = LocalStorage::new(output_path);
            let written = report::export_summary(&storage, &summary, &formats).await?;

            println!("✅ Export completed successfully!");
            for name in written {
                println!("📁 {}/{}", storage.base_path(), name);
            }
            Ok(())
        }
    }
}
