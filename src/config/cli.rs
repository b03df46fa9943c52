use crate::config::toml_config::TrackerConfig;
use crate::core::forms::{ExpenseForm, RegistrationForm};
use crate::domain::model::YearMonth;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "car-expense-tracker")]
#[command(about = "Track car expenses and fuel economy against a remote expense API")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override api.base_url from config
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override session.user from config
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Override session.user_id from config
    #[arg(long, global = true)]
    pub user_id: Option<String>,

    /// Override session.access_token from config
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show totals, averages and time-window figures
    Summary {
        /// Restrict the totals to one month (YYYY-MM)
        #[arg(long)]
        month: Option<YearMonth>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List gas and regular expenses
    List {
        #[arg(long)]
        month: Option<YearMonth>,
    },

    /// Submit a new expense
    Add(AddArgs),

    /// Register a new account
    Register(RegisterArgs),

    /// Write expense tables and the summary to files
    Export {
        /// Output directory (defaults to export.output_path)
        #[arg(short, long)]
        output: Option<String>,

        #[arg(long)]
        month: Option<YearMonth>,

        /// Comma separated list of csv, tsv, json
        #[arg(long, value_delimiter = ',')]
        formats: Vec<String>,
    },

    /// Resolve a client route through the sign-in guard
    Route { path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub cost: String,

    #[arg(long)]
    pub mileage: String,

    /// Date as MM/DD/YY
    #[arg(long)]
    pub date: String,

    #[arg(long, default_value = "")]
    pub notes: String,

    /// Mark the expense as a fuel purchase
    #[arg(long)]
    pub gas: bool,

    #[arg(long, default_value = "")]
    pub miles_traveled: String,

    #[arg(long, default_value = "")]
    pub gallons: String,
}

#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub password: String,

    #[arg(long)]
    pub confirm_password: String,

    #[arg(long)]
    pub email: String,
}

impl CliConfig {
    /// 命令列參數優先於設定檔
    pub fn apply_overrides(&self, config: &mut TrackerConfig) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(user) = &self.user {
            config.session.user = Some(user.clone());
        }
        if let Some(user_id) = &self.user_id {
            config.session.user_id = Some(user_id.clone());
        }
        if let Some(token) = &self.token {
            config.session.access_token = Some(token.clone());
        }
    }
}

impl From<AddArgs> for ExpenseForm {
    fn from(args: AddArgs) -> Self {
        Self {
            category: args.category,
            cost: args.cost,
            mileage: args.mileage,
            date: args.date,
            notes: args.notes,
            is_gas_expense: args.gas,
            miles_traveled_for_gas: args.miles_traveled,
            gas_gallons: args.gallons,
        }
    }
}

impl From<RegisterArgs> for RegistrationForm {
    fn from(args: RegisterArgs) -> Self {
        Self {
            username: args.username,
            password: args.password,
            confirm_password: args.confirm_password,
            email: args.email,
        }
    }
}
