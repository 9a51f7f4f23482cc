use crate::domain::model::{CalculationMode, RawInputs};
use clap::{Parser, ValueEnum};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Earnings,
    ItemsNeeded,
}

impl From<ModeArg> for CalculationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Earnings => CalculationMode::Earnings,
            ModeArg::ItemsNeeded => CalculationMode::ItemsNeeded,
        }
    }
}

/// 數值欄位以文字接收，解析規則與表單相同
#[derive(Clone, Parser)]
#[command(name = "affiliate-calc")]
#[command(about = "Calculate your potential earnings from affiliate marketing")]
pub struct CliConfig {
    /// Item price in USD
    #[arg(long)]
    pub price: Option<String>,

    /// Commission percentage (10 means 10%)
    #[arg(long)]
    pub commission: Option<String>,

    /// Number of sales (defaults to 1)
    #[arg(long)]
    pub quantity: Option<String>,

    /// Expected sales per month (defaults to 0)
    #[arg(long)]
    pub monthly_sales: Option<String>,

    /// Conversion rate percentage (defaults to 2)
    #[arg(long)]
    pub conversion_rate: Option<String>,

    /// Target income for the items-needed calculation
    #[arg(long)]
    pub target_income: Option<String>,

    /// Calculator tab; inferred from --target-income when omitted
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Whop user token forwarded by the host iframe
    #[arg(long, env = "WHOP_USER_TOKEN", hide_env_values = true)]
    pub user_token: Option<String>,

    /// Skip the Whop access-pass check
    #[arg(long)]
    pub skip_access_check: bool,

    /// Deny access when the entitlement check itself fails
    #[arg(long)]
    pub fail_closed: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            item_price: self.price.clone(),
            commission_percentage: self.commission.clone(),
            quantity: self.quantity.clone(),
            monthly_sales: self.monthly_sales.clone(),
            conversion_rate: self.conversion_rate.clone(),
            target_income: self.target_income.clone(),
        }
    }

    pub fn calculation_mode(&self) -> CalculationMode {
        match self.mode {
            Some(mode) => mode.into(),
            None if self.target_income.is_some() => CalculationMode::ItemsNeeded,
            None => CalculationMode::Earnings,
        }
    }
}

// user token 不可出現在日誌中
impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("price", &self.price)
            .field("commission", &self.commission)
            .field("quantity", &self.quantity)
            .field("monthly_sales", &self.monthly_sales)
            .field("conversion_rate", &self.conversion_rate)
            .field("target_income", &self.target_income)
            .field("mode", &self.mode)
            .field("config", &self.config)
            .field("user_token", &self.user_token.as_ref().map(|_| "***"))
            .field("skip_access_check", &self.skip_access_check)
            .field("fail_closed", &self.fail_closed)
            .field("json", &self.json)
            .field("verbose", &self.verbose)
            .finish()
    }
}
