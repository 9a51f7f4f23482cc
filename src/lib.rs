pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::WhopClient;
pub use config::AppConfig;
pub use crate::core::{
    access::{AccessDecision, AccessGate, Grant},
    engine::EarningsEngine,
    insights::{render_report, Insights},
    session::CalculatorSession,
};
pub use domain::model::{
    AppInfo, CalculationInputs, CalculationMode, CalculationResult, RawInputs, UserId, WhopUser,
};
pub use utils::error::{AppError, EngineError, Result};
pub use utils::tracker::LogTracker;
