pub mod access;
pub mod engine;
pub mod insights;
pub mod session;

pub use crate::domain::model::{CalculationInputs, CalculationMode, CalculationResult};
pub use crate::domain::ports::{IdentityProvider, UsageTracker};
pub use crate::utils::error::Result;
