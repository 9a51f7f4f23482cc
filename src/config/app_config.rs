use crate::domain::model::{AppInfo, CalculationMode};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_WHOP_BASE_URL: &str = "https://api.whop.com/api";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub whop: WhopConfig,
    pub access: AccessConfig,
    pub features: FeatureConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// 解析 `APP_ENV`，不分大小寫
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "development" => Ok(Environment::Development),
            _ => Err(AppError::InvalidConfigValueError {
                field: "APP_ENV".to_string(),
                value: value.to_string(),
                reason: "Expected 'development' or 'production'".to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: String,
    pub version: String,
    pub description: String,
    pub environment: Environment,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "Affiliate Marketing Calculator".to_string(),
            version: "1.0.0".to_string(),
            description: "Calculate your potential earnings from affiliate marketing".to_string(),
            environment: Environment::Development,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WhopConfig {
    pub api_key: String,
    pub app_id: String,
    pub access_pass_id: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for WhopConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            app_id: String::new(),
            access_pass_id: "demo-access-pass".to_string(),
            base_url: DEFAULT_WHOP_BASE_URL.to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// 權限服務出錯時是否仍放行
    pub fail_open_on_entitlement_error: bool,
    /// 沒有使用者 token 時改用的示範帳號
    pub demo_user_id: Option<String>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            fail_open_on_entitlement_error: true,
            demo_user_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub earnings_calculator: bool,
    pub reverse_calculator: bool,
    /// 未設定時只在 production 啟用
    pub analytics: Option<bool>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            earnings_calculator: true,
            reverse_calculator: true,
            analytics: None,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WHOP_API_KEY})；找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 以環境變數覆蓋空白的憑證欄位。
    ///
    /// 在日誌初始化之前呼叫，未知的 `APP_ENV` 以錯誤回傳而不是寫入日誌。
    pub fn with_env_overrides(mut self) -> Result<Self> {
        let fill = |target: &mut String, var: &str| {
            if target.is_empty() {
                if let Ok(value) = std::env::var(var) {
                    *target = value;
                }
            }
        };
        fill(&mut self.whop.api_key, "WHOP_API_KEY");
        fill(&mut self.whop.app_id, "WHOP_APP_ID");

        if let Ok(id) = std::env::var("WHOP_ACCESS_PASS_ID") {
            if !id.trim().is_empty() {
                self.whop.access_pass_id = id;
            }
        }
        if let Ok(env) = std::env::var("APP_ENV") {
            self.app.environment = Environment::parse(&env)?;
        }
        Ok(self)
    }

    pub fn analytics_enabled(&self) -> bool {
        self.features
            .analytics
            .unwrap_or(self.app.environment == Environment::Production)
    }

    pub fn is_mode_enabled(&self, mode: CalculationMode) -> bool {
        match mode {
            CalculationMode::Earnings => self.features.earnings_calculator,
            CalculationMode::ItemsNeeded => self.features.reverse_calculator,
        }
    }

    /// 確認分頁可用，否則回傳 `FeatureDisabledError`
    pub fn ensure_mode_enabled(&self, mode: CalculationMode) -> Result<()> {
        if self.is_mode_enabled(mode) {
            return Ok(());
        }
        let feature = match mode {
            CalculationMode::Earnings => "earnings calculator",
            CalculationMode::ItemsNeeded => "reverse calculator",
        };
        Err(AppError::FeatureDisabledError {
            feature: feature.to_string(),
        })
    }

    pub fn app_info(&self) -> AppInfo {
        AppInfo {
            name: self.app.name.clone(),
            version: self.app.version.clone(),
            description: self.app.description.clone(),
            environment: self.app.environment.as_str().to_string(),
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("app.name", &self.app.name)?;
        validate_url("whop.base_url", &self.whop.base_url)?;
        validate_positive_number("whop.timeout_seconds", self.whop.timeout_seconds, 1)?;
        validate_non_empty_string("whop.access_pass_id", &self.whop.access_pass_id)?;

        if !self.features.earnings_calculator && !self.features.reverse_calculator {
            return Err(AppError::InvalidConfigValueError {
                field: "features".to_string(),
                value: "earnings_calculator = false, reverse_calculator = false".to_string(),
                reason: "At least one calculator must be enabled".to_string(),
            });
        }

        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
