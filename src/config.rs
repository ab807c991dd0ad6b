use crate::auth::password::PasswordScheme;
use crate::error::ConfigError;
use regex::Regex;
use serde::Deserialize;

fn default_db_path() -> String {
    "sqlite://inventory.db".into()
}

fn default_max_connections() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".into()
}

fn expand_placeholders(text: &str) -> Result<String, ConfigError> {
    let env_re = Regex::new(r"\$ENV\{([^}]+)\}").map_err(|e| ConfigError::Invalid(e.to_string()))?;
    let file_re =
        Regex::new(r"\$FILE\{([^}]+)\}").map_err(|e| ConfigError::Invalid(e.to_string()))?;
    let mut out = String::new();
    let mut last = 0;
    for caps in env_re.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        out.push_str(&text[last..m.start()]);
        let var = std::env::var(&caps[1]).map_err(|_| ConfigError::MissingEnv(caps[1].into()))?;
        out.push_str(&var);
        last = m.end();
    }
    out.push_str(&text[last..]);
    let text = out;
    let mut out = String::new();
    let mut last = 0;
    for caps in file_re.captures_iter(&text) {
        let Some(m) = caps.get(0) else { continue };
        out.push_str(&text[last..m.start()]);
        let contents = std::fs::read_to_string(&caps[1])
            .map_err(|_| ConfigError::FileNotFound(caps[1].into()))?;
        out.push_str(contents.trim_end());
        last = m.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub password_scheme: PasswordScheme,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            max_connections: default_max_connections(),
            password_scheme: PasswordScheme::default(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// `$ENV{NAME}` and `$FILE{path}` placeholders are substituted before
    /// parsing, so secrets and paths can be kept out of the file itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// resolved, or the result is not valid TOML for this schema.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound(path.into()))?;
        let text = expand_placeholders(&text)?;
        let cfg: Config = toml::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "max_connections must be at least 1".into(),
            ));
        }
        if !self.db_path.starts_with("sqlite:") {
            return Err(ConfigError::Invalid(format!(
                "unsupported database URI '{}'",
                self.db_path
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_placeholders_are_substituted() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("STOCKPILE_TEST_DB_PATH", "sqlite::memory:") };
        let out = expand_placeholders("db_path = \"$ENV{STOCKPILE_TEST_DB_PATH}\"").unwrap();
        assert_eq!(out, "db_path = \"sqlite::memory:\"");
    }

    #[test]
    fn unknown_env_placeholder_is_an_error() {
        let err = expand_placeholders("$ENV{STOCKPILE_TEST_SURELY_UNSET}").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(name) if name == "STOCKPILE_TEST_SURELY_UNSET"));
    }

    #[test]
    fn zero_connections_rejected() {
        let cfg = Config {
            max_connections: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }
}
