use querybench_exec::ConnectorConfig;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub runtime: String,
    pub container: String,
    pub client_program: String,
    pub client_args: Vec<String>,
    pub primary_format: String,
    pub fallback_format: String,
    pub fallback_delimiter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let d = ConnectorConfig::default();
        Self {
            runtime: d.runtime,
            container: d.container,
            client_program: d.client_program,
            client_args: d.client_args,
            primary_format: d.primary_format,
            fallback_format: d.fallback_format,
            fallback_delimiter: d.fallback_delimiter.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct QueryConfig {
    pub default_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: 60,
            connect_timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.engine.runtime.trim().is_empty() {
            return Err(anyhow::anyhow!("engine.runtime must not be empty"));
        }
        if self.engine.container.trim().is_empty() {
            return Err(anyhow::anyhow!("engine.container must not be empty"));
        }
        if self.engine.client_program.trim().is_empty() {
            return Err(anyhow::anyhow!("engine.client_program must not be empty"));
        }
        if self.engine.fallback_delimiter.chars().count() != 1 {
            return Err(anyhow::anyhow!(
                "engine.fallback_delimiter must be a single character"
            ));
        }
        if self.query.default_timeout_secs == 0 {
            return Err(anyhow::anyhow!("query.default_timeout_secs must be nonzero"));
        }
        if self.query.connect_timeout_secs == 0 {
            return Err(anyhow::anyhow!("query.connect_timeout_secs must be nonzero"));
        }
        Ok(())
    }

    pub fn connector_config(&self) -> ConnectorConfig {
        ConnectorConfig {
            runtime: self.engine.runtime.clone(),
            container: self.engine.container.clone(),
            client_program: self.engine.client_program.clone(),
            client_args: self.engine.client_args.clone(),
            primary_format: self.engine.primary_format.clone(),
            fallback_format: self.engine.fallback_format.clone(),
            // Single char enforced by validate(); defaults keep the unwrap safe.
            fallback_delimiter: self.engine.fallback_delimiter.chars().next().unwrap_or(','),
            connect_timeout: std::time::Duration::from_secs(self.query.connect_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.container, "firebolt-core");
        assert_eq!(config.query.default_timeout_secs, 60);
        assert_eq!(config.connector_config().fallback_delimiter, ',');
        assert_eq!(
            config.connector_config().connect_timeout,
            std::time::Duration::from_secs(10)
        );
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            "[engine]\ncontainer = \"my-engine\"\n\n[query]\ndefault_timeout_secs = 5\nconnect_timeout_secs = 3"
        )
        .expect("write");
        let config = Config::from_path(file.path()).expect("load");
        assert_eq!(config.engine.container, "my-engine");
        assert_eq!(config.engine.runtime, "docker");
        assert_eq!(config.query.default_timeout_secs, 5);
        assert_eq!(config.query.connect_timeout_secs, 3);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(file, "[query]\ndefault_timeout_secs = 0").expect("write");
        assert!(Config::from_path(file.path()).is_err());
    }

    #[test]
    fn zero_connect_timeout_is_rejected() {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(file, "[query]\nconnect_timeout_secs = 0").expect("write");
        assert!(Config::from_path(file.path()).is_err());
    }

    #[test]
    fn multi_char_delimiter_is_rejected() {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(file, "[engine]\nfallback_delimiter = \"||\"").expect("write");
        assert!(Config::from_path(file.path()).is_err());
    }
}
