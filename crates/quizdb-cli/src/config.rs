use crate::cli::GlobalArgs;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = "quizdb.toml";

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// File the settings came from; `None` when running on defaults.
    pub config_path: Option<PathBuf>,
    pub file: ConfigFile,
}

impl ProjectConfig {
    /// Load settings for one invocation.
    ///
    /// An explicit `--config` must exist. Without one, `quizdb.toml` is used when
    /// present and `DATABASE_URL` otherwise. `--database` always wins.
    pub fn resolve(args: &GlobalArgs) -> anyhow::Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path.clone())?,
            None if Path::new(DEFAULT_CONFIG).exists() => Self::load(PathBuf::from(DEFAULT_CONFIG))?,
            None => Self {
                config_path: None,
                file: ConfigFile::from_env(),
            },
        };

        if let Some(url) = &args.database {
            config.file.database.url = url.clone();
        }
        config.file.validate()?;
        Ok(config)
    }

    pub fn load(config_path: PathBuf) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(&config_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read config file {}: {e}",
                config_path.display()
            )
        })?;

        let file = ConfigFile::parse(&raw).map_err(|e| {
            anyhow::anyhow!(
                "failed to parse config file {}: {e:#}",
                config_path.display()
            )
        })?;

        Ok(Self {
            config_path: Some(config_path),
            file,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_max_connections() -> usize {
    quizdb::pool::DEFAULT_MAX_SIZE
}

impl ConfigFile {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        let mut file: ConfigFile = toml::from_str(raw)?;
        file.database.url = expand_env_vars(&file.database.url)?;
        Ok(file)
    }

    fn from_env() -> Self {
        Self {
            version: "1".to_string(),
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL").unwrap_or_default(),
                max_connections: default_max_connections(),
            },
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.version.trim() != "1" {
            anyhow::bail!("unsupported config version: {}", self.version);
        }
        if self.database.url.trim().is_empty() {
            anyhow::bail!("database.url must not be empty (set it in config, DATABASE_URL, or --database)");
        }
        if self.database.max_connections == 0 {
            anyhow::bail!("database.max_connections must be at least 1");
        }
        Ok(())
    }
}

/// Substitute every `${NAME}` with the value of the environment variable `NAME`.
fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find("${") {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 2..];
        let close = tail
            .find('}')
            .with_context(|| format!("unterminated env var reference: ${{{tail}"))?;
        let name = &tail[..close];
        anyhow::ensure!(!name.is_empty(), "empty env var reference: ${{}}");
        let value = std::env::var(name)
            .with_context(|| format!("config references unset env var {name}"))?;
        out.push_str(&value);
        rest = &tail[close + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_known_vars() {
        // PATH is set in any test environment.
        let path = std::env::var("PATH").unwrap();
        assert_eq!(expand_env_vars("a${PATH}b").unwrap(), format!("a{path}b"));
        assert_eq!(expand_env_vars("no refs $here").unwrap(), "no refs $here");
        assert_eq!(
            expand_env_vars("${PATH}:${PATH}}").unwrap(),
            format!("{path}:{path}}}")
        );
    }

    #[test]
    fn rejects_bad_references() {
        assert!(expand_env_vars("${UNTERMINATED").is_err());
        assert!(expand_env_vars("${}").is_err());
        assert!(expand_env_vars("${QUIZDB_TEST_SURELY_UNSET_VAR}").is_err());
    }

    #[test]
    fn parses_and_defaults_pool_size() {
        let file = ConfigFile::parse(
            r#"
version = "1"
[database]
url = "postgres://postgres@localhost/test_db"
"#,
        )
        .unwrap();
        assert_eq!(file.database.max_connections, quizdb::pool::DEFAULT_MAX_SIZE);
        file.validate().unwrap();
    }

    #[test]
    fn validation_errors() {
        let mut file = ConfigFile::parse(
            r#"
version = "2"
[database]
url = "postgres://localhost/db"
max_connections = 4
"#,
        )
        .unwrap();
        assert!(file.validate().is_err());

        file.version = "1".into();
        file.database.max_connections = 0;
        assert!(file.validate().is_err());

        file.database.max_connections = 4;
        file.database.url = "  ".into();
        assert!(file.validate().is_err());
    }

    #[test]
    fn database_flag_overrides_file() {
        let dir = std::env::temp_dir().join(format!("quizdb-cli-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("quizdb.toml");
        std::fs::write(
            &path,
            "version = \"1\"\n[database]\nurl = \"postgres://file/db\"\n",
        )
        .unwrap();

        let args = GlobalArgs {
            config: Some(path.clone()),
            database: Some("postgres://flag/db".into()),
        };
        let config = ProjectConfig::resolve(&args).unwrap();
        assert_eq!(config.file.database.url, "postgres://flag/db");
        assert_eq!(config.config_path, Some(path));

        let missing = GlobalArgs {
            config: Some(dir.join("absent.toml")),
            database: None,
        };
        assert!(ProjectConfig::resolve(&missing).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
