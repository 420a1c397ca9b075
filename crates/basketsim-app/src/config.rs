// Configuration loading and parsing (league.toml, server.toml).

use basketsim_core::sim::SimulationConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LEAGUE_FILE: &str = "league.toml";
const SERVER_FILE: &str = "server.toml";
const CONFIG_FILES: [&str; 2] = [LEAGUE_FILE, SERVER_FILE];

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub simulation: SimulationConfig,
    pub http: HttpConfig,
    pub db_path: String,
    pub worker: WorkerConfig,
    pub data_paths: DataPaths,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
    #[serde(default)]
    simulation: SimulationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    #[serde(default = "default_min_region_size")]
    pub min_region_size: usize,
    pub default_team_budget: i64,
    pub bot_budget: i64,
}

fn default_min_region_size() -> usize {
    basketsim_core::league::DEFAULT_MIN_REGION_SIZE
}

impl Default for LeagueConfig {
    fn default() -> Self {
        LeagueConfig {
            name: "BasketSim League".into(),
            min_region_size: default_min_region_size(),
            default_team_budget: 100_000,
            bot_budget: 100_000,
        }
    }
}

// ---------------------------------------------------------------------------
// server.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct ServerFile {
    http: HttpConfig,
    database: DatabaseSection,
    #[serde(default)]
    worker: WorkerConfig,
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
struct DatabaseSection {
    path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl HttpConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    pub sweep_interval_secs: u64,
    pub enabled: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        WorkerConfig {
            sweep_interval_secs: 60,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub players: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` and
/// `config/server.toml`, both relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml ---
    let league_path = config_dir.join(LEAGUE_FILE);
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    // --- server.toml ---
    let server_path = config_dir.join(SERVER_FILE);
    let server_text = read_file(&server_path)?;
    let server_file: ServerFile =
        toml::from_str(&server_text).map_err(|e| ConfigError::ParseError {
            path: server_path.clone(),
            source: e,
        })?;

    let config = Config {
        league: league_file.league,
        simulation: league_file.simulation,
        http: server_file.http,
        db_path: server_file.database.path,
        worker: server_file.worker,
        data_paths: server_file.data_paths,
    };

    validate(&config)?;

    Ok(config)
}

/// Copy `league.toml` and `server.toml` from `defaults/` into `config/`
/// when they are missing. Existing files are never overwritten. Returns the
/// paths that were written.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the app directory or set BASKETSIM_HOME",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for name in CONFIG_FILES {
        let target = config_dir.join(name);
        if target.exists() {
            continue;
        }
        let source = defaults_dir.join(name);
        let content = std::fs::read(&source).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("missing default {}: {e}", source.display()),
        })?;
        std::fs::write(&target, content).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to write {}: {e}", target.display()),
        })?;
        copied.push(target);
    }

    Ok(copied)
}

/// Load config relative to `base_dir`, copying defaults first.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.min_region_size == 0 {
        return Err(ConfigError::ValidationError {
            field: "league.min_region_size".into(),
            message: "must be greater than 0".into(),
        });
    }

    let budgets: &[(&str, i64)] = &[
        ("league.default_team_budget", config.league.default_team_budget),
        ("league.bot_budget", config.league.bot_budget),
    ];
    for (name, val) in budgets {
        if *val <= 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be > 0, got {val}"),
            });
        }
    }

    let sim = &config.simulation;
    let sim_fields: &[(&str, f64)] = &[
        ("simulation.variance", sim.variance),
        ("simulation.strength_weight", sim.strength_weight),
    ];
    for (name, val) in sim_fields {
        if !val.is_finite() || *val < 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be >= 0, got {val}"),
            });
        }
    }

    if config.worker.sweep_interval_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "worker.sweep_interval_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Path to the basketsim-app crate root, which holds `defaults/`.
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else if cwd.join("crates/basketsim-app/defaults").exists() {
            cwd.join("crates/basketsim-app")
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    /// Fresh temp dir holding `config/` with the default files.
    fn config_fixture(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        let config_dir = tmp.join("config");
        fs::create_dir_all(&config_dir).unwrap();
        let root = project_root();
        fs::copy(root.join("defaults/league.toml"), config_dir.join("league.toml")).unwrap();
        fs::copy(root.join("defaults/server.toml"), config_dir.join("server.toml")).unwrap();
        tmp
    }

    fn expect_validation_field(err: ConfigError, expected: &str) {
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn load_valid_config_from_defaults() {
        let tmp = config_fixture("basketsim_config_valid");
        let config = load_config_from(&tmp).expect("defaults should load");

        assert_eq!(config.league.name, "BasketSim League");
        assert_eq!(config.league.min_region_size, 10);
        assert_eq!(config.league.default_team_budget, 100_000);
        assert_eq!(config.league.bot_budget, 100_000);
        assert_eq!(config.simulation, SimulationConfig::default());
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.http.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.db_path, "basketsim.db");
        assert_eq!(config.worker.sweep_interval_secs, 60);
        assert!(config.worker.enabled);
        assert_eq!(config.data_paths.players, "data/players.csv");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn simulation_and_worker_sections_are_optional() {
        let tmp = config_fixture("basketsim_config_optional_sections");
        let config_dir = tmp.join("config");
        fs::write(
            config_dir.join("league.toml"),
            "[league]\nname = \"Mini\"\ndefault_team_budget = 5000\nbot_budget = 1000\n",
        )
        .unwrap();
        fs::write(
            config_dir.join("server.toml"),
            "[http]\nhost = \"0.0.0.0\"\nport = 8080\n\n[database]\npath = \":memory:\"\n\n\
             [data_paths]\nplayers = \"p.csv\"\n",
        )
        .unwrap();

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.league.min_region_size, 10);
        assert_eq!(config.simulation.base_score, 80.0);
        assert_eq!(config.worker.sweep_interval_secs, 60);
        assert_eq!(config.http.port, 8080);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_min_region_size() {
        let tmp = config_fixture("basketsim_config_zero_min_region");
        fs::write(
            tmp.join("config/league.toml"),
            "[league]\nname = \"X\"\nmin_region_size = 0\ndefault_team_budget = 1\nbot_budget = 1\n",
        )
        .unwrap();
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "league.min_region_size");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_non_positive_bot_budget() {
        let tmp = config_fixture("basketsim_config_bot_budget");
        fs::write(
            tmp.join("config/league.toml"),
            "[league]\nname = \"X\"\ndefault_team_budget = 100\nbot_budget = 0\n",
        )
        .unwrap();
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "league.bot_budget");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_negative_variance() {
        let tmp = config_fixture("basketsim_config_negative_variance");
        fs::write(
            tmp.join("config/league.toml"),
            "[league]\nname = \"X\"\ndefault_team_budget = 100\nbot_budget = 100\n\n\
             [simulation]\nvariance = -1.0\n",
        )
        .unwrap();
        expect_validation_field(load_config_from(&tmp).unwrap_err(), "simulation.variance");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_sweep_interval() {
        let tmp = config_fixture("basketsim_config_zero_sweep");
        let server = fs::read_to_string(tmp.join("config/server.toml"))
            .unwrap()
            .replace("sweep_interval_secs = 60", "sweep_interval_secs = 0");
        fs::write(tmp.join("config/server.toml"), server).unwrap();
        expect_validation_field(
            load_config_from(&tmp).unwrap_err(),
            "worker.sweep_interval_secs",
        );
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_server_toml() {
        let tmp = config_fixture("basketsim_config_missing_server");
        fs::remove_file(tmp.join("config/server.toml")).unwrap();

        match load_config_from(&tmp).unwrap_err() {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("server.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = config_fixture("basketsim_config_invalid_toml");
        fs::write(tmp.join("config/league.toml"), "this is not valid [[[ toml").unwrap();

        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("league.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_only_missing_config() {
        let tmp = std::env::temp_dir().join("basketsim_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();

        let root = project_root();
        fs::copy(root.join("defaults/league.toml"), defaults_dir.join("league.toml")).unwrap();
        fs::copy(root.join("defaults/server.toml"), defaults_dir.join("server.toml")).unwrap();
        fs::write(defaults_dir.join("notes.txt"), "not config\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 2);
        assert!(tmp.join("config/league.toml").exists());
        assert!(tmp.join("config/server.toml").exists());
        assert!(!tmp.join("config/notes.txt").exists());
        load_config_from(&tmp).expect("copied defaults should load");

        // Only the deleted file comes back, and local edits survive.
        fs::write(tmp.join("config/league.toml"), "# custom\n").unwrap();
        fs::remove_file(tmp.join("config/server.toml")).unwrap();
        let copied = ensure_config_files(&tmp).unwrap();
        assert_eq!(copied, vec![tmp.join("config/server.toml")]);
        assert_eq!(
            fs::read_to_string(tmp.join("config/league.toml")).unwrap(),
            "# custom\n"
        );

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_reports_a_missing_default() {
        let tmp = std::env::temp_dir().join("basketsim_config_missing_default");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::copy(
            project_root().join("defaults/league.toml"),
            defaults_dir.join("league.toml"),
        )
        .unwrap();

        match ensure_config_files(&tmp).unwrap_err() {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("server.toml"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("basketsim_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        match ensure_config_files(&tmp).unwrap_err() {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }
}
