use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Beyond this size the invalid half of the seed generation cannot be filled
/// from the finite set of invalid triples the generator can produce.
pub const MAX_POPULATION_SIZE: usize = 100_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Parameters of the evolutionary search.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GaConfig {
    /// Target size `n` of every generation
    pub population_size: usize,
    /// Number of top-ranked candidates kept as parents each generation
    pub num_parents: usize,
    /// Upper bound on the children produced by crossover
    pub num_children: usize,
    /// Hard stop for the generation loop
    pub max_generations: usize,
    /// Coverage at or above which the search is considered converged
    pub coverage_threshold: f64,
    /// How many parents are copied verbatim into the next generation
    pub elite_count: usize,
    /// Optional seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            num_parents: 10,
            num_children: 20,
            max_generations: 100,
            coverage_threshold: 0.95,
            elite_count: 5,
            seed: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub csv_path: String,
    pub report_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "finalTestCases.csv".to_string(),
            report_path: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub ga: GaConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Rejects settings the search cannot work with.
    ///
    /// Degenerate sizes (no parents, no children, a population smaller than
    /// the boundary seeds) are accepted: the operators shrink their output
    /// instead of failing, so they only earn a warning here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ga = &self.ga;

        if !ga.coverage_threshold.is_finite() || ga.coverage_threshold < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "coverage_threshold must be a finite, non-negative number, got {}",
                ga.coverage_threshold
            )));
        }
        if ga.population_size > MAX_POPULATION_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "population_size must be at most {}, got {}",
                MAX_POPULATION_SIZE, ga.population_size
            )));
        }
        if self.output.csv_path.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "output.csv_path must not be empty".to_string(),
            ));
        }

        if ga.coverage_threshold > 1.0 {
            warn!(
                "coverage_threshold {} can never be reached, the run will use all {} generations",
                ga.coverage_threshold, ga.max_generations
            );
        }
        if ga.num_parents < 2 {
            warn!(
                "num_parents = {}: crossover needs at least two parents and will produce no children",
                ga.num_parents
            );
        }
        if ga.num_children == 0 {
            warn!("num_children = 0: generations will only carry over elite parents");
        }
        if ga.population_size < 5 {
            warn!(
                "population_size = {} is smaller than the five boundary seeds",
                ga.population_size
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ga.population_size, 50);
        assert_eq!(config.ga.num_parents, 10);
        assert_eq!(config.ga.num_children, 20);
        assert_eq!(config.ga.max_generations, 100);
        assert_eq!(config.ga.coverage_threshold, 0.95);
        assert_eq!(config.ga.elite_count, 5);
        assert_eq!(config.output.csv_path, "finalTestCases.csv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_overrides_only_given_fields() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.toml");
        let mut file = File::create(&file_path).unwrap();
        write!(
            file,
            "[ga]\npopulation_size = 80\nseed = 7\n\n[output]\nreport_path = \"run.json\"\n"
        )
        .unwrap();

        let config = Config::load(&file_path).unwrap();
        assert_eq!(config.ga.population_size, 80);
        assert_eq!(config.ga.seed, Some(7));
        assert_eq!(config.ga.num_parents, 10);
        assert_eq!(config.output.csv_path, "finalTestCases.csv");
        assert_eq!(config.output.report_path.as_deref(), Some("run.json"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let result = Config::load(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::FileReadError(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = Config::from_toml_str("[ga]\npopulation_size = \"many\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validation_rejects_bad_threshold() {
        let mut config = Config::default();
        config.ga.coverage_threshold = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        config.ga.coverage_threshold = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_population() {
        let mut config = Config::default();
        config.ga.population_size = MAX_POPULATION_SIZE + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_csv_path() {
        let mut config = Config::default();
        config.output.csv_path = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_degenerate_sizes() {
        let mut config = Config::default();
        config.ga.num_parents = 0;
        config.ga.num_children = 0;
        config.ga.population_size = 3;
        assert!(config.validate().is_ok());
    }
}
