//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use relief_mesh::{BiomeBands, MeshParams, ShorelineParams, TreeParams};
use relief_terrain::FractalParams;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Platform config directory for relief, e.g. `~/.config/relief` on Linux.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("relief")
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Height field generation.
    pub terrain: TerrainConfig,
    /// Mesh sampling and world scale.
    pub mesh: MeshParams,
    /// Water flattening.
    pub shoreline: ShorelineParams,
    /// Biome colour bands.
    pub biomes: BiomeBands,
    /// Tree scattering.
    pub trees: TreeParams,
    /// Output files.
    pub export: ExportConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Height field generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid width in samples.
    pub width: usize,
    /// Grid height in samples.
    pub height: usize,
    /// Generator seed. `None` picks a fresh seed on every run.
    pub seed: Option<u64>,
    /// Fractal noise parameters.
    pub fractal: FractalParams,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            seed: None,
            fractal: FractalParams::default(),
        }
    }
}

/// Output file settings. Relative paths resolve against `output_dir`;
/// a `None` path skips that export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory all exports are written to.
    pub output_dir: PathBuf,
    /// Grayscale height map PNG.
    pub heightmap_png: Option<PathBuf>,
    /// Top-down biome colour preview PNG.
    pub preview_png: Option<PathBuf>,
    /// Wavefront OBJ with per-vertex colours.
    pub obj: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            heightmap_png: Some(PathBuf::from("heightmap.png")),
            preview_png: Some(PathBuf::from("preview.png")),
            obj: Some(PathBuf::from("terrain.obj")),
        }
    }
}

impl ExportConfig {
    /// Full path for an export target, or `None` if it is disabled.
    pub fn resolve(&self, target: &Option<PathBuf>) -> Option<PathBuf> {
        target.as_ref().map(|p| self.output_dir.join(p))
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Validate mesh index integrity after building.
    pub validate_mesh: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            validate_mesh: true,
        }
    }
}

// --- Validation ---

impl Config {
    /// Rejects settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.terrain.width == 0 || self.terrain.height == 0 {
            return Err(ConfigError::Invalid {
                field: "terrain.width/height",
                reason: format!(
                    "grid must be at least 1x1, got {}x{}",
                    self.terrain.width, self.terrain.height
                ),
            });
        }
        if !self.biomes.is_ordered() {
            return Err(ConfigError::Invalid {
                field: "biomes",
                reason: format!("band edges must ascend, got {:?}", self.biomes.edges()),
            });
        }
        if self.shoreline.transition_width < 0.0 {
            return Err(ConfigError::Invalid {
                field: "shoreline.transition_width",
                reason: format!("must be >= 0, got {}", self.shoreline.transition_width),
            });
        }
        if self.trees.stride == 0 {
            return Err(ConfigError::Invalid {
                field: "trees.stride",
                reason: "must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: returns `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 256"));
        assert!(ron_str.contains("lod_step: 1"));
        assert!(ron_str.contains("log_level: \"info\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.terrain.seed = Some(1234);
        config.export.obj = None;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(terrain: (width: 64), mesh: (lod_step: 2))").unwrap();
        assert_eq!(config.terrain.width, 64);
        assert_eq!(config.terrain.height, 256);
        assert_eq!(config.mesh.lod_step, 2);
        assert_eq!(config.shoreline, ShorelineParams::default());
        assert_eq!(config.trees, TreeParams::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// terrain settings\n(\n  // nothing overridden\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.terrain.width = 128;
        config.terrain.seed = Some(99);
        config.trees.density = 0.5;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.mesh.lod_step = 4;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.mesh.lod_step), Some(4));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.terrain.width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "terrain.width/height", .. })
        ));

        let mut config = Config::default();
        config.biomes.rock = 0.9;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.shoreline.transition_width = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_paths_resolve_under_output_dir() {
        let export = ExportConfig::default();
        assert_eq!(
            export.resolve(&export.obj),
            Some(PathBuf::from("output").join("terrain.obj"))
        );
        assert_eq!(export.resolve(&None), None);
    }
}
