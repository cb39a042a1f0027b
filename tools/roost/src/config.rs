use crate::errors::RoostError;
use crate::logging::{JsonlLogger, DEFAULT_DISK_BUDGET_BYTES, DEFAULT_MAX_PAYLOAD_BYTES};
use crate::runtime::FileSystem;
use crate::types::{PanelView, StepOrigin};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_RECORDING_NAME: &str = "new recording";

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub view: Option<PanelView>,
    pub width: Option<u16>,
    pub height: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub panel: PanelConfig,
    pub steps: StepsConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PanelConfig {
    pub recording_name: String,
    pub view: PanelView,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepsConfig {
    pub origin: StepOrigin,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderConfig {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    pub path: Option<PathBuf>,
    pub max_payload_bytes: usize,
    pub budget_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            panel: PanelConfig {
                recording_name: DEFAULT_RECORDING_NAME.to_string(),
                view: PanelView::Steps,
            },
            steps: StepsConfig {
                origin: StepOrigin::Source,
            },
            render: RenderConfig {
                width: 100,
                height: 30,
            },
            logging: LoggingConfig {
                path: None,
                max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
                budget_bytes: DEFAULT_DISK_BUDGET_BYTES,
            },
        }
    }
}

impl AppConfig {
    /// Run logger for the configured path, resolved against `base` when relative.
    pub fn run_logger(&self, base: &Path) -> Option<JsonlLogger> {
        let path = self.logging.path.as_ref()?;
        let mut logger = JsonlLogger::new(absolutize_path(base, path));
        logger.max_payload_bytes = self.logging.max_payload_bytes;
        logger.budget_bytes = self.logging.budget_bytes;
        Some(logger)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PartialAppConfig {
    panel: Option<PartialPanelConfig>,
    steps: Option<PartialStepsConfig>,
    render: Option<PartialRenderConfig>,
    logging: Option<PartialLoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialPanelConfig {
    recording_name: Option<String>,
    view: Option<PanelView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialStepsConfig {
    origin: Option<StepOrigin>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialRenderConfig {
    width: Option<u16>,
    height: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialLoggingConfig {
    path: Option<PathBuf>,
    max_payload_bytes: Option<usize>,
    budget_bytes: Option<u64>,
}

pub fn load_config(overrides: &CliOverrides, fs: &dyn FileSystem) -> Result<AppConfig, RoostError> {
    let mut cfg = AppConfig::default();

    if let Some(path) = &overrides.config_path {
        let file_contents = fs.read_to_string(path)?;
        let partial: PartialAppConfig = toml::from_str(&file_contents)
            .map_err(|e| RoostError::ConfigParse(e.to_string()))?;
        merge_partial_config(&mut cfg, partial);
    }

    apply_cli_overrides(&mut cfg, overrides);
    validate_config(&cfg)?;
    Ok(cfg)
}

fn merge_partial_config(cfg: &mut AppConfig, partial: PartialAppConfig) {
    if let Some(panel) = partial.panel {
        if let Some(recording_name) = panel.recording_name {
            cfg.panel.recording_name = recording_name;
        }
        if let Some(view) = panel.view {
            cfg.panel.view = view;
        }
    }

    if let Some(origin) = partial.steps.and_then(|steps| steps.origin) {
        cfg.steps.origin = origin;
    }

    if let Some(render) = partial.render {
        if let Some(width) = render.width {
            cfg.render.width = width;
        }
        if let Some(height) = render.height {
            cfg.render.height = height;
        }
    }

    if let Some(logging) = partial.logging {
        if logging.path.is_some() {
            cfg.logging.path = logging.path;
        }
        if let Some(value) = logging.max_payload_bytes {
            cfg.logging.max_payload_bytes = value;
        }
        if let Some(value) = logging.budget_bytes {
            cfg.logging.budget_bytes = value;
        }
    }
}

fn apply_cli_overrides(cfg: &mut AppConfig, overrides: &CliOverrides) {
    if let Some(view) = overrides.view {
        cfg.panel.view = view;
    }
    if let Some(width) = overrides.width {
        cfg.render.width = width;
    }
    if let Some(height) = overrides.height {
        cfg.render.height = height;
    }
}

fn validate_config(cfg: &AppConfig) -> Result<(), RoostError> {
    if cfg.render.width == 0 || cfg.render.height == 0 {
        return Err(RoostError::InvalidConfig(
            "render.width and render.height must be greater than zero".to_string(),
        ));
    }
    if cfg.panel.recording_name.trim().is_empty() {
        return Err(RoostError::InvalidConfig(
            "panel.recording_name must not be empty".to_string(),
        ));
    }
    if cfg.logging.max_payload_bytes < 16 {
        return Err(RoostError::InvalidConfig(
            "logging.max_payload_bytes must be at least 16".to_string(),
        ));
    }
    Ok(())
}

fn absolutize_path(base: &Path, value: &Path) -> PathBuf {
    if value.is_absolute() {
        value.to_path_buf()
    } else {
        base.join(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{load_config, AppConfig, CliOverrides};
    use crate::errors::RoostError;
    use crate::runtime::FakeFileSystem;
    use crate::types::{PanelView, StepOrigin};
    use std::path::{Path, PathBuf};

    fn overrides(path: &str) -> CliOverrides {
        CliOverrides {
            config_path: Some(PathBuf::from(path)),
            ..CliOverrides::default()
        }
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        let cfg = load_config(&CliOverrides::default(), &FakeFileSystem::default()).expect("cfg");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn partial_file_merges_onto_defaults() {
        let fs = FakeFileSystem::with_file(
            "/roost.toml",
            "[panel]\nview = \"code\"\n\n[steps]\norigin = \"call_log\"\n\n[render]\nwidth = 72\n",
        );
        let cfg = load_config(&overrides("/roost.toml"), &fs).expect("cfg");
        assert_eq!(cfg.panel.view, PanelView::Code);
        assert_eq!(cfg.panel.recording_name, "new recording");
        assert_eq!(cfg.steps.origin, StepOrigin::CallLog);
        assert_eq!(cfg.render.width, 72);
        assert_eq!(cfg.render.height, 30);
    }

    #[test]
    fn cli_overrides_win_over_file() {
        let fs = FakeFileSystem::with_file("/roost.toml", "[render]\nwidth = 72\n");
        let mut cli = overrides("/roost.toml");
        cli.width = Some(120);
        cli.view = Some(PanelView::Code);
        let cfg = load_config(&cli, &fs).expect("cfg");
        assert_eq!(cfg.render.width, 120);
        assert_eq!(cfg.panel.view, PanelView::Code);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let fs = FakeFileSystem::with_file("/roost.toml", "[render]\nheight = 0\n");
        let err = load_config(&overrides("/roost.toml"), &fs).expect_err("zero height");
        assert!(matches!(err, RoostError::InvalidConfig(_)));

        let fs = FakeFileSystem::with_file("/roost.toml", "[panel]\nview = \"grid\"\n");
        let err = load_config(&overrides("/roost.toml"), &fs).expect_err("bad view");
        assert!(matches!(err, RoostError::ConfigParse(_)));

        let fs = FakeFileSystem::with_file("/roost.toml", "[theme]\ndark = true\n");
        let err = load_config(&overrides("/roost.toml"), &fs).expect_err("unknown table");
        assert!(matches!(err, RoostError::ConfigParse(_)));
    }

    #[test]
    fn relative_log_path_resolves_against_base() {
        let fs = FakeFileSystem::with_file(
            "/roost.toml",
            "[logging]\npath = \"logs/run.jsonl\"\nmax_payload_bytes = 64\n",
        );
        let cfg = load_config(&overrides("/roost.toml"), &fs).expect("cfg");
        let logger = cfg.run_logger(Path::new("/work")).expect("logger");
        assert_eq!(logger.path, PathBuf::from("/work/logs/run.jsonl"));
        assert_eq!(logger.max_payload_bytes, 64);
        assert!(AppConfig::default().run_logger(Path::new("/work")).is_none());
    }
}
