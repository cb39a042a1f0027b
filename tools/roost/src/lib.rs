pub mod call_log;
pub mod classifier;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod fsm;
pub mod hotkeys;
pub mod logging;
pub mod panel;
pub mod protocol;
pub mod runtime;
pub mod sources;
pub mod steps;
pub mod translator;
pub mod tui;
pub mod types;

use call_log::CallLogBook;
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use config::{load_config, AppConfig, CliOverrides};
use dispatch::RunLogEventSink;
use errors::RoostError;
use logging::{append_run_log, init_run_log, structured_fallback_line};
use panel::RecorderPanel;
use protocol::RuntimeEvent;
use runtime::ProductionRuntime;
use serde_json::json;
use sources::Source;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use steps::{extract, Step};
use tui::render_panel;
use types::{Intent, Mode, PanelView};

#[derive(Debug, Clone, Parser)]
#[command(name = "roost")]
#[command(about = "Recorder mode controller and step extraction for generated browser scripts")]
pub struct Cli {
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Generated script to extract steps from.
    #[arg(long)]
    pub source: Option<PathBuf>,
    /// JSONL call-log records from a playback run.
    #[arg(long = "call-log")]
    pub call_log: Option<PathBuf>,
    /// Current mode, used with --intent. Defaults to `none`.
    #[arg(long)]
    pub mode: Option<String>,
    #[arg(long)]
    pub intent: Option<String>,
    #[arg(long, default_value_t = false)]
    pub user_gesture: bool,
    #[arg(long, default_value_t = false)]
    pub json: bool,
    #[arg(long, default_value_t = false)]
    pub render: bool,
    #[arg(long, value_enum)]
    pub view: Option<CliView>,
    #[arg(long)]
    pub width: Option<u16>,
    #[arg(long)]
    pub height: Option<u16>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliView {
    Steps,
    Code,
}

impl From<CliView> for PanelView {
    fn from(value: CliView) -> Self {
        match value {
            CliView::Steps => PanelView::Steps,
            CliView::Code => PanelView::Code,
        }
    }
}

pub fn run() -> Result<i32, RoostError> {
    let args = std::env::args_os().collect::<Vec<_>>();
    let cwd = std::env::current_dir().map_err(|e| RoostError::Io(e.to_string()))?;
    let runtime = ProductionRuntime::new();
    run_with_runtime(&args, &cwd, &runtime)
}

pub fn run_with_runtime(
    args: &[std::ffi::OsString],
    cwd: &Path,
    runtime: &ProductionRuntime,
) -> Result<i32, RoostError> {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{error}");
                return Ok(0);
            }
            _ => return Err(RoostError::Cli(error.to_string())),
        },
    };

    let overrides = CliOverrides {
        config_path: cli.config.as_ref().map(|path| absolutize(cwd, path)),
        view: cli.view.map(Into::into),
        width: cli.width,
        height: cli.height,
    };
    let cfg = load_config(&overrides, runtime.file_system.as_ref())?;
    if let Some(logger) = cfg.run_logger(cwd) {
        init_run_log(logger);
    }
    append_run_log(
        "info",
        "cli.run.started",
        json!({
            "source": cli.source.as_ref().map(|p| p.display().to_string()),
            "call_log": cli.call_log.as_ref().map(|p| p.display().to_string()),
            "intent": cli.intent,
            "render": cli.render,
        }),
    );

    if let Some(intent) = cli.intent.as_deref() {
        return print_transition(&cli, intent, runtime);
    }
    if cli.mode.is_some() {
        return Err(RoostError::Cli("--mode requires --intent".to_string()));
    }

    let source = match &cli.source {
        Some(path) => {
            let path = absolutize(cwd, path);
            let text = read_input(runtime, "--source", &path)?;
            Some(Source::from_file(&path, text))
        }
        None => None,
    };
    let call_log = match &cli.call_log {
        Some(path) => Some(CallLogBook::from_jsonl(&read_input(
            runtime,
            "--call-log",
            &absolutize(cwd, path),
        )?)?),
        None => None,
    };

    if cli.render {
        let panel = build_panel(&cfg, source, call_log);
        let frame = render_panel(&panel, cfg.render.width, cfg.render.height)?;
        runtime.terminal.draw(&frame)?;
        append_run_log(
            "info",
            "cli.render.completed",
            json!({ "width": cfg.render.width, "height": cfg.render.height }),
        );
        return Ok(0);
    }

    if let Some(source) = &source {
        let steps = extract(&source.text).collect::<Vec<Step>>();
        append_run_log(
            "info",
            "cli.steps.extracted",
            json!({ "source_id": source.id, "steps": steps.len() }),
        );
        if cli.json {
            let rendered = serde_json::to_string_pretty(&steps)
                .map_err(|e| RoostError::Protocol(e.to_string()))?;
            runtime.terminal.write_line(&rendered)?;
        } else {
            for (index, step) in steps.iter().enumerate() {
                runtime
                    .terminal
                    .write_line(&format!("{}. {}", index + 1, step.title))?;
            }
        }
    }

    if let Some(message) = call_log.as_ref().and_then(CallLogBook::error_message) {
        let line = if runtime.terminal.stdin_is_tty() {
            format!("Playback Error: {message}")
        } else {
            structured_fallback_line("call_log", "error", &message)
        };
        runtime.terminal.write_line(&line)?;
    }

    if source.is_none() && call_log.is_none() {
        runtime.terminal.write_line(&render_help())?;
    }
    Ok(0)
}

pub fn render_help() -> String {
    Cli::command().render_long_help().to_string()
}

fn print_transition(
    cli: &Cli,
    intent: &str,
    runtime: &ProductionRuntime,
) -> Result<i32, RoostError> {
    let current = Mode::parse(cli.mode.as_deref().unwrap_or(Mode::None.as_str()))?;
    let intent = match Intent::parse(intent)? {
        Intent::ElementPicked { .. } => Intent::ElementPicked {
            user_gesture: cli.user_gesture,
        },
        other => other,
    };
    let next = fsm::transition(current, intent);
    append_run_log(
        "info",
        "cli.transition.resolved",
        json!({
            "from": current.as_str(),
            "intent": intent.as_str(),
            "to": next.as_str(),
        }),
    );

    if cli.json {
        let announce = RuntimeEvent::SetMode { mode: next }.to_json()?;
        let body = json!({
            "from": current.as_str(),
            "intent": intent.as_str(),
            "to": next.as_str(),
            "announce": announce,
        });
        runtime.terminal.write_line(&body.to_string())?;
    } else {
        runtime.terminal.write_line(next.as_str())?;
    }
    Ok(0)
}

fn build_panel(
    cfg: &AppConfig,
    source: Option<Source>,
    call_log: Option<CallLogBook>,
) -> RecorderPanel {
    let mut panel = RecorderPanel::new(Arc::new(RunLogEventSink), cfg);
    if let Some(source) = source {
        panel.update_sources(vec![source]);
    }
    if let Some(book) = call_log {
        panel.replace_call_log(book);
    }
    panel
}

fn read_input(runtime: &ProductionRuntime, flag: &str, path: &Path) -> Result<String, RoostError> {
    if !runtime.file_system.exists(path) {
        return Err(RoostError::Cli(format!(
            "{flag} file does not exist: {}",
            path.display()
        )));
    }
    runtime.file_system.read_to_string(path)
}

fn absolutize(base: &Path, value: &Path) -> PathBuf {
    if value.is_absolute() {
        value.to_path_buf()
    } else {
        base.join(value)
    }
}
