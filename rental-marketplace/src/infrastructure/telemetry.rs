use serde::{Deserialize, Serialize};
use tracing::metadata::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// 遥测系统配置
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct TelemetryConfig {
    /// 启用遥测系统
    #[serde(default = "default_enabled")]
    pub enable: bool,
    /// 全局过滤级别
    #[serde(default)]
    pub max_level: LoggingLevel,
    /// 全局自定义过滤规则
    #[serde(default)]
    pub level_filter: String,
    /// 控制台输出设置
    #[serde(default)]
    pub console: ConsoleConfig,
    /// 文件输出设置
    #[serde(default)]
    pub file: FileConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enable: default_enabled(),
            max_level: Default::default(),
            level_filter: Default::default(),
            console: Default::default(),
            file: Default::default(),
        }
    }
}

/// 日志级别
#[derive(Default, Deserialize, Serialize, Clone, Copy, Debug)]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
    Off,
}

impl From<LoggingLevel> for LevelFilter {
    fn from(val: LoggingLevel) -> Self {
        match val {
            LoggingLevel::Error => LevelFilter::ERROR,
            LoggingLevel::Warn => LevelFilter::WARN,
            LoggingLevel::Info => LevelFilter::INFO,
            LoggingLevel::Debug => LevelFilter::DEBUG,
            LoggingLevel::Trace => LevelFilter::TRACE,
            LoggingLevel::Off => LevelFilter::OFF,
        }
    }
}

impl From<LoggingLevel> for Directive {
    fn from(val: LoggingLevel) -> Self {
        let level: LevelFilter = val.into();
        level.into()
    }
}

/// 控制台输出配置
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ConsoleConfig {
    #[serde(default = "default_enabled")]
    pub enable: bool,
    /// 启用调试输出（带有文件、行号等）
    #[serde(default)]
    pub enable_debug_logging: bool,
    #[serde(default)]
    pub max_level: LoggingLevel,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enable: default_enabled(),
            enable_debug_logging: Default::default(),
            max_level: Default::default(),
        }
    }
}

/// 文件输出配置
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct FileConfig {
    #[serde(default)]
    pub enable: bool,
    #[serde(default)]
    pub enable_debug_logging: bool,
    #[serde(default)]
    pub max_level: LoggingLevel,
    /// 日志文件夹位置（默认 `./logs`）
    #[serde(default = "default_path")]
    pub path: String,
    /// 日志文件名，或滚动写入前缀
    #[serde(default = "default_filename")]
    pub prefix: String,
    /// 滚动创建文件写入时长，默认 `Never`
    #[serde(default)]
    pub rolling_time: RotationLevel,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enable: Default::default(),
            enable_debug_logging: Default::default(),
            max_level: Default::default(),
            path: default_path(),
            prefix: default_filename(),
            rolling_time: Default::default(),
        }
    }
}

/// 文件生成周期
#[derive(Default, Deserialize, Serialize, Clone, Copy, Debug)]
pub enum RotationLevel {
    Daily,
    Hourly,
    Minutely,
    #[default]
    Never,
}

impl From<RotationLevel> for Rotation {
    fn from(val: RotationLevel) -> Self {
        match val {
            RotationLevel::Daily => Rotation::DAILY,
            RotationLevel::Hourly => Rotation::HOURLY,
            RotationLevel::Minutely => Rotation::MINUTELY,
            RotationLevel::Never => Rotation::NEVER,
        }
    }
}

fn default_enabled() -> bool {
    true
}
fn default_path() -> String {
    "./logs".to_string()
}
fn default_filename() -> String {
    "rental.log".to_string()
}

/// 配置日志
pub fn initialize_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    if !config.enable {
        return Ok(());
    }
    let filter = EnvFilter::builder()
        .with_default_directive(config.max_level.into())
        .parse_lossy(config.level_filter.as_str());
    let console = config.console.enable.then(|| {
        let debug = config.console.enable_debug_logging;
        tracing_subscriber::fmt::layer()
            .with_file(debug)
            .with_line_number(debug)
            .with_thread_ids(debug)
            .with_target(debug)
            .with_filter(LevelFilter::from(config.console.max_level))
    });
    let file = config.file.enable.then(|| {
        let file_config = &config.file;
        let debug = file_config.enable_debug_logging;
        let appender = RollingFileAppender::new(
            file_config.rolling_time.into(),
            &file_config.path,
            &file_config.prefix,
        );
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(appender)
            .with_file(debug)
            .with_line_number(debug)
            .with_thread_ids(debug)
            .with_target(debug)
            .with_filter(LevelFilter::from(file_config.max_level))
    });
    Registry::default().with(filter).with(console).with(file).try_init()?;
    Ok(())
}
