use colored::*;
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::Lazy;
use std::sync::Mutex;

static WHISK_LOGGER: Lazy<WhiskLogger> = Lazy::new(WhiskLogger::new);

pub fn init() -> Result<(), String> {
    init_with_config(LoggerConfig::default())
}

pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    let level = config.min_level;
    WHISK_LOGGER.update_config(config);

    if let Err(e) = log::set_logger(&*WHISK_LOGGER) {
        return Err(format!("Failed to set logger: {:?}", e));
    }

    log::set_max_level(level);
    Ok(())
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LevelFilter,
    pub show_colors: bool,
    pub show_module: bool,
    pub include_timestamp: bool,
    pub timestamp_format: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LevelFilter::Info,
            show_colors: true,
            show_module: true,
            include_timestamp: true,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn development() -> Self {
        Self {
            min_level: LevelFilter::Debug,
            ..Default::default()
        }
    }

    pub fn production() -> Self {
        Self {
            min_level: LevelFilter::Info,
            show_colors: false,
            ..Default::default()
        }
    }
}

pub struct WhiskLogger {
    config: Mutex<LoggerConfig>,
}

impl WhiskLogger {
    fn new() -> Self {
        Self {
            config: Mutex::new(LoggerConfig::default()),
        }
    }

    fn update_config(&self, new_config: LoggerConfig) {
        if let Ok(mut config) = self.config.lock() {
            *config = new_config;
        }
    }

    fn level_tag(level: Level, colors: bool) -> String {
        let tag = match level {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        };

        if !colors {
            return format!("[{}]", tag);
        }

        let colored_tag = match level {
            Level::Trace => tag.cyan(),
            Level::Debug => tag.blue(),
            Level::Info => tag.green(),
            Level::Warn => tag.yellow(),
            Level::Error => tag.red(),
        };
        format!("[{}]", colored_tag.bold())
    }
}

impl log::Log for WhiskLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if let Ok(config) = self.config.lock() {
            metadata.level() <= config.min_level
        } else {
            true
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let config = match self.config.lock() {
            Ok(config) => config.clone(),
            Err(_) => return,
        };

        let mut line = String::new();

        if config.include_timestamp {
            let timestamp = chrono::Utc::now().format(&config.timestamp_format);
            if config.show_colors {
                line.push_str(&format!("{} ", timestamp.to_string().bright_black()));
            } else {
                line.push_str(&format!("{} ", timestamp));
            }
        }

        line.push_str(&Self::level_tag(record.level(), config.show_colors));
        line.push(' ');

        if config.show_module {
            let module = record.module_path().unwrap_or("unknown");
            if config.show_colors {
                line.push_str(&format!("{}: ", module.bright_blue()));
            } else {
                line.push_str(&format!("{}: ", module));
            }
        }

        line.push_str(&record.args().to_string());
        println!("{}", line);
    }

    fn flush(&self) {}
}
