use std::env;
use std::path::PathBuf;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// 32 MiB, the upload ceiling of the web service.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub uploads: UploadConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Where uploads and their `_extracted.txt` sidecars are stored.
    pub dir: PathBuf,
    pub max_file_size: usize,
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Default destination of `_extracted_text.txt` artifacts and reports.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("DOCTEXT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("DOCTEXT_PORT", 5000),
            },
            uploads: UploadConfig {
                dir: env::var("DOCTEXT_UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("uploads")),
                max_file_size: parse_env_or("DOCTEXT_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            },
            batch: BatchConfig {
                output_dir: env::var("DOCTEXT_OUTPUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(".")),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
