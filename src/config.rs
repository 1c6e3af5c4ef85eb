use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Storage key the settings are persisted under
pub const CONFIG_KEY: &str = "formula_sketch_config";

/// Longest pause between two recognition attempts
pub const BACKOFF_CEILING_MS: u64 = 10 * 60 * 1000;

/// Application settings, restored from eframe storage on startup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct AppConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub images_dir: PathBuf,
    pub formulas_dir: PathBuf,
    pub image_prefix: String,
    pub formula_prefix: String,
    /// Where the short-lived upload image is written
    pub temp_dir: PathBuf,
    pub recognition: RecognitionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400,
            canvas_height: 200,
            images_dir: PathBuf::from("рисунки"),
            formulas_dir: PathBuf::from("формулы"),
            image_prefix: "рисунок".to_owned(),
            formula_prefix: "формула".to_owned(),
            temp_dir: PathBuf::from("."),
            recognition: RecognitionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Canvas size with both sides at least one pixel
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width.max(1), self.canvas_height.max(1))
    }
}

/// How to reach the hosted recognition model
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Base URL of the Gradio space
    pub endpoint: String,
    /// Endpoint name without the leading slash
    pub api_name: String,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://flowkal-posformer-tpu-practice.hf.space".to_owned(),
            api_name: "predict".to_owned(),
            timeout_secs: 60,
            max_attempts: 3,
            initial_backoff_ms: 500,
            max_backoff_ms: 8_000,
        }
    }
}

impl RecognitionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let initial = self.initial_backoff_ms.min(BACKOFF_CEILING_MS);
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            initial_backoff: Duration::from_millis(initial),
            max_backoff: Duration::from_millis(
                self.max_backoff_ms.clamp(initial, BACKOFF_CEILING_MS),
            ),
        }
    }
}

/// Exponential backoff for transient recognition failures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// No retries, no waiting
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Delay before attempt `attempt + 1`, where `attempt` counts from 1
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff.saturating_mul(factor).min(self.max_backoff)
    }
}
