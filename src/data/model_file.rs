use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bincode::Options;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::{MODEL_PATH, MODEL_VERSION};
use crate::models::{ForecastModel, Forecaster};

/// Serialized model artifact: the fitted model plus what the dashboard needs to label it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModelFile {
    pub version: f64,
    pub trained_at_ms: i64,
    /// Metadata e.g. "Store 12 daily sales"
    pub name: String,
    /// Date of the final training observation; forecast day 1 is the day after
    pub last_observation: NaiveDate,
    /// Optional cap on how far ahead this model may be asked to forecast
    pub max_horizon: Option<usize>,
    pub model: ForecastModel,
}

impl ModelFile {
    pub fn new(
        name: impl Into<String>,
        last_observation: NaiveDate,
        max_horizon: Option<usize>,
        model: ForecastModel,
    ) -> Self {
        Self {
            version: MODEL_VERSION,
            trained_at_ms: Utc::now().timestamp_millis(),
            name: name.into(),
            last_observation,
            max_horizon,
            model,
        }
    }

    /// Read, deserialize and validate. The file handle is dropped before validation.
    /// Decoding is limited to the file's own size, so a corrupt length prefix fails
    /// instead of allocating whatever it claims.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let model_file: ModelFile = {
            let file =
                File::open(path).context(format!("Failed to open model file: {:?}", path))?;
            let limit = file
                .metadata()
                .context(format!("Failed to stat model file: {:?}", path))?
                .len();
            let mut reader = BufReader::new(file);
            bincode::DefaultOptions::new()
                .with_fixint_encoding()
                .allow_trailing_bytes()
                .with_limit(limit)
                .deserialize_from(&mut reader)
                .context(format!("Failed to deserialize model: {:?}", path))?
        };
        model_file
            .check()
            .context(format!("Model file rejected: {:?}", path))?;
        Ok(model_file)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context(format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .context(format!("Failed to serialize model to: {}", path.display()))
    }

    /// Version and capability checks, run at load so a bad artifact stops startup.
    pub fn check(&self) -> Result<()> {
        if self.version != MODEL_VERSION {
            bail!(
                "Model version mismatch: file v{} vs required v{}",
                self.version,
                MODEL_VERSION
            );
        }
        if self.max_horizon == Some(0) {
            bail!("Model max_horizon is 0, it can never forecast");
        }
        self.model
            .validate()
            .context(format!("{} cannot forecast", self.model.name()))?;
        Ok(())
    }

    pub fn default_model_path() -> PathBuf {
        PathBuf::from(MODEL_PATH)
    }
}

/// Load the artifact from the fixed model path.
pub fn load_model() -> Result<ModelFile> {
    let path = ModelFile::default_model_path();

    #[cfg(debug_assertions)]
    let start_time = DEBUG_FLAGS.print_serde.then(|| {
        log::info!("Reading model from: {:?}...", path);
        std::time::Instant::now()
    });

    let model_file = ModelFile::load_from_path(&path)?;

    #[cfg(debug_assertions)]
    if let Some(start) = start_time {
        log::info!(
            "✅ Model loaded in {:.3}s: {}",
            start.elapsed().as_secs_f64(),
            model_file.model
        );
    }

    Ok(model_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Holt, Naive};
    use tempfile::tempdir;

    fn sample() -> ModelFile {
        ModelFile::new(
            "test sales",
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            None,
            ForecastModel::Holt(Holt {
                alpha: 0.3,
                beta: 0.1,
                level: 100.0,
                trend: 2.0,
            }),
        )
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let original = sample();
        original.save_to_path(&path).unwrap();
        let loaded = ModelFile::load_from_path(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("model.bin");
        sample().save_to_path(&path).unwrap();
        assert!(ModelFile::load_from_path(&path).is_ok());
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempdir().unwrap();
        let err = ModelFile::load_from_path(&dir.path().join("does_not_exist.bin")).unwrap_err();
        assert!(err.to_string().contains("Failed to open model file"));
    }

    #[test]
    fn test_corrupt_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.bin");
        std::fs::write(&path, b"definitely not a model").unwrap();
        assert!(ModelFile::load_from_path(&path).is_err());
    }

    #[test]
    fn test_oversized_length_prefix_fails_without_allocating() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge_name.bin");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MODEL_VERSION.to_le_bytes());
        bytes.extend_from_slice(&0i64.to_le_bytes());
        // Name length claims 16 TiB
        bytes.extend_from_slice(&(1u64 << 44).to_le_bytes());
        bytes.extend_from_slice(b"abc");
        std::fs::write(&path, &bytes).unwrap();

        let err = ModelFile::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to deserialize model"));
    }

    #[test]
    fn test_wrong_version_is_rejected() {
        let mut stale = sample();
        stale.version = MODEL_VERSION + 1.0;
        let err = stale.check().unwrap_err();
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_unusable_model_is_rejected_at_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unusable.bin");
        let mut broken = sample();
        broken.model = ForecastModel::Naive(Naive {
            last_value: f64::INFINITY,
        });
        broken.save_to_path(&path).unwrap();
        let err = ModelFile::load_from_path(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("cannot forecast"));
    }

    #[test]
    fn test_zero_max_horizon_is_rejected() {
        let mut capped = sample();
        capped.max_horizon = Some(0);
        assert!(capped.check().is_err());
    }
}
