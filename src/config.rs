use crate::generator::GenerateOptions;
use crate::model::{Catalog, DAY_COUNT, FIRST_HOUR, LAST_HOUR, ROOM_COUNT};
use crate::writer::{WriteMode, DEFAULT_OUTPUT_DIR};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration fichier (JSON, clés camelCase). Tous les champs sont optionnels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct Config {
    pub output_dir: PathBuf,
    pub days: u32,
    pub first_hour: u8,
    pub last_hour: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Non utilisé par la génération.
    pub rooms: u32,
    pub catalog: Catalog,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub mode: WriteMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            days: DAY_COUNT,
            first_hour: FIRST_HOUR,
            last_hour: LAST_HOUR,
            start_date: None,
            rooms: ROOM_COUNT,
            catalog: Catalog::default(),
            seed: None,
            mode: WriteMode::Append,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let cfg: Config = serde_json::from_slice(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.generate_options().validate()?;
        Ok(cfg)
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            days: self.days,
            first_hour: self.first_hour,
            last_hour: self.last_hour,
            start_date: self.start_date,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
