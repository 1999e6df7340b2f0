// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::balance::validate_reserve;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Periodledger", "periodledger"));

pub const DATA_DIR_ENV: &str = "PERIODLEDGER_DATA_DIR";
pub const RESERVE_ENV: &str = "PERIODLEDGER_RESERVE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one `<YYYY><Month>.db` file per period.
    pub data_dir: PathBuf,
    /// Share of the balance, in percent, held back from "spendable".
    pub reserve_percent: u8,
}

/// On-disk `config.json`; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    reserve_percent: Option<u8>,
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")
}

pub fn default_data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join("data"))
}

pub fn config_file_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.json"))
}

impl Config {
    /// Defaults, then `config_file` if present, then explicit overrides.
    pub fn resolve(
        config_file: Option<&Path>,
        data_dir: Option<PathBuf>,
        reserve_percent: Option<u8>,
    ) -> Result<Self> {
        let file = match config_file {
            Some(path) if path.exists() => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Read config {}", path.display()))?;
                serde_json::from_str::<FileConfig>(&raw)
                    .with_context(|| format!("Parse config {}", path.display()))?
            }
            _ => FileConfig::default(),
        };

        let data_dir = match data_dir.or(file.data_dir) {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        let reserve_percent = validate_reserve(reserve_percent.or(file.reserve_percent).unwrap_or(0))?;
        Ok(Config {
            data_dir,
            reserve_percent,
        })
    }
}
