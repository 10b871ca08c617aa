use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::clean::CleanOutcome;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub files_cleaned: usize,
    pub files: Vec<CleanOutcome>,
}

impl RunReport {
    pub fn new(files: Vec<CleanOutcome>) -> Self {
        RunReport {
            files_cleaned: files.len(),
            files,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Creating report file {path:?}"))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).context("Writing report JSON")?;
        writer
            .flush()
            .with_context(|| format!("Flushing report file {path:?}"))
    }
}
