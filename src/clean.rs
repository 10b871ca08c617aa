use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use crate::{arff::Dataset, io_utils};

pub const INPUT_SUFFIX: &str = ".dat";
pub const OUTPUT_SUFFIX: &str = "_cleaned.arff";

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("Path {0:?} does not exist")]
    MissingPath(PathBuf),
    #[error("Path {0:?} is neither a regular file nor a directory")]
    UnsupportedPath(PathBuf),
    #[error("Path {0:?} is not valid UTF-8")]
    NonUtf8Path(PathBuf),
    #[error("Path {0:?} does not contain '.dat'; the cleaned output would overwrite it")]
    OutputWouldOverwriteInput(PathBuf),
}

#[derive(Debug, Clone, Copy)]
pub struct CleanOptions {
    pub input_encoding: &'static Encoding,
    pub output_encoding: &'static Encoding,
}

impl Default for CleanOptions {
    fn default() -> Self {
        CleanOptions {
            input_encoding: UTF_8,
            output_encoding: UTF_8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub attributes_declared: usize,
    pub attributes_kept: usize,
    pub rows: usize,
}

/// Replaces the first occurrence of `.dat` anywhere in the path, not only a
/// trailing extension.
pub fn cleaned_output_path(path: &Path) -> Result<PathBuf, CleanError> {
    let text = path
        .to_str()
        .ok_or_else(|| CleanError::NonUtf8Path(path.to_path_buf()))?;
    if !text.contains(INPUT_SUFFIX) {
        return Err(CleanError::OutputWouldOverwriteInput(path.to_path_buf()));
    }
    Ok(PathBuf::from(text.replacen(INPUT_SUFFIX, OUTPUT_SUFFIX, 1)))
}

pub fn is_dataset_file(path: &Path) -> bool {
    path.to_str().is_some_and(|text| text.ends_with(INPUT_SUFFIX))
}

pub fn clean_file(path: &Path, options: &CleanOptions) -> Result<CleanOutcome> {
    let output = cleaned_output_path(path)?;
    info!("Cleaning {}", path.display());

    let text = io_utils::read_text(path, options.input_encoding)?;
    let dataset = Dataset::parse(&text);
    io_utils::write_text(&output, &dataset.render(), options.output_encoding)?;

    let summary = dataset.summary();
    info!(
        "Created {} ({} of {} attribute(s) kept, {} row(s))",
        output.display(),
        summary.attributes_kept,
        summary.attributes_declared,
        summary.rows
    );
    Ok(CleanOutcome {
        input: path.to_path_buf(),
        output,
        attributes_declared: summary.attributes_declared,
        attributes_kept: summary.attributes_kept,
        rows: summary.rows,
    })
}

/// Cleans every `.dat` file below `dir`. The first failure aborts the walk.
pub fn clean_directory(dir: &Path, options: &CleanOptions) -> Result<Vec<CleanOutcome>> {
    let mut outcomes = Vec::new();
    clean_directory_into(dir, options, &mut outcomes)?;
    Ok(outcomes)
}

fn clean_directory_into(
    dir: &Path,
    options: &CleanOptions,
    outcomes: &mut Vec<CleanOutcome>,
) -> Result<()> {
    // Collected up front so files created during the walk are never revisited.
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Reading directory {dir:?}"))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Listing directory {dir:?}"))?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();
        // Follows symlinks; a dangling link has no target to clean.
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("Skipping dangling link {}", path.display());
                continue;
            }
            Err(err) => return Err(err).with_context(|| format!("Inspecting {path:?}")),
        };
        if metadata.is_dir() {
            clean_directory_into(&path, options, outcomes)?;
        } else if metadata.is_file() && is_dataset_file(&path) {
            outcomes.push(clean_file(&path, options)?);
        } else {
            debug!("Skipping {}", path.display());
        }
    }
    Ok(())
}

pub fn clean_path(path: &Path, options: &CleanOptions) -> Result<Vec<CleanOutcome>> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(CleanError::MissingPath(path.to_path_buf()).into());
        }
        Err(err) => return Err(err).with_context(|| format!("Inspecting {path:?}")),
    };
    if metadata.is_dir() {
        clean_directory(path, options)
    } else if metadata.is_file() {
        Ok(vec![clean_file(path, options)?])
    } else {
        Err(CleanError::UnsupportedPath(path.to_path_buf()).into())
    }
}
