use image::ImageFormat;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::error::PersistenceError;
use crate::raster::RasterImage;

/// Paths written by one [`ArtifactStore::save_all`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifacts {
    pub image_path: PathBuf,
    pub formula_path: PathBuf,
}

/// Saves sketches and recognized formulas as `{prefix}_{n}.{ext}` files
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    images_dir: PathBuf,
    formulas_dir: PathBuf,
    image_prefix: String,
    formula_prefix: String,
}

fn numbered(directory: &Path, prefix: &str, extension: &str, index: u32) -> PathBuf {
    directory.join(format!("{}_{}.{}", prefix, index, extension))
}

/// First `{prefix}_{i}.{extension}` in `directory` that does not exist, from i = 1.
///
/// Only a snapshot: another writer may take the name before it is used.
/// [`ArtifactStore::save_all`] claims names with [`create_next`] instead.
pub fn next_available_name(directory: &Path, prefix: &str, extension: &str) -> PathBuf {
    (1..)
        .map(|i| numbered(directory, prefix, extension, i))
        .find(|path| !path.exists())
        .unwrap_or_else(|| numbered(directory, prefix, extension, u32::MAX))
}

/// Creates the next free numbered file, checking and creating in one step
pub fn create_next(
    directory: &Path,
    prefix: &str,
    extension: &str,
) -> Result<(PathBuf, File), PersistenceError> {
    let mut index = 1;
    loop {
        let path = numbered(directory, prefix, extension, index);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(err) if err.kind() == ErrorKind::AlreadyExists && index < u32::MAX => index += 1,
            Err(source) => return Err(PersistenceError::Create { path, source }),
        }
    }
}

impl ArtifactStore {
    pub fn new(
        images_dir: impl Into<PathBuf>,
        formulas_dir: impl Into<PathBuf>,
        image_prefix: impl Into<String>,
        formula_prefix: impl Into<String>,
    ) -> Self {
        Self {
            images_dir: images_dir.into(),
            formulas_dir: formulas_dir.into(),
            image_prefix: image_prefix.into(),
            formula_prefix: formula_prefix.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.images_dir.clone(),
            config.formulas_dir.clone(),
            config.image_prefix.clone(),
            config.formula_prefix.clone(),
        )
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn formulas_dir(&self) -> &Path {
        &self.formulas_dir
    }

    /// Creates both output directories if they are missing
    pub fn ensure_dirs(&self) -> Result<(), PersistenceError> {
        for dir in [&self.images_dir, &self.formulas_dir] {
            std::fs::create_dir_all(dir).map_err(|source| PersistenceError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn next_image_path(&self) -> PathBuf {
        next_available_name(&self.images_dir, &self.image_prefix, "png")
    }

    pub fn next_formula_path(&self) -> PathBuf {
        next_available_name(&self.formulas_dir, &self.formula_prefix, "txt")
    }

    /// Writes the sketch as PNG and the text as UTF-8 into two new files.
    ///
    /// Never overwrites. If the text file cannot be created or written the
    /// image stays on disk and the error names it.
    pub fn save_all(&self, raster: &RasterImage, text: &str) -> Result<SavedArtifacts, PersistenceError> {
        self.ensure_dirs()?;

        let (image_path, file) = create_next(&self.images_dir, &self.image_prefix, "png")?;
        let mut writer = BufWriter::new(file);
        let written = raster
            .write_to(&mut writer, ImageFormat::Png)
            .and_then(|()| writer.flush().map_err(image::ImageError::IoError));
        if let Err(source) = written {
            drop(writer);
            // Don't leave an empty claimed name behind
            let _ = std::fs::remove_file(&image_path);
            return Err(PersistenceError::WriteImage {
                path: image_path,
                source,
            });
        }

        let (formula_path, mut file) = create_next(&self.formulas_dir, &self.formula_prefix, "txt")
            .map_err(|err| match err {
                PersistenceError::Create { path, source } => PersistenceError::CreateText {
                    path,
                    image_path: image_path.clone(),
                    source,
                },
                other => other,
            })?;
        file.write_all(text.as_bytes())
            .map_err(|source| PersistenceError::WriteText {
                path: formula_path.clone(),
                image_path: image_path.clone(),
                source,
            })?;

        log::info!(
            "Saved sketch to {} and formula to {}",
            image_path.display(),
            formula_path.display()
        );
        Ok(SavedArtifacts {
            image_path,
            formula_path,
        })
    }
}
