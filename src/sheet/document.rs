use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{CellSize, parse_resolution};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::sheet::layout::build_metadata;
use crate::sheet::model::{AnimationDescriptor, SpriteSheet};

impl SpriteSheet {
    /// Parse a metadata document (a JSON array of animations) and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> SpriteResult<Self> {
        let sheet: SpriteSheet = serde_json::from_reader(r)
            .map_err(|e| SpriteError::serde(format!("parse sprite sheet JSON: {e}")))?;
        sheet.validate()?;
        Ok(sheet)
    }

    /// Parse a metadata document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> SpriteResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open sprite sheet JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Write the metadata document as pretty JSON.
    pub fn to_writer_pretty<W: std::io::Write>(&self, w: W) -> SpriteResult<()> {
        serde_json::to_writer_pretty(w, self)
            .map_err(|e| SpriteError::serde(format!("write sprite sheet JSON: {e}")))
    }

    /// Write the metadata document to disk, creating parent directories.
    pub fn write_path(&self, path: impl AsRef<Path>) -> SpriteResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let f = File::create(path)
            .with_context(|| format!("create sprite sheet JSON '{}'", path.display()))?;
        let mut w = BufWriter::new(f);
        self.to_writer_pretty(&mut w)?;
        w.flush()
            .with_context(|| format!("write sprite sheet JSON '{}'", path.display()))?;
        Ok(())
    }
}

/// Where a [`SheetSpec`] takes its cell size from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellSource {
    /// Explicit pixel size.
    Cell(CellSize),
    /// Free-form label such as `"64x64 sprites"`.
    Resolution(String),
}

impl CellSource {
    /// Resolve to a concrete cell size.
    pub fn resolve(&self) -> CellSize {
        match self {
            Self::Cell(cell) => *cell,
            Self::Resolution(label) => parse_resolution(label),
        }
    }
}

/// Builder input document: a cell size plus one descriptor per animation row.
///
/// ```json
/// { "resolution": "32x32", "animations": [{ "name": "Idle", "frames": 4, "loop": "loop" }] }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SheetSpec {
    /// Cell size source.
    #[serde(flatten)]
    pub cell: CellSource,
    /// Animation rows in order.
    pub animations: Vec<AnimationDescriptor>,
}

impl SheetSpec {
    /// Parse a sheet spec from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SpriteResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SpriteError::serde(format!("parse sheet spec JSON: {e}")))
    }

    /// Parse a sheet spec from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SpriteResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open sheet spec JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Lay out the sheet with the sheet spec's own cell size.
    pub fn build(&self) -> SpriteResult<SpriteSheet> {
        self.build_with_cell(self.cell.resolve())
    }

    /// Lay out the sheet with an overriding cell size (for example one detected from pixels).
    pub fn build_with_cell(&self, cell: CellSize) -> SpriteResult<SpriteSheet> {
        SpriteSheet::new(build_metadata(&self.animations, cell)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sheet/document.rs"]
mod tests;
