use std::{
    io,
    path::{Path, PathBuf},
};

use agglopack::Settings;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{color::Color, format::FormatKind};

static DEFAULT_SHEET_PATH: &str = "sheet";
static DEFAULT_COORDINATES_PATH: &str = "coordinates";
static DEFAULT_SHEET_FORMAT: &str = "png";

/// Everything needed to produce a sheet, usually loaded from a
/// `parameters.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub items: Vec<ItemConfig>,

    #[serde(default)]
    pub settings: SheetSettings,

    /// The path that these parameters came from. Patterns in `items` are
    /// relative to the folder containing this file.
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl Parameters {
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParametersError> {
        let path = path.as_ref();
        let contents = fs::read(path)?;

        let mut parameters: Self =
            serde_json::from_slice(&contents).map_err(|source| ParametersError::Json {
                source,
                path: path.to_owned(),
            })?;
        parameters.file_path = path.to_owned();

        Ok(parameters)
    }

    /// An example to start from, written by `agglomerate new`.
    pub fn example() -> Self {
        Self {
            items: vec![ItemConfig::Pattern("example/path/*.png".to_owned())],
            settings: SheetSettings::default(),
            file_path: PathBuf::new(),
        }
    }

    /// The path that patterns in these parameters should be considered
    /// relative to. Empty when they are relative to the working directory.
    pub fn folder(&self) -> &Path {
        self.file_path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// JSON indented by 4 spaces.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut output = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut output, formatter);
        self.serialize(&mut serializer)?;

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

/// An entry of an `items` list: either a pattern matching sprite images or a
/// nested group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemConfig {
    Pattern(String),
    Group(GroupConfig),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub items: Vec<ItemConfig>,

    #[serde(default)]
    pub settings: Settings,
}

/// Settings for the whole sheet: the packing settings of the top-level group
/// plus everything about the output files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSettings {
    #[serde(flatten)]
    pub packing: Settings,

    /// Format of the coordinates file.
    #[serde(default)]
    pub format: FormatKind,

    #[serde(default = "default_sheet_path")]
    pub output_sheet_path: PathBuf,

    #[serde(default = "default_coordinates_path")]
    pub output_coordinates_path: PathBuf,

    /// Image format of the sheet, like `png` or `.png`. Taken from the sheet
    /// path when not given.
    #[serde(default)]
    pub output_sheet_format: Option<String>,

    #[serde(default)]
    pub background_color: Color,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            packing: Settings::default(),
            format: FormatKind::default(),
            output_sheet_path: default_sheet_path(),
            output_coordinates_path: default_coordinates_path(),
            output_sheet_format: None,
            background_color: Color::TRANSPARENT,
        }
    }
}

impl SheetSettings {
    /// Works out where the sheet and coordinates files go.
    ///
    /// A path without an extension gets one: the sheet format (or `png`) for
    /// the sheet and the format's suggested extension for coordinates.
    pub fn output_paths(&self) -> Result<OutputPaths, ParametersError> {
        let requested_format = self
            .output_sheet_format
            .as_deref()
            .map(|format| format.strip_prefix('.').unwrap_or(format));

        let mut sheet = self.output_sheet_path.clone();
        let sheet_format = match (requested_format, sheet.extension()) {
            (Some(format), _) => format.to_owned(),
            (None, Some(extension)) => extension.to_string_lossy().into_owned(),
            (None, None) => DEFAULT_SHEET_FORMAT.to_owned(),
        };

        if !sheet_format.eq_ignore_ascii_case(DEFAULT_SHEET_FORMAT) {
            return Err(ParametersError::UnsupportedSheetFormat {
                format: sheet_format,
            });
        }

        if sheet.extension().is_none() {
            sheet.set_extension(&sheet_format);
        }

        let mut coordinates = self.output_coordinates_path.clone();
        if coordinates.extension().is_none() {
            coordinates.set_extension(self.format.suggested_extension());
        }

        Ok(OutputPaths { sheet, coordinates })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub sheet: PathBuf,
    pub coordinates: PathBuf,
}

fn default_sheet_path() -> PathBuf {
    PathBuf::from(DEFAULT_SHEET_PATH)
}

fn default_coordinates_path() -> PathBuf {
    PathBuf::from(DEFAULT_COORDINATES_PATH)
}

#[derive(Debug, Error)]
pub enum ParametersError {
    #[error("{source} in {}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unsupported sheet image format '{format}', only png sheets can be written")]
    UnsupportedSheetFormat { format: String },

    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },
}
