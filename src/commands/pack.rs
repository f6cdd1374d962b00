use std::{
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use agglopack::{Allow, Settings};
use anyhow::{bail, Context};
use fs_err as fs;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    data::{ItemConfig, Parameters, SheetSettings},
    format,
    glob::Glob,
    image::Image,
    options::PackOptions,
    sprite::{Entry, Group, Sprite},
};

pub fn pack(options: PackOptions) -> anyhow::Result<()> {
    let mut settings = SheetSettings {
        packing: Settings {
            algorithm: options.algorithm,
            allow: Allow {
                rotation: options.allow_rotation,
                cropping: options.allow_cropping,
            },
            size: options.size,
            ..Settings::default()
        },
        format: options.format,
        output_sheet_format: options.image_format,
        background_color: options.background_color,
        ..SheetSettings::default()
    };

    if let [sheet, coordinates] = options.output.as_slice() {
        settings.output_sheet_path = sheet.clone();
        settings.output_coordinates_path = coordinates.clone();
    }

    let parameters = Parameters {
        items: options
            .images
            .into_iter()
            .map(ItemConfig::Pattern)
            .collect(),
        settings,
        file_path: PathBuf::new(),
    };

    pack_parameters(&parameters)
}

/// Loads every image the parameters refer to, packs them and writes the sheet
/// and coordinates files.
pub fn pack_parameters(parameters: &Parameters) -> anyhow::Result<()> {
    let settings = &parameters.settings;
    let outputs = settings.output_paths()?;

    let incompatibilities =
        format::check_compatibility(&settings.format.supports(), &settings.packing.allow);
    if !incompatibilities.is_empty() {
        let reasons: Vec<_> = incompatibilities.iter().map(ToString::to_string).collect();
        bail!(
            "format {} is incompatible with the given settings: {}",
            settings.format,
            reasons.join(", ")
        );
    }

    let sources = discover(&parameters.items, parameters.folder())?;
    let sprite_count = count_sprites(&sources);
    if sprite_count == 0 {
        bail!("could not find any image to pack");
    }

    log::info!("Found {} images", sprite_count);

    let progress = ProgressBar::new(sprite_count as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} {wide_msg}")
            .progress_chars("=> "),
    );

    let items = load(sources, &progress)?;
    progress.finish_and_clear();

    let mut root = Group::new(items, settings.packing.clone());
    let size = root.pack().context("could not pack the sheet")?;

    log::info!(
        "Packed {} images into a {} sheet using {}",
        root.sprite_count(),
        size,
        settings.packing.algorithm
    );

    let sheet = root.render(size, settings.background_color);
    create_parent(&outputs.sheet)?;
    let mut writer = BufWriter::new(fs::File::create(&outputs.sheet)?);
    sheet
        .encode_png(&mut writer)
        .with_context(|| format!("could not encode {}", outputs.sheet.display()))?;
    writer.flush()?;

    let coordinates = settings.format.generate(&root.placed_sprites())?;
    create_parent(&outputs.coordinates)?;
    fs::write(&outputs.coordinates, coordinates)?;

    log::info!(
        "Saved {} and {}",
        outputs.sheet.display(),
        outputs.coordinates.display()
    );

    Ok(())
}

/// Item paths found on disk, still to be decoded.
#[derive(Debug)]
enum Source {
    Sprite(PathBuf),
    Group {
        items: Vec<Source>,
        settings: Settings,
    },
}

fn discover(items: &[ItemConfig], folder: &Path) -> anyhow::Result<Vec<Source>> {
    let mut sources = Vec::new();

    for item in items {
        match item {
            ItemConfig::Pattern(pattern) => {
                let glob =
                    Glob::new(pattern).with_context(|| format!("invalid pattern '{}'", pattern))?;
                let matches = glob.find_matches(folder)?;

                if matches.is_empty() {
                    log::warn!("Pattern '{}' did not match any file", glob);
                }

                for path in matches {
                    log::trace!("Found image {}", path.display());
                    sources.push(Source::Sprite(path));
                }
            }
            ItemConfig::Group(group) => {
                let items = discover(&group.items, folder)?;

                if count_sprites(&items) == 0 {
                    bail!(
                        "group with patterns {} did not match any image",
                        describe_patterns(&group.items)
                    );
                }

                sources.push(Source::Group {
                    items,
                    settings: group.settings.clone(),
                });
            }
        }
    }

    Ok(sources)
}

/// Every pattern of `items` and their nested groups, quoted and joined.
fn describe_patterns(items: &[ItemConfig]) -> String {
    let mut patterns = Vec::new();

    for item in items {
        match item {
            ItemConfig::Pattern(pattern) => patterns.push(format!("'{}'", pattern)),
            ItemConfig::Group(group) => patterns.push(describe_patterns(&group.items)),
        }
    }

    patterns.join(", ")
}

fn count_sprites(sources: &[Source]) -> usize {
    sources
        .iter()
        .map(|source| match source {
            Source::Sprite(_) => 1,
            Source::Group { items, .. } => count_sprites(items),
        })
        .sum()
}

fn load(sources: Vec<Source>, progress: &ProgressBar) -> anyhow::Result<Vec<Entry>> {
    sources
        .into_iter()
        .map(|source| match source {
            Source::Sprite(path) => {
                progress.set_message(path.display().to_string());
                let sprite = load_sprite(&path)?;
                progress.inc(1);

                Ok(Entry::Sprite(sprite))
            }
            Source::Group { items, settings } => {
                Ok(Entry::Group(Group::new(load(items, progress)?, settings)))
            }
        })
        .collect()
}

fn load_sprite(path: &Path) -> anyhow::Result<Sprite> {
    let file = BufReader::new(fs::File::open(path)?);
    let image = Image::decode_png(file)
        .with_context(|| format!("could not decode image {}", path.display()))?;

    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    };

    Ok(Sprite::new(name, image))
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    Ok(())
}
