use std::path::PathBuf;

use agglopack::{AlgorithmKind, SheetSize};
use structopt::StructOpt;

use crate::{color::Color, format::FormatKind, size_string::parse_size};

#[derive(Debug, StructOpt)]
#[structopt(name = "agglomerate", about = "Simple texture packer")]
pub struct Options {
    #[structopt(subcommand)]
    pub command: Subcommand,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack images given on the command line into a sheet.
    Pack(PackOptions),

    /// Create an example parameters file, to be used with 'agglomerate from'.
    New(NewOptions),

    /// Pack the images and groups described by a parameters file.
    From(FromOptions),
}

#[derive(Debug, StructOpt)]
pub struct PackOptions {
    /// Paths to the images to pack. Glob patterns like 'sprites/*.png' are
    /// supported.
    #[structopt(short, long, required = true, min_values = 1)]
    pub images: Vec<String>,

    /// The packing algorithm to use: binarytree or inline.
    #[structopt(short, long, default_value = "binarytree")]
    pub algorithm: AlgorithmKind,

    /// The format of the coordinates file.
    #[structopt(short, long, default_value = "simplejson")]
    pub format: FormatKind,

    /// Size of the sheet in pixels. A missing number means automatic, for
    /// example 400x500, 400x, x500 or auto.
    #[structopt(short, long, default_value = "auto", parse(try_from_str = parse_size))]
    pub size: SheetSize,

    /// Where to save the sheet and the coordinates file, 'sheet' and
    /// 'coordinates' by default. Paths without an extension get one from the
    /// image format and the coordinates format.
    #[structopt(
        short,
        long,
        number_of_values = 2,
        value_names = &["SHEET", "COORDINATES"]
    )]
    pub output: Vec<PathBuf>,

    /// Image format of the sheet, like 'png' or '.png'. Taken from the sheet
    /// path, or png, when not given.
    #[structopt(short = "F", long)]
    pub image_format: Option<String>,

    /// Background color of the sheet as a RGB or RGBA hex value, like
    /// #112233 or #FFAA9930.
    #[structopt(short = "c", long, default_value = "#00000000")]
    pub background_color: Color,

    /// Let the algorithm rotate sprites.
    #[structopt(long)]
    pub allow_rotation: bool,

    /// Let the algorithm crop transparent borders off sprites.
    #[structopt(long)]
    pub allow_cropping: bool,
}

#[derive(Debug, StructOpt)]
pub struct NewOptions {
    /// Path of the parameters file to create.
    #[structopt(default_value = "parameters.json")]
    pub path: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct FromOptions {
    /// Path of the parameters file to load.
    #[structopt(default_value = "parameters.json")]
    pub path: PathBuf,
}

#[cfg(test)]
mod test {
    use super::*;

    use agglopack::Dimension;

    fn parse(args: &[&str]) -> Subcommand {
        let mut full = vec!["agglomerate"];
        full.extend_from_slice(args);

        Options::from_iter_safe(full).unwrap().command
    }

    #[test]
    fn pack_defaults() {
        let options = match parse(&["pack", "-i", "a.png", "sprites/*.png"]) {
            Subcommand::Pack(options) => options,
            other => panic!("expected pack, got {:?}", other),
        };

        assert_eq!(options.images, vec!["a.png", "sprites/*.png"]);
        assert_eq!(options.algorithm, AlgorithmKind::BinaryTree);
        assert_eq!(options.format, FormatKind::SimpleJson);
        assert_eq!(options.size, SheetSize::auto());
        assert!(options.output.is_empty());
        assert_eq!(options.image_format, None);
        assert_eq!(options.background_color, Color::TRANSPARENT);
        assert!(!options.allow_rotation);
    }

    #[test]
    fn pack_everything() {
        let options = match parse(&[
            "pack",
            "-a",
            "inline",
            "-s",
            "256x",
            "-o",
            "out/atlas",
            "out/atlas.json",
            "-F",
            ".png",
            "-c",
            "#112233",
            "--allow-rotation",
            "-i",
            "a.png",
        ]) {
            Subcommand::Pack(options) => options,
            other => panic!("expected pack, got {:?}", other),
        };

        assert_eq!(options.algorithm, AlgorithmKind::Inline);
        assert_eq!(
            options.size,
            SheetSize::new(Dimension::Fixed(256), Dimension::Auto)
        );
        assert_eq!(
            options.output,
            vec![PathBuf::from("out/atlas"), PathBuf::from("out/atlas.json")]
        );
        assert_eq!(options.image_format.as_deref(), Some(".png"));
        assert_eq!(options.background_color, Color::new(0x11, 0x22, 0x33, 255));
        assert!(options.allow_rotation);
    }

    #[test]
    fn bad_values_are_rejected() {
        let mut args = vec!["agglomerate", "pack", "-i", "a.png", "-a", "maxrects"];
        assert!(Options::from_iter_safe(&args).is_err());

        args.truncate(4);
        args.extend_from_slice(&["-s", "big"]);
        assert!(Options::from_iter_safe(&args).is_err());

        assert!(Options::from_iter_safe(&["agglomerate", "pack"]).is_err());
    }

    #[test]
    fn paths_default_to_parameters_json() {
        match parse(&["new"]) {
            Subcommand::New(options) => assert_eq!(options.path, PathBuf::from("parameters.json")),
            other => panic!("expected new, got {:?}", other),
        }

        match parse(&["from", "project/params.json"]) {
            Subcommand::From(options) => {
                assert_eq!(options.path, PathBuf::from("project/params.json"))
            }
            other => panic!("expected from, got {:?}", other),
        }
    }
}
