use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "picplus",
    about = "Batch image compression and resizing",
    long_about = "picplus compresses images with an ordered set of named strategies \
                  (gifsicle, jpegtran, optipng, svgo) or scales them to a target width. \
                  Inputs are files, directories, or glob patterns; a single piped image \
                  can be compressed straight from stdin to stdout.",
    version,
    group(ArgGroup::new("mode").required(true).multiple(true).args(["compress", "resize"])),
    after_help = "EXAMPLES:\n  \
    picplus -c images/*.png --out build\n  \
    picplus -c --plugin optipng --plugin svgo images/* --out build\n  \
    picplus -r --width 100 images/*.jpg --out build\n  \
    cat photo.png | picplus -c > photo.min.png"
)]
pub struct Args {
    #[arg(short = 'c', long, help = "Compress the input images")]
    pub compress: bool,

    #[arg(
        short = 'r',
        long,
        help = "Resize the input images to --width",
        long_help = "Geometrically scale the input images to the given --width, \
                     preserving aspect ratio. Takes precedence over --compress \
                     when both are set."
    )]
    pub resize: bool,

    #[arg(
        short = 'p',
        long = "plugin",
        value_name = "NAME",
        help = "Override the default compression strategies (repeatable, in order)"
    )]
    pub plugin: Vec<String>,

    #[arg(
        short = 'q',
        long,
        value_name = "1-100",
        help = "Compression quality (default: 80)",
        long_help = "Compression quality from 1 (lowest) to 100 (highest). \
                     Drives the JPEG transcoder and the PNG deflater choice: \
                     >=90 uses Zopfli, >=70 a high libdeflater level."
    )]
    pub quality: Option<u8>,

    #[arg(short = 'o', long, value_name = "DIR", help = "Output directory")]
    pub out: Option<PathBuf>,

    #[arg(
        short = 'w',
        long,
        value_name = "PIXELS",
        help = "Target width in pixels (resize only)"
    )]
    pub width: Option<u32>,

    #[arg(
        short = 'f',
        long,
        help = "Compress into the current directory when no --out is given"
    )]
    pub force: bool,

    #[arg(value_name = "PATH", help = "Input files, directories, or glob patterns")]
    pub inputs: Vec<String>,
}
