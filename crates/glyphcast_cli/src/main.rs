use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glyphcast_render::{
    to_markup, try_paint_grid, ConvertOptions, DensityRamp, FontRaster, FrameSource,
    GlyphConverter, GlyphGrid, GridLayout, ImageSurface, MarkupOptions, Placement, Polarity,
    SequenceSource, WeightTable,
};
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage};
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert images or animations to ASCII glyph grids")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render ASCII art to stdout for a quick preview
    Preview(PreviewArgs),
    /// Convert an image to ASCII and write the result to disk
    Convert(ConvertArgs),
    /// Convert an animation (GIF or directory of frames) to ASCII frame files
    Animate(AnimateArgs),
    /// Convert an image and paint the glyph grid back onto a PNG
    Rasterize(RasterizeArgs),
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input image path
    input: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input image path
    input: PathBuf,
    /// Output file path
    #[arg(short, long)]
    output: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Input animation path (GIF file or directory of images)
    input: PathBuf,
    /// Output directory for frame files
    #[arg(short, long)]
    out_dir: PathBuf,
    /// Output format for the frame files
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct RasterizeArgs {
    /// Input image path
    input: PathBuf,
    /// Output PNG path
    #[arg(short, long)]
    output: PathBuf,
    /// Monospace font file (TTF/OTF) used to paint the glyphs
    #[arg(long)]
    font: PathBuf,
    /// Font size in pixels per glyph cell
    #[arg(long, default_value_t = 16.0)]
    cell_px: f32,
    /// Derive the ramp from the font's measured glyph weights instead of
    /// the preset
    #[arg(long, default_value_t = false)]
    measure_ramp: bool,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug, Clone)]
struct RenderSettings {
    /// Density ramp preset
    #[arg(long, value_enum, default_value = "classic")]
    ramp: RampPreset,
    /// Which end of the ramp the darkest pixels map to; the two classic
    /// sketch families disagree, so there is no default
    #[arg(long, value_enum)]
    polarity: PolarityChoice,
    /// Posterize each channel to N levels before mapping
    #[arg(long)]
    posterize: Option<u8>,
    /// Target column width
    #[arg(long, default_value_t = 120)]
    cols: u16,
    /// Target row count; when omitted, rows follow the source aspect
    #[arg(long)]
    rows: Option<u16>,
    /// Font aspect ratio (height / width) used when rows are derived
    #[arg(long, default_value_t = 0.55)]
    font_aspect: f32,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RampPreset {
    Classic,
    Extended,
    Blocks,
    Minimal,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PolarityChoice {
    /// Darkest pixels get the densest glyph
    DarkFirst,
    /// Brightest pixels get the densest glyph
    BrightFirst,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Preview(args) => preview(args),
        Commands::Convert(args) => convert(args),
        Commands::Animate(args) => animate(args),
        Commands::Rasterize(args) => rasterize(args),
    }
}

fn preview(args: PreviewArgs) -> Result<()> {
    let options = args.settings.to_options();
    let output = GlyphConverter
        .render_path(&args.input, args.settings.layout(), &options)
        .with_context(|| format!("failed to render {:?}", args.input))?;

    print!("{}", output.grid.to_text());
    Ok(())
}

fn convert(args: ConvertArgs) -> Result<()> {
    let options = args.settings.to_options();
    let output = GlyphConverter
        .render_path(&args.input, args.settings.layout(), &options)
        .with_context(|| format!("failed to render {:?}", args.input))?;

    write_grid(&args.output, &output.grid, args.format, options.ramp.blank())
}

fn animate(args: AnimateArgs) -> Result<()> {
    let options = args.settings.to_options();
    let layout = args.settings.layout();
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let mut source = load_sequence(&args.input)?;
    let progress = ProgressBar::new(source.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    let extension = match args.format {
        OutputFormat::Text => "txt",
        OutputFormat::Html => "html",
    };

    let mut index = 0usize;
    while let Some(frame) = source.next_frame() {
        let output = GlyphConverter
            .render_image(&frame, layout, &options)
            .with_context(|| format!("failed to render frame {}", index))?;

        let frame_path = args.out_dir.join(format!("frame_{:04}.{}", index, extension));
        write_grid(&frame_path, &output.grid, args.format, options.ramp.blank())?;
        progress.inc(1);
        index += 1;
    }

    progress.finish_with_message(format!("{} frames written to {:?}", index, args.out_dir));
    Ok(())
}

fn rasterize(args: RasterizeArgs) -> Result<()> {
    let font_data = std::fs::read(&args.font)
        .with_context(|| format!("failed to read font {:?}", args.font))?;
    let raster = FontRaster::from_vec(font_data, args.cell_px)
        .with_context(|| format!("failed to parse font {:?}", args.font))?;

    let mut options = args.settings.to_options();
    if args.measure_ramp {
        let table = WeightTable::measure(&raster, (32u8..=126).map(char::from));
        log::info!("glyph weight table:\n{}", table.listing());
        options.ramp = table.to_ramp().context("font produced no measurable glyphs")?;
    }

    let output = GlyphConverter
        .render_path(&args.input, args.settings.layout(), &options)
        .with_context(|| format!("failed to render {:?}", args.input))?;

    let mut surface = ImageSurface::for_grid(output.grid.width, output.grid.height, raster);
    try_paint_grid(Some(&output.grid), &mut surface, Placement::full())?;
    surface
        .into_image()
        .save(&args.output)
        .with_context(|| format!("failed to write {:?}", args.output))?;
    Ok(())
}

fn write_grid(path: &Path, grid: &GlyphGrid, format: OutputFormat, blank: char) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("failed to create {:?}", path))?;
    match format {
        OutputFormat::Text => {
            file.write_all(grid.to_text().as_bytes())?;
        },
        OutputFormat::Html => {
            let markup = to_markup(grid, &MarkupOptions::for_blank(blank));
            writeln!(
                file,
                "<!DOCTYPE html>\n<html><body style=\"background:#000;color:#ddd\">\
                 <div style=\"font-family:monospace;font-size:8px;line-height:1\">\n\
                 {}\n</div></body></html>",
                markup
            )?;
        },
    }
    Ok(())
}

fn load_sequence(path: &Path) -> Result<SequenceSource> {
    let frames = if path.is_dir() {
        load_frames_from_directory(path)?
    } else {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if extension == "gif" {
            load_frames_from_gif(path)?
        } else {
            vec![image::open(path).with_context(|| format!("failed to open image {:?}", path))?]
        }
    };
    Ok(SequenceSource::new(frames))
}

fn load_frames_from_gif(path: &Path) -> Result<Vec<DynamicImage>> {
    let file = File::open(path).with_context(|| format!("failed to open GIF {:?}", path))?;
    let decoder =
        GifDecoder::new(file).with_context(|| format!("failed to decode GIF {:?}", path))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .with_context(|| format!("failed to collect frames from {:?}", path))?;
    Ok(frames
        .into_iter()
        .map(|frame| DynamicImage::ImageRgba8(frame.into_buffer()))
        .collect())
}

fn load_frames_from_directory(path: &Path) -> Result<Vec<DynamicImage>> {
    let mut entries: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .collect();
    entries.sort();
    if entries.is_empty() {
        anyhow::bail!("no image files found in {:?}", path);
    }

    let mut frames = Vec::with_capacity(entries.len());
    for entry in entries {
        frames.push(
            image::open(&entry).with_context(|| format!("failed to open image {:?}", entry))?,
        );
    }
    Ok(frames)
}

impl RenderSettings {
    fn to_options(&self) -> ConvertOptions {
        let mut options = ConvertOptions::new(self.ramp.to_ramp(), self.polarity.to_polarity());
        if let Some(levels) = self.posterize {
            options = options.with_posterize(levels);
        }
        options
    }

    fn layout(&self) -> GridLayout {
        match self.rows {
            Some(rows) => GridLayout::Exact { columns: self.cols.max(1), rows: rows.max(1) },
            None => GridLayout::FixedColumns {
                columns: self.cols.max(1),
                font_aspect: self.font_aspect.max(0.1),
            },
        }
    }
}

impl RampPreset {
    fn to_ramp(self) -> DensityRamp {
        match self {
            RampPreset::Classic => DensityRamp::classic(),
            RampPreset::Extended => DensityRamp::extended(),
            RampPreset::Blocks => DensityRamp::blocks(),
            RampPreset::Minimal => DensityRamp::minimal(),
        }
    }
}

impl PolarityChoice {
    fn to_polarity(self) -> Polarity {
        match self {
            PolarityChoice::DarkFirst => Polarity::DarkFirst,
            PolarityChoice::BrightFirst => Polarity::BrightFirst,
        }
    }
}
