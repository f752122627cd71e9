use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pdf_nup::constants::{DEFAULT_THUMBNAIL_DPI, DEFAULT_THUMBNAIL_WIDTH, pt_to_cm};
use pdf_nup::render::PdfiumBackend;
use pdf_async_runtime::ThumbnailUpdate;
use pdf_nup::{BatchItem, NupOptions, PageSource, PaperSize};
use std::path::PathBuf;

mod logger;
mod nup;

#[derive(Parser)]
#[command(name = "pdft", about = "PDF tools CLI", version)]
struct Cli {
    /// More log output (repeat for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place several pages on each sheet and write one PDF per input
    Nup {
        /// Input PDF file(s) - can specify multiple
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output folder (defaults to the config's output_dir, then ".")
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Page order as zero-based indices, e.g. "2,0,1" (single input only)
        #[arg(long, value_delimiter = ',')]
        order: Option<Vec<usize>>,

        /// Rasterization resolution for the output
        #[arg(long)]
        dpi: Option<u32>,

        /// Show statistics only, don't generate PDFs
        #[arg(long)]
        stats_only: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Render composed sheets to PNG files
    Preview {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Folder for the PNG files
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Render at most this many sheets
        #[arg(long)]
        sheets: Option<usize>,

        /// Page order as zero-based indices, e.g. "2,0,1"
        #[arg(long, value_delimiter = ',')]
        order: Option<Vec<usize>>,

        /// Preview resolution
        #[arg(long)]
        dpi: Option<u32>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Print the slot geometry for a layout
    Layout {
        /// Also show statistics for a document of this many pages
        #[arg(long)]
        pages: Option<usize>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Render small page images to PNG files
    Thumbnails {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Folder for the PNG files
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Maximum thumbnail width in pixels
        #[arg(long, default_value_t = DEFAULT_THUMBNAIL_WIDTH)]
        width: u32,

        /// Rasterization resolution before downscaling
        #[arg(long, default_value_t = DEFAULT_THUMBNAIL_DPI)]
        dpi: u32,
    },
}

/// Sheet and tiling settings shared by the layout-aware commands
#[derive(Args)]
struct LayoutArgs {
    /// JSON options file; flags given on the command line override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pages per sheet (1, 2, 4 or 8; anything else places one page per sheet)
    #[arg(short = 'n', long)]
    pages_per_sheet: Option<usize>,

    /// Output paper size
    #[arg(long, value_enum, conflicts_with = "width_cm")]
    paper: Option<PaperArg>,

    /// Custom sheet width in cm
    #[arg(long, requires = "height_cm")]
    width_cm: Option<f32>,

    /// Custom sheet height in cm
    #[arg(long, requires = "width_cm")]
    height_cm: Option<f32>,

    /// Output orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Gap between pages and around the sheet edge, in cm
    #[arg(long)]
    spacing_cm: Option<f32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    Letter,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::Letter => Self::Letter,
        }
    }
}

impl From<OrientationArg> for pdf_nup::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl LayoutArgs {
    /// Options from the config file (or defaults) with flags applied on top
    async fn resolve(&self) -> Result<NupOptions> {
        let mut options = match &self.config {
            Some(path) => NupOptions::load(path).await?,
            None => NupOptions::default(),
        };

        if let Some(pages_per_sheet) = self.pages_per_sheet {
            options.pages_per_sheet = pages_per_sheet;
        }
        if let Some(paper) = self.paper {
            options.paper = paper.into();
        }
        if let (Some(width_cm), Some(height_cm)) = (self.width_cm, self.height_cm) {
            options.paper = PaperSize::Custom {
                width_cm,
                height_cm,
            };
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation.into();
        }
        if let Some(spacing_cm) = self.spacing_cm {
            options.spacing_cm = spacing_cm;
        }

        options.validate()?;
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::CliLogger::new(logger::CliLogger::level_for(cli.verbose, cli.quiet)).init()?;

    match cli.command {
        Commands::Nup {
            input,
            output_dir,
            order,
            dpi,
            stats_only,
            layout,
        } => {
            let mut options = layout.resolve().await?;
            if let Some(dpi) = dpi {
                options.output_dpi = dpi;
            }
            if order.is_some() && input.len() != 1 {
                bail!("--order applies to a single input file");
            }
            let output_dir = output_dir
                .or_else(|| options.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));

            nup::run(input, output_dir, order, options, stats_only).await?;
        }

        Commands::Preview {
            input,
            output_dir,
            sheets,
            order,
            dpi,
            layout,
        } => {
            let mut options = layout.resolve().await?;
            if let Some(dpi) = dpi {
                options.preview_dpi = dpi;
            }

            let source = pdf_nup::load_source(&input).await?;
            let base_name = source.base_name();
            let mut item = BatchItem::new(source);
            if let Some(order) = order {
                item = item.with_page_order(order);
            }

            let composed =
                pdf_nup::generate_preview(item, options, PdfiumBackend::new, sheets).await?;

            tokio::fs::create_dir_all(&output_dir).await?;
            for sheet in &composed {
                let path = output_dir.join(format!(
                    "{}_sheet{:03}.png",
                    base_name,
                    sheet.sheet_index + 1
                ));
                sheet.image.save(&path)?;
                println!("Sheet {} → {}", sheet.sheet_index + 1, path.display());
            }
        }

        Commands::Layout { pages, layout } => {
            let options = layout.resolve().await?;
            let plan = options.layout_plan()?;

            println!(
                "Sheet: {:.2} x {:.2} cm, {} slot(s)",
                pt_to_cm(plan.sheet_width_pt),
                pt_to_cm(plan.sheet_height_pt),
                plan.pages_per_sheet()
            );
            for (index, slot) in plan.slots.iter().enumerate() {
                println!(
                    "  Slot {}: x {:.2}, y {:.2}, {:.2} x {:.2} cm",
                    index + 1,
                    pt_to_cm(slot.x),
                    pt_to_cm(slot.y),
                    pt_to_cm(slot.width),
                    pt_to_cm(slot.height)
                );
            }

            if let Some(page_count) = pages {
                let item = BatchItem::new(PageSource {
                    path: PathBuf::from("document.pdf"),
                    page_count,
                });
                let stats = pdf_nup::calculate_statistics(&item, &options)?;
                nup::print_statistics(&stats);
            }
        }

        Commands::Thumbnails {
            input,
            output_dir,
            width,
            dpi,
        } => {
            let source = pdf_nup::load_source(&input).await?;
            tokio::fs::create_dir_all(&output_dir).await?;

            let mut task = pdf_async_runtime::spawn_thumbnails(
                source.path.clone(),
                source.page_count,
                dpi,
                width,
                PdfiumBackend::new,
            );
            let base_name = source.base_name();
            while let Some(update) = task.next().await {
                match update {
                    ThumbnailUpdate::Page {
                        index,
                        result: Ok(image),
                    } => {
                        let path =
                            output_dir.join(format!("{}_page{:03}.png", base_name, index + 1));
                        image.save(&path)?;
                        println!("Page {} → {}", index + 1, path.display());
                    }
                    ThumbnailUpdate::Page {
                        index,
                        result: Err(e),
                    } => log::error!("Page {}: {}", index + 1, e),
                    ThumbnailUpdate::OpenFailed(e) => bail!(e),
                }
            }
        }
    }

    Ok(())
}
