//! # Montage CLI
//!
//! Usage:
//!   montage page.json -o page.html
//!   echo '[ ... ]' | montage --viewport 390
//!   montage --example > page.json

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use montage::html::HtmlWriter;
use montage::layout::LayoutMode;
use montage::{EngineConfig, MontageError, PageDocument};

#[derive(Parser)]
#[command(name = "montage")]
#[command(version)]
#[command(about = "Compose a section-based page document into HTML", long_about = None)]
struct Cli {
    /// Page document (stdin if not specified)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Engine config as JSON
    #[arg(long, value_name = "FILE", env = "MONTAGE_CONFIG")]
    config: Option<PathBuf>,

    /// Viewport width in px
    #[arg(long, value_name = "PX")]
    viewport: Option<f64>,

    /// Frame sections full-bleed instead of boxed
    #[arg(long)]
    full_bleed: bool,

    /// Disable every carousel's autoplay
    #[arg(long)]
    reduced_motion: bool,

    /// Indent the HTML output
    #[arg(long)]
    pretty: bool,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(short, long)]
    verbose: bool,

    /// Print a sample page document and exit
    #[arg(long)]
    example: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if cli.example {
        print!("{}", example_page_json());
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("✗ {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), MontageError> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    if let Some(width) = cli.viewport {
        if !width.is_finite() || width < 0.0 {
            return Err(MontageError::Config(format!(
                "--viewport must be a non-negative number, got {}",
                width
            )));
        }
        config = config.with_viewport(width);
    }
    if cli.full_bleed {
        config = config.with_layout(LayoutMode::Full);
    }
    if cli.reduced_motion {
        config = config.with_reduced_motion(true);
    }

    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let document = PageDocument::from_json_str(&input)?;
    log::debug!(
        "composing {} sections at {}px ({:?})",
        document.len(),
        config.viewport_width,
        config.breakpoint()
    );
    let tree = montage::render(&document, &config);
    let writer = if cli.pretty { HtmlWriter::pretty() } else { HtmlWriter::new() };
    let html = writer.write(&tree);

    match &cli.output {
        Some(path) => {
            fs::write(path, &html)?;
            eprintln!("✓ Written {} bytes to {}", html.len(), path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

fn example_page_json() -> &'static str {
    r##"[
  {
    "type": "pageStyle",
    "props": {
      "headingColor": "#1d1d2b",
      "bodyColor": "#4a4a5a",
      "cardRadius": 16,
      "btnBg": "#ff6a3d",
      "contentMaxWidth": "lg",
      "pageBottomSpacing": 48,
      "backgroundColor": "#faf7f2"
    }
  },
  {
    "type": "heroCarousel",
    "id": "top",
    "props": {
      "overlay": 0.4,
      "heroHeight": 70,
      "slides": [
        {
          "image": "https://images.example.com/studio.jpg",
          "eyebrow": "Open seven days",
          "heading": "Move better.\nFeel stronger.",
          "ctaText": "Book a class",
          "ctaLink": "?page=services-classic"
        },
        {
          "image": "https://images.example.com/mats.jpg",
          "heading": "Small groups, real coaching",
          "ctaText": "See the timetable",
          "ctaLink": "?page=schedule"
        }
      ]
    }
  },
  {
    "type": "featureGrid",
    "props": {
      "title": "Why members stay",
      "columns": { "xs": 1, "md": 3 },
      "items": [
        { "icon": "★", "title": "Expert coaches", "body": "Every class is led by a certified instructor." },
        { "icon": "⏱", "title": "45 minutes", "body": "Fits before work or over lunch." },
        { "icon": "♥", "title": "All levels", "body": "Options for every movement." }
      ]
    }
  },
  {
    "type": "gallery",
    "props": {
      "title": "Inside the studio",
      "tileAspectRatio": "4/3",
      "images": [
        "https://images.example.com/g1.jpg",
        { "src": "https://images.example.com/g2.jpg", "alt": "Reformer room" },
        "https://images.example.com/g3.jpg"
      ]
    }
  },
  {
    "type": "testimonials",
    "props": {
      "title": "Members say",
      "items": [
        { "quote": "Best decision I made this year.", "author": "Priya" },
        { "quote": "The coaches actually know your name.", "author": "Tom" }
      ]
    }
  },
  {
    "type": "contactForm",
    "props": { "title": "Questions?", "intro": "We reply within a day." },
    "sx": { "py": 40 }
  },
  {
    "type": "footer",
    "props": { "text": "© Studio North" }
  }
]
"##
}
