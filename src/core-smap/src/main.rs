use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use core_smap::{BoundaryPolicy, LastmodFormat, SegmentLimits, Sitemap, SitemapOptions, input, setup_logging};

#[derive(Parser)]
#[command(name = "core-smap")]
#[command(about = "Segmented sitemap generator", long_about = None)]
struct CoreCli {
    #[command(subcommand)]
    command: Commands,
    /// Output file path of the first sitemap; further segments get a numeric suffix
    #[arg(short, long, value_parser = validate_output_file)]
    output: PathBuf,
    /// Log every segmentation and serialization decision
    #[arg(long)]
    debug: bool,
    /// Write <lastmod> as YYYY-MM-DD instead of the legacy YYYY-DD-MM
    #[arg(long)]
    conforming_lastmod: bool,
    /// Leave the entry that crosses a file limit out of every file (legacy behavior)
    #[arg(long)]
    drop_boundary: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sitemaps from a JSON lines file of entries
    Generate {
        /// One {"loc", "changefreq", "lastmod", "priority"} object per line
        #[arg(short, long, value_parser = validate_input_file)]
        input: PathBuf,
    },

    /// Generate sitemaps from placeholder entries
    Demo {
        /// How many placeholder entries to generate
        #[arg(short, long, default_value_t = 100)]
        count: usize,
    },
}

fn validate_input_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if !path.exists() {
        return Err(format!("Input path does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Input path is not a file: {}", path.display()));
    }

    Ok(path)
}

fn validate_output_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if path.exists() && path.is_dir() {
        return Err(format!("Output path is a directory: {}", path.display()));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        return Err(format!(
            "Output file parent directory does not exist: {}",
            parent.display()
        ));
    }

    Ok(path)
}

fn main() {
    // Load environment variables from .env file., if it exists
    dotenvy::dotenv().ok();

    let cli = CoreCli::parse();

    setup_logging(if cli.debug { "core_smap=debug,smap=debug" } else { "core_smap=info,smap=info" });

    let limits = match SegmentLimits::from_env() {
        Ok(limits) => limits,
        Err(e) => {
            println!("ERROR: Invalid segment limits: {e}");
            std::process::exit(1)
        }
    };

    let options = SitemapOptions::builder()
        .debug(cli.debug)
        .limits(limits)
        .lastmod_format(if cli.conforming_lastmod {
            LastmodFormat::YearMonthDay
        } else {
            LastmodFormat::YearDayMonth
        })
        .boundary_policy(if cli.drop_boundary {
            BoundaryPolicy::Drop
        } else {
            BoundaryPolicy::Carry
        })
        .build();

    let mut sitemap = Sitemap::new(options);

    match &cli.command {
        Commands::Generate { input: input_file } => match File::open(input_file) {
            Ok(file) => match input::load_json_lines(&mut sitemap, BufReader::new(file)) {
                Ok(report) => {
                    tracing::info!("Loaded {} entries from {input_file:?}", report.added);
                    for (line, reason) in &report.skipped {
                        println!("Skipped line {line} of {input_file:?}: {reason}");
                    }
                }
                Err(e) => {
                    println!("ERROR: Cannot read file ({input_file:?}) due to: {e:?}");
                    std::process::exit(1)
                }
            },
            Err(e) => {
                println!("ERROR: Cannot open file ({input_file:?}) due to: {e:?}");
                std::process::exit(1)
            }
        },

        Commands::Demo { count } => {
            let added = sitemap.fill_with_test_entries(*count);
            tracing::info!("Generated {added} placeholder entries");
        }
    }

    if cli.debug {
        sitemap.log_entries();
    }

    match sitemap.generate(&cli.output) {
        Ok(written) => {
            for file in written {
                println!("{}: {} entries, {} bytes", file.path.display(), file.entries, file.bytes);
            }
        }
        Err(e) => {
            println!("ERROR: Sitemap generation failed: {e}");
            std::process::exit(1)
        }
    }
}
