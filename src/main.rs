use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vitrin::index::CategoryIndex;
use vitrin::rules::RuleSet;
use vitrin::{catalog, config, output, render};

#[derive(Parser)]
#[command(name = "vitrin")]
#[command(version)]
#[command(about = "Tabbed product-gallery generator for image catalogs")]
#[command(long_about = "\
Tabbed product-gallery generator for image catalogs

Your filenames are the data source. Records are classified into product
categories and subcategories by ordered keyword rules and rendered as a
static tabbed gallery (desktop tab strip + mobile accordion).

Catalog source (--source) is either:

  img/                           # a directory, scanned recursively
  ├── config.toml                # gallery + rule config (optional)
  ├── Urunler/
  │   ├── tabela-isikli-1.jpg    # 'tabela' keyword → tabela / isikli
  │   ├── baski-vinil-2.jpg      # 'baski' keyword  → baski / vinil
  │   └── 1486481234.jpg         # legacy timestamp → tabela (numeric range)
  ├── Slide/                     # slide folder → carousel imagery,
  │   └── 1.jpg                  #   excluded from the gallery tabs
  └── hero.jpg                   # 'hero' → carousel imagery

  catalog.json                   # or a JSON manifest: [{\"name\", \"path\"}, ...]

Classification (first match wins, in declared rule order):
  slide folder / 'hero'  →  slide
  category keyword in name or path
  legacy numeric filename ranges
  otherwise              →  other

Run 'vitrin gen-config' for a documented config.toml with the rule tables.")]
struct Cli {
    /// Catalog source: image directory or JSON manifest
    #[arg(long, default_value = "img", global = true)]
    source: PathBuf,

    /// Output directory for the exported site
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the catalog as an ordered JSON manifest
    Scan,
    /// Categorize the catalog and print the classification report
    Classify {
        /// Emit the classified catalog as JSON instead of the report tree
        #[arg(long)]
        json: bool,
    },
    /// Export the static gallery site: one page per navigation state
    Build,
    /// Validate rules and report records no rule claims
    Check,
    /// Per-category image counts
    Stats,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let records = catalog::load(&cli.source)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Classify { json } => {
            let (index, rules) = load_index(&cli.source)?;
            if json {
                let images: Vec<_> = index.all_images().collect();
                println!("{}", serde_json::to_string_pretty(&images)?);
            } else {
                output::print_classify_report(&index, &rules);
            }
        }
        Command::Build => {
            let gallery_config = config::load_config(&config_dir(&cli.source))?;
            let rules = RuleSet::from_config(&gallery_config.rules)?;
            let records = catalog::load(&cli.source)?;
            if records.is_empty() {
                println!("Warning: empty catalog from {}", cli.source.display());
            }
            let index = CategoryIndex::build(&records, &rules);
            let written = render::export_site(&gallery_config, &rules, &index, &cli.output)?;
            for filename in &written {
                println!("Generated {filename}");
            }
            println!(
                "Exported {} pages ({} images) to {}",
                written.len(),
                index.len(),
                cli.output.display()
            );
        }
        Command::Check => {
            let (index, _) = load_index(&cli.source)?;
            output::print_check_report(&index);
        }
        Command::Stats => {
            let (index, _) = load_index(&cli.source)?;
            output::print_stats(&index);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Build an index from the source, with rules from the adjacent config.
fn load_index(source: &Path) -> Result<(CategoryIndex, RuleSet), Box<dyn std::error::Error>> {
    let gallery_config = config::load_config(&config_dir(source))?;
    let rules = RuleSet::from_config(&gallery_config.rules)?;
    let records = catalog::load(source)?;
    Ok((CategoryIndex::build(&records, &rules), rules))
}

/// config.toml lives next to the catalog: inside a source directory, or
/// beside a manifest file.
fn config_dir(source: &Path) -> PathBuf {
    if source.is_dir() {
        source.to_path_buf()
    } else {
        source.parent().unwrap_or(Path::new(".")).to_path_buf()
    }
}
