//! metstyle - inspect style resolution from the command line

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use console::style;
use metstyle::{ConfigPaths, MapConfig, ParamInfo, Style, StyleDb};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "metstyle")]
#[command(version, about = "Resolve plotting styles for meteorological fields", long_about = None)]
struct Cli {
    #[command(flatten)]
    dirs: ConfigDirs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigDirs {
    /// System configuration directory (defaults to the bundled one)
    #[arg(long, global = true)]
    system_dir: Option<PathBuf>,

    /// Site-wide override directory
    #[arg(long, global = true)]
    custom_dir: Option<PathBuf>,

    /// User override directory
    #[arg(long, global = true)]
    local_dir: Option<PathBuf>,
}

impl ConfigDirs {
    fn paths(&self) -> ConfigPaths {
        let mut paths = match &self.system_dir {
            Some(dir) => ConfigPaths::new(dir),
            None => ConfigPaths::bundled(),
        };
        if let Some(dir) = &self.custom_dir {
            paths = paths.with_custom(dir);
        }
        if let Some(dir) = &self.local_dir {
            paths = paths.with_local(dir);
        }
        paths
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the style for a field and print its renderer requests
    Style {
        /// Parameter short name (e.g. t, msl, wind)
        param: String,

        /// Level type (e.g. pl, ml, sfc)
        #[arg(long)]
        level_type: Option<String>,

        /// Level value
        #[arg(long)]
        level: Option<f64>,

        /// Treat the field as a vector field
        #[arg(long)]
        vector: bool,

        /// Plot type: map, xs or diff
        #[arg(long, default_value = "map")]
        plot_type: String,
    },

    /// Build a map view and print its geoview request
    Map {
        /// Area name (defaults to "base")
        #[arg(long)]
        area: Option<String>,

        /// Map style name (defaults to "grey_light_base")
        #[arg(long)]
        style: Option<String>,

        /// Plot type; "stamp" turns grid and labels off
        #[arg(long)]
        plot_type: Option<String>,
    },

    /// List loaded styles and areas
    List,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metstyle=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let paths = cli.dirs.paths();

    match cli.command {
        Commands::Style {
            param,
            level_type,
            level,
            vector,
            plot_type,
        } => {
            let db = StyleDb::param_db(&paths).context("loading parameter styles")?;
            let mut field = ParamInfo::new(param);
            field.level_type = level_type;
            field.level = level;
            if vector {
                field = field.vector();
            }
            print_style(&field.to_string(), db.style(&field, &plot_type))
        }
        Commands::Map {
            area,
            style: map_style,
            plot_type,
        } => {
            let maps = MapConfig::load(&paths).context("loading map configuration")?;
            let view = maps.view(area.as_deref(), map_style.as_deref(), plot_type.as_deref());
            let name = view.style().map(Style::name).unwrap_or("none");
            println!("{} {}", style("map style:").bold(), name);
            let request = view.to_request().context("building geoview request")?;
            print!("{}", serde_yaml::to_string(&request)?);
            Ok(())
        }
        Commands::List => {
            let db = StyleDb::param_db(&paths).context("loading parameter styles")?;
            let maps = MapConfig::load(&paths).context("loading map configuration")?;
            print_names("parameter styles", &db.style_names());
            print_names("map styles", &maps.style_db().style_names());
            print_names("areas", &maps.area_names());
            Ok(())
        }
    }
}

fn print_style(field: &str, resolved: Option<&Style>) -> Result<()> {
    let Some(resolved) = resolved else {
        println!("{} no style for {}", style("warning:").yellow().bold(), field);
        return Ok(());
    };
    println!("{} {} -> {}", style("style:").bold(), field, style(resolved.name()).cyan());
    let requests = resolved
        .to_request()
        .with_context(|| format!("building requests for style '{}'", resolved.name()))?;
    print!("{}", serde_yaml::to_string(&requests)?);
    Ok(())
}

fn print_names(title: &str, names: &[&str]) {
    println!("{} ({})", style(title).bold(), names.len());
    for name in names {
        println!("  {}", name);
    }
}
