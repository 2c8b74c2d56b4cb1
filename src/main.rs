use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{presets::NOTHING, Attribute, Cell, Table};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meshcfg::config::Config;
use meshcfg::formatter::Formatter;
use meshcfg::load::load_snapshot;
use meshcfg::options::DumpOptions;
use meshcfg::{
    filter_by_names, filter_by_validation_state, project_to_summaries, ConfigKind,
    ValidationFilter,
};

#[derive(Parser)]
#[command(name = "meshcfg")]
#[command(about = "Inspect the Istio configuration of a namespace", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List config objects with their validation state
    List {
        /// Snapshot document, `-` for stdin
        file: String,
        /// Keep objects whose name contains this value (repeatable)
        #[arg(short, long = "name")]
        names: Vec<String>,
        /// Valid, Not Valid, Not Validated or Warning (repeatable)
        #[arg(short = 'v', long = "validation")]
        validation_filters: Vec<ValidationFilter>,
        #[arg(long)]
        display_namespace: bool,
        #[arg(short, long, default_value = "pretty")]
        output: String,
    },
    /// Print one object as YAML
    Show {
        file: String,
        kind: ConfigKind,
        name: String,
    },
    /// Print the known config kinds
    Kinds,
}

fn print_kinds() {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(
        ["Kind", "Type", "Collection", "API version"]
            .iter()
            .map(|t| Cell::new(t).add_attribute(Attribute::Bold))
            .collect::<Vec<Cell>>(),
    );
    for kind in ConfigKind::ALL.iter() {
        let resource = kind.api_resource();
        table.add_row(vec![
            Cell::new(kind.display_name()),
            Cell::new(kind.type_tag()),
            Cell::new(&resource.plural),
            Cell::new(&resource.api_version),
        ]);
    }
    println!("{}", table);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::List {
            file,
            names,
            validation_filters,
            display_namespace,
            output,
        } => {
            let config = Config {
                display_namespace,
                names,
                validation_filters,
            };
            let snapshot =
                load_snapshot(&file).with_context(|| format!("Unable to load {}", file))?;
            let snapshot = filter_by_names(snapshot, &config.names);
            let summaries = filter_by_validation_state(
                project_to_summaries(&snapshot),
                &config.validation_filters,
            );
            tracing::info!(count = summaries.len(), "listing config objects");
            println!("{}", Formatter::new(&output, config, summaries));
        }
        Commands::Show { file, kind, name } => {
            let snapshot =
                load_snapshot(&file).with_context(|| format!("Unable to load {}", file))?;
            let details = snapshot.details(kind, &name).ok_or_else(|| {
                meshcfg::Error::NotFound {
                    namespace: snapshot.namespace.name.clone(),
                    kind: kind.display_name().to_string(),
                    name: name.clone(),
                }
            })?;
            print!("{}", DumpOptions::default().dump(&details)?);
        }
        Commands::Kinds => print_kinds(),
    }
    Ok(())
}
