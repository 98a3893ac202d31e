//! bratconverter - BRAT to Acharya conversion CLI
//!
//! Usage:
//!   bratconverter -p <collection-dir> [-o <output> [-f]]
//!   bratconverter -a a.ann,b.ann -t a.txt,b.txt -c annotation.conf
//!
//! The Acharya stream goes to stdout unless `--output` is given; logs go
//! to stderr.

mod args;
mod collection;
mod output;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bratconv_core::{ConverterConfig, LoggingConfig, RelationPolicy};
use bratconv_format::Converter;
use bratconv_parser::Schema;

use args::{Cli, InputSelection};
use collection::{Collection, DocumentPair};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config.logging);

    run(&cli, &config)
}

fn load_config(cli: &Cli) -> anyhow::Result<ConverterConfig> {
    let mut config = ConverterConfig::load(cli.settings.as_deref())?;

    if cli.strict {
        config.convert.strict_relations = true;
    }
    Ok(config)
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    if config.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: &Cli, config: &ConverterConfig) -> anyhow::Result<()> {
    let selection = cli.validate()?;
    if let Some(path) = &cli.output {
        output::ensure_writable(path, cli.force)?;
    }

    let collection = match selection {
        InputSelection::Folder(root) => {
            if let Some(dir) = &cli.standoff_dir {
                output::ensure_outside_collection(dir, &root)?;
            }
            Collection::discover(&root, &config.convert)?
        }
        InputSelection::Files {
            annotations,
            texts,
            conf,
        } => Collection::from_files(annotations, texts, conf, &config.convert),
    };

    let schema = Schema::load(&collection.schema_path)?;
    let converter = Converter::new(schema)
        .with_policy(RelationPolicy::from_strict(config.convert.strict_relations));

    let result = converter.convert(collection.pairs.iter().map(DocumentPair::load))?;

    if let Some(dir) = &cli.standoff_dir {
        let written = output::write_standoff(dir, &result.standoff, cli.force)
            .with_context(|| format!("writing stand-off files to {}", dir.display()))?;
        tracing::info!(files = written.len(), dir = %dir.display(), "Wrote stand-off blocks");
    }

    match &cli.output {
        None => println!("{}", result.acharya),
        Some(path) => {
            output::write_output(path, &result.acharya, cli.force)?;
            println!("successfully generated file: {}", path.display());
        }
    }

    Ok(())
}
