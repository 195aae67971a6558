#![deny(missing_docs)]

//! # Example Command
//!
//! Renders the example document of one type as XML or JSON.

use crate::error::{CliError, CliResult};
use crate::loader::load_registry;
use std::fs;
use std::path::{Path, PathBuf};
use wsdoc_core::{ContainerKind, ExampleBuilder, ExampleFormat, ExampleSlot, GeneratorConfig};

/// Arguments for the example command.
#[derive(clap::Args, Debug, Clone)]
pub struct ExampleArgs {
    /// Type metadata file or directory.
    #[clap(long, env = "WSDOC_TYPES")]
    pub types: PathBuf,

    /// Qualified or simple name of the type to render.
    #[clap(long = "type")]
    pub type_name: String,

    /// Containers to wrap the example in, innermost first (array, collection, list, map).
    #[clap(long, value_delimiter = ',')]
    pub container: Vec<ContainerKind>,

    /// Output format. Defaults to the configured format.
    #[clap(long)]
    pub format: Option<ExampleFormat>,

    /// Render the alternate example values.
    #[clap(long)]
    pub alternate: bool,

    /// Output file, or an existing directory to write `<Type>.<format>` into.
    /// Prints to stdout when absent.
    #[clap(long)]
    pub output: Option<PathBuf>,
}

/// Renders the example as text.
pub fn render(args: &ExampleArgs, config: &GeneratorConfig) -> CliResult<String> {
    let registry = load_registry(&args.types)?;
    let ty = registry
        .find(&args.type_name)
        .ok_or_else(|| CliError::General(format!("Unknown type '{}'", args.type_name)))?;

    let slot = if args.alternate {
        ExampleSlot::Alternate
    } else {
        ExampleSlot::Primary
    };
    let builder = ExampleBuilder::new(&registry)
        .with_facet_filter(config.facets.clone())
        .with_slot(slot);

    match args.format.unwrap_or(config.example_format) {
        ExampleFormat::Xml => Ok(builder.build_example_xml(ty, &args.container)?),
        ExampleFormat::Json => Ok(serde_json::to_string_pretty(
            &builder.build_json_example(ty, &args.container)?,
        )?),
    }
}

/// The file written for `output`: inside it when it is a directory, else the path itself.
fn output_file(args: &ExampleArgs, config: &GeneratorConfig, output: &Path) -> PathBuf {
    if !output.is_dir() {
        return output.to_path_buf();
    }
    let simple_name = args
        .type_name
        .rsplit(['.', '$'])
        .next()
        .unwrap_or(&args.type_name);
    let format = args.format.unwrap_or(config.example_format);
    output.join(format!("{}.{}", simple_name, format))
}

/// Executes the example command.
pub fn execute(args: &ExampleArgs, config: &GeneratorConfig) -> CliResult<()> {
    let rendered = render(args, config)?;
    match &args.output {
        Some(output) => {
            let path = output_file(args, config, output);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&path, rendered)?;
            println!("Example written to {:?}", path);
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
