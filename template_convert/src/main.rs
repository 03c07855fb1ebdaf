extern crate handwriting_lookup;

use clap::Parser;
use std::fs::File;
use std::io::Write;
use tracing_subscriber::EnvFilter;

use handwriting_lookup::TemplateRegistry;

#[derive(Debug, Parser)]
#[command(name = "template_convert")]
#[command(about = "Compiles JSON template definitions into the binary registry format")]
struct Args {
    /// JSON array of {"name": ..., "notation": ...} objects
    #[arg(long, default_value = "./data/templates.json")]
    input: String,

    #[arg(long, default_value = "./data/templates.bin")]
    output: String,

    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log))
        .init();

    let json = std::fs::read_to_string(&args.input)?;
    let registry = TemplateRegistry::from_json(&json)?;
    let bytes = registry.to_bincode()?;

    let mut f = File::create(&args.output)?;
    f.write_all(&bytes)?;
    tracing::info!(templates = registry.len(), bytes = bytes.len(), output = %args.output, "wrote compiled templates");
    Ok(())
}
