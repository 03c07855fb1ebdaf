extern crate serde_derive;
extern crate handwriting_lookup;

use clap::Parser;
use serde_derive::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use handwriting_lookup::{Encoding, Matcher, MatcherConfig, Stroke, StrokeInput, TemplateRegistry};

#[derive(Debug, Parser)]
#[command(name = "cli_demo")]
#[command(about = "Recognizes recorded stroke inputs and reports accuracy and timing")]
struct Args {
    /// JSON lines, one recorded character per line
    #[arg(long, default_value = "debug/inputs.txt")]
    inputs: String,

    #[arg(long, default_value_t = 1)]
    iters: usize,

    /// Compiled templates from template_convert; built-in templates if omitted
    #[arg(long)]
    registry: Option<String>,

    /// JSON matcher config; --threshold and --encoding override its values
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    threshold: Option<f32>,

    #[arg(long, value_parser = parse_encoding)]
    encoding: Option<Encoding>,

    #[arg(long, default_value = "info")]
    log: String,
}

#[derive(Serialize, Deserialize)]
struct Input {
    // Expected template name
    char: String,
    strokes: Vec<StrokeInput>,
}

fn parse_encoding(value: &str) -> Result<Encoding, String> {
    match value {
        "degrees" => Ok(Encoding::Degrees),
        "compass" => Ok(Encoding::Compass),
        other => Err(format!("unknown encoding {:?}; expected degrees or compass", other)),
    }
}

fn read_inputs(fname: &str) -> Result<Vec<Input>, Box<dyn std::error::Error>> {
    let mut res: Vec<Input> = Vec::new();
    let file = File::open(fname)?;
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let input: Input = serde_json::from_str(&line)?;
        res.push(input);
    }
    Ok(res)
}

fn load_config(args: &Args) -> Result<MatcherConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => MatcherConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => MatcherConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold);
    }
    if let Some(encoding) = args.encoding {
        config = config.with_encoding(encoding);
    }
    Ok(config)
}

fn load_registry(args: &Args) -> Result<TemplateRegistry, Box<dyn std::error::Error>> {
    let registry = match &args.registry {
        Some(path) => TemplateRegistry::from_bincode(&std::fs::read(path)?)?,
        None => TemplateRegistry::builtin()?,
    };
    Ok(registry)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log))
        .init();

    let matcher = Matcher::new(load_registry(&args)?, load_config(&args)?);
    tracing::info!(templates = matcher.registry().len(), threshold = matcher.config().threshold, "matcher ready");

    let inputs = read_inputs(&args.inputs)?;
    let strokes: Vec<Vec<Stroke>> = inputs
        .iter()
        .map(|input| input.strokes.iter().map(Stroke::try_from).collect::<Result<Vec<Stroke>, _>>())
        .collect::<Result<_, _>>()?;
    println!("Loaded {} inputs; starting {} cycles of evaluation.", inputs.len(), args.iters);

    let start = Instant::now();
    let mut guessed = 0;
    let mut unmatched = 0;
    for _ in 0..args.iters {
        for (input, strokes) in inputs.iter().zip(&strokes) {
            match matcher.recognize(strokes) {
                Some(mc) if mc.template.name() == input.char => guessed += 1,
                Some(mc) => tracing::debug!(expected = %input.char, got = mc.template.name(), cost = mc.cost, "wrong guess"),
                None => unmatched += 1,
            }
        }
    }
    let duration = start.elapsed();
    println!("Finished in {:?}. Correct guesses: {}. No match: {}.", duration, guessed, unmatched);
    Ok(())
}
