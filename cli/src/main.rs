use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use structout_core::{SchemaDesign, generate_schema, validate_fields};
use structout_providers::ProviderCatalog;

#[derive(Debug, Parser)]
#[command(name = "structout")]
#[command(about = "Generate provider-ready JSON Schemas from flat field designs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a schema document from a design file.
    Generate(GenerateArgs),
    /// Check a design file for structural problems.
    Validate(ValidateArgs),
    /// List available provider templates.
    Providers(ProvidersArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Design JSON file (metadata plus field rows).
    #[arg(long)]
    design: PathBuf,
    /// Provider template id for the envelope (default: openai).
    #[arg(long, conflicts_with = "rules")]
    provider: Option<String>,
    /// File holding a raw header-rule JSON array, used instead of a
    /// provider template.
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Override the schema name from the design metadata.
    #[arg(long)]
    name: Option<String>,
    /// Override the schema description from the design metadata.
    #[arg(long)]
    description: Option<String>,
    /// Directory of custom provider templates.
    #[arg(long)]
    providers_dir: Option<PathBuf>,
    /// Output file (default: stdout).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Design JSON file to check.
    #[arg(long)]
    design: PathBuf,
}

#[derive(Debug, Args)]
struct ProvidersArgs {
    /// Directory of custom provider templates.
    #[arg(long)]
    providers_dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Validate(args) => run_validate(args),
        Command::Providers(args) => run_providers(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let design = load_design(&args.design)?;

    let header_rule = match &args.rules {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?,
        None => {
            let catalog = load_catalog(args.providers_dir.as_deref())?;
            let id = args.provider.as_deref().unwrap_or("openai");
            let config = catalog.require(id).map_err(|e| e.to_string())?;
            config.llm_schema_header.clone()
        }
    };

    let name = args.name.as_deref().unwrap_or(design.name.trim());
    let description = args
        .description
        .as_deref()
        .unwrap_or(design.description.trim());

    let document = generate_schema(&design.fields, name, description, &header_rule);
    let raw = serde_json::to_string_pretty(&document)
        .map_err(|err| format!("Failed to serialize schema: {err}"))?;

    match &args.out {
        Some(path) => {
            fs::write(path, raw)
                .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
            println!("Wrote schema to '{}'.", path.display());
        }
        None => println!("{raw}"),
    }

    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let design = load_design(&args.design)?;
    let issues = validate_fields(&design.fields);

    if issues.is_empty() {
        println!(
            "No issues found in {} field(s) of '{}'.",
            design.fields.len(),
            args.design.display()
        );
        return Ok(());
    }

    for issue in &issues {
        eprintln!("  {issue}");
    }
    Err(format!(
        "{} issue(s) found in '{}'",
        issues.len(),
        args.design.display()
    ))
}

fn run_providers(args: ProvidersArgs) -> Result<(), String> {
    let catalog = load_catalog(args.providers_dir.as_deref())?;

    let mut ids: Vec<&str> = catalog.providers().collect();
    ids.sort_unstable();
    for id in ids {
        println!("{id}");
    }

    Ok(())
}

fn load_design(path: &Path) -> Result<SchemaDesign, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    serde_json::from_str(&raw).map_err(|err| format!("Invalid design '{}': {err}", path.display()))
}

fn load_catalog(providers_dir: Option<&Path>) -> Result<ProviderCatalog, String> {
    let catalog = match providers_dir {
        Some(dir) => ProviderCatalog::builder()
            .from_dir(dir)
            .with_builtin()
            .build(),
        None => Ok(ProviderCatalog::builtin()),
    };
    catalog.map_err(|e| e.to_string())
}
