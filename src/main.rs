use clap::{Parser, Subcommand, ValueEnum};
use nutriline::config::Config;
use nutriline::ingredient::normalize_name;
use nutriline::recipe::Calculator;
use nutriline::reference::{self, defaults, ValidationResult};
use nutriline::report;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_FILE: &str = "nutriline.toml";

#[derive(Parser)]
#[command(name = "nutriline")]
#[command(about = "Estimate recipe nutrition from free-text ingredient lines", long_about = None)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct DataArgs {
    /// Config file (default: ./nutriline.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Unit table file (.toml or .json)
    #[arg(long, global = true)]
    units: Option<PathBuf>,

    /// Nutrition table file (.toml or .json)
    #[arg(long, global = true)]
    nutrition: Option<PathBuf>,

    /// Minimum word length (exclusive) for word-level matching
    #[arg(long, global = true)]
    min_word_length: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate nutrition totals for a recipe
    Calculate {
        /// Recipe file, one ingredient per line (default: stdin)
        file: Option<PathBuf>,

        /// Use the built-in example recipe instead of FILE/stdin
        #[arg(long, conflicts_with = "file")]
        example: bool,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the built-in example recipe
    Example,

    /// Show which table entry an ingredient name resolves to
    Lookup {
        /// Ingredient name (e.g., "grilled chicken breast")
        name: String,
    },

    /// List the unit table
    Units,

    /// Load the reference tables and report data problems
    Validate,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Calculate {
            file,
            example,
            format,
        } => calculate(&cli.data, file.as_deref(), example, format),
        Commands::Example => {
            print!("{}", defaults::EXAMPLE_RECIPE);
            Ok(())
        }
        Commands::Lookup { name } => lookup(&cli.data, &name),
        Commands::Units => list_units(&cli.data),
        Commands::Validate => validate(&cli.data),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(args: &DataArgs) -> Result<Config, Box<dyn std::error::Error>> {
    if let Some(path) = &args.config {
        return Ok(Config::load_from_file(path)?);
    }
    let local = Path::new(DEFAULT_CONFIG_FILE);
    if local.exists() {
        Ok(Config::load_from_file(local)?)
    } else {
        Ok(Config::default())
    }
}

fn load_calculator(
    args: &DataArgs,
) -> Result<(Calculator, ValidationResult), Box<dyn std::error::Error>> {
    let config = load_config(args)?;

    let (units, mut validation) = match args.units.as_ref().or(config.data.units.as_ref()) {
        Some(path) => reference::load_units_from_file(path)?,
        None => defaults::unit_table()?,
    };
    let (nutrition, nutrition_validation) =
        match args.nutrition.as_ref().or(config.data.nutrition.as_ref()) {
            Some(path) => reference::load_nutrition_from_file(path)?,
            None => defaults::nutrition_table()?,
        };
    validation.merge(nutrition_validation);

    let mut options = config.calculator_options();
    if let Some(min_word_length) = args.min_word_length {
        options.min_word_length = min_word_length;
    }

    Ok((Calculator::with_options(units, nutrition, options), validation))
}

fn read_recipe(file: Option<&Path>, example: bool) -> Result<String, Box<dyn std::error::Error>> {
    let text = if example {
        defaults::EXAMPLE_RECIPE.to_string()
    } else if let Some(path) = file {
        std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?
    } else {
        std::io::read_to_string(std::io::stdin())?
    };

    if text.trim().is_empty() {
        return Err("Please enter some ingredients".into());
    }
    Ok(text)
}

fn calculate(
    args: &DataArgs,
    file: Option<&Path>,
    example: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let (calculator, validation) = load_calculator(args)?;

    // Print validation issues if any
    if validation.has_issues() {
        eprintln!("{}", validation);
    }

    let text = read_recipe(file, example)?;
    let calculation = calculator.calculate(&text);

    match format {
        OutputFormat::Text => print!("{}", report::format_calculation_text(&calculation)),
        OutputFormat::Json => println!("{}", report::format_calculation_json(&calculation)?),
    }

    Ok(())
}

fn lookup(args: &DataArgs, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (calculator, _validation) = load_calculator(args)?;

    let normalized = normalize_name(&name.trim().to_lowercase());
    let result = calculator.matcher().find(&normalized);
    println!("{}", report::format_lookup(&normalized, &result));

    if let Some(profile) = result.profile() {
        println!("\nPer 100 g:");
        for (field, value) in profile.fields() {
            println!("  {:<9} {}", field, value);
        }
    }

    Ok(())
}

fn list_units(args: &DataArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (calculator, validation) = load_calculator(args)?;

    if validation.has_issues() {
        eprintln!("{}", validation);
    }

    println!("Units ({}):", calculator.units().len());
    print!("{}", report::format_units(calculator.units()));
    Ok(())
}

fn validate(args: &DataArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (calculator, validation) = load_calculator(args)?;

    println!(
        "Loaded {} units and {} ingredients",
        calculator.units().len(),
        calculator.nutrition().len()
    );
    if validation.has_issues() {
        print!("{}", validation);
    } else {
        println!("No issues found");
    }

    if !validation.is_valid() {
        return Err(format!("{} were skipped", validation.skipped_summary()).into());
    }
    Ok(())
}
