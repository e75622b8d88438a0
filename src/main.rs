use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser as ClapParser;
use clap::{Args, Subcommand};
use env_logger::Builder;
use log::{debug, info};

use complex_calc as calc;

use calc::calculator::{Calculation, Comparison};
use calc::error::CalcError;
use calc::interpreter::VariableSource;
use calc::scanner::{normalize, Scanner};
use calc::value::Value;

#[derive(ClapParser, Debug)]
#[command(version, about = "Complex-number expression calculator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to complex-calc.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Args, Debug)]
struct Input {
    /// The expression, e.g. "conj(3+4i) * x"
    #[arg(conflicts_with = "file")]
    expression: Option<String>,

    /// Read the expression from a file instead
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes an expression, printing each token
    Tokenize {
        #[command(flatten)]
        input: Input,
    },

    /// Parses an expression and prints its canonical tree
    Parse {
        #[command(flatten)]
        input: Input,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluates an expression and prints the result
    Evaluate {
        #[command(flatten)]
        input: Input,

        /// Bind a variable up front instead of being prompted for it
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
        vars: Vec<(String, String)>,
    },

    /// Evaluates two expressions and reports whether they are equivalent
    Compare {
        first: String,

        second: String,

        /// Bind a variable in both expressions instead of being prompted
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
        vars: Vec<(String, String)>,
    },
}

fn parse_binding(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", arg)),
    }
}

/// Answers from `--var` bindings first, then asks on stdin.
struct Prompt {
    preset: HashMap<String, String>,
}

impl Prompt {
    fn new(vars: Vec<(String, String)>) -> Self {
        Self {
            preset: vars.into_iter().collect(),
        }
    }
}

impl VariableSource for Prompt {
    fn value_for(&mut self, name: &str) -> calc::Result<String> {
        if let Some(value) = self.preset.get(name) {
            debug!("Using preset value for '{}'", name);

            return Ok(value.clone());
        }

        let mut stdout = io::stdout().lock();
        write!(stdout, "Enter a value for {} (e.g. 3+2i): ", name)?;
        stdout.flush()?;

        let mut line: String = String::new();

        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(CalcError::Unresolved {
                name: name.to_string(),
                message: "input closed".into(),
            });
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Reads the expression from the command line or from a file
fn read_input(input: Input) -> Result<String> {
    match (input.expression, input.file) {
        (Some(expression), _) => Ok(expression),

        (None, Some(filename)) => {
            info!("Reading file: {:?}", filename);

            let contents: String = std::fs::read_to_string(&filename)
                .context(format!("Failed to read file {:?}", filename))?;

            info!("Read {} bytes from {:?}", contents.len(), filename);

            Ok(contents)
        }

        (None, None) => bail!("No expression was provided. Pass one as an argument or use --file."),
    }
}

fn init_logger() -> Result<()> {
    // Create or open the log file
    let log_file = File::create("complex-calc.log").context("Failed to create complex-calc.log")?;

    // Configure env_logger to write to file with module and source line
    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("complex_calc::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .init();

    info!("Logger initialized, writing to complex-calc.log");
    Ok(())
}

/// Print a calculator error and exit with 65 (input errors) or 70
/// (evaluation errors).
fn fail(e: CalcError) -> ! {
    debug!("Failure: {:?}", e);
    eprintln!("{}", e);

    std::process::exit(if e.is_parse_error() { 65 } else { 70 });
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { input } => {
            info!("Running Tokenize subcommand");

            let normalized: String = normalize(&read_input(input)?);
            let mut tokenized = true;

            for token in Scanner::new(&normalized) {
                match token {
                    Ok(token) => println!("{}", token),

                    Err(e) => {
                        tokenized = false;
                        eprintln!("{}", e);
                    }
                }
            }

            if !tokenized {
                debug!("Tokenization failed, exiting with code 65");

                std::process::exit(65);
            }
        }

        Commands::Parse { input, json } => {
            info!("Running Parse subcommand");

            let calculation: Calculation =
                Calculation::new(&read_input(input)?).unwrap_or_else(|e| fail(e));

            if json {
                println!("{}", serde_json::to_string_pretty(calculation.tree())?);
            } else {
                println!("{}", calculation.render());
            }
        }

        Commands::Evaluate { input, vars } => {
            info!("Running Evaluate subcommand");

            let mut calculation: Calculation =
                Calculation::new(&read_input(input)?).unwrap_or_else(|e| fail(e));
            let mut prompt: Prompt = Prompt::new(vars);

            let value = calculation
                .execute(&mut prompt)
                .unwrap_or_else(|e| fail(e));

            println!("Tree: {}", calculation.render());

            for name in calculation.tree().variables() {
                if let Some(bound) = calculation.bindings().get(name) {
                    println!("{} = {}", name, Value(bound));
                }
            }

            println!("Result: {}", Value(value));
        }

        Commands::Compare {
            first,
            second,
            vars,
        } => {
            info!("Running Compare subcommand");

            if first.trim().is_empty() || second.trim().is_empty() {
                bail!("Enter both expressions to compare.");
            }

            let mut prompt: Prompt = Prompt::new(vars);

            match calc::compare(&first, &second, &mut prompt).unwrap_or_else(|e| fail(e)) {
                Comparison::Equivalent(value) => {
                    println!("The expressions are EQUIVALENT.");
                    println!("Value: {}", Value(value));
                }

                Comparison::Different(a, b) => {
                    println!("The expressions are DIFFERENT.");
                    println!("Expr1: {}", Value(a));
                    println!("Expr2: {}", Value(b));
                }
            }
        }
    }

    info!("Done");

    Ok(())
}
