mod config;
mod test_runner;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing::info;
use tracing_subscriber::EnvFilter;

use markright::Document;
use markright::block::Block;

const SUBCOMMANDS: &[&str] = &["run", "test", "help"];

/// Flags of `run` whose value is the next argument.
const VALUE_FLAGS: &[&str] = &["-o", "--output", "-c", "--config"];

#[derive(Parser)]
#[command(name = "markright", version, about = "Convert markright documents to LaTeX")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a markright document
    Run(RunArgs),

    /// Run .test.mr fixture files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// markright source file
    file: String,

    /// Output file (defaults to the input name with a .tex extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the LaTeX to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Render as Beamer slides even without %slide-mode
    #[arg(long)]
    slides: bool,

    /// TOML configuration file (defaults to markright.toml beside the input)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parse only, don't render (exit 0 if valid)
    #[arg(long)]
    check: bool,

    /// Dump the parsed tree
    #[arg(long)]
    ast: bool,

    /// Dump the parsed tree as JSON
    #[arg(long)]
    json: bool,

    /// Print the section outline
    #[arg(long)]
    outline: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.mr file or a directory containing them
    path: String,

    /// Run only fixtures in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    let args = with_implicit_run(std::env::args().collect());
    let cli = Cli::parse_from(&args);
    init_logging(cli.verbose);

    match cli.command {
        Command::Run(run_args) => do_run(run_args, cli.no_color),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

/// `markright [flags] doc.mr` means `markright run [flags] doc.mr`.
fn with_implicit_run(mut args: Vec<String>) -> Vec<String> {
    let needs_run = {
        let mut rest = args.iter().skip(1);
        let mut first_positional = None;
        while let Some(arg) = rest.next() {
            if VALUE_FLAGS.contains(&arg.as_str()) {
                rest.next();
            } else if !arg.starts_with('-') {
                first_positional = Some(arg.as_str());
                break;
            }
        }
        first_positional.is_some_and(|arg| !SUBCOMMANDS.contains(&arg))
    };
    if needs_run {
        args.insert(1, "run".to_string());
    }
    args
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn do_run(args: RunArgs, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let parser = markright::parser::Parser::new(source, file_id);
    let document = match parser.parse() {
        Ok(d) => d,
        Err(error) => {
            let writer = StandardStream::stderr(color_choice);
            let config = term::Config::default();
            let diagnostic = error.to_diagnostic();
            let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
            process::exit(1);
        }
    };

    if args.check {
        eprintln!("ok: {} parsed successfully", args.file);
        return;
    }

    if args.ast {
        println!("{:#?}", document);
        return;
    }

    if args.json {
        match serde_json::to_string_pretty(&document) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: cannot serialize document: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if args.outline {
        print_outline(&document);
        return;
    }

    let input = Path::new(&args.file);
    let mut options = match config::load(args.config.as_deref(), input) {
        Ok(config) => config.latex,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };
    if args.slides {
        options.force_slides = true;
    }

    if args.stdout {
        let stdout = io::stdout();
        if let Err(e) = latex::render_to(&document, &options, &mut stdout.lock()) {
            eprintln!("error: cannot write output: {}", e);
            process::exit(1);
        }
        return;
    }

    let output = args.output.unwrap_or_else(|| default_output_path(input));
    let written = File::create(&output)
        .and_then(|file| latex::render_to(&document, &options, &mut BufWriter::new(file)));
    match written {
        Ok(()) => info!(path = %output.display(), "wrote LaTeX output"),
        Err(e) => {
            eprintln!("error: cannot write '{}': {}", output.display(), e);
            process::exit(1);
        }
    }
}

/// `doc.mr` -> `doc.tex`; never the input itself.
fn default_output_path(input: &Path) -> PathBuf {
    let output = input.with_extension("tex");
    if output == input {
        input.with_extension("out.tex")
    } else {
        output
    }
}

fn print_outline(document: &Document) {
    if !document.title.is_empty() {
        println!("{}", document.title);
    }
    for section in &document.sections {
        println!("# {}", section.title);
        for block in &section.blocks {
            match block {
                Block::SubSection { title, blocks } => {
                    println!("  ## {}", title);
                    for inner in blocks {
                        println!("    {}", inner.kind_name());
                    }
                }
                other => println!("  {}", other.kind_name()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_file_implies_run() {
        assert_eq!(
            with_implicit_run(args(&["markright", "doc.mr"])),
            args(&["markright", "run", "doc.mr"])
        );
    }

    #[test]
    fn option_values_are_not_taken_for_the_file() {
        let injected = with_implicit_run(args(&["markright", "-o", "out.tex", "doc.mr"]));
        assert_eq!(injected, args(&["markright", "run", "-o", "out.tex", "doc.mr"]));

        let cli = Cli::try_parse_from(&injected).unwrap();
        match cli.command {
            Command::Run(run) => {
                assert_eq!(run.file, "doc.mr");
                assert_eq!(run.output, Some(PathBuf::from("out.tex")));
            }
            Command::Test(_) => panic!("expected run"),
        }
    }

    #[test]
    fn config_value_and_global_flags_before_file() {
        let injected = with_implicit_run(args(&[
            "markright", "--no-color", "--config", "conf.toml", "-v", "doc.mr",
        ]));
        let cli = Cli::try_parse_from(&injected).unwrap();
        assert!(cli.no_color);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Run(run) => {
                assert_eq!(run.file, "doc.mr");
                assert_eq!(run.config, Some(PathBuf::from("conf.toml")));
            }
            Command::Test(_) => panic!("expected run"),
        }
    }

    #[test]
    fn explicit_subcommands_are_left_alone() {
        let test = args(&["markright", "-v", "test", "fixtures"]);
        assert_eq!(with_implicit_run(test.clone()), test);
        let run = args(&["markright", "run", "-o", "x.tex", "doc.mr"]);
        assert_eq!(with_implicit_run(run.clone()), run);
    }

    #[test]
    fn output_path_swaps_extension() {
        assert_eq!(default_output_path(Path::new("notes/doc.mr")), PathBuf::from("notes/doc.tex"));
        assert_eq!(default_output_path(Path::new("doc")), PathBuf::from("doc.tex"));
    }

    #[test]
    fn output_path_never_overwrites_input() {
        assert_eq!(default_output_path(Path::new("doc.tex")), PathBuf::from("doc.out.tex"));
    }
}
