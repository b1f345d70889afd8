use std::path::PathBuf;

use clap::{ArgAction, Parser};
use langbundle::{Error, written_list};
use langbundle_cli::{
    GenerateCommand, load_config, parse_lang_files, resolve_format, run_generate, split_mode,
};
use tracing_subscriber::EnvFilter;

/// Generates vue-i18n / vuex-i18n locale bundles from a Laravel-style
/// translation directory.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project root that `langPath`, `jsFile`, `jsPath` and `--file-name` are relative to
    #[arg(long, default_value = ".")]
    base_path: PathBuf,

    /// Config file (default: `<base-path>/langbundle.toml` when it exists)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shortcut for `--format umd`
    #[arg(long)]
    umd: bool,

    /// Write one file per translation file into `jsPath`
    #[arg(long)]
    multi: bool,

    /// Also bundle `lang/vendor` package translations
    #[arg(long)]
    with_vendor: bool,

    /// Output file, relative to the base path (default: `jsFile`)
    #[arg(long)]
    file_name: Option<String>,

    /// Only bundle these translation files, e.g. `auth,validation`
    #[arg(long)]
    lang_files: Option<String>,

    /// Output format: es6, umd or json
    #[arg(long, default_value = "es6")]
    format: String,

    /// Write one file per locale into `jsPath`
    #[arg(long)]
    multi_locales: bool,

    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    let format = resolve_format(&args.format, args.umd)?;
    let config = load_config(&args.base_path, args.config.as_deref())?;
    let show_output_messages = config.show_output_messages;

    let command = GenerateCommand {
        base_path: args.base_path,
        format,
        split: split_mode(args.multi, args.multi_locales),
        with_vendor: args.with_vendor,
        file_name: args.file_name,
        lang_files: args
            .lang_files
            .as_deref()
            .map(parse_lang_files)
            .unwrap_or_default(),
    };

    let written = run_generate(&command, config)?;
    if show_output_messages {
        print!("Written to : {}", written_list(&written));
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
