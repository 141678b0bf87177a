//! Command-line lookup of translation keys.

use std::ffi::OsString;
use std::fmt::Display;
use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use json_localizer::config::{
    self,
    ConfigError,
    LocalizerSettings,
};
use json_localizer::{
    Localize,
    LocalizerProvider,
};
use tracing_subscriber::EnvFilter;

/// Help text.
const USAGE: &str = "\
Usage: json-localizer [OPTIONS] KEY [ARGS...]
       json-localizer [OPTIONS] --keys

Options:
  --config FILE             Settings file (default: ./.json-localizer.json if present)
  --resources DIR           Directory containing <culture>.json files
  --culture CULTURE         Culture to resolve for
  --accept-language VALUE   Derive the culture from an Accept-Language header value
  --keys                    List every key of the selected culture
  -h, --help                Show this help
";

/// Exit status when the key was resolved or the keys were listed.
const EXIT_SUCCESS: u8 = 0;
/// Exit status when the key or culture has no translation.
const EXIT_NOT_FOUND: u8 = 1;
/// Exit status for usage, configuration and load errors.
const EXIT_ERROR: u8 = 2;

/// Parsed command line.
#[derive(Debug)]
struct Args {
    /// Explicit settings file.
    config: Option<PathBuf>,
    /// Overrides `resourcesPath`.
    resources: Option<PathBuf>,
    /// Explicit culture.
    culture: Option<String>,
    /// Raw `Accept-Language` value.
    accept_language: Option<String>,
    /// List keys instead of resolving one.
    list_keys: bool,
    /// Key followed by format arguments.
    free: Vec<String>,
}

/// Returns `None` when help was requested.
fn parse_args(mut args: pico_args::Arguments) -> Result<Option<Args>, pico_args::Error> {
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    Ok(Some(Args {
        config: args.opt_value_from_str("--config")?,
        resources: args.opt_value_from_str("--resources")?,
        culture: args.opt_value_from_str("--culture")?,
        accept_language: args.opt_value_from_str("--accept-language")?,
        list_keys: args.contains("--keys"),
        free: args
            .finish()
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect(),
    }))
}

/// Settings file (explicit or found in `cwd`) plus command-line overrides.
///
/// Relative paths are taken from `cwd`.
fn load_settings(args: &Args, cwd: &Path) -> Result<LocalizerSettings, ConfigError> {
    let mut settings = match &args.config {
        Some(path) => config::load_from_file(&cwd.join(path))?,
        None => config::load_from_dir(cwd)?.unwrap_or_default(),
    };

    if let Some(resources) = &args.resources {
        settings.resources_path.clone_from(resources);
    }
    if settings.resources_path.is_relative() {
        settings.resources_path = cwd.join(&settings.resources_path);
    }

    Ok(settings)
}

/// Runs the CLI on already split arguments and returns the exit status.
///
/// Results go to `out`, diagnostics to `err`.
fn run(
    raw_args: Vec<OsString>,
    cwd: &Path,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<u8> {
    let args = match parse_args(pico_args::Arguments::from_vec(raw_args)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            write!(out, "{USAGE}")?;
            return Ok(EXIT_SUCCESS);
        }
        Err(e) => {
            writeln!(err, "{e}\n\n{USAGE}")?;
            return Ok(EXIT_ERROR);
        }
    };

    let settings = match load_settings(&args, cwd) {
        Ok(settings) => settings,
        Err(e) => {
            writeln!(err, "{e}")?;
            return Ok(EXIT_ERROR);
        }
    };

    let provider = match LocalizerProvider::from_settings(&settings) {
        Ok(provider) => provider,
        Err(e) => {
            writeln!(err, "{e}")?;
            return Ok(EXIT_ERROR);
        }
    };

    let localizer = match args.culture {
        Some(culture) => provider.localizer(culture),
        None => provider.localizer_for_request(args.accept_language.as_deref()),
    };

    if args.list_keys {
        let store = localizer.store();
        let Some((culture, document)) = store.select(localizer.culture()) else {
            writeln!(err, "No translations available for '{}'", localizer.culture())?;
            return Ok(EXIT_NOT_FOUND);
        };
        tracing::debug!(culture, "Listing keys");
        for (key, value) in document.flatten() {
            writeln!(out, "{key}\t{value}")?;
        }
        return Ok(EXIT_SUCCESS);
    }

    let Some((key, rest)) = args.free.split_first() else {
        writeln!(err, "Missing KEY\n\n{USAGE}")?;
        return Ok(EXIT_ERROR);
    };

    let format_args: Vec<&dyn Display> = rest.iter().map(|arg| arg as &dyn Display).collect();
    let result = if format_args.is_empty() {
        localizer.get_string(key)
    } else {
        localizer.get_string_with(key, &format_args)
    };

    writeln!(out, "{result}")?;

    if result.resource_not_found() {
        tracing::info!(location = result.searched_location(), "Translation not found");
        return Ok(EXIT_NOT_FOUND);
    }

    Ok(EXIT_SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    let status = match std::env::current_dir() {
        Ok(cwd) => run(std::env::args_os().skip(1).collect(), &cwd, &mut stdout, &mut stderr),
        Err(e) => writeln!(stderr, "{}", ConfigError::WorkingDirectory(e)).map(|()| EXIT_ERROR),
    };

    match status {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            tracing::error!("Failed to write output: {e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
