//! Command-line arguments of the `fib-efficiency` binary.

mod types;

pub use types::Color;

use crate::error::{Error, Result};
use crate::report::CliVerbosity;
use clap::{App, Arg};
use regex::Regex;
use std::{env, ffi::OsString, path::PathBuf};

#[derive(Debug, Default)]
pub struct Args {
    pub output_directory: Option<PathBuf>,
    pub small_inputs: Option<Vec<u64>>,
    pub large_inputs: Option<Vec<u64>>,
    pub recursive_limit: Option<u64>,
    pub filter: Option<Regex>,
    pub no_plot: bool,
    pub no_csv: bool,
    pub json: bool,
    pub verbosity: CliVerbosity,
    pub color: Color,
}

/// Parses the arguments of the current process.
pub fn parse_args() -> Result<Args> {
    try_parse_args(env::args_os())
}

/// Parses `args`, whose first element is the executable name.
///
/// `--help` and `--version` are reported as an `Error::ArgParse` whose kind is
/// `HelpDisplayed` or `VersionDisplayed`; calling `exit` on it prints the message.
pub fn try_parse_args<I, T>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = app().get_matches_from_safe(args)?;

    let small_inputs = matches
        .values_of("small")
        .map(|values| parse_inputs("--small", values))
        .transpose()?;
    let large_inputs = matches
        .values_of("large")
        .map(|values| parse_inputs("--large", values))
        .transpose()?;
    let recursive_limit = matches
        .value_of("recursive-limit")
        .map(|value| parse_input("--recursive-limit", value))
        .transpose()?;
    let filter = matches
        .value_of("filter")
        .map(Regex::new)
        .transpose()?;
    let color = matches
        .value_of("color")
        .map(str::parse::<Color>)
        .transpose()?
        .unwrap_or_default();

    let verbosity = if matches.is_present("quiet") {
        CliVerbosity::Quiet
    } else if matches.is_present("verbose") {
        CliVerbosity::Verbose
    } else {
        CliVerbosity::Normal
    };

    Ok(Args {
        output_directory: matches.value_of_os("output-dir").map(PathBuf::from),
        small_inputs,
        large_inputs,
        recursive_limit,
        filter,
        no_plot: matches.is_present("noplot"),
        no_csv: matches.is_present("no-csv"),
        json: matches.is_present("json"),
        verbosity,
        color,
    })
}

fn parse_input(arg: &'static str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| Error::InvalidInput {
        arg,
        value: value.to_owned(),
    })
}

fn parse_inputs<'a, I>(arg: &'static str, values: I) -> Result<Vec<u64>>
where
    I: Iterator<Item = &'a str>,
{
    values.map(|value| parse_input(arg, value)).collect()
}

fn app() -> App<'static, 'static> {
    App::new("fib-efficiency")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compares the recursive, iterative and fast-doubling Fibonacci strategies")
        .arg(Arg::with_name("output-dir")
            .short("o")
            .long("output-dir")
            .takes_value(true)
            .value_name("DIR")
            .help("Directory the CSV, JSON and SVG reports are written to. Defaults to the current directory."))
        .arg(Arg::with_name("small")
            .long("small")
            .takes_value(true)
            .use_delimiter(true)
            .allow_hyphen_values(true)
            .value_name("N,...")
            .help("Inputs of the small-n table, separated by commas."))
        .arg(Arg::with_name("large")
            .long("large")
            .takes_value(true)
            .use_delimiter(true)
            .allow_hyphen_values(true)
            .value_name("N,...")
            .help("Inputs of the large-n table, separated by commas."))
        .arg(Arg::with_name("recursive-limit")
            .long("recursive-limit")
            .takes_value(true)
            .allow_hyphen_values(true)
            .value_name("N")
            .help("Largest n the recursive strategy is run with."))
        .arg(Arg::with_name("filter")
            .long("filter")
            .takes_value(true)
            .value_name("REGEX")
            .help("Only measure the strategies whose name matches this regular expression."))
        .arg(Arg::with_name("noplot")
            .short("n")
            .long("noplot")
            .help("Disable the SVG charts."))
        .arg(Arg::with_name("json")
            .long("json")
            .help("Also export each table as JSON."))
        .arg(Arg::with_name("no-csv")
            .long("no-csv")
            .help("Disable the CSV exports."))
        .arg(Arg::with_name("quiet")
            .short("q")
            .long("quiet")
            .conflicts_with("verbose")
            .help("Only print the per-strategy totals."))
        .arg(Arg::with_name("verbose")
            .short("v")
            .long("verbose")
            .help("Print every value in full."))
        .arg(Arg::with_name("color")
            .short("c")
            .long("color")
            .alias("colour")
            .takes_value(true)
            .possible_values(&Color::VALUES)
            .value_name("WHEN")
            .help("Configure coloring of output. always = always colorize output, never = never colorize output, auto = colorize output if output is a tty and compiled for unix."))
}
