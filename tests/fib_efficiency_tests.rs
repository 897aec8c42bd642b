use fib_efficiency::{
    Algorithm, CliVerbosity, FibBench, Measurement, ResultSet, ValueFormatter,
};
use regex::Regex;
use serde_json::value::Value;
use std::cell::Cell;
use std::fs::File;
use std::path::Path;
use tempfile::{tempdir, TempDir};
use walkdir::WalkDir;

fn temp_dir() -> TempDir {
    tempdir().unwrap()
}

// Inputs small enough to keep the recursive strategy fast in debug builds.
fn short_run(dir: &TempDir) -> FibBench {
    FibBench::default()
        .output_directory(dir.path())
        .small_inputs(vec![0, 1, 2, 3, 5, 8, 10, 15, 20])
        .large_inputs(vec![10, 100, 1_000, 10_000])
        .with_verbosity(CliVerbosity::Quiet)
        .with_coloring(false)
}

fn verify_file(dir: &Path, path: &str) -> String {
    let full_path = dir.join(path);
    assert!(
        full_path.is_file(),
        "File {:?} does not exist or is not a file",
        full_path
    );
    let contents = std::fs::read_to_string(&full_path).unwrap();
    assert!(!contents.is_empty());
    contents
}

fn verify_json(dir: &Path, path: &str) -> Value {
    verify_file(dir, path);
    let f = File::open(dir.join(path)).unwrap();
    serde_json::from_reader::<File, Value>(f).unwrap()
}

fn verify_not_exists(dir: &Path, path: &str) {
    assert!(!dir.join(path).exists(), "{:?} should not exist", path);
}

fn files_with_extension(dir: &Path, extension: &str) -> Vec<String> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext == extension)
                .unwrap_or(false)
        })
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect()
}

fn algorithms(results: &ResultSet) -> Vec<Algorithm> {
    results.series().into_iter().map(|(algo, _)| algo).collect()
}

#[test]
fn test_creates_directory() {
    let dir = temp_dir();
    let nested = dir.path().join("reports").join("fib");
    FibBench::default()
        .output_directory(&nested)
        .small_inputs(vec![5])
        .large_inputs(vec![10])
        .with_verbosity(CliVerbosity::Quiet)
        .run()
        .unwrap();
    assert!(nested.is_dir());
}

#[test]
fn test_tables() {
    let dir = temp_dir();
    let summary = short_run(&dir).run().unwrap();

    assert_eq!(algorithms(&summary.small), Algorithm::ALL.to_vec());
    assert_eq!(
        algorithms(&summary.large),
        vec![Algorithm::Iterative, Algorithm::FastDoubling]
    );
    assert_eq!(summary.small.len(), 3 * 9);
    assert_eq!(summary.large.len(), 2 * 4);

    for algo in Algorithm::ALL.iter() {
        let result = summary.small.get(*algo, 10).unwrap();
        assert_eq!(result.value.to_string(), "55", "{}", algo);
        assert!(result.time_ms >= 0.0);
    }
    assert!(summary.small.check_agreement().is_ok());
    assert!(summary.large.check_agreement().is_ok());
    assert_eq!(
        summary.large.get(Algorithm::FastDoubling, 10_000).unwrap().digits(),
        2090
    );
}

#[test]
fn test_step_counts() {
    let dir = temp_dir();
    let summary = short_run(&dir).run().unwrap();

    for result in summary.small.iter().chain(summary.large.iter()) {
        match result.algo {
            Algorithm::Iterative => assert_eq!(result.steps, result.n.max(1)),
            Algorithm::FastDoubling => {
                let bits = 64 - u64::from(result.n.leading_zeros());
                assert_eq!(result.steps, bits + 1, "fast_doubling({})", result.n);
            }
            Algorithm::Recursive => assert!(result.steps >= 1),
        }
    }
    assert_eq!(summary.small.get(Algorithm::Recursive, 20).unwrap().steps, 21_891);
}

#[test]
#[cfg(feature = "csv_output")]
fn test_csv_output() {
    let dir = temp_dir();
    short_run(&dir).without_plots().run().unwrap();

    let small = verify_file(dir.path(), "fib_small.csv");
    let mut lines = small.lines();
    assert_eq!(lines.next(), Some("n,value,steps,time_ms,algo"));
    assert_eq!(lines.count(), 27);
    assert!(small.contains("\n10,55,177,"));

    let large = verify_file(dir.path(), "fib_large.csv");
    assert!(large.starts_with("n,steps,time_ms,algo,digits\n"));
    assert!(large
        .lines()
        .any(|line| line.starts_with("1000,11,") && line.ends_with(",fast_doubling,209")));
}

#[test]
#[cfg(feature = "plotters")]
fn test_plot_output() {
    let dir = temp_dir();
    short_run(&dir).run().unwrap();

    for name in &[
        "fib_small_time.svg",
        "fib_small_steps.svg",
        "fib_large_time.svg",
        "fib_large_steps.svg",
    ] {
        let svg = verify_file(dir.path(), name);
        assert!(svg.contains("<svg"), "{}", name);
    }
}

#[test]
fn test_without_plots() {
    let dir = temp_dir();
    short_run(&dir).without_plots().run().unwrap();

    let svgs = files_with_extension(dir.path(), "svg");
    assert!(
        svgs.is_empty(),
        "Found SVG files ({:?}) in output directory with plots disabled",
        svgs
    );
}

#[test]
fn test_without_csv() {
    let dir = temp_dir();
    short_run(&dir).without_csv().without_plots().run().unwrap();

    verify_not_exists(dir.path(), "fib_small.csv");
    verify_not_exists(dir.path(), "fib_large.csv");
}

#[test]
fn test_json_output() {
    let dir = temp_dir();
    short_run(&dir).with_json().without_plots().run().unwrap();

    let small = verify_json(dir.path(), "fib_small.json");
    let rows = small.as_array().unwrap();
    assert_eq!(rows.len(), 27);
    assert_eq!(rows[0]["algo"], "recursive");
    assert_eq!(rows[0]["value"], "0");

    let large = verify_json(dir.path(), "fib_large.json");
    let row = &large.as_array().unwrap()[0];
    assert_eq!(row["n"], 10);
    assert_eq!(row["digits"], 2);
    assert!(row.get("value").is_none());
}

#[test]
fn test_json_disabled_by_default() {
    let dir = temp_dir();
    short_run(&dir).without_plots().run().unwrap();

    assert!(files_with_extension(dir.path(), "json").is_empty());
}

#[test]
fn test_filtering() {
    let dir = temp_dir();
    let summary = short_run(&dir)
        .with_filter(Regex::new("^fast").unwrap())
        .without_plots()
        .run()
        .unwrap();

    assert_eq!(algorithms(&summary.small), vec![Algorithm::FastDoubling]);
    assert_eq!(algorithms(&summary.large), vec![Algorithm::FastDoubling]);
}

#[test]
fn test_recursive_limit() {
    let dir = temp_dir();
    let summary = short_run(&dir)
        .recursive_limit(8)
        .without_plots()
        .run()
        .unwrap();

    let recursive: Vec<_> = summary
        .small
        .iter()
        .filter(|result| result.algo == Algorithm::Recursive)
        .map(|result| result.n)
        .collect();
    assert_eq!(recursive, vec![0, 1, 2, 3, 5, 8]);
    assert_eq!(
        summary
            .small
            .iter()
            .filter(|result| result.algo == Algorithm::Iterative)
            .count(),
        9
    );
}

struct Ticks;
impl ValueFormatter for Ticks {
    fn format_value(&self, ticks: f64) -> String {
        format!("{} ticks", ticks)
    }
}

#[derive(Default)]
struct TickClock {
    now: Cell<u64>,
}
impl Measurement for TickClock {
    type Intermediate = u64;
    type Value = u64;

    fn start(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + 1);
        now
    }
    fn end(&self, start: u64) -> u64 {
        self.now.get() - start
    }
    fn to_millis(&self, ticks: &u64) -> f64 {
        *ticks as f64
    }
    fn formatter(&self) -> &dyn ValueFormatter {
        &Ticks
    }
}

#[test]
fn test_custom_measurement() {
    let dir = temp_dir();
    let summary = short_run(&dir)
        .with_measurement(TickClock::default())
        .without_plots()
        .run()
        .unwrap();

    for result in summary.small.iter().chain(summary.large.iter()) {
        assert_eq!(result.time_ms, 1.0);
    }
}

#[test]
#[ignore]
fn test_default_large_inputs() {
    let summary = FibBench::default()
        .with_verbosity(CliVerbosity::Quiet)
        .measure(fib_efficiency::TableKind::Large);

    assert!(summary.check_agreement().is_ok());
    let iterative = summary.get(Algorithm::Iterative, 1_000_000).unwrap();
    let fast_doubling = summary.get(Algorithm::FastDoubling, 1_000_000).unwrap();
    assert_eq!(iterative.value, fast_doubling.value);
    assert_eq!(fast_doubling.digits(), 208_988);
    assert_eq!(fast_doubling.steps, 21);
}
