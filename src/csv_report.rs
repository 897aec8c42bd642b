use crate::error::Result;
use crate::measurement::ValueFormatter;
use crate::report::{Report, ReportContext};
use crate::results::ResultSet;
use csv::Writer;
use std::io::Write;
use std::path::Path;

struct CsvReportWriter<W: Write> {
    writer: Writer<W>,
}
impl<W: Write> CsvReportWriter<W> {
    fn write_data(&mut self, results: &ResultSet) -> Result<()> {
        for row in results.rows() {
            self.writer.serialize(row)?;
        }
        self.writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

pub struct FileCsvReport;
impl FileCsvReport {
    fn write_file(&self, path: &Path, results: &ResultSet) -> Result<()> {
        let writer = Writer::from_path(path)?;
        let mut writer = CsvReportWriter { writer };
        writer.write_data(results)?;
        Ok(())
    }
}

impl Report for FileCsvReport {
    fn table_complete(
        &self,
        results: &ResultSet,
        context: &ReportContext,
        _formatter: &dyn ValueFormatter,
    ) {
        let path = context.report_path(results.kind(), ".csv");
        log_if_err!(self.write_file(&path, results));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::Algorithm;
    use crate::measurement::DurationFormatter;
    use crate::results::{FibResult, TableKind};
    use tempfile::tempdir;

    fn table(kind: TableKind, inputs: &[u64]) -> ResultSet {
        let mut results = ResultSet::new(kind);
        for algo in &[Algorithm::Iterative, Algorithm::FastDoubling] {
            results.extend(inputs.iter().map(|&n| {
                let (value, steps) = algo.compute(n);
                FibResult {
                    n,
                    value,
                    steps,
                    time_ms: 1.5,
                    algo: *algo,
                }
            }));
        }
        results
    }

    fn to_string(results: &ResultSet) -> String {
        let mut writer = CsvReportWriter {
            writer: Writer::from_writer(vec![]),
        };
        writer.write_data(results).unwrap();
        String::from_utf8(writer.writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn small_table_columns() {
        let csv = to_string(&table(TableKind::Small, &[0, 10]));
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "n,value,steps,time_ms,algo",
                "0,0,1,1.5,iterative",
                "10,55,10,1.5,iterative",
                "0,0,1,1.5,fast_doubling",
                "10,55,5,1.5,fast_doubling",
            ]
        );
    }

    #[test]
    fn large_table_columns() {
        let csv = to_string(&table(TableKind::Large, &[100]));
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "n,steps,time_ms,algo,digits",
                "100,100,1.5,iterative,21",
                "100,8,1.5,fast_doubling,21",
            ]
        );
    }

    #[test]
    fn empty_table_writes_nothing() {
        assert_eq!(to_string(&ResultSet::new(TableKind::Small)), "");
    }

    #[test]
    fn report_writes_file() {
        let dir = tempdir().unwrap();
        let context = ReportContext {
            output_directory: dir.path().to_owned(),
        };
        FileCsvReport.table_complete(
            &table(TableKind::Small, &[5]),
            &context,
            &DurationFormatter,
        );

        let written = std::fs::read_to_string(dir.path().join("fib_small.csv")).unwrap();
        assert!(written.starts_with("n,value,steps,time_ms,algo\n"));
        assert!(written.contains("5,5,5,1.5,iterative"));
    }
}
