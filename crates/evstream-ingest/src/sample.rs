use crate::error::Result;
use std::path::Path;

/// Copy the header plus the first `rows` data rows of a raw CSV.
///
/// Rows are copied verbatim (no parsing), so any column layout works; this
/// exists to cut a large capture down to a dataset the pipeline can be
/// exercised on quickly.
pub fn sample_raw(input: &Path, output: &Path, rows: usize) -> Result<usize> {
    let mut reader = csv::Reader::from_path(input)?;
    let mut writer = csv::Writer::from_path(output)?;

    writer.write_record(reader.headers()?)?;

    let mut written = 0;
    for record in reader.records().take(rows) {
        writer.write_record(&record?)?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_first_rows_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("full.csv");
        let output = dir.path().join("sample.csv");
        std::fs::write(&input, "a,b\n1,2\n3,4\n5,6\n").unwrap();

        let written = sample_raw(&input, &output, 2).unwrap();
        assert_eq!(written, 2);

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content, "a,b\n1,2\n3,4\n");
    }

    #[test]
    fn test_short_input_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("full.csv");
        let output = dir.path().join("sample.csv");
        std::fs::write(&input, "a,b\n1,2\n").unwrap();

        assert_eq!(sample_raw(&input, &output, 10).unwrap(), 1);
    }
}
