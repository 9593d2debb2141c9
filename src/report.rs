// src/report.rs
//! CSV output of evaluation rows.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::eval::EvalRow;

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write one comma-separated row, quoting fields that need it.
pub fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}

/// `train_size,test_size,<classifier names…>`, taken from the first row.
pub fn header(rows: &[EvalRow]) -> Vec<String> {
    let mut out = vec!["train_size".to_string(), "test_size".to_string()];
    if let Some(first) = rows.first() {
        out.extend(first.scores.iter().map(|(name, _)| name.to_string()));
    }
    out
}

pub fn to_record(row: &EvalRow) -> Vec<String> {
    let mut out = vec![row.train_size.to_string(), row.test_size.to_string()];
    out.extend(row.scores.iter().map(|(_, s)| format!("{s:.1}")));
    out
}

pub fn write_eval_report(path: &Path, rows: &[EvalRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let head = header(rows);
    if let Some(bad) = rows.iter().find(|r| r.scores.len() + 2 != head.len()) {
        return Err(Error::Csv(format!(
            "row for train size {} has {} scores, header has {}",
            bad.train_size,
            bad.scores.len(),
            head.len() - 2
        )));
    }

    let mut w = BufWriter::new(File::create(path)?);
    write_row(&mut w, &head)?;
    for row in rows {
        write_row(&mut w, &to_record(row))?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_only_when_needed() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["plain".into(), "a,b".into(), "say \"hi\"".into()]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "plain,\"a,b\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn header_without_rows_has_only_sizes() {
        assert_eq!(header(&[]), ["train_size", "test_size"]);
    }
}
