//! Instance-file plumbing shared by all problem adapters.
//!
//! Reading a structured text instance, discovering the inputs of a directory,
//! deriving the instance id from a file name and writing the result file all
//! live here; the adapters own what the lines mean and how a solution is
//! formatted.
//!
//! Output files follow the project convention
//! `{problem-number}_{problem-name}{instance-id}_{value}_saida.txt`,
//! e.g. `1_mochila10_295_saida.txt`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ResultExt, SolverError};

/// File-name prefixes instance ids are stripped from: `Mochila10.txt` → `10`.
const INSTANCE_PREFIXES: [&str; 6] = ["Mochila", "Entrada ", "PDG", "PEU", "Circuito", "Rainhas"];

/// A formatted result, ready to be written next to its siblings.
#[derive(Debug, Clone)]
pub struct SolvedInstance {
    /// Output file name following the project convention.
    pub file_name: String,
    /// Full output body.
    pub body: String,
    /// One console line summarizing the run.
    pub summary: String,
}

/// Reads an instance file into trimmed lines.
pub fn read_instance_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text.lines().map(|line| line.trim().to_string()).collect())
}

/// Lists the `.txt` instance files of a directory in sorted order.
pub fn list_instances(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();
    Ok(files)
}

/// Derives the instance id from a file name by stripping the known prefixes.
pub fn instance_id(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    for prefix in INSTANCE_PREFIXES {
        if let Some(rest) = stem.strip_prefix(prefix) {
            return rest.to_string();
        }
    }
    stem
}

/// Builds an output file name per the project convention.
pub fn output_name(
    problem_number: u8,
    problem_name: &str,
    instance: &str,
    value: impl std::fmt::Display,
) -> String {
    format!("{problem_number}_{problem_name}{instance}_{value}_saida.txt")
}

/// Default output directory: a `saidas` sibling of the input directory.
pub fn default_output_dir(input_dir: &Path) -> PathBuf {
    input_dir
        .parent()
        .unwrap_or(input_dir)
        .join("saidas")
}

/// Writes an output file, creating parent directories as needed.
pub fn write_output(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, body)?;
    Ok(())
}

/// Parses one whitespace/tab-separated line of integers.
pub fn parse_ints(line: &str, what: &str) -> Result<Vec<i64>> {
    line.split_whitespace()
        .map(|token| token.parse::<i64>().context(format!("{what}: bad integer '{token}'")))
        .collect()
}

/// Parses one line of floats that may use a decimal comma.
pub fn parse_floats(line: &str, what: &str) -> Result<Vec<f64>> {
    line.split_whitespace()
        .map(|token| {
            token
                .replace(',', ".")
                .parse::<f64>()
                .context(format!("{what}: bad number '{token}'"))
        })
        .collect()
}

/// Returns line `index` of an instance or a parse error naming what was
/// expected there.
pub fn expect_line<'a>(lines: &'a [String], index: usize, what: &str) -> Result<&'a str> {
    lines
        .get(index)
        .map(|line| line.as_str())
        .ok_or_else(|| SolverError::Parse(format!("missing line {}: {what}", index + 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_id_strips_known_prefixes() {
        assert_eq!(instance_id(Path::new("Mochila10.txt")), "10");
        assert_eq!(instance_id(Path::new("inputs/PDG2.txt")), "2");
        assert_eq!(instance_id(Path::new("Rainhas8.txt")), "8");
        assert_eq!(instance_id(Path::new("Entrada 3.txt")), "3");
        assert_eq!(instance_id(Path::new("unknown5.txt")), "unknown5");
    }

    #[test]
    fn test_output_name_convention() {
        assert_eq!(output_name(1, "mochila", "10", 295), "1_mochila10_295_saida.txt");
        assert_eq!(output_name(6, "rainhas", "8", 0), "6_rainhas8_0_saida.txt");
    }

    #[test]
    fn test_parse_ints_accepts_tabs_and_spaces() {
        assert_eq!(parse_ints("1\t2  3", "row").unwrap(), vec![1, 2, 3]);
        assert!(parse_ints("1 x 3", "row").is_err());
    }

    #[test]
    fn test_parse_floats_accepts_decimal_comma() {
        let values = parse_floats("1,5\t2.25", "coords").unwrap();
        assert_eq!(values, vec![1.5, 2.25]);
    }

    #[test]
    fn test_expect_line_reports_missing() {
        let lines = vec!["10".to_string()];
        assert_eq!(expect_line(&lines, 0, "capacity").unwrap(), "10");
        assert!(expect_line(&lines, 1, "values").is_err());
    }

    #[test]
    fn test_default_output_dir_is_sibling() {
        let dir = default_output_dir(Path::new("/data/entradas"));
        assert_eq!(dir, PathBuf::from("/data/saidas"));
    }
}
