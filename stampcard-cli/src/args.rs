//! Command-line arguments for `stampcard`.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Command-line arguments accepted by the `stampcard` binary.
#[derive(Parser, Debug)]
#[command(
    name = "stampcard",
    version,
    about = "Search, sort and print stampcard records as a table"
)]
pub(crate) struct Cli {
    /// JSON file holding an array of records.
    #[arg(value_name = "ROWS_JSON")]
    pub(crate) rows: PathBuf,
    #[arg(
        long,
        value_name = "KEYS",
        value_delimiter = ',',
        help = "Columns to show, in order (default: fields of the first record)"
    )]
    pub(crate) columns: Vec<String>,
    #[arg(
        long,
        value_name = "KEYS",
        value_delimiter = ',',
        help = "Columns that can be sorted (default: all)"
    )]
    pub(crate) sortable: Vec<String>,
    #[arg(
        long = "search-fields",
        value_name = "KEYS",
        value_delimiter = ',',
        help = "Fields the search matches against (default: all columns)"
    )]
    pub(crate) search_fields: Vec<String>,
    #[arg(short, long, value_name = "TEXT", help = "Search query to apply")]
    pub(crate) query: Option<String>,
    #[arg(
        long,
        value_name = "N",
        help = "Select suggestion N (1-based) after the query applies"
    )]
    pub(crate) pick: Option<usize>,
    #[arg(
        long,
        value_name = "KEY",
        action = ArgAction::Append,
        help = "Click a column header; repeat to toggle direction"
    )]
    pub(crate) click: Vec<String>,
    #[arg(
        long,
        value_name = "KEY=DELTA",
        action = ArgAction::Append,
        value_parser = parse_resize,
        help = "Drag a column's resize handle by DELTA pixels"
    )]
    pub(crate) resize: Vec<(String, i32)>,
    #[arg(
        long = "table-key",
        value_name = "KEY",
        help = "Persist widths and sort under this key (default: not persisted)"
    )]
    pub(crate) table_key: Option<String>,
    #[arg(
        long = "respect-stored-sort",
        help = "Restore the persisted sort instead of starting unsorted"
    )]
    pub(crate) respect_stored_sort: bool,
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "STAMPCARD_CONFIG",
        help = "Configuration file (default: config.toml in the platform config directory)"
    )]
    pub(crate) config: Option<PathBuf>,
    #[arg(short, long, help = "Log at debug level")]
    pub(crate) verbose: bool,
}

fn parse_resize(s: &str) -> Result<(String, i32), String> {
    let (key, delta) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=DELTA, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("missing column key in '{s}'"));
    }
    let delta = delta
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid delta in '{s}': {e}"))?;
    Ok((key.to_string(), delta))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resize_pairs() {
        assert_eq!(parse_resize("name=-40"), Ok(("name".to_string(), -40)));
        assert!(parse_resize("name").is_err());
        assert!(parse_resize("=5").is_err());
    }

    #[test]
    fn accepts_repeated_flags() {
        let cli = Cli::parse_from([
            "stampcard",
            "rows.json",
            "--columns",
            "name,email",
            "--click",
            "name",
            "--click",
            "name",
            "--resize",
            "name=30",
        ]);
        assert_eq!(cli.columns, vec!["name", "email"]);
        assert_eq!(cli.click.len(), 2);
        assert_eq!(cli.resize, vec![("name".to_string(), 30)]);
    }
}
