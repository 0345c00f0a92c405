use std::path::Path;

use anyhow::Context;

/// Queries from `--search` flags, or else from `input_file` one per line.
///
/// Lines are trimmed and blank ones dropped.
///
/// # Errors
///
/// Fails if no flags were given and the file cannot be read, or if the
/// resolved list is empty.
pub(crate) fn resolve_queries(search: &[String], input_file: &Path) -> anyhow::Result<Vec<String>> {
    let queries = if search.is_empty() {
        let contents = std::fs::read_to_string(input_file).with_context(|| {
            format!(
                "no --search given and could not read {}",
                input_file.display()
            )
        })?;
        clean(contents.lines())
    } else {
        clean(search.iter().map(String::as_str))
    };

    if queries.is_empty() {
        anyhow::bail!(
            "no search queries: pass -s/--search or list queries in {}",
            input_file.display()
        );
    }
    Ok(queries)
}

fn clean<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
