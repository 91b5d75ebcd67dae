use std::fs::File;
use std::path::Path;

pub(crate) fn deserialize_csv_file<T>(path: &Path) -> Result<Vec<T>, std::io::Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    Ok(deserialize_csv(file))
}

/// Malformed records are skipped rather than failing the whole load.
pub(crate) fn deserialize_csv<T, R>(reader: R) -> Vec<T>
where
    T: for<'de> serde::Deserialize<'de>,
    R: std::io::Read,
{
    csv::Reader::from_reader(reader)
        .deserialize()
        .filter_map(Result::ok)
        .collect::<Vec<T>>()
}
