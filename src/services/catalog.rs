use std::{fs::File, io::Read, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Catalog, MovieRecord};

/// Columns every catalog file must provide
pub const REQUIRED_COLUMNS: [&str; 5] = ["nom", "date", "rate", "resume", "cover"];

/// Errors raised while ingesting the catalog. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "The '{column}' column was not found in the catalog. Available columns: {}",
        .available.join(", ")
    )]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Malformed catalog data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid catalog row at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

/// Raw row as laid out in the catalog file
#[derive(Debug, Deserialize)]
struct CatalogRow {
    nom: String,
    date: i32,
    rate: f64,
    resume: String,
    cover: String,
}

impl From<CatalogRow> for MovieRecord {
    fn from(row: CatalogRow) -> Self {
        MovieRecord {
            title: row.nom,
            year: row.date,
            rating: row.rate,
            description: row.resume,
            cover: row.cover,
        }
    }
}

/// Loads the catalog from a CSV file on disk
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Loading catalog");

    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;

    read_catalog(file)
}

/// Reads a catalog from any CSV source
///
/// Every column in [`REQUIRED_COLUMNS`] must be present; extra columns are
/// ignored. Rows must carry a non-empty title and a rating within 0-10.
pub fn read_catalog<R: Read>(source: R) -> Result<Catalog, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let available: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if let Some(column) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !available.iter().any(|header| header == *column))
    {
        return Err(CatalogError::MissingColumn {
            column: column.to_string(),
            available,
        });
    }

    let mut movies = Vec::new();
    for (index, row) in reader.deserialize::<CatalogRow>().enumerate() {
        let row = row?;
        // Line 1 is the header
        let line = index + 2;

        if row.nom.trim().is_empty() {
            return Err(CatalogError::InvalidRecord {
                line,
                reason: "empty title".to_string(),
            });
        }
        if !(0.0..=10.0).contains(&row.rate) {
            return Err(CatalogError::InvalidRecord {
                line,
                reason: format!("rating {} is outside 0-10", row.rate),
            });
        }

        movies.push(MovieRecord::from(row));
    }

    tracing::info!(movie_count = movies.len(), "Catalog loaded");
    Ok(Catalog::new(movies))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_catalog() {
        let data = "\
nom,date,rate,resume,cover,extra
Heat,1995,8.3,A heist crew and a detective,heat.jpg,ignored
Alien,1979,8.5,\"A crew, a ship, a creature\",alien.jpg,ignored
";
        let catalog = read_catalog(data.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        let alien = catalog.get(1).unwrap();
        assert_eq!(alien.title, "Alien");
        assert_eq!(alien.year, 1979);
        assert_eq!(alien.rating, 8.5);
        assert_eq!(alien.description, "A crew, a ship, a creature");
        assert_eq!(alien.cover, "alien.jpg");
    }

    #[test]
    fn test_missing_column_lists_available_columns() {
        let data = "nom,date,rate,cover\nHeat,1995,8.3,heat.jpg\n";
        let err = read_catalog(data.as_bytes()).unwrap_err();

        match &err {
            CatalogError::MissingColumn { column, available } => {
                assert_eq!(column, "resume");
                assert_eq!(available, &vec!["nom", "date", "rate", "cover"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "The 'resume' column was not found in the catalog. Available columns: nom, date, rate, cover"
        );
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let data = "nom,date,rate,resume,cover\n,1995,8.3,No title here,x.jpg\n";
        let err = read_catalog(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let data = "nom,date,rate,resume,cover\nHeat,1995,11.0,Heist,heat.jpg\n";
        let err = read_catalog(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("outside 0-10"));
    }

    #[test]
    fn test_non_numeric_year_is_rejected() {
        let data = "nom,date,rate,resume,cover\nHeat,soon,8.3,Heist,heat.jpg\n";
        assert!(matches!(
            read_catalog(data.as_bytes()),
            Err(CatalogError::Csv(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_catalog("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
