use relational::error::{Error, ErrorKind};

const DEFAULT_MAX_BATCH_SIZE: usize = 128;

/// Provider options, read from the query parameters of a connection string such as
/// `file:app.db?returning=true&max_batch_size=64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteOptions {
    /// The database file, without the `file:` scheme.
    pub file_path: String,
    /// Use `RETURNING` clauses, available since SQLite 3.35.
    pub returning: bool,
    /// The maximum number of modification commands per batch.
    pub max_batch_size: usize,
}

impl Default for SqliteOptions {
    fn default() -> Self {
        Self {
            file_path: String::new(),
            returning: false,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl TryFrom<&str> for SqliteOptions {
    type Error = Error;

    fn try_from(connection_string: &str) -> relational::Result<Self> {
        let normalized = connection_string.trim_start_matches("file:");

        let (file_path, query) = match normalized.split_once('?') {
            Some((path, query)) => (path, query),
            None => (normalized, ""),
        };

        let mut options = SqliteOptions {
            file_path: file_path.to_owned(),
            ..Default::default()
        };

        for (k, v) in url::form_urlencoded::parse(query.as_bytes()) {
            match k.as_ref() {
                "returning" => {
                    options.returning = v
                        .parse()
                        .map_err(|_| Error::invalid_options(format!("`returning` must be a boolean, got `{v}`")))?;
                }
                "max_batch_size" => {
                    let as_int: usize = v.parse().map_err(|e: std::num::ParseIntError| {
                        let mut builder = Error::builder(ErrorKind::InvalidOptions(format!(
                            "`max_batch_size` must be a positive integer, got `{v}`"
                        )));

                        builder.set_original_message(e.to_string());
                        builder.build()
                    })?;

                    if as_int == 0 {
                        return Err(Error::invalid_options("`max_batch_size` must be at least 1"));
                    }

                    options.max_batch_size = as_int;
                }
                _ => {
                    tracing::debug!(message = "Ignoring unknown SQLite option", option = &*k);
                }
            };
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_parameters() {
        let options = SqliteOptions::try_from("file:app.db").unwrap();

        assert_eq!("app.db", options.file_path);
        assert!(!options.returning);
        assert_eq!(128, options.max_batch_size);
    }

    #[test]
    fn parameters_override_defaults() {
        let options = SqliteOptions::try_from("file:dev.db?returning=true&max_batch_size=64&mode=rwc").unwrap();

        assert_eq!("dev.db", options.file_path);
        assert!(options.returning);
        assert_eq!(64, options.max_batch_size);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = SqliteOptions::try_from("file:dev.db?max_batch_size=lots").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidOptions(_)));
        assert_eq!(Some("invalid digit found in string"), err.original_message());

        let err = SqliteOptions::try_from("file:dev.db?max_batch_size=0").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidOptions(_)));

        let err = SqliteOptions::try_from("file:dev.db?returning=yes").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidOptions(_)));
    }
}
