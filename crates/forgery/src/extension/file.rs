//! MIME types, file extensions, and freshly created files.

use std::env;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::distr::Alphanumeric;

use crate::error::GenerationError;
use crate::extension::{Extension, Formats, unsupported};
use crate::generator::Generator;
use crate::random::RandomSource;
use crate::value::{Args, Value};

const FORMATS: &[&str] = &["mimeType", "extension", "filePath"];

const FILE_PREFIX: &str = "forgery";
const NAME_LENGTH: usize = 10;

const MIME_TYPES: [(&str, &str); 20] = [
    ("application/json", "json"),
    ("application/pdf", "pdf"),
    ("application/xml", "xml"),
    ("application/zip", "zip"),
    ("application/gzip", "gz"),
    ("application/msword", "doc"),
    ("audio/mpeg", "mp3"),
    ("audio/ogg", "oga"),
    ("audio/wav", "wav"),
    ("image/gif", "gif"),
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/svg+xml", "svg"),
    ("image/webp", "webp"),
    ("text/css", "css"),
    ("text/csv", "csv"),
    ("text/html", "html"),
    ("text/plain", "txt"),
    ("video/mp4", "mp4"),
    ("video/x-msvideo", "avi"),
];

/// Produces MIME types (`video/x-msvideo`) and extensions (`avi`).
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExtension;

impl FileExtension {
    fn pick(random: &RandomSource) -> (&'static str, &'static str) {
        random
            .choose(&MIME_TYPES)
            .copied()
            .unwrap_or(("text/plain", "txt"))
    }

    /// Returns a MIME type.
    #[must_use]
    pub fn mime_type(random: &RandomSource) -> &'static str {
        Self::pick(random).0
    }

    /// Returns a file extension without the dot.
    #[must_use]
    pub fn extension(random: &RandomSource) -> &'static str {
        Self::pick(random).1
    }

    /// Creates an empty file with a random name and extension in
    /// `directory` and returns its path.
    ///
    /// The file is never overwritten: a name that already exists fails.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::FileError`] when the file cannot be
    /// created.
    pub fn file_path(random: &RandomSource, directory: &Path) -> Result<PathBuf, GenerationError> {
        let stem: String = random.with_rng(|rng| {
            (0..NAME_LENGTH)
                .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
                .collect()
        });
        let path = directory.join(format!("{FILE_PREFIX}{stem}.{}", Self::extension(random)));
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| GenerationError::FileError {
                format: "filePath".to_owned(),
                path: path.clone(),
                message: e.to_string(),
            })?;
        Ok(path)
    }
}

impl Formats for FileExtension {
    fn format_names(&self) -> &'static [&'static str] {
        FORMATS
    }

    fn call(
        &self,
        name: &str,
        generator: &mut Generator,
        args: Args<'_>,
    ) -> Result<Value, GenerationError> {
        let random = generator.random();
        match name {
            "mimeType" => Ok(Self::mime_type(random).into()),
            "extension" => Ok(Self::extension(random).into()),
            "filePath" => {
                let directory = args.opt_str(0)?.map_or_else(env::temp_dir, PathBuf::from);
                let path = Self::file_path(random, &directory)?;
                Ok(Value::Str(path.display().to_string()))
            }
            _ => Err(unsupported(name)),
        }
    }
}

impl Extension for FileExtension {}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn mime_types_have_a_slash() {
        let random = RandomSource::seeded(2);
        for _ in 0..50 {
            assert!(FileExtension::mime_type(&random).contains('/'));
        }
    }

    #[test]
    fn extensions_come_without_a_dot() {
        let random = RandomSource::seeded(2);
        for _ in 0..50 {
            let extension = FileExtension::extension(&random);
            assert!(!extension.starts_with('.'));
            assert!(MIME_TYPES.iter().any(|(_, known)| *known == extension));
        }
    }

    #[test]
    fn file_paths_point_at_new_empty_files() {
        let random = RandomSource::seeded(4);
        let path = FileExtension::file_path(&random, &env::temp_dir()).expect("file created");

        let metadata = fs::metadata(&path).expect("file exists");
        fs::remove_file(&path).expect("remove file");
        assert_eq!(metadata.len(), 0);
        let extension = path.extension().and_then(|e| e.to_str()).expect("extension");
        assert!(MIME_TYPES.iter().any(|(_, known)| *known == extension));
        let name = path.file_name().and_then(|n| n.to_str()).expect("file name");
        assert!(name.starts_with(FILE_PREFIX), "{name}");
    }

    #[test]
    fn missing_directories_are_reported() {
        let random = RandomSource::seeded(4);
        let directory = env::temp_dir().join("forgery-no-such-directory").join("nested");

        let err = FileExtension::file_path(&random, &directory).expect_err("no directory");
        assert!(matches!(err, GenerationError::FileError { ref format, .. } if format == "filePath"));
    }
}
