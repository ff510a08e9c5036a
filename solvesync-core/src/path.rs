use crate::classify::Classification;
use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ResolveError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Cannot resolve a path for an unclassified submission")]
    Unclassified,
}

const EXTENSIONS: &[(&str, &str)] = &[
    ("python", "py"),
    ("cpp", "cpp"),
    ("java", "java"),
    ("c", "c"),
    ("csharp", "cs"),
    ("javascript", "js"),
    ("go", "go"),
    ("kotlin", "kt"),
    ("swift", "swift"),
    ("rust", "rs"),
    ("scala", "scala"),
    ("dart", "dart"),
];

pub fn extension_for(language: &str) -> Option<&'static str> {
    EXTENSIONS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, ext)| *ext)
}

/// `two-sum` -> `two_sum`.
pub fn normalize_slug(slug: &str) -> String {
    slug.replace('-', "_")
}

/// Repository-relative location for a classified submission.
pub fn resolve_path(classification: &Classification, slug: &str) -> Result<String, ResolveError> {
    let file_stem = normalize_slug(slug);

    match classification {
        Classification::Sql { dialect } => {
            Ok(format!("database/{}/{file_stem}.sql", dialect.as_str()))
        }
        Classification::Tabular => Ok(format!("database/pandas/{file_stem}.py")),
        Classification::Code { language } => {
            let ext = extension_for(language)
                .ok_or_else(|| ResolveError::UnsupportedLanguage(language.clone()))?;
            Ok(format!("{language}/{file_stem}.{ext}"))
        }
        Classification::Unknown => Err(ResolveError::Unclassified),
    }
}
