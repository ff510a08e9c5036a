use ahash::AHashMap;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Labels the page uses for database problems. All collapse onto one generic dialect.
const SQL_ALIASES: &[&str] = &[
    "mysql",
    "mssql",
    "ms sql server",
    "sql server",
    "oracle",
    "postgresql",
    "postgres",
    "sqlite",
    "sql",
];

const TABULAR_ALIAS: &str = "pandas";

/// `(alias, canonical language)`. Versioned aliases fold into their base language and
/// TypeScript folds into JavaScript.
const CODE_ALIASES: &[(&str, &str)] = &[
    ("python", "python"),
    ("python3", "python"),
    ("python2", "python"),
    ("c++", "cpp"),
    ("cpp", "cpp"),
    ("java", "java"),
    ("c", "c"),
    ("c#", "csharp"),
    ("csharp", "csharp"),
    ("javascript", "javascript"),
    ("js", "javascript"),
    ("typescript", "javascript"),
    ("ts", "javascript"),
    ("go", "go"),
    ("golang", "go"),
    ("kotlin", "kotlin"),
    ("swift", "swift"),
    ("rust", "rust"),
    ("scala", "scala"),
    ("dart", "dart"),
];

static CODE_TABLE: LazyLock<AHashMap<&'static str, &'static str>> =
    LazyLock::new(|| CODE_ALIASES.iter().copied().collect());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlDialect {
    Generic,
}

impl SqlDialect {
    pub fn as_str(self) -> &'static str {
        match self {
            SqlDialect::Generic => "generic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Code,
    Sql,
    Tabular,
    Unknown,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Family::Code => "code",
            Family::Sql => "sql",
            Family::Tabular => "tabular",
            Family::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Canonical target derived from a raw language label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Classification {
    Sql { dialect: SqlDialect },
    Tabular,
    Code { language: String },
    Unknown,
}

impl Classification {
    pub fn code(language: impl Into<String>) -> Self {
        Classification::Code {
            language: language.into(),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Classification::Sql { .. } => Family::Sql,
            Classification::Tabular => Family::Tabular,
            Classification::Code { .. } => Family::Code,
            Classification::Unknown => Family::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Classification::Unknown)
    }

    /// Label used in headers and commit messages.
    pub fn canonical_label(&self) -> String {
        match self {
            Classification::Sql { dialect } => format!("sql ({})", dialect.as_str()),
            Classification::Tabular => TABULAR_ALIAS.to_string(),
            Classification::Code { language } => language.clone(),
            Classification::Unknown => "unknown".to_string(),
        }
    }
}

/// Maps a raw label to its classification. Total and case-insensitive.
pub fn classify(raw_label: &str) -> Classification {
    let label = raw_label.trim().to_lowercase();

    if SQL_ALIASES.contains(&label.as_str()) {
        return Classification::Sql {
            dialect: SqlDialect::Generic,
        };
    }

    if label == TABULAR_ALIAS {
        return Classification::Tabular;
    }

    match CODE_TABLE.get(label.as_str()) {
        Some(language) => Classification::code(*language),
        None => Classification::Unknown,
    }
}
