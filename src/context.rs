//! Variable context used to render templates.
//!
//! A context is built in layers: template defaults first, then the derived
//! project fields, then caller supplied `--var` pairs. Later layers win.

use chrono::Datelike;
use indexmap::IndexMap;
use serde::Serialize;

use crate::constants::defaults;
use crate::error::{Error, Result};

/// Mapping from identifier to the string it renders to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Variables(IndexMap<String, String>);

impl Variables {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Inserts a value, replacing any previous value for the same key.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut variables = Variables::new();
        variables.extend(iter);
        variables
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Variables {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// The fixed set of project fields every template can rely on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields {
    pub name: String,
    pub description: String,
    pub python_version: String,
    pub license: String,
    pub author: String,
    pub email: String,
    pub year: i32,
}

impl ProjectFields {
    /// Creates fields for `name` with every other field at its default and the
    /// year taken from the local clock.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            description: defaults::DESCRIPTION.to_string(),
            python_version: defaults::PYTHON_VERSION.to_string(),
            license: defaults::LICENSE.to_string(),
            author: String::new(),
            email: String::new(),
            year: chrono::Local::now().year(),
        }
    }

    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Expands the fields into the derived template variables.
    pub fn to_variables(&self) -> Variables {
        let author = self.author.trim();
        let email = self.email.trim();

        let mut variables = Variables::new();
        variables.insert("project_name", self.name.trim());
        variables.insert("project_slug", self.slug());
        variables.insert("package_name", to_package_name(&self.name));
        variables.insert("description", self.description.trim());
        variables.insert("python_version", self.python_version.trim());
        variables.insert("license", self.license.trim());
        variables.insert("author", author);
        variables.insert("email", email);
        variables.insert("author_line", author_line(author, email));
        variables.insert("year", self.year.to_string());
        variables
    }
}

/// Builds the full rendering context.
///
/// Precedence, lowest first: template `defaults`, derived `fields`, `extra`.
pub fn build_variables(
    defaults: &IndexMap<String, String>,
    fields: &ProjectFields,
    extra: &Variables,
) -> Variables {
    let mut variables: Variables = defaults.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    variables.extend(fields.to_variables().iter());
    variables.extend(extra.iter());
    variables
}

/// Lowercases `value` and collapses every run of characters outside
/// `[a-z0-9]` into a single `separator`, dropping leading and trailing runs.
fn collapse(value: &str, separator: char) -> String {
    let lowered = value.trim().to_lowercase();
    let mut collapsed = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !collapsed.is_empty() {
                collapsed.push(separator);
            }
            pending_separator = false;
            collapsed.push(ch);
        } else {
            pending_separator = true;
        }
    }

    collapsed
}

/// Converts a project name into a hyphenated slug.
///
/// # Examples
/// ```
/// use scaffold::context::slugify;
///
/// assert_eq!(slugify("  My Cool Project! "), "my-cool-project");
/// assert_eq!(slugify("***"), "python-project");
/// ```
pub fn slugify(value: &str) -> String {
    let slug = collapse(value, '-');
    if slug.is_empty() {
        defaults::SLUG.to_string()
    } else {
        slug
    }
}

/// Converts a project name into an importable package identifier.
///
/// # Examples
/// ```
/// use scaffold::context::to_package_name;
///
/// assert_eq!(to_package_name("My Cool-Project"), "my_cool_project");
/// assert_eq!(to_package_name("3d engine"), "pkg_3d_engine");
/// ```
pub fn to_package_name(value: &str) -> String {
    let candidate = collapse(value, '_');
    if candidate.is_empty() {
        return defaults::PACKAGE_NAME.to_string();
    }
    if candidate.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("{}{candidate}", defaults::PACKAGE_PREFIX);
    }
    candidate
}

/// Formats the author for package metadata: `Name <email>`, `Name`, or empty.
pub fn author_line(author: &str, email: &str) -> String {
    match (author.is_empty(), email.is_empty()) {
        (false, false) => format!("{author} <{email}>"),
        (false, true) => author.to_string(),
        _ => String::new(),
    }
}

/// Checks identifier syntax: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Parses a single `key=value` pair. The key is trimmed, the value is kept as is.
pub fn parse_var(spec: &str) -> Result<(String, String)> {
    let invalid = |reason: &str| Error::InvalidVariableSpec {
        spec: spec.to_string(),
        reason: reason.to_string(),
    };

    let (key, value) = spec.split_once('=').ok_or_else(|| invalid("Use key=value format"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(invalid("Empty key is not allowed"));
    }
    if !is_identifier(key) {
        return Err(invalid("Key must match [A-Za-z_][A-Za-z0-9_]*"));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Parses every `key=value` pair, later pairs overriding earlier ones.
pub fn parse_vars<S: AsRef<str>>(specs: &[S]) -> Result<Variables> {
    let mut variables = Variables::new();
    for spec in specs {
        let (key, value) = parse_var(spec.as_ref())?;
        variables.insert(key, value);
    }
    Ok(variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("Acme"), "acme");
        assert_eq!(slugify("Hello,   World"), "hello-world");
        assert_eq!(slugify("--Already-Slugged--"), "already-slugged");
        assert_eq!(slugify("Café Bar"), "caf-bar");
        assert_eq!(slugify(""), "python-project");
        assert_eq!(slugify(" !!! "), "python-project");
    }

    #[test]
    fn package_name_uses_underscores_and_prefix() {
        assert_eq!(to_package_name("Acme Web-App"), "acme_web_app");
        assert_eq!(to_package_name("42 things"), "pkg_42_things");
        assert_eq!(to_package_name("__"), "python_project");
    }

    #[test]
    fn author_line_variants() {
        assert_eq!(author_line("Ada", "ada@example.com"), "Ada <ada@example.com>");
        assert_eq!(author_line("Ada", ""), "Ada");
        assert_eq!(author_line("", "ada@example.com"), "");
        assert_eq!(author_line("", ""), "");
    }

    #[test]
    fn identifier_syntax() {
        assert!(is_identifier("project_name"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("v2"));
        assert!(!is_identifier("2v"));
        assert!(!is_identifier("with-dash"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn parse_var_accepts_key_value_pairs() {
        assert_eq!(parse_var("ext=md").unwrap(), ("ext".into(), "md".into()));
        assert_eq!(parse_var(" key =a=b").unwrap(), ("key".into(), "a=b".into()));
        assert_eq!(parse_var("empty=").unwrap(), ("empty".into(), "".into()));
    }

    #[test]
    fn parse_var_rejects_malformed_specs() {
        for spec in ["novalue", "=value", "  =value", "1bad=x", "bad-key=x"] {
            assert!(
                matches!(parse_var(spec), Err(Error::InvalidVariableSpec { .. })),
                "expected '{spec}' to be rejected"
            );
        }
    }

    #[test]
    fn derived_fields_populate_every_key() {
        let fields = ProjectFields {
            author: " Ada ".into(),
            email: "ada@example.com".into(),
            year: 2024,
            ..ProjectFields::new(" Acme Tools ")
        };
        let variables = fields.to_variables();

        assert_eq!(variables.get("project_name"), Some("Acme Tools"));
        assert_eq!(variables.get("project_slug"), Some("acme-tools"));
        assert_eq!(variables.get("package_name"), Some("acme_tools"));
        assert_eq!(variables.get("author_line"), Some("Ada <ada@example.com>"));
        assert_eq!(variables.get("python_version"), Some(">=3.11"));
        assert_eq!(variables.get("license"), Some("MIT"));
        assert_eq!(variables.get("year"), Some("2024"));
        assert_eq!(variables.len(), 10);
    }

    #[test]
    fn caller_variables_override_derived_ones() {
        let mut defaults = IndexMap::new();
        defaults.insert("framework".to_string(), "fastapi".to_string());
        defaults.insert("license".to_string(), "Apache-2.0".to_string());

        let extra = parse_vars(&["license=BSD-3-Clause", "ext=md"]).unwrap();
        let variables = build_variables(&defaults, &ProjectFields::new("Acme"), &extra);

        assert_eq!(variables.get("framework"), Some("fastapi"));
        assert_eq!(variables.get("license"), Some("BSD-3-Clause"));
        assert_eq!(variables.get("ext"), Some("md"));
    }
}
