use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    entities::{ProjectConfig, ProjectStructure},
    error::DomainError,
};

/// Longest package name the registry accepts.
pub const MAX_NAME_LENGTH: usize = 214;

const RESERVED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

const CORE_MODULE_NAMES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "worker_threads",
    "zlib",
];

const SPECIAL_CHARS: &[char] = &['~', '\'', '!', '(', ')', '*'];

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Centralized syntactic validation.
///
/// Every predicate is pure and total: malformed input yields `false` (or an
/// error list), never a panic.
pub struct Validator;

impl Validator {
    /// `true` iff `name` is acceptable as a new package name.
    pub fn is_valid_project_name(name: &str) -> bool {
        Self::project_name_errors(name).is_empty()
    }

    /// Every rule `name` violates, in a stable order. Empty iff valid.
    pub fn project_name_errors(name: &str) -> Vec<String> {
        let mut errors = Vec::new();

        if name.is_empty() {
            errors.push("name length must be greater than zero".to_string());
            return errors;
        }
        if name.starts_with('.') {
            errors.push("name cannot start with a period".to_string());
        }
        if name.starts_with('_') {
            errors.push("name cannot start with an underscore".to_string());
        }
        if name.trim() != name {
            errors.push("name cannot contain leading or trailing spaces".to_string());
        }

        let lower = name.to_lowercase();
        if RESERVED_NAMES.contains(&lower.as_str()) {
            errors.push(format!("{lower} is a reserved name"));
        }
        if CORE_MODULE_NAMES.contains(&lower.as_str()) {
            errors.push(format!("{name} is a core module name"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            errors.push(format!(
                "name cannot contain more than {MAX_NAME_LENGTH} characters"
            ));
        }
        if lower != name {
            errors.push("name cannot contain capital letters".to_string());
        }

        let last_segment = name.rsplit('/').next().unwrap_or(name);
        if last_segment.contains(SPECIAL_CHARS) {
            errors.push("name cannot contain special characters (\"~'!()*\")".to_string());
        }
        if !is_url_friendly(name) {
            errors.push("name can only contain URL-friendly characters".to_string());
        }

        errors
    }

    /// Validate a name, returning a structured error listing every violation.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        let errors = Self::project_name_errors(name);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidProjectName {
                name: name.to_string(),
                errors,
            })
        }
    }

    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_RE.is_match(email)
    }

    pub fn is_valid_url(input: &str) -> bool {
        url::Url::parse(input).is_ok()
    }

    /// Syntactic check only; the path need not exist.
    pub fn is_valid_path(input: &str) -> bool {
        !input.is_empty() && !input.contains('\0') && Path::new(input).components().count() > 0
    }

    pub fn is_valid_version(version: &str) -> bool {
        semver::Version::parse(version).is_ok()
    }

    pub fn validate_config(config: &ProjectConfig) -> Result<(), DomainError> {
        config.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}

/// Unreserved characters of RFC 3986 as `encodeURIComponent` leaves them.
fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')')
}

fn is_url_friendly(name: &str) -> bool {
    if name.chars().all(is_unreserved) {
        return true;
    }
    // `@scope/name` is the only place a '/' or '@' may appear.
    let Some(scoped) = name.strip_prefix('@') else {
        return false;
    };
    match scoped.split_once('/') {
        Some((scope, pkg)) => {
            !scope.is_empty()
                && !pkg.is_empty()
                && scope.chars().all(is_unreserved)
                && pkg.chars().all(is_unreserved)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        for name in ["demo", "demo-app", "demo_app", "socket.io", "app2"] {
            assert!(Validator::is_valid_project_name(name), "{name}");
        }
    }

    #[test]
    fn accepts_scoped_names() {
        assert!(Validator::is_valid_project_name("@acme/widgets"));
        assert!(Validator::project_name_errors("@acme/widgets").is_empty());
    }

    #[test]
    fn rejects_leading_period() {
        assert!(!Validator::is_valid_project_name(".hidden"));
        assert!(
            Validator::project_name_errors(".hidden")
                .iter()
                .any(|e| e.contains("period"))
        );
    }

    #[test]
    fn rejects_leading_underscore() {
        assert!(!Validator::is_valid_project_name("_private"));
    }

    #[test]
    fn rejects_capital_letters() {
        let errors = Validator::project_name_errors("MyApp");
        assert_eq!(errors, vec!["name cannot contain capital letters".to_string()]);
    }

    #[test]
    fn rejects_reserved_and_core_names() {
        assert!(!Validator::is_valid_project_name("node_modules"));
        assert!(!Validator::is_valid_project_name("favicon.ico"));
        assert!(!Validator::is_valid_project_name("fs"));
        assert!(!Validator::is_valid_project_name("http"));
    }

    #[test]
    fn rejects_overlong_names() {
        let name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(!Validator::is_valid_project_name(&name));
        assert!(Validator::is_valid_project_name(&"a".repeat(MAX_NAME_LENGTH)));
    }

    #[test]
    fn rejects_spaces_and_slashes() {
        assert!(!Validator::is_valid_project_name(" demo"));
        assert!(!Validator::is_valid_project_name("my app"));
        assert!(!Validator::is_valid_project_name("a/b"));
        assert!(!Validator::is_valid_project_name("@scope/"));
        assert!(!Validator::is_valid_project_name("@/name"));
    }

    #[test]
    fn rejects_special_characters() {
        let errors = Validator::project_name_errors("crazy!");
        assert!(errors.iter().any(|e| e.contains("special characters")));
    }

    #[test]
    fn empty_name_reports_single_error() {
        assert_eq!(Validator::project_name_errors("").len(), 1);
    }

    #[test]
    fn reports_every_violation() {
        let errors = Validator::project_name_errors(".Bad Name");
        assert!(errors.len() >= 3, "{errors:?}");
    }

    #[test]
    fn errors_empty_exactly_when_valid() {
        for name in ["ok", ".no", "Nope", "@a/b", "", "x y", "node_modules", "a~b"] {
            assert_eq!(
                Validator::is_valid_project_name(name),
                Validator::project_name_errors(name).is_empty(),
                "{name}"
            );
        }
    }

    #[test]
    fn validate_project_name_returns_structured_error() {
        let err = Validator::validate_project_name("UPPER").unwrap_err();
        assert!(matches!(err, DomainError::InvalidProjectName { .. }));
    }

    #[test]
    fn email_predicate() {
        assert!(Validator::is_valid_email("dev@example.com"));
        assert!(!Validator::is_valid_email("dev@example"));
        assert!(!Validator::is_valid_email("dev example@x.io"));
        assert!(!Validator::is_valid_email(""));
    }

    #[test]
    fn url_predicate() {
        assert!(Validator::is_valid_url("https://example.com/path?q=1"));
        assert!(!Validator::is_valid_url("not a url"));
        assert!(!Validator::is_valid_url(""));
    }

    #[test]
    fn path_predicate() {
        assert!(Validator::is_valid_path("./demo-app"));
        assert!(Validator::is_valid_path("/tmp/demo"));
        assert!(!Validator::is_valid_path(""));
        assert!(!Validator::is_valid_path("bad\0path"));
    }

    #[test]
    fn version_predicate() {
        assert!(Validator::is_valid_version("0.1.0"));
        assert!(Validator::is_valid_version("1.2.3-beta.1"));
        assert!(!Validator::is_valid_version("1.2"));
    }
}
