use globset::{GlobBuilder, GlobMatcher};

const RECURSIVE_DIR_SUFFIX: &str = "/**";

/// A glob compiled for matching bare entry names. Patterns that globset
/// cannot compile (an unclosed `[` for example) only match themselves
/// literally.
#[derive(Debug, Clone)]
pub struct NamePattern {
    source: String,
    matcher: Option<GlobMatcher>,
}

impl NamePattern {
    pub fn new(pattern: &str) -> Self {
        let matcher = match GlobBuilder::new(pattern).backslash_escape(false).build() {
            Ok(glob) => Some(glob.compile_matcher()),
            Err(e) => {
                tracing::warn!(pattern, error = %e, "Invalid ignore glob, matching literally");
                None
            }
        };
        Self {
            source: pattern.to_string(),
            matcher,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, name: &str) -> bool {
        match &self.matcher {
            Some(matcher) => matcher.is_match(name),
            None => self.source == name,
        }
    }
}

#[derive(Debug, Clone)]
pub enum IgnoreRule {
    /// Excludes any entry whose name matches.
    Glob(NamePattern),
    /// Written as `name/**`: excludes a directory whose name matches, and
    /// with it everything beneath.
    GlobRecursiveDir(NamePattern),
}

impl IgnoreRule {
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix(RECURSIVE_DIR_SUFFIX) {
            Some(base) if !base.is_empty() => Self::GlobRecursiveDir(NamePattern::new(base)),
            _ => Self::Glob(NamePattern::new(pattern)),
        }
    }

    fn matches(&self, name: &str, is_dir: bool) -> bool {
        match self {
            Self::Glob(pattern) => pattern.is_match(name),
            Self::GlobRecursiveDir(base) => is_dir && base.is_match(name),
        }
    }
}

/// Decides whether a directory entry is left out of a project structure.
/// Matching only ever sees the bare entry name, never its path, so a rule
/// for `build` hides nested `build` directories as well.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    rules: Vec<IgnoreRule>,
    ignore_hidden: bool,
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String], ignore_hidden: bool) -> Self {
        let rules = patterns.iter().map(|p| IgnoreRule::parse(p)).collect();
        Self {
            rules,
            ignore_hidden,
        }
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    pub fn should_ignore(&self, name: &str, is_dir: bool) -> bool {
        if self.ignore_hidden && name.starts_with('.') {
            return true;
        }
        self.rules.iter().any(|rule| rule.matches(name, is_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::{IgnoreMatcher, IgnoreRule};
    use crate::settings::config::DEFAULT_IGNORE_PATTERNS;
    use rstest::rstest;

    fn defaults(hidden: bool) -> IgnoreMatcher {
        let patterns: Vec<String> = DEFAULT_IGNORE_PATTERNS
            .iter()
            .map(|p| p.to_string())
            .collect();
        IgnoreMatcher::new(&patterns, hidden)
    }

    #[test]
    fn test_parse_rules() {
        assert!(matches!(IgnoreRule::parse("*.pyc"), IgnoreRule::Glob(_)));
        assert!(matches!(IgnoreRule::parse("logs/**"), IgnoreRule::GlobRecursiveDir(p) if p.as_str() == "logs"));
        assert!(matches!(IgnoreRule::parse("/**"), IgnoreRule::Glob(_)));
    }

    #[rstest]
    #[case("module.pyc", false, true)]
    #[case("__pycache__", true, true)]
    #[case("node_modules", true, true)]
    #[case("app.log", false, true)]
    #[case("s.yaml", false, true)]
    #[case("settings.yaml", false, true)]
    #[case("SensitiveConfig.json", false, true)]
    #[case("logs", true, true)]
    #[case("logs", false, false)]
    #[case("migrations", true, true)]
    #[case("main.py", false, false)]
    #[case("config.yaml", false, false)]
    #[case("src", true, false)]
    fn test_default_rules(#[case] name: &str, #[case] is_dir: bool, #[case] ignored: bool) {
        assert_eq!(defaults(false).should_ignore(name, is_dir), ignored);
    }

    #[test]
    fn test_hidden_policy() {
        assert!(defaults(true).should_ignore(".env", false));
        assert!(!defaults(false).should_ignore(".env", false));
        // `.git/**` still applies when hidden entries are shown
        assert!(defaults(false).should_ignore(".git", true));
        assert!(!defaults(false).should_ignore(".git", false));
    }

    #[test]
    fn test_character_classes_and_case() {
        let matcher = IgnoreMatcher::new(&["data[0-9].csv".to_string(), "[".to_string()], false);
        assert!(matcher.should_ignore("data7.csv", false));
        assert!(!matcher.should_ignore("dataX.csv", false));
        assert!(matcher.should_ignore("[", false));

        let matcher = IgnoreMatcher::new(&["*.LOG".to_string()], false);
        assert!(!matcher.should_ignore("app.log", false));
    }

    #[test]
    fn test_empty_rule_list() {
        let matcher = IgnoreMatcher::new(&[], false);
        assert!(matcher.rules().is_empty());
        assert!(!matcher.should_ignore("anything", true));
    }
}
