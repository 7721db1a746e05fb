use super::{DeclarationKind, Language, PatternRegistry};

/// A raw dependency string pulled out of one source line, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportToken {
    pub raw: String,
    pub kind: DeclarationKind,
}

/// Applies the pattern registry to file content and yields cleaned tokens.
pub struct DependencyExtractor {
    registry: &'static PatternRegistry,
}

impl DependencyExtractor {
    pub fn new() -> Self {
        Self {
            registry: PatternRegistry::global(),
        }
    }

    /// Extract every candidate token from `content`. All rules run over all
    /// lines; every non-empty capture group is a candidate, and candidates
    /// holding comma-separated names are split into independent tokens.
    pub fn extract(&self, language: Language, content: &str) -> Vec<ImportToken> {
        let mut tokens = Vec::new();

        for rule in self.registry.rules_for(language) {
            for line in content.lines() {
                for captures in rule.pattern.captures_iter(line) {
                    for group in captures.iter().skip(1).flatten() {
                        for name in group.as_str().split(',') {
                            if let Some(raw) = clean_token(name) {
                                tokens.push(ImportToken {
                                    raw,
                                    kind: rule.kind,
                                });
                            }
                        }
                    }
                }
            }
        }

        tokens
    }
}

impl Default for DependencyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip trailing comment fragments, then drop brace/asterisk/semicolon and
/// whitespace characters. Returns `None` when nothing survives.
pub fn clean_token(raw: &str) -> Option<String> {
    let before_comment = raw
        .split("//")
        .next()
        .unwrap_or("")
        .split("/*")
        .next()
        .unwrap_or("")
        .trim();

    let cleaned: String = before_comment
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '*' | ';') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
