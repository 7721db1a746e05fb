use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::Language;

/// What kind of declaration a rule captures. The kind decides whether the
/// captured token is eligible for path resolution: system/library includes
/// are recorded but never become edges or nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    LocalInclude,
    SystemInclude,
    Module,
    Namespace,
    StaticUsing,
    NamespaceDecl,
    Import,
    MultiImport,
    Require,
    From,
    DynamicImport,
    TypeImport,
    Use,
    Mod,
}

impl DeclarationKind {
    pub fn is_resolvable(self) -> bool {
        !matches!(self, DeclarationKind::SystemInclude)
    }
}

#[derive(Debug)]
pub struct Rule {
    pub pattern: Regex,
    pub kind: DeclarationKind,
}

/// Ordered per-language textual rules for pulling raw dependency tokens out
/// of file content. Matching is line-by-line against decoded text.
pub struct PatternRegistry {
    rules: HashMap<Language, Vec<Rule>>,
}

impl PatternRegistry {
    fn build() -> Self {
        use DeclarationKind::*;

        let mut rules: HashMap<Language, Vec<Rule>> = HashMap::new();
        let mut add = |lang: Language, pattern: &str, kind: DeclarationKind| {
            // Patterns are compile-time literals; a bad one is a programming
            // error, so panicking at registry construction is acceptable.
            let rule = Rule {
                pattern: Regex::new(pattern).expect("invalid builtin pattern"),
                kind,
            };
            rules.entry(lang).or_default().push(rule);
        };

        add(Language::C, r#"^\s*#include\s+"([^"]+)""#, LocalInclude);
        add(Language::C, r"^\s*#include\s+<([^>]+)>", SystemInclude);

        add(Language::Cpp, r#"^\s*#include\s+"([^"]+)""#, LocalInclude);
        add(Language::Cpp, r"^\s*#include\s+<([^>]+)>", SystemInclude);
        add(Language::Cpp, r"^\s*import\s+([^;]+);", Module);
        add(Language::Cpp, r"^\s*module\s+([^;]+);", Module);

        add(Language::CSharp, r"^\s*using\s+([\w.]+)\s*;", Namespace);
        add(
            Language::CSharp,
            r"^\s*using\s+static\s+([\w.]+)\s*;",
            StaticUsing,
        );
        add(Language::CSharp, r"^\s*namespace\s+([\w.]+)", NamespaceDecl);

        add(
            Language::Python,
            r"^\s*(?:from\s+([\w.]+)\s+)?import\s+([\w.]+)",
            Import,
        );
        add(Language::Python, r"^\s*import\s+([\w., ]+)", MultiImport);

        add(
            Language::JavaScript,
            r#"require\(['"]([^"']+)['"]\)"#,
            Require,
        );
        add(Language::JavaScript, r#"from\s+['"]([^"']+)['"]"#, From);
        add(Language::JavaScript, r#"import\s+['"]([^"']+)['"]"#, Import);
        add(
            Language::JavaScript,
            r#"import\(['"]([^"']+)['"]\)"#,
            DynamicImport,
        );

        add(Language::TypeScript, r#"import\s+['"]([^"']+)['"]"#, Import);
        add(Language::TypeScript, r#"from\s+['"]([^"']+)['"]"#, From);
        add(
            Language::TypeScript,
            r#"type\s+\w+\s*=\s*import\(['"]([^"']+)['"]\)"#,
            TypeImport,
        );

        add(Language::Rust, r"^\s*use\s+([\w:{}, ]+)", Use);
        add(Language::Rust, r"^\s*mod\s+(\w+)", Mod);

        add(Language::Go, r#"^\s*import\s+(?:\w+\s+)?"([^"]+)""#, Import);

        // java and kotlin are classified and counted but carry no rules.

        PatternRegistry { rules }
    }

    /// Shared registry; regexes are compiled exactly once per process.
    pub fn global() -> &'static PatternRegistry {
        static REGISTRY: OnceLock<PatternRegistry> = OnceLock::new();
        REGISTRY.get_or_init(PatternRegistry::build)
    }

    pub fn rules_for(&self, language: Language) -> &[Rule] {
        self.rules.get(&language).map_or(&[], Vec::as_slice)
    }
}
