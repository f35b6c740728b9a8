use std::collections::HashSet;

/// Static description of a language's lexical rules.
#[derive(Debug)]
pub struct GrammarRules {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub line_comments: &'static [&'static str],
    pub block_comment: Option<(&'static str, &'static str)>,
    /// Delimiters that may span several lines (e.g. JS template strings).
    pub multiline_quotes: &'static [char],
    pub quotes: &'static [char],
    pub case_insensitive: bool,
}

const JS_KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
    "delete", "else", "export", "extends", "false", "finally", "for", "from", "function", "if",
    "import", "in", "instanceof", "interface", "let", "new", "null", "of", "return", "static",
    "super", "switch", "this", "throw", "true", "try", "type", "typeof", "undefined", "var",
    "void", "while", "yield", "require", "module",
];

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "boolean", "break", "case", "catch", "class", "double", "else", "enum",
    "extends", "false", "final", "finally", "for", "if", "implements", "import", "int",
    "interface", "long", "new", "null", "package", "private", "protected", "public", "record",
    "return", "static", "super", "switch", "this", "throw", "throws", "true", "try", "var",
    "void", "while",
];

const SHELL_KEYWORDS: &[&str] = &[
    "if", "then", "else", "elif", "fi", "for", "in", "do", "done", "while", "case", "esac",
    "function", "return", "export", "local", "sudo", "echo", "cd", "source",
];

const SQL_KEYWORDS: &[&str] = &[
    "select", "from", "where", "insert", "into", "values", "update", "set", "delete", "create",
    "table", "drop", "alter", "index", "on", "join", "left", "right", "inner", "outer", "group",
    "by", "order", "having", "limit", "and", "or", "not", "null", "primary", "key", "foreign",
    "references", "as", "distinct", "count", "begin", "commit", "rollback", "transaction",
    "default", "unique", "is", "in", "exists",
];

const YAML_KEYWORDS: &[&str] = &["true", "false", "yes", "no", "null", "on", "off"];

const DOCKERFILE_KEYWORDS: &[&str] = &[
    "from", "run", "cmd", "copy", "add", "workdir", "expose", "env", "entrypoint", "arg",
    "volume", "user", "label", "healthcheck", "as",
];

const JSON_KEYWORDS: &[&str] = &["true", "false", "null"];

/// Grammars known to the highlighter.
pub static GRAMMARS: &[GrammarRules] = &[
    GrammarRules {
        name: "javascript",
        aliases: &["js", "jsx", "node", "typescript", "ts", "tsx"],
        keywords: JS_KEYWORDS,
        line_comments: &["//"],
        block_comment: Some(("/*", "*/")),
        multiline_quotes: &['`'],
        quotes: &['"', '\''],
        case_insensitive: false,
    },
    GrammarRules {
        name: "java",
        aliases: &["kotlin", "spring"],
        keywords: JAVA_KEYWORDS,
        line_comments: &["//"],
        block_comment: Some(("/*", "*/")),
        multiline_quotes: &[],
        quotes: &['"', '\''],
        case_insensitive: false,
    },
    GrammarRules {
        name: "bash",
        aliases: &["sh", "shell", "zsh", "console"],
        keywords: SHELL_KEYWORDS,
        line_comments: &["#"],
        block_comment: None,
        multiline_quotes: &[],
        quotes: &['"', '\''],
        case_insensitive: false,
    },
    GrammarRules {
        name: "sql",
        aliases: &["postgresql", "mysql", "sqlite"],
        keywords: SQL_KEYWORDS,
        line_comments: &["--"],
        block_comment: Some(("/*", "*/")),
        multiline_quotes: &[],
        quotes: &['\''],
        case_insensitive: true,
    },
    GrammarRules {
        name: "yaml",
        aliases: &["yml", "ansible"],
        keywords: YAML_KEYWORDS,
        line_comments: &["#"],
        block_comment: None,
        multiline_quotes: &[],
        quotes: &['"', '\''],
        case_insensitive: true,
    },
    GrammarRules {
        name: "dockerfile",
        aliases: &["docker"],
        keywords: DOCKERFILE_KEYWORDS,
        line_comments: &["#"],
        block_comment: None,
        multiline_quotes: &[],
        quotes: &['"', '\''],
        case_insensitive: true,
    },
    GrammarRules {
        name: "json",
        aliases: &["mongodb", "mongo"],
        keywords: JSON_KEYWORDS,
        line_comments: &[],
        block_comment: None,
        multiline_quotes: &[],
        quotes: &['"'],
        case_insensitive: false,
    },
    GrammarRules {
        name: "properties",
        aliases: &["ini", "env"],
        keywords: &[],
        line_comments: &["#", "!"],
        block_comment: None,
        multiline_quotes: &[],
        quotes: &[],
        case_insensitive: false,
    },
];

/// Finds the grammar rules for a language tag or one of its aliases.
#[must_use]
pub fn find_rules(language: &str) -> Option<&'static GrammarRules> {
    let needle = language.trim().to_ascii_lowercase();
    GRAMMARS
        .iter()
        .find(|rules| rules.name == needle || rules.aliases.iter().any(|alias| *alias == needle))
}

/// A grammar ready for lexing.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: &'static GrammarRules,
    keywords: HashSet<&'static str>,
}

impl Grammar {
    #[must_use]
    pub fn compile(rules: &'static GrammarRules) -> Self {
        Self {
            rules,
            keywords: rules.keywords.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.rules.name
    }

    #[must_use]
    pub fn rules(&self) -> &'static GrammarRules {
        self.rules
    }

    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        if self.rules.case_insensitive {
            self.keywords.contains(word.to_ascii_lowercase().as_str())
        } else {
            self.keywords.contains(word)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_canonical_grammar() {
        assert_eq!(find_rules("YML").map(|s| s.name), Some("yaml"));
        assert_eq!(find_rules("ts").map(|s| s.name), Some("javascript"));
        assert_eq!(find_rules("sh").map(|s| s.name), Some("bash"));
        assert!(find_rules("brainfuck").is_none());
    }

    #[test]
    fn sql_keywords_ignore_case() {
        let grammar = Grammar::compile(find_rules("sql").unwrap());
        assert!(grammar.is_keyword("SELECT"));
        assert!(grammar.is_keyword("select"));

        let js = Grammar::compile(find_rules("js").unwrap());
        assert!(js.is_keyword("const"));
        assert!(!js.is_keyword("CONST"));
    }
}
