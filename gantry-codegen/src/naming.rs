//! Case conversion and naming conventions.

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld").
///
/// Splits on underscores, dashes, dots, and spaces.
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-', '.', ' '])
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a string to snake_case (e.g., "HelloWorld" -> "hello_world").
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.push(c.to_lowercase().next().unwrap());
    }
    result.replace(['-', '.', ' '], "_")
}

/// Convert a string to lowerCamelCase (e.g., "account_id" -> "accountID"
/// is NOT produced; this yields "accountId"). Used for generated local
/// variable names.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Wrap text into `// ` comment lines at roughly 77 columns, breaking on
/// word boundaries.
pub fn comment_text(text: &str) -> String {
    const WIDTH: usize = 77;
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > WIDTH {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
        .iter()
        .map(|l| format!("// {}", l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Language-specific naming conventions.
///
/// Defines how to transform declared names and handle reserved words.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a declared name to an exported type name.
    pub to_type: fn(&str) -> String,
    /// Transform a declared name to a file name.
    pub to_file: fn(&str) -> String,
    /// Transform a declared name to a local variable name.
    pub to_var: fn(&str) -> String,
    /// Reserved words in the target language.
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word.
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Transform into an exported type name.
    pub fn type_name(&self, name: &str) -> String {
        let transformed = (self.to_type)(name);
        self.safe_name(&transformed)
    }

    /// Transform into a file name.
    pub fn file_name(&self, name: &str) -> String {
        (self.to_file)(name)
    }

    /// Transform into a local variable name.
    pub fn var_name(&self, name: &str) -> String {
        let transformed = (self.to_var)(name);
        self.safe_name(&transformed)
    }
}

fn escape_go_reserved(name: &str) -> String {
    format!("{}_", name)
}

/// Initialisms kept upper case in exported Go identifiers.
const GO_INITIALISMS: &[&str] = &[
    "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID", "IP",
    "JSON", "JWT", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS",
    "TTL", "UDP", "UI", "UID", "URI", "URL", "UUID", "VM", "XML",
];

/// PascalCase with Go initialisms kept upper case (e.g. "account_id" ->
/// "AccountID", "path.json" -> "PathJSON").
pub fn to_go_type_name(s: &str) -> String {
    s.split(['_', '-', '.', ' '])
        .map(|part| {
            let upper = part.to_uppercase();
            if GO_INITIALISMS.contains(&upper.as_str()) {
                upper
            } else {
                let mut chars = part.chars();
                match chars.next() {
                    None => String::new(),
                    Some(c) => c.to_uppercase().chain(chars).collect(),
                }
            }
        })
        .collect()
}

/// Go naming conventions used for every derived identifier.
pub const GO_NAMING: NamingConvention = NamingConvention {
    to_type: to_go_type_name,
    to_file: to_snake_case,
    to_var: to_camel_case,
    reserved_words: &[
        "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
        "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
        "return", "select", "struct", "switch", "type", "var",
    ],
    escape_reserved: escape_go_reserved,
};

/// Canonical MIME header form of a header name (e.g. "x-request-id" ->
/// "X-Request-Id"), matching the keys of the request header multi-map.
pub fn canonical_header_key(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("hello"), "Hello");
        assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
        assert_eq!(to_pascal_case("path.json"), "PathJson");
        assert_eq!(to_pascal_case("my-service"), "MyService");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("HelloWorld"), "hello_world");
        assert_eq!(to_snake_case("hello-world"), "hello_world");
        assert_eq!(to_snake_case("Service"), "service");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("account_id"), "accountId");
        assert_eq!(to_camel_case("View"), "view");
        assert_eq!(to_camel_case("x"), "x");
    }

    #[test]
    fn test_go_naming_escapes_reserved() {
        assert_eq!(GO_NAMING.var_name("type"), "type_");
        assert_eq!(GO_NAMING.var_name("view"), "view");
        assert_eq!(GO_NAMING.type_name("account"), "Account");
    }

    #[test]
    fn test_go_type_name_initialisms() {
        assert_eq!(to_go_type_name("id"), "ID");
        assert_eq!(to_go_type_name("account_id"), "AccountID");
        assert_eq!(to_go_type_name("path.json"), "PathJSON");
        assert_eq!(to_go_type_name("name"), "Name");
    }

    #[test]
    fn test_canonical_header_key() {
        assert_eq!(canonical_header_key("x-request-id"), "X-Request-Id");
        assert_eq!(canonical_header_key("ACCEPT"), "Accept");
        assert_eq!(canonical_header_key("Location"), "Location");
    }

    #[test]
    fn test_comment_wrapping() {
        let short = comment_text("Server lists the endpoint HTTP handlers.");
        assert_eq!(short, "// Server lists the endpoint HTTP handlers.");

        let long = comment_text(&"word ".repeat(30));
        assert!(long.lines().count() > 1);
        assert!(long.lines().all(|l| l.starts_with("// ")));
    }
}
