//! Fence language labels.

const LANGUAGE_LABELS: &[(&str, &str)] = &[
    ("python", "PYTHON"),
    ("py", "PYTHON"),
    ("javascript", "JAVASCRIPT"),
    ("js", "JAVASCRIPT"),
    ("typescript", "TYPESCRIPT"),
    ("ts", "TYPESCRIPT"),
    ("java", "JAVA"),
    ("c", "C"),
    ("cpp", "C++"),
    ("c++", "C++"),
    ("csharp", "C#"),
    ("cs", "C#"),
    ("go", "GOLANG"),
    ("rust", "RUST"),
    ("swift", "SWIFT"),
    ("kotlin", "KOTLIN"),
    ("ruby", "RUBY"),
    ("rb", "RUBY"),
    ("php", "PHP"),
    ("r", "R"),
    ("sql", "SQL"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("bash", "BASH"),
    ("sh", "BASH"),
    ("shell", "SHELL"),
    ("json", "JSON"),
    ("yaml", "YAML"),
    ("yml", "YAML"),
    ("xml", "XML"),
    ("markdown", "MARKDOWN"),
    ("md", "MARKDOWN"),
    ("text", "TEXT"),
    ("txt", "TEXT"),
];

/// Display label for a fence info string: known aliases map to a canonical
/// name, unknown labels are uppercased, and an empty label becomes `CODE`.
pub fn language_label(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    if key.is_empty() {
        return "CODE".to_string();
    }
    LANGUAGE_LABELS
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| raw.trim().to_uppercase())
}
