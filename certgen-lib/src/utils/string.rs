/// Normalize text by replacing control characters with spaces and collapsing
/// whitespace runs. Header cells in hand-edited dashboards routinely pick up
/// line breaks and doubled spaces; column lookup happens on the normalized
/// form.
pub fn normalize_string(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Make a document base name safe to use as an archive entry name.
/// Path separators and control characters come straight from student names.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_control() || matches!(c, '/' | '\\') {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return "unnamed".to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_collapses_whitespace_and_control_characters() {
        assert_eq!(
            normalize_string("Resultado do\nEstudante  Listening"),
            "Resultado do Estudante Listening"
        );
        assert_eq!(normalize_string("  Aluno\t"), "Aluno");
    }

    #[test]
    fn sanitization_neutralizes_path_separators() {
        assert_eq!(
            sanitize_file_name("Certificado_a/b\\c.pdf"),
            "Certificado_a_b_c.pdf"
        );
        assert_eq!(sanitize_file_name("   "), "unnamed");
    }
}
