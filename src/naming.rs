/// Canonical comparison token for a column label: trimmed, lowercased, and
/// stripped of everything outside `[a-z0-9_]`. A missing label yields `""`.
pub fn normalize_label(label: Option<&str>) -> String {
    match label {
        Some(raw) => normalize(raw),
        None => String::new(),
    }
}

pub fn normalize(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_spaces_case_and_punctuation() {
        assert_eq!(normalize("  Order ID "), "orderid");
        assert_eq!(normalize("Full_Name"), "full_name");
        assert_eq!(normalize("$Percent%"), "percent");
        assert_eq!(normalize("Kunde-Nr."), "kundenr");
    }

    #[test]
    fn punctuation_only_labels_normalize_to_empty() {
        assert_eq!(normalize("--"), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("名称"), "");
        assert_eq!(normalize_label(None), "");
    }

    #[test]
    fn normalize_is_a_fixed_point_on_its_output() {
        for raw in ["Dept.", "E-Mail Address", "id", "ÄÖÜ 42"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }
}
