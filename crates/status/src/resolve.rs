//! Exact-then-fuzzy matching of free text against an ordered label set.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Folds `s` for comparison: canonically decomposed, lowercase, combining marks stripped, and
/// `_`, `-` and whitespace removed.
///
/// Precomposed and decomposed spellings of the same label fold to the same string.
///
/// ```
/// assert_eq!(cuida_status::normalize("Licença_Médica"), "licencamedica");
/// assert_eq!(cuida_status::normalize("Licenc\u{327}a_Me\u{301}dica"), "licencamedica");
/// ```
pub fn normalize(s: &str) -> String {
    s.nfd()
        .flat_map(char::to_lowercase)
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
        .collect()
}

/// Resolves `candidate` to a member of `canonical`, returning its index.
///
/// Matching is tiered:
/// 1. exact, case-sensitive equality
/// 2. equality after [`normalize`]
/// 3. containment of either normalised string in the other; the longest normalised member
///    wins and ties go to the earlier member
///
/// A candidate that normalises to an empty string never matches.
pub fn resolve_index(candidate: &str, canonical: &[&str]) -> Option<usize> {
    if let Some(i) = canonical.iter().position(|label| *label == candidate) {
        return Some(i);
    }

    let wanted = normalize(candidate);
    if wanted.is_empty() {
        return None;
    }

    let folded: Vec<String> = canonical.iter().map(|label| normalize(label)).collect();

    if let Some(i) = folded.iter().position(|label| *label == wanted) {
        tracing::trace!(candidate, label = canonical[i], "status matched after folding");
        return Some(i);
    }

    let mut best: Option<(usize, usize)> = None;
    for (i, label) in folded.iter().enumerate() {
        if label.is_empty() || !(label.contains(&wanted) || wanted.contains(label.as_str())) {
            continue;
        }
        let len = label.chars().count();
        if best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((i, len));
        }
    }

    match best {
        Some((i, _)) => {
            tracing::debug!(candidate, label = canonical[i], "status matched by containment");
            Some(i)
        }
        None => {
            tracing::debug!(candidate, "status did not resolve");
            None
        }
    }
}

/// Resolves `candidate` to a member of `canonical`. See [`resolve_index`] for the rules.
pub fn resolve<'a>(candidate: &str, canonical: &[&'a str]) -> Option<&'a str> {
    resolve_index(candidate, canonical).map(|i| canonical[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PatientStatus, StaffStatus};

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Em Avaliação"), "emavaliacao");
        assert_eq!(normalize("ÓBITO"), "obito");
        assert_eq!(normalize(" alta-medica "), "altamedica");
        assert_eq!(normalize("LICENÇA_MATERNIDADE"), "licencamaternidade");
        assert_eq!(normalize(" _- "), "");
    }

    #[test]
    fn test_decomposed_input_folds_like_precomposed() {
        assert_eq!(normalize("O\u{301}bito"), "obito");
        assert_eq!(normalize("Em Avaliac\u{327}a\u{303}o"), "emavaliacao");
        assert_eq!(normalize("Em Avaliac\u{327}a\u{303}o"), normalize("Em Avaliação"));

        assert_eq!(
            resolve("O\u{301}bito", &PatientStatus::LABELS),
            Some("Óbito")
        );
        assert_eq!(
            resolve("Em Avaliac\u{327}a\u{303}o", &PatientStatus::LABELS),
            Some("Em Avaliação")
        );
        assert_eq!(
            resolve("Fe\u{301}rias", &StaffStatus::LABELS),
            Some("Férias")
        );
    }

    #[test]
    fn test_exact_match_wins() {
        assert_eq!(resolve("Ativo", &PatientStatus::LABELS), Some("Ativo"));
        assert_eq!(resolve("Inativo", &PatientStatus::LABELS), Some("Inativo"));
    }

    #[test]
    fn test_lowercase_resolves_to_equal_label_not_container() {
        assert_eq!(resolve("ativo", &PatientStatus::LABELS), Some("Ativo"));
        assert_eq!(resolve("INATIVO", &PatientStatus::LABELS), Some("Inativo"));
    }

    #[test]
    fn test_accent_and_separator_insensitive() {
        assert_eq!(
            resolve("em_avaliacao", &PatientStatus::LABELS),
            Some("Em Avaliação")
        );
        assert_eq!(
            resolve("ALTA-MEDICA", &PatientStatus::LABELS),
            Some("Alta Médica")
        );
        assert_eq!(resolve("obito", &PatientStatus::LABELS), Some("Óbito"));
        assert_eq!(resolve("ferias", &StaffStatus::LABELS), Some("Férias"));
    }

    #[test]
    fn test_containment_prefers_longest_label() {
        // "alta" is contained in both discharge labels.
        assert_eq!(
            resolve("alta", &PatientStatus::LABELS),
            Some("Alta Administrativa")
        );
        assert_eq!(
            resolve("paciente com alta medica confirmada", &PatientStatus::LABELS),
            Some("Alta Médica")
        );
        // Both "Ativo" and "Inativo" are contained in the candidate; the longer one wins.
        assert_eq!(
            resolve("status: inativo", &PatientStatus::LABELS),
            Some("Inativo")
        );
    }

    #[test]
    fn test_containment_ties_follow_declaration_order() {
        let labels = ["abcd", "bcde", "xy"];
        assert_eq!(resolve("bcd", &labels), Some("abcd"));
        assert_eq!(resolve_index("bcd", &labels), Some(0));

        let reversed = ["bcde", "abcd"];
        assert_eq!(resolve("bcd", &reversed), Some("bcde"));
    }

    #[test]
    fn test_unknown_and_empty_do_not_resolve() {
        assert_eq!(resolve("not-a-status", &PatientStatus::LABELS), None);
        assert_eq!(resolve("", &PatientStatus::LABELS), None);
        assert_eq!(resolve("  -_ ", &PatientStatus::LABELS), None);
        assert_eq!(resolve("ativo", &[]), None);
    }
}
