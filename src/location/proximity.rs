//! Nearby search terms for ride matching.
//!
//! A small hand-kept map from a place to the neighbourhoods and towns a
//! rider travelling there would also accept. Keys are accent-folded, so
//! "Xai-Xai", "XAI-XAI " and "xài-xai" all hit the same entry.

const PROXIMITY_TERMS: &[(&str, &[&str])] = &[
    ("maputo", &["matola", "costa do sol", "marracuene", "polana", "baixa"]),
    ("matola", &["maputo", "machava", "liberdade"]),
    ("malanga", &["zimpeto", "albazine", "khongolote", "bilene"]),
    ("zimpeto", &["malanga", "albazine", "khongolote", "bilene"]),
    ("polana", &["sommerschield", "baixa", "alto maé"]),
    ("beira", &["dondo", "buzi", "chimoio"]),
    ("nampula", &["nacala", "ilha de moçambique", "angoche"]),
    ("xai-xai", &["bilene", "chokwe", "chibuto"]),
    ("bilene", &["xai-xai", "malanga", "zimpeto", "chokwe"]),
    ("inhambane", &["tofo", "vilanculos", "massinga"]),
    ("tofo", &["inhambane", "vilanculos", "jangamo"]),
    ("chimoio", &["beira", "manica", "gondola"]),
];

/// Nearby terms for a place name, or an empty slice when it has none.
pub fn proximity_terms(location: &str) -> &'static [&'static str] {
    let key = fold_accents(location);
    PROXIMITY_TERMS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, terms)| *terms)
        .unwrap_or(&[])
}

/// Trim, lower-case and strip Portuguese diacritics.
pub fn fold_accents(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'è' | 'ê' => 'e',
            'í' | 'ì' => 'i',
            'ó' | 'ò' | 'ô' => 'o',
            'ú' | 'ù' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_accents() {
        assert_eq!(fold_accents("  Chokwé "), "chokwe");
        assert_eq!(fold_accents("Moçambique"), "mocambique");
        assert_eq!(fold_accents("GURUÉ"), "gurue");
    }

    #[test]
    fn test_terms_hit() {
        assert_eq!(proximity_terms("Xai-Xai"), &["bilene", "chokwe", "chibuto"]);
        assert_eq!(proximity_terms(" INHAMBANE "), &["tofo", "vilanculos", "massinga"]);
        assert_eq!(proximity_terms("Béira"), &["dondo", "buzi", "chimoio"]);
    }

    #[test]
    fn test_terms_miss() {
        assert!(proximity_terms("Pemba").is_empty());
        assert!(proximity_terms("").is_empty());
        // Whole-key match only.
        assert!(proximity_terms("Maputo City").is_empty());
    }
}
