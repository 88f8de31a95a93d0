use std::cmp::Ordering;

/// Orders labels the way a Spanish-locale reader expects: case and accents
/// are ignored first ("claro" sits next to "Claro", "Éxito" next to "Exito"),
/// then accents decide, then the raw text.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| a.cmp(b))
}

fn secondary_key(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

fn primary_key(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_case_before_byte_order() {
        let mut labels = vec!["movistar", "Claro", "Entel", "claro"];
        labels.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(labels, vec!["Claro", "claro", "Entel", "movistar"]);
    }

    #[test]
    fn accented_letters_sort_with_their_base_letter() {
        let mut labels = vec!["Zeta", "Ómnibus", "Orbital"];
        labels.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(labels, vec!["Ómnibus", "Orbital", "Zeta"]);
    }
}
