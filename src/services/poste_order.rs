// src/services/poste_order.rs

//! Ordem total dos nomes de poste para listagens.
//!
//! Três faixas, sempre nesta ordem:
//! 1. `"Poste N"` com 1 ≤ N ≤ 40, por N;
//! 2. os postes nomeados de `CANONICAL_POSTES`, pela posição na lista;
//! 3. o resto, alfabético sem distinguir maiúsculas.
//!
//! Empates (ex.: "Poste 2" e "Poste 02", "abc" e "ABC") são desfeitos pela
//! string original, para a ordem ser total.

use std::cmp::Ordering;

use crate::models::poste::Poste;

pub const CANONICAL_POSTES: &[&str] = &[
    "ABS",
    "Bol",
    "Couvercle",
    "Cuve",
    "Contrôle",
    "Emballage",
    "Étiquetage",
    "Palettisation",
    "Magasin",
    "Maintenance",
    "Qualité",
    "Polyvalent",
];

const NUMBERED_PREFIX: &str = "Poste ";
const MAX_NUMBERED_POSTE: u32 = 40;

// A ordem das variantes é a ordem das faixas
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Band {
    Numbered(u32),
    Canonical(usize),
    Other(String),
}

fn numbered(name: &str) -> Option<u32> {
    let digits = name.strip_prefix(NUMBERED_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits
        .parse::<u32>()
        .ok()
        .filter(|n| (1..=MAX_NUMBERED_POSTE).contains(n))
}

fn band(name: &str) -> Band {
    if let Some(n) = numbered(name) {
        return Band::Numbered(n);
    }
    if let Some(index) = CANONICAL_POSTES.iter().position(|canonical| *canonical == name) {
        return Band::Canonical(index);
    }
    Band::Other(name.to_lowercase())
}

pub fn compare_poste_names(a: &str, b: &str) -> Ordering {
    band(a).cmp(&band(b)).then_with(|| a.cmp(b))
}

pub fn compare_postes(a: &Poste, b: &Poste) -> Ordering {
    compare_poste_names(&a.name, &b.name)
}

pub fn sort_postes(postes: &mut [Poste]) {
    postes.sort_by(compare_postes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        names.sort_by(|a, b| compare_poste_names(a, b));
        names
    }

    #[test]
    fn numbered_then_canonical_then_other() {
        assert_eq!(
            sorted(&["Poste 10", "Poste 2", "ABS", "Zebra"]),
            vec!["Poste 2", "Poste 10", "ABS", "Zebra"]
        );
    }

    #[test]
    fn canonical_band_follows_list_order_not_alphabet() {
        assert_eq!(
            sorted(&["Polyvalent", "Bol", "Maintenance", "ABS"]),
            vec!["ABS", "Bol", "Maintenance", "Polyvalent"]
        );
    }

    #[test]
    fn numbers_outside_the_range_fall_into_the_other_band() {
        assert_eq!(numbered("Poste 1"), Some(1));
        assert_eq!(numbered("Poste 40"), Some(40));
        assert_eq!(numbered("Poste 0"), None);
        assert_eq!(numbered("Poste 41"), None);
        assert_eq!(numbered("Poste -3"), None);
        assert_eq!(numbered("Poste 99999999999"), None);
        assert_eq!(numbered("Poste"), None);
        assert_eq!(numbered("Poste 3a"), None);

        assert_eq!(
            sorted(&["Poste 41", "Qualité", "Poste 40"]),
            vec!["Poste 40", "Qualité", "Poste 41"]
        );
    }

    #[test]
    fn other_band_ignores_case() {
        assert_eq!(sorted(&["zinc", "Alpha", "beta"]), vec!["Alpha", "beta", "zinc"]);
        // "abs" não é o canónico "ABS"
        assert_eq!(sorted(&["abs", "Zebra", "ABS"]), vec!["ABS", "abs", "Zebra"]);
    }

    #[test]
    fn sort_postes_matches_the_comparator() {
        let tenant = Uuid::new_v4();
        let mut postes: Vec<Poste> = ["Zebra", "Bol", "Poste 7"]
            .iter()
            .map(|name| Poste { id: Uuid::new_v4(), tenant_id: tenant, name: name.to_string() })
            .collect();

        sort_postes(&mut postes);

        let names: Vec<&str> = postes.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Poste 7", "Bol", "Zebra"]);
        assert!(postes.windows(2).all(|w| compare_postes(&w[0], &w[1]) != Ordering::Greater));
    }

    fn poste_name() -> impl Strategy<Value = String> {
        prop_oneof![
            (0u32..50).prop_map(|n| format!("Poste {}", n)),
            prop::sample::select(CANONICAL_POSTES).prop_map(|s| s.to_string()),
            "[A-Za-z]{1,6}",
        ]
    }

    proptest! {
        #[test]
        fn antisymmetric(a in poste_name(), b in poste_name()) {
            prop_assert_eq!(compare_poste_names(&a, &b), compare_poste_names(&b, &a).reverse());
        }

        #[test]
        fn equal_only_for_identical_names(a in poste_name(), b in poste_name()) {
            let equal = compare_poste_names(&a, &b) == Ordering::Equal;
            prop_assert_eq!(equal, a == b);
        }

        #[test]
        fn transitive(a in poste_name(), b in poste_name(), c in poste_name()) {
            let ab = compare_poste_names(&a, &b);
            let bc = compare_poste_names(&b, &c);
            if ab != Ordering::Greater && bc != Ordering::Greater {
                prop_assert_ne!(compare_poste_names(&a, &c), Ordering::Greater);
            }
        }

        #[test]
        fn sorting_does_not_depend_on_input_order(mut names in prop::collection::vec(poste_name(), 0..20)) {
            let mut reversed = names.clone();
            reversed.reverse();
            names.sort_by(|a, b| compare_poste_names(a, b));
            reversed.sort_by(|a, b| compare_poste_names(a, b));
            prop_assert_eq!(names, reversed);
        }
    }
}
