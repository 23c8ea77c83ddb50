//! Property tests for identifier conversion

use naming::{lower_first, to_camel, to_pascal, DELIMITER};
use proptest::prelude::*;

/// Database-style identifiers: single-case words of letters and digits joined by delimiters.
fn identifier() -> impl Strategy<Value = String> {
    (
        proptest::collection::vec("[a-z]{1,6}[0-9]{0,2}", 1..5),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(words, upper, leading, trailing)| {
            let mut id = words.join("_");
            if upper {
                id = id.to_uppercase();
            }
            if leading {
                id.insert(0, DELIMITER);
            }
            if trailing {
                id.push(DELIMITER);
            }
            id
        })
}

proptest! {
    #[test]
    fn camel_is_lowered_pascal(id in identifier(), preserve in any::<bool>()) {
        prop_assert_eq!(to_camel(&id, preserve), lower_first(&to_pascal(&id, preserve)));
    }

    #[test]
    fn pascal_is_idempotent(id in identifier()) {
        let once = to_pascal(&id, false);
        prop_assert_eq!(to_pascal(&once, false), once.clone());
    }

    #[test]
    fn pascal_output_is_alphanumeric(id in identifier()) {
        let pascal = to_pascal(&id, false);
        prop_assert!(pascal.chars().all(|c| c.is_ascii_alphanumeric()));
        prop_assert!(pascal.chars().next().map(|c| c.is_ascii_uppercase()).unwrap_or(false));
    }

    #[test]
    fn preserved_edges_keep_delimiters(id in identifier()) {
        let pascal = to_pascal(&id, true);
        prop_assert_eq!(pascal.starts_with(DELIMITER), id.starts_with(DELIMITER));
        prop_assert_eq!(pascal.ends_with(DELIMITER), id.ends_with(DELIMITER));
    }
}

#[test]
fn test_pascal_single_letter_words_are_stable() {
    let once = to_pascal("A_B", false);
    assert_eq!(once, "Ab");
    assert_eq!(to_pascal(&once, false), once);
}
