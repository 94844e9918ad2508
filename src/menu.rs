/// A single orderable item. The catalog is fixed at compile time; the rest
/// of the app only ever holds `&'static MenuItem` references into it.
#[derive(Debug, PartialEq, Eq)]
pub struct MenuItem {
    /// Lowercase keyword used for detection in user input.
    pub key: &'static str,
    /// Name shown in chat replies and on the product card.
    pub name: &'static str,
    /// Price in whole PKR.
    pub price: u32,
    /// Glyph shown on the product card.
    pub art: &'static str,
}

/// The menu in its canonical enumeration order. Detection is defined in
/// terms of this order (see [`find_item`]), so reordering entries is a
/// behavior change, not a cleanup.
pub const MENU: &[MenuItem] = &[
    MenuItem { key: "large pizza", name: "Large Pizza", price: 1500, art: "🍕" },
    MenuItem { key: "medium pizza", name: "Medium Pizza", price: 1000, art: "🍕" },
    MenuItem { key: "small pizza", name: "Small Pizza", price: 500, art: "🍕" },
    MenuItem { key: "zinger burger", name: "Zinger Burger", price: 600, art: "🍔" },
    MenuItem { key: "normal chicken burger", name: "Chicken Burger", price: 250, art: "🍔" },
    MenuItem { key: "special chicken burger", name: "Special Burger", price: 380, art: "🍔" },
    MenuItem { key: "cola", name: "Cola Next", price: 80, art: "🥤" },
    MenuItem { key: "fizzup", name: "FizzUp", price: 80, art: "🥤" },
    MenuItem { key: "coldrink", name: "Cold Drink", price: 80, art: "🥤" },
];

/// Scan user input for menu keywords. Input is lowercased and each catalog
/// key is tested for substring containment; when several keys match, the
/// last one in catalog order wins. This is deliberately not longest-match
/// or position-based matching.
pub fn find_item(input: &str) -> Option<&'static MenuItem> {
    let lower = input.to_lowercase();
    let mut found = None;
    for item in MENU {
        if lower.contains(item.key) {
            found = Some(item);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_item_case_insensitively() {
        let item = find_item("I want a LARGE Pizza please").unwrap();
        assert_eq!(item.name, "Large Pizza");
        assert_eq!(item.price, 1500);
    }

    #[test]
    fn no_match_for_unknown_text() {
        assert!(find_item("do you sell pasta?").is_none());
        assert!(find_item("").is_none());
    }

    #[test]
    fn last_catalog_entry_wins_on_multiple_matches() {
        // "cola" and "fizzup" both match; fizzup is defined later.
        let item = find_item("cola and fizzup").unwrap();
        assert_eq!(item.name, "FizzUp");

        // Reversed mention order does not matter, only catalog order does.
        let item = find_item("fizzup or maybe a cola").unwrap();
        assert_eq!(item.name, "FizzUp");

        // "coldrink" is last of the drink keys.
        let item = find_item("a cola, a fizzup and a coldrink").unwrap();
        assert_eq!(item.name, "Cold Drink");
    }

    #[test]
    fn pizza_sizes_resolve_to_the_later_entry() {
        let item = find_item("small pizza or large pizza?").unwrap();
        assert_eq!(item.name, "Small Pizza");
    }

    #[test]
    fn keys_are_unique_and_lowercase() {
        for (i, item) in MENU.iter().enumerate() {
            assert_eq!(item.key, item.key.to_lowercase());
            assert!(MENU[i + 1..].iter().all(|other| other.key != item.key));
        }
    }
}
