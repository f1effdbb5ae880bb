//! Display-side derivations over the ledger. Read-only.

use crate::collation::compare_names;
use crate::customer::Customer;
use crate::ledger::Ledger;

/// Customers whose name contains `search_term` (case-insensitive), sorted by
/// name. An empty term matches everyone. Equal names keep insertion order.
pub fn visible_customers<'a>(ledger: &'a Ledger, search_term: &str) -> Vec<&'a Customer> {
    let needle = search_term.to_uppercase();
    let mut visible: Vec<&Customer> = ledger
        .iter()
        .filter(|c| c.name().to_uppercase().contains(&needle))
        .collect();
    visible.sort_by(|a, b| compare_names(a.name(), b.name()));
    visible
}

/// First customer in `visible` whose name contains `search_term`.
///
/// This is a scroll-to hint for the presentation layer. An empty term matches
/// everyone, so it locates the first visible customer.
pub fn locate<'a>(visible: &[&'a Customer], search_term: &str) -> Option<&'a Customer> {
    let needle = search_term.to_uppercase();
    visible
        .iter()
        .copied()
        .find(|c| c.name().to_uppercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(names: &[&str]) -> Ledger {
        let mut ledger = Ledger::new();
        for name in names {
            ledger.add_customer(name);
        }
        ledger
    }

    fn names<'a>(customers: &[&'a Customer]) -> Vec<&'a str> {
        customers.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn empty_term_shows_everyone_sorted() {
        let ledger = ledger(&["Beto", "ana"]);
        assert_eq!(names(&visible_customers(&ledger, "")), vec!["ANA", "BETO"]);
    }

    #[test]
    fn ana_first_even_when_added_second() {
        let ledger = ledger(&["ana", "Beto"]);
        assert_eq!(names(&visible_customers(&ledger, "")), vec!["ANA", "BETO"]);
    }

    #[test]
    fn search_is_a_case_insensitive_substring() {
        let ledger = ledger(&["ana", "beto"]);
        assert_eq!(names(&visible_customers(&ledger, "an")), vec!["ANA"]);
        assert_eq!(names(&visible_customers(&ledger, "ET")), vec!["BETO"]);
        assert!(visible_customers(&ledger, "zz").is_empty());
    }

    #[test]
    fn duplicate_names_keep_insertion_order() {
        let mut ledger = Ledger::new();
        let first = ledger.add_customer("ana").unwrap().customer_id().unwrap();
        let second = ledger.add_customer("ANA").unwrap().customer_id().unwrap();

        let visible = visible_customers(&ledger, "");
        assert_eq!(visible[0].id(), first);
        assert_eq!(visible[1].id(), second);
    }

    #[test]
    fn view_does_not_mutate() {
        let ledger = ledger(&["carla", "ana", "beto"]);
        let snapshot = ledger.clone();
        let _ = visible_customers(&ledger, "a");
        assert_eq!(ledger, snapshot);
        assert_eq!(ledger.customers()[0].name(), "CARLA");
    }

    #[test]
    fn locate_finds_first_match_in_display_order() {
        let ledger = ledger(&["mariana", "ana", "beto"]);
        let visible = visible_customers(&ledger, "");
        let found = locate(&visible, "an").unwrap();
        assert_eq!(found.name(), "ANA");
    }

    #[test]
    fn locate_with_empty_term_picks_the_first_visible() {
        let ledger = ledger(&["beto", "ana"]);
        let visible = visible_customers(&ledger, "");
        assert_eq!(locate(&visible, "").unwrap().name(), "ANA");
    }

    #[test]
    fn locate_without_a_match_or_customers() {
        let ledger = ledger(&["ana"]);
        let visible = visible_customers(&ledger, "");
        assert!(locate(&visible, "xyz").is_none());
        assert!(locate(&[], "").is_none());
    }
}
