use super::Customer;

/// A named group of region codes, e.g. the New England states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionGroup {
    pub slug: &'static str,
    pub name: &'static str,
    /// Plural label for people living in the group, used in reports
    pub demonym: &'static str,
    pub codes: &'static [&'static str],
}

pub const NEW_ENGLAND: RegionGroup = RegionGroup {
    slug: "new-england",
    name: "New England",
    demonym: "new englanders",
    codes: &["MA", "CT", "ME", "VT", "NH", "RI"],
};

const GROUPS: &[RegionGroup] = &[NEW_ENGLAND];

impl RegionGroup {
    /// Exact, case-sensitive membership test.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(&code)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        GROUPS.iter().copied().find(|g| g.slug == name)
    }

    /// Customers whose address falls inside the group, in input order.
    pub fn filter<'a, I>(&self, customers: I) -> Vec<&'a Customer>
    where
        I: IntoIterator<Item = &'a Customer>,
    {
        customers
            .into_iter()
            .filter(|c| c.state().is_some_and(|code| self.contains(code)))
            .collect()
    }
}

pub fn is_in_new_england(state_code: &str) -> bool {
    NEW_ENGLAND.contains(state_code)
}

/// Record-based form of [`is_in_new_england`].
#[cfg(feature = "legacy-api")]
#[deprecated(since = "0.1.0", note = "pass the state code to `is_in_new_england` instead")]
pub fn in_new_england(customer: &Customer) -> bool {
    customer.state().is_some_and(is_in_new_england)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_england_codes() {
        for code in ["MA", "CT", "ME", "VT", "NH", "RI"] {
            assert!(is_in_new_england(code), "{code} should be in New England");
        }
    }

    #[test]
    fn test_outside_new_england() {
        for code in ["", "ma", "Ma", "SP", "ZZ", "NY", " MA", "MA "] {
            assert!(!is_in_new_england(code), "{code:?} should not match");
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(RegionGroup::from_name("new-england"), Some(NEW_ENGLAND));
        assert_eq!(RegionGroup::from_name("New-England"), Some(NEW_ENGLAND));
        assert_eq!(RegionGroup::from_name("midwest"), None);
    }

    #[test]
    fn test_filter_keeps_input_order() {
        let customers = vec![
            Customer::new(1, "A").with_state("MA"),
            Customer::new(2, "B").with_state("SP"),
            Customer::new(3, "C"),
            Customer::new(4, "D").with_state("VT"),
        ];

        let ids: Vec<_> = NEW_ENGLAND.filter(&customers).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    #[cfg(feature = "legacy-api")]
    #[allow(deprecated)]
    fn test_legacy_record_form_matches_code_form() {
        let outsider = Customer::new(1, "Kaio Silveira").with_state("SP");
        let insider = Customer::new(1, "Kaio Silveira").with_state("MA");
        let homeless = Customer::new(2, "No Address");

        assert!(!in_new_england(&outsider));
        assert!(in_new_england(&insider));
        assert!(!in_new_england(&homeless));
    }
}
