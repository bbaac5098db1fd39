use serde::{Deserialize, Serialize};

pub type CustomerId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// State or province code, e.g. "MA"
    pub state: String,
}

/// A reservation holder. Ledgers store and return these unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: None,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.address = Some(Address {
            state: state.into(),
        });
        self
    }

    pub fn state(&self) -> Option<&str> {
        self.address.as_ref().map(|a| a.state.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_without_address_has_no_state() {
        let customer = Customer::new(1, "Kaio Silveira");
        assert_eq!(customer.state(), None);
    }

    #[test]
    fn test_with_state() {
        let customer = Customer::new(1, "Kaio Silveira").with_state("MA");
        assert_eq!(customer.state(), Some("MA"));
    }

    #[test]
    fn test_serde_skips_missing_address() {
        let customer = Customer::new(7, "Ada");
        let json = serde_json::to_string(&customer).unwrap();
        assert_eq!(json, r#"{"id":7,"name":"Ada"}"#);

        let parsed: Customer = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, customer);
    }
}
