use thiserror::Error;

/// Errors raised while constructing a single [`Prefix`](crate::Prefix).
///
/// Both variants are fatal to the one prefix being built only; the policy
/// builder logs them and continues with the remaining entries of the set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefixError {
    /// The address is neither 4 nor 16 octets wide.
    #[error("can not determine the address family of '{address}'")]
    AddressFamily { address: String },

    /// A present MIN or MAX bound of the mask-length range is not a number
    /// between 0 and 255.
    #[error("invalid mask length bound '{bound}' in range '{range}'")]
    RangeParse { range: String, bound: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_family_message_names_the_address() {
        let err = PrefixError::AddressFamily {
            address: "not-an-ip".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("address family"));
        assert!(msg.contains("not-an-ip"));
    }

    #[test]
    fn range_parse_message_names_bound_and_range() {
        let err = PrefixError::RangeParse {
            range: "x..24".to_string(),
            bound: "x".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'x'"));
        assert!(msg.contains("x..24"));
    }
}
