//! Token symbol lookup and approval policies

use std::str::FromStr;

use strum::{Display, EnumString};

/// One spelling of a token symbol sent to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SymbolCase {
    Lower,
    Upper,
    AsIs,
}

impl SymbolCase {
    pub fn apply(&self, symbol: &str) -> String {
        match self {
            SymbolCase::Lower => symbol.to_lowercase(),
            SymbolCase::Upper => symbol.to_uppercase(),
            SymbolCase::AsIs => symbol.to_string(),
        }
    }
}

/// Ordered list of symbol spellings tried against the token registry.
///
/// The registry matches symbols case-sensitively and lists most tokens in one
/// canonical casing, so a miss on one spelling is retried with the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCasePolicy(Vec<SymbolCase>);

impl Default for SymbolCasePolicy {
    fn default() -> Self {
        Self(vec![SymbolCase::Lower, SymbolCase::Upper])
    }
}

impl SymbolCasePolicy {
    pub fn new(cases: Vec<SymbolCase>) -> Self {
        if cases.is_empty() {
            Self::default()
        } else {
            Self(cases)
        }
    }

    /// Distinct spellings of `symbol`, in policy order.
    pub fn variants(&self, symbol: &str) -> Vec<String> {
        let mut variants: Vec<String> = Vec::with_capacity(self.0.len());
        for case in &self.0 {
            let variant = case.apply(symbol);
            if !variants.contains(&variant) {
                variants.push(variant);
            }
        }
        variants
    }
}

impl FromStr for SymbolCasePolicy {
    type Err = String;

    /// Parses a comma separated list such as `lower,upper`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cases = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                SymbolCase::from_str(part).map_err(|_| format!("unknown symbol case '{part}'"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(cases))
    }
}

/// How much allowance to grant the quote's spender
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApprovalPolicy {
    /// Approve exactly the swap input amount
    #[default]
    Exact,
    /// Approve `U256::MAX` once
    Unlimited,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_tries_lower_then_upper() {
        let policy = SymbolCasePolicy::default();
        assert_eq!(policy.variants("UsDc"), vec!["usdc", "USDC"]);
        assert_eq!(policy.variants("123"), vec!["123"]);
    }

    #[test]
    fn test_policy_parsing() {
        let policy: SymbolCasePolicy = "as-is, upper".parse().unwrap();
        assert_eq!(policy.variants("wEth"), vec!["wEth", "WETH"]);
        assert_eq!("".parse::<SymbolCasePolicy>().unwrap(), SymbolCasePolicy::default());
        assert!("title".parse::<SymbolCasePolicy>().is_err());
    }

    #[test]
    fn test_approval_policy_parsing() {
        assert_eq!("Unlimited".parse::<ApprovalPolicy>().unwrap(), ApprovalPolicy::Unlimited);
        assert_eq!(ApprovalPolicy::default().to_string(), "exact");
    }
}
