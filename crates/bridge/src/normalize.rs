use std::str::FromStr;

use alloy::primitives::{utils::parse_ether, Address, U256};
use utils::Chain;

use crate::error::BridgeError;
use crate::plan::Direction;
use crate::service::BridgeConfig;
use crate::BridgeRequest;

/// A validated request with defaults applied, ready for call selection.
///
/// `source_token == None` means the native asset. `recipient == None` means
/// the sender's own address.
#[derive(Debug, Clone)]
pub struct NormalizedRequest {
    pub direction: Direction,
    pub source_chain: Chain,
    pub destination_chain: Chain,
    pub source_token: Option<Address>,
    pub destination_token: Option<Address>,
    /// Amount in wei.
    pub amount: U256,
    /// The decimal amount as requested, echoed back in the result.
    pub amount_text: String,
    pub recipient: Option<Address>,
}

/// Validates a raw request and fills in defaults.
///
/// Runs entirely offline; every rejection here happens before the first RPC
/// call of the attempt.
pub fn normalize(
    config: &BridgeConfig,
    request: &BridgeRequest,
) -> Result<NormalizedRequest, BridgeError> {
    let source_chain = request.source_chain.unwrap_or(config.l1_chain);
    let destination_chain = request.destination_chain;
    let direction = Direction::resolve(config, source_chain, destination_chain)?;

    let amount_text = request
        .amount
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| BridgeError::InvalidAmount("amount is required".to_string()))?;
    let amount = parse_ether(amount_text)
        .map_err(|_| BridgeError::InvalidAmount(amount_text.to_string()))?;
    if amount.is_zero() {
        return Err(BridgeError::InvalidAmount(amount_text.to_string()));
    }

    let source_token = match request.source_token.as_deref().map(str::trim) {
        None => None,
        Some(s) if s.is_empty() || is_native_marker(s, source_chain) => None,
        Some(s) => Some(parse_address(s)?),
    };

    let destination_token = match request.destination_token.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) if is_native_marker(s, destination_chain) => None,
        Some(s) => Some(parse_address(s)?),
    };
    if direction == Direction::Deposit && source_token.is_some() && destination_token.is_none() {
        return Err(BridgeError::MissingDestinationToken(source_chain));
    }

    let recipient = match request.recipient.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(parse_address(s)?),
    };

    Ok(NormalizedRequest {
        direction,
        source_chain,
        destination_chain,
        source_token,
        destination_token,
        amount,
        amount_text: amount_text.to_string(),
        recipient,
    })
}

/// The gas-token symbol acts as a case-insensitive marker for the native
/// asset. `"BNB"` is accepted on every chain; testnets additionally accept
/// their own symbol (`"tBNB"`).
fn is_native_marker(s: &str, chain: Chain) -> bool {
    s.eq_ignore_ascii_case("BNB") || s.eq_ignore_ascii_case(chain.data().native_symbol)
}

fn parse_address(s: &str) -> Result<Address, BridgeError> {
    Address::from_str(s).map_err(|_| BridgeError::InvalidAddress(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "0x55d398326f99059fF775485246999027B3197955";
    const L2_TOKEN: &str = "0x9e5AAC1Ba1a2e6aEd6b32689DFcF62A509Ca96f3";
    const RECIPIENT: &str = "0x000007357111E4789005d4eBfF401a18D99770cE";

    fn config() -> BridgeConfig {
        BridgeConfig::mainnet()
    }

    fn request() -> BridgeRequest {
        BridgeRequest {
            source_chain: None,
            destination_chain: Chain::OpBnb,
            source_token: None,
            destination_token: None,
            amount: Some("0.01".to_string()),
            recipient: None,
        }
    }

    #[test]
    fn source_chain_defaults_to_bsc() {
        let normalized = normalize(&config(), &request()).unwrap();
        assert_eq!(normalized.source_chain, Chain::Bsc);
        assert_eq!(normalized.direction, Direction::Deposit);
    }

    #[test]
    fn rejects_unsupported_pairs() {
        let mut req = request();
        req.source_chain = Some(Chain::OpBnb);
        req.destination_chain = Chain::OpBnb;
        assert!(matches!(
            normalize(&config(), &req),
            Err(BridgeError::UnsupportedDirection { .. })
        ));

        let mut req = request();
        req.source_chain = Some(Chain::BscTestnet);
        assert!(matches!(
            normalize(&config(), &req),
            Err(BridgeError::UnsupportedDirection { .. })
        ));
    }

    #[test]
    fn rejects_missing_zero_and_malformed_amounts() {
        for amount in [None, Some(""), Some("0"), Some("-1"), Some("lots")] {
            let mut req = request();
            req.amount = amount.map(str::to_string);
            assert!(
                matches!(normalize(&config(), &req), Err(BridgeError::InvalidAmount(_))),
                "amount {amount:?} should be rejected"
            );
        }
    }

    #[test]
    fn parses_decimal_amount_to_wei() {
        let normalized = normalize(&config(), &request()).unwrap();
        assert_eq!(normalized.amount, U256::from(10_000_000_000_000_000u64));
        assert_eq!(normalized.amount_text, "0.01");
    }

    #[test]
    fn native_marker_is_case_insensitive() {
        for marker in ["BNB", "bnb", "Bnb"] {
            let mut req = request();
            req.source_token = Some(marker.to_string());
            let normalized = normalize(&config(), &req).unwrap();
            assert_eq!(normalized.source_token, None, "marker {marker}");
        }
    }

    #[test]
    fn token_deposit_requires_destination_token() {
        let mut req = request();
        req.source_token = Some(TOKEN.to_string());
        assert!(matches!(
            normalize(&config(), &req),
            Err(BridgeError::MissingDestinationToken(Chain::Bsc))
        ));

        req.destination_token = Some(L2_TOKEN.to_string());
        let normalized = normalize(&config(), &req).unwrap();
        assert!(normalized.source_token.is_some());
        assert!(normalized.destination_token.is_some());
    }

    #[test]
    fn token_withdrawal_needs_no_destination_token() {
        let mut req = request();
        req.source_chain = Some(Chain::OpBnb);
        req.destination_chain = Chain::Bsc;
        req.source_token = Some(L2_TOKEN.to_string());
        let normalized = normalize(&config(), &req).unwrap();
        assert_eq!(normalized.direction, Direction::Withdrawal);
        assert!(normalized.destination_token.is_none());
    }

    #[test]
    fn rejects_malformed_addresses() {
        let mut req = request();
        req.recipient = Some("0x1234".to_string());
        assert!(matches!(
            normalize(&config(), &req),
            Err(BridgeError::InvalidAddress(_))
        ));

        let mut req = request();
        req.source_token = Some("not-a-token".to_string());
        assert!(matches!(
            normalize(&config(), &req),
            Err(BridgeError::InvalidAddress(_))
        ));
    }

    #[test]
    fn valid_recipient_is_kept() {
        let mut req = request();
        req.recipient = Some(RECIPIENT.to_string());
        let normalized = normalize(&config(), &req).unwrap();
        assert_eq!(
            normalized.recipient,
            Some(Address::from_str(RECIPIENT).unwrap())
        );
    }
}
