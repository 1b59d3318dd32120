//! Builds call plans for a few requests against the mainnet config without
//! touching the network, and prints the selected entry points.
//!
//! ```sh
//! cargo run -p bridge --example call-plans
//! ```

use alloy::primitives::U256;
use bridge::normalize::normalize;
use bridge::plan::select_call;
use bridge::{BridgeConfig, BridgeRequest};
use utils::Chain;

fn main() -> eyre::Result<()> {
    let config = BridgeConfig::mainnet();

    let requests = [
        BridgeRequest {
            source_chain: None,
            destination_chain: Chain::OpBnb,
            source_token: None,
            destination_token: None,
            amount: Some("0.01".to_string()),
            recipient: None,
        },
        BridgeRequest {
            source_chain: Some(Chain::OpBnb),
            destination_chain: Chain::Bsc,
            source_token: None,
            destination_token: None,
            amount: Some("0.01".to_string()),
            recipient: Some("0x000007357111E4789005d4eBfF401a18D99770cE".to_string()),
        },
    ];

    // a plausible withdrawal surcharge; the real one is read from the
    // contract per attempt
    let delegation_fee = U256::from(200_000_000_000_000u64);

    for request in &requests {
        let normalized = normalize(&config, request)?;
        let plan = select_call(&config, &normalized, delegation_fee)?;
        println!(
            "{} -> {}: {} on {:?} with value {} wei ({} bytes of calldata)",
            normalized.source_chain,
            normalized.destination_chain,
            plan.call.function_name(),
            plan.contract,
            plan.value,
            plan.call.calldata().len(),
        );
    }

    Ok(())
}
