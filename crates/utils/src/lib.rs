use std::collections::HashMap;
use std::sync::OnceLock;

static CHAINS: OnceLock<HashMap<u32, &'static ChainData>> = OnceLock::new();

pub fn get_supported_chains() -> &'static HashMap<u32, &'static ChainData> {
    CHAINS.get_or_init(|| {
        let mut map = HashMap::new();
        for chain in [
            Chain::Bsc,
            Chain::OpBnb,
            Chain::BscTestnet,
            Chain::OpBnbTestnet,
            // Add new chains here
        ] {
            let data = chain.data();
            map.insert(data.id, data);
        }
        map
    })
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ChainData {
    pub id: u32,
    pub name: &'static str,
    pub rpc_url: &'static str,
    /// Symbol of the gas-paying asset, also accepted as the native marker
    /// in bridge requests.
    pub native_symbol: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Chain {
    #[serde(rename = "bsc", alias = "BSC")]
    Bsc = 56,
    #[serde(rename = "opBNB", alias = "opbnb", alias = "opBnb")]
    OpBnb = 204,
    #[serde(rename = "bscTestnet", alias = "chapel")]
    BscTestnet = 97,
    #[serde(rename = "opBNBTestnet", alias = "opbnbTestnet")]
    OpBnbTestnet = 5611,
}

impl Chain {
    pub fn data(self) -> &'static ChainData {
        match self {
            Chain::Bsc => &ChainData {
                id: Chain::Bsc as u32,
                name: "BNB Smart Chain",
                rpc_url: "https://bsc-dataseed1.bnbchain.org",
                native_symbol: "BNB",
            },
            Chain::OpBnb => &ChainData {
                id: Chain::OpBnb as u32,
                name: "opBNB",
                rpc_url: "https://opbnb-mainnet-rpc.bnbchain.org",
                native_symbol: "BNB",
            },
            Chain::BscTestnet => &ChainData {
                id: Chain::BscTestnet as u32,
                name: "BNB Smart Chain Testnet",
                rpc_url: "https://data-seed-prebsc-1-s1.bnbchain.org:8545",
                native_symbol: "tBNB",
            },
            Chain::OpBnbTestnet => &ChainData {
                id: Chain::OpBnbTestnet as u32,
                name: "opBNB Testnet",
                rpc_url: "https://opbnb-testnet-rpc.bnbchain.org",
                native_symbol: "tBNB",
            },
        }
    }
}

impl core::fmt::Display for Chain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.data().name)
    }
}

// `Chain` is used as a plain display field (named `source`) inside a
// `thiserror`-derived enum, which requires the field type to implement
// `std::error::Error`. The required `Debug`/`Display` supertraits are already
// present; this impl just satisfies the bound. `source()` defaults to `None`.
impl std::error::Error for Chain {}

impl TryFrom<u32> for Chain {
    type Error = &'static str;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            56 => Ok(Chain::Bsc),
            204 => Ok(Chain::OpBnb),
            97 => Ok(Chain::BscTestnet),
            5611 => Ok(Chain::OpBnbTestnet),
            _ => Err("Unsupported chain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_all_supported_chains() {
        let chains = get_supported_chains();
        assert_eq!(chains.len(), 4);
        assert_eq!(chains.get(&56).unwrap().native_symbol, "BNB");
        assert_eq!(chains.get(&204).unwrap().name, "opBNB");
    }

    #[test]
    fn chain_id_round_trip() {
        for chain in [Chain::Bsc, Chain::OpBnb, Chain::BscTestnet, Chain::OpBnbTestnet] {
            assert_eq!(Chain::try_from(chain.data().id), Ok(chain));
        }
        assert!(Chain::try_from(1).is_err());
    }
}
