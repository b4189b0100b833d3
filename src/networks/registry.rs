//! Static table of supported networks.

use serde::Serialize;

use crate::blockchain::units::ETHER_DECIMALS;

/// Native currency of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

impl NativeCurrency {
    const fn ether_like(name: &'static str, symbol: &'static str) -> Self {
        Self {
            name,
            symbol,
            decimals: ETHER_DECIMALS,
        }
    }
}

/// A network the user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Network {
    /// Display name.
    pub name: &'static str,
    pub chain_id: u64,
    /// Environment variable that overrides `default_rpc_url`.
    pub rpc_env_var: &'static str,
    /// Public RPC used when no override is set. May be rate limited.
    pub default_rpc_url: &'static str,
    pub block_explorer_url: &'static str,
    pub native_currency: NativeCurrency,
}

impl Network {
    /// RPC URL from the environment override, else the public default.
    pub fn rpc_url(&self) -> String {
        match std::env::var(self.rpc_env_var) {
            Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => self.default_rpc_url.to_string(),
        }
    }

    /// Explorer page for a transaction hash.
    pub fn transaction_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.block_explorer_url.trim_end_matches('/'), tx_hash)
    }

    /// Explorer page for an account.
    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.block_explorer_url.trim_end_matches('/'), address)
    }

    pub fn is_testnet(&self) -> bool {
        matches!(self.chain_id, 5 | 97 | 43113 | 80001 | 11_155_111)
    }
}

/// Supported networks in display order.
pub static SUPPORTED_NETWORKS: &[Network] = &[
    // Mainnets
    Network {
        name: "Ethereum Mainnet",
        chain_id: 1,
        rpc_env_var: "WALLET_LINK_ETHEREUM_RPC_URL",
        default_rpc_url: "https://eth.llamarpc.com",
        block_explorer_url: "https://etherscan.io",
        native_currency: NativeCurrency::ether_like("Ether", "ETH"),
    },
    Network {
        name: "BSC Mainnet",
        chain_id: 56,
        rpc_env_var: "WALLET_LINK_BSC_RPC_URL",
        default_rpc_url: "https://bsc-dataseed.binance.org",
        block_explorer_url: "https://bscscan.com",
        native_currency: NativeCurrency::ether_like("BNB", "BNB"),
    },
    Network {
        name: "Polygon Mainnet",
        chain_id: 137,
        rpc_env_var: "WALLET_LINK_POLYGON_RPC_URL",
        default_rpc_url: "https://polygon-rpc.com",
        block_explorer_url: "https://polygonscan.com",
        native_currency: NativeCurrency::ether_like("MATIC", "MATIC"),
    },
    Network {
        name: "Avalanche C-Chain",
        chain_id: 43_114,
        rpc_env_var: "WALLET_LINK_AVALANCHE_RPC_URL",
        default_rpc_url: "https://api.avax.network/ext/bc/C/rpc",
        block_explorer_url: "https://snowtrace.io",
        native_currency: NativeCurrency::ether_like("AVAX", "AVAX"),
    },
    Network {
        name: "Arbitrum One",
        chain_id: 42_161,
        rpc_env_var: "WALLET_LINK_ARBITRUM_RPC_URL",
        default_rpc_url: "https://arb1.arbitrum.io/rpc",
        block_explorer_url: "https://arbiscan.io",
        native_currency: NativeCurrency::ether_like("Ether", "ETH"),
    },
    Network {
        name: "Optimism",
        chain_id: 10,
        rpc_env_var: "WALLET_LINK_OPTIMISM_RPC_URL",
        default_rpc_url: "https://mainnet.optimism.io",
        block_explorer_url: "https://optimistic.etherscan.io",
        native_currency: NativeCurrency::ether_like("Ether", "ETH"),
    },
    Network {
        name: "Fantom Opera",
        chain_id: 250,
        rpc_env_var: "WALLET_LINK_FANTOM_RPC_URL",
        default_rpc_url: "https://rpc.ftm.tools",
        block_explorer_url: "https://ftmscan.com",
        native_currency: NativeCurrency::ether_like("Fantom", "FTM"),
    },
    Network {
        name: "Cronos",
        chain_id: 25,
        rpc_env_var: "WALLET_LINK_CRONOS_RPC_URL",
        default_rpc_url: "https://evm.cronos.org",
        block_explorer_url: "https://cronoscan.com",
        native_currency: NativeCurrency::ether_like("Cronos", "CRO"),
    },
    Network {
        name: "Gnosis Chain",
        chain_id: 100,
        rpc_env_var: "WALLET_LINK_GNOSIS_RPC_URL",
        default_rpc_url: "https://rpc.gnosischain.com",
        block_explorer_url: "https://gnosisscan.io",
        native_currency: NativeCurrency::ether_like("xDAI", "xDAI"),
    },
    // Wallet aliases
    Network {
        name: "Exodus",
        chain_id: 1,
        rpc_env_var: "WALLET_LINK_EXODUS_RPC_URL",
        default_rpc_url: "https://eth.llamarpc.com",
        block_explorer_url: "https://etherscan.io",
        native_currency: NativeCurrency::ether_like("Ether", "ETH"),
    },
    // Layer 2s and other EVM chains
    Network {
        name: "Base",
        chain_id: 8_453,
        rpc_env_var: "WALLET_LINK_BASE_RPC_URL",
        default_rpc_url: "https://mainnet.base.org",
        block_explorer_url: "https://basescan.org",
        native_currency: NativeCurrency::ether_like("Ether", "ETH"),
    },
    Network {
        name: "zkSync Era",
        chain_id: 324,
        rpc_env_var: "WALLET_LINK_ZKSYNC_RPC_URL",
        default_rpc_url: "https://mainnet.era.zksync.io",
        block_explorer_url: "https://explorer.zksync.io",
        native_currency: NativeCurrency::ether_like("Ether", "ETH"),
    },
    Network {
        name: "Linea",
        chain_id: 59_144,
        rpc_env_var: "WALLET_LINK_LINEA_RPC_URL",
        default_rpc_url: "https://rpc.linea.build",
        block_explorer_url: "https://lineascan.build",
        native_currency: NativeCurrency::ether_like("Ether", "ETH"),
    },
    Network {
        name: "Mantle",
        chain_id: 5_000,
        rpc_env_var: "WALLET_LINK_MANTLE_RPC_URL",
        default_rpc_url: "https://rpc.mantle.xyz",
        block_explorer_url: "https://explorer.mantle.xyz",
        native_currency: NativeCurrency::ether_like("Mantle", "MNT"),
    },
    Network {
        name: "Celo",
        chain_id: 42_220,
        rpc_env_var: "WALLET_LINK_CELO_RPC_URL",
        default_rpc_url: "https://forno.celo.org",
        block_explorer_url: "https://explorer.celo.org",
        native_currency: NativeCurrency::ether_like("Celo", "CELO"),
    },
    Network {
        name: "Moonbeam",
        chain_id: 1_284,
        rpc_env_var: "WALLET_LINK_MOONBEAM_RPC_URL",
        default_rpc_url: "https://rpc.api.moonbeam.network",
        block_explorer_url: "https://moonscan.io",
        native_currency: NativeCurrency::ether_like("Glimmer", "GLMR"),
    },
    Network {
        name: "Moonriver",
        chain_id: 1_285,
        rpc_env_var: "WALLET_LINK_MOONRIVER_RPC_URL",
        default_rpc_url: "https://rpc.api.moonriver.moonbeam.network",
        block_explorer_url: "https://moonriver.moonscan.io",
        native_currency: NativeCurrency::ether_like("Moonriver", "MOVR"),
    },
    Network {
        name: "Harmony",
        chain_id: 1_666_600_000,
        rpc_env_var: "WALLET_LINK_HARMONY_RPC_URL",
        default_rpc_url: "https://api.harmony.one",
        block_explorer_url: "https://explorer.harmony.one",
        native_currency: NativeCurrency::ether_like("Harmony", "ONE"),
    },
    Network {
        name: "Klaytn",
        chain_id: 8_217,
        rpc_env_var: "WALLET_LINK_KLAYTN_RPC_URL",
        default_rpc_url: "https://public-node-api.klaytnapi.com/v1/cypress",
        block_explorer_url: "https://scope.klaytn.com",
        native_currency: NativeCurrency::ether_like("Klaytn", "KLAY"),
    },
    Network {
        name: "Aurora",
        chain_id: 1_313_161_554,
        rpc_env_var: "WALLET_LINK_AURORA_RPC_URL",
        default_rpc_url: "https://mainnet.aurora.dev",
        block_explorer_url: "https://aurorascan.dev",
        native_currency: NativeCurrency::ether_like("Ether", "ETH"),
    },
    Network {
        name: "Metis",
        chain_id: 1_088,
        rpc_env_var: "WALLET_LINK_METIS_RPC_URL",
        default_rpc_url: "https://andromeda.metis.io/?owner=1088",
        block_explorer_url: "https://andromeda-explorer.metis.io",
        native_currency: NativeCurrency::ether_like("Metis", "METIS"),
    },
    Network {
        name: "Kava",
        chain_id: 2_222,
        rpc_env_var: "WALLET_LINK_KAVA_RPC_URL",
        default_rpc_url: "https://evm.kava.io",
        block_explorer_url: "https://explorer.kava.io",
        native_currency: NativeCurrency::ether_like("Kava", "KAVA"),
    },
    Network {
        name: "OKX Chain",
        chain_id: 66,
        rpc_env_var: "WALLET_LINK_OKX_RPC_URL",
        default_rpc_url: "https://exchainrpc.okex.org",
        block_explorer_url: "https://www.oklink.com/okexchain",
        native_currency: NativeCurrency::ether_like("OKT", "OKT"),
    },
    Network {
        name: "Heco",
        chain_id: 128,
        rpc_env_var: "WALLET_LINK_HECO_RPC_URL",
        default_rpc_url: "https://http-mainnet.hecochain.com",
        block_explorer_url: "https://hecoinfo.com",
        native_currency: NativeCurrency::ether_like("HT", "HT"),
    },
    Network {
        name: "Conflux",
        chain_id: 1_030,
        rpc_env_var: "WALLET_LINK_CONFLUX_RPC_URL",
        default_rpc_url: "https://evm.confluxrpc.com",
        block_explorer_url: "https://evm.confluxscan.io",
        native_currency: NativeCurrency::ether_like("Conflux", "CFX"),
    },
    // Testnets
    Network {
        name: "Sepolia Testnet",
        chain_id: 11_155_111,
        rpc_env_var: "WALLET_LINK_SEPOLIA_RPC_URL",
        default_rpc_url: "https://rpc.sepolia.org",
        block_explorer_url: "https://sepolia.etherscan.io",
        native_currency: NativeCurrency::ether_like("SepoliaETH", "SEP"),
    },
    Network {
        name: "Goerli Testnet",
        chain_id: 5,
        rpc_env_var: "WALLET_LINK_GOERLI_RPC_URL",
        default_rpc_url: "https://rpc.ankr.com/eth_goerli",
        block_explorer_url: "https://goerli.etherscan.io",
        native_currency: NativeCurrency::ether_like("GoerliETH", "GOR"),
    },
    Network {
        name: "Mumbai Testnet",
        chain_id: 80_001,
        rpc_env_var: "WALLET_LINK_MUMBAI_RPC_URL",
        default_rpc_url: "https://rpc-mumbai.maticvigil.com",
        block_explorer_url: "https://mumbai.polygonscan.com",
        native_currency: NativeCurrency::ether_like("MATIC", "MATIC"),
    },
    Network {
        name: "BSC Testnet",
        chain_id: 97,
        rpc_env_var: "WALLET_LINK_BSC_TESTNET_RPC_URL",
        default_rpc_url: "https://data-seed-prebsc-1-s1.binance.org:8545",
        block_explorer_url: "https://testnet.bscscan.com",
        native_currency: NativeCurrency::ether_like("BNB", "tBNB"),
    },
    Network {
        name: "Avalanche Fuji Testnet",
        chain_id: 43_113,
        rpc_env_var: "WALLET_LINK_FUJI_RPC_URL",
        default_rpc_url: "https://api.avax-test.network/ext/bc/C/rpc",
        block_explorer_url: "https://testnet.snowtrace.io",
        native_currency: NativeCurrency::ether_like("AVAX", "AVAX"),
    },
];

/// Network selected when the user has not picked one.
pub fn default_network() -> &'static Network {
    &SUPPORTED_NETWORKS[0]
}

/// Look up a network by chain ID. The first entry wins for shared IDs.
pub fn network_by_chain_id(chain_id: u64) -> Option<&'static Network> {
    SUPPORTED_NETWORKS.iter().find(|n| n.chain_id == chain_id)
}
