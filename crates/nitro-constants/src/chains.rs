//! Chain name aliases and well-known endpoints
//!
//! The alias table is consulted in declaration order; every key carries at
//! least one alias and all aliases are lowercase.

/// Canonical chain key → accepted lowercase aliases.
pub const CHAIN_NAME_ALIASES: &[(&str, &[&str])] = &[
    ("arbitrum", &["arbitrum", "arbitrum one", "arb", "arbitrum mainnet"]),
    ("ethereum", &["ethereum", "eth", "ethereum mainnet", "ether"]),
    ("polygon", &["polygon", "matic", "polygon mainnet", "polygon pos"]),
    (
        "avalanche",
        &["avalanche", "avax", "avalanche c-chain", "avalanche mainnet"],
    ),
    (
        "binance",
        &["binance", "bsc", "bnb", "bnb smart chain", "bnb smart chain mainnet"],
    ),
    ("optimism", &["optimism", "op", "op mainnet"]),
    ("base", &["base", "base mainnet"]),
    ("zksync", &["zksync", "zksync era", "zksync mainnet"]),
    ("manta", &["manta", "manta pacific", "manta pacific mainnet"]),
    ("mantle", &["mantle", "mantle mainnet"]),
    ("linea", &["linea", "linea mainnet"]),
    ("scroll", &["scroll", "scroll mainnet"]),
    ("mode", &["mode", "mode mainnet"]),
    ("blast", &["blast", "blast mainnet"]),
    ("polygon-zkevm", &["polygon zkevm", "polygon zkvm", "zkevm"]),
    ("boba", &["boba", "boba network"]),
    ("metis", &["metis", "metis andromeda", "metis mainnet"]),
    ("aurora", &["aurora", "aurora mainnet"]),
    ("taiko", &["taiko", "taiko mainnet"]),
    ("rootstock", &["rootstock", "rsk", "rootstock mainnet"]),
    ("dogechain", &["dogechain", "dogechain mainnet"]),
    ("oasis-sapphire", &["oasis sapphire", "sapphire"]),
    ("xlayer", &["x layer", "xlayer mainnet"]),
    ("rollux", &["rollux", "rollux mainnet"]),
    ("5ire", &["5ire", "5irechain", "5irechain mainnet"]),
    ("kyoto", &["kyoto", "kyoto mainnet"]),
    ("vanar", &["vanar", "vanar mainnet"]),
    ("saakuru", &["saakuru", "saakuru mainnet"]),
    ("redbelly", &["redbelly", "redbelly mainnet"]),
    ("shido", &["shido", "shido mainnet"]),
    ("nero", &["nero", "nero mainnet"]),
    ("soneium", &["soneium", "soneium mainnet"]),
    ("hyperliquid", &["hyperliquid", "hyperliquid mainnet"]),
    ("arthera", &["arthera", "arthera mainnet"]),
];

/// Public RPC endpoints keyed by EVM chain id.
pub const DEFAULT_RPC_URLS: &[(&str, &str)] = &[
    ("1", "https://eth.llamarpc.com"),
    ("10", "https://mainnet.optimism.io"),
    ("56", "https://bsc-dataseed.bnbchain.org"),
    ("137", "https://polygon-rpc.com"),
    ("169", "https://pacific-rpc.manta.network/http"),
    ("324", "https://mainnet.era.zksync.io"),
    ("1101", "https://zkevm-rpc.com"),
    ("5000", "https://rpc.mantle.xyz"),
    ("8453", "https://mainnet.base.org"),
    ("34443", "https://mainnet.mode.network"),
    ("42161", "https://arb1.arbitrum.io/rpc"),
    ("43114", "https://api.avax.network/ext/bc/C/rpc"),
    ("59144", "https://rpc.linea.build"),
    ("81457", "https://rpc.blast.io"),
    ("534352", "https://rpc.scroll.io"),
];

/// Block explorer base URLs keyed by EVM chain id.
pub const DEFAULT_EXPLORER_URLS: &[(&str, &str)] = &[
    ("1", "https://etherscan.io"),
    ("10", "https://optimistic.etherscan.io"),
    ("56", "https://bscscan.com"),
    ("137", "https://polygonscan.com"),
    ("169", "https://pacific-explorer.manta.network"),
    ("324", "https://explorer.zksync.io"),
    ("1101", "https://zkevm.polygonscan.com"),
    ("5000", "https://explorer.mantle.xyz"),
    ("8453", "https://basescan.org"),
    ("34443", "https://explorer.mode.network"),
    ("42161", "https://arbiscan.io"),
    ("43114", "https://snowtrace.io"),
    ("59144", "https://lineascan.build"),
    ("81457", "https://blastscan.io"),
    ("534352", "https://scrollscan.com"),
];

/// Built-in RPC endpoint for a chain id.
pub fn default_rpc_url(chain_id: &str) -> Option<&'static str> {
    DEFAULT_RPC_URLS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, url)| *url)
}

/// Built-in block explorer for a chain id.
pub fn default_explorer_url(chain_id: &str) -> Option<&'static str> {
    DEFAULT_EXPLORER_URLS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, url)| *url)
}
