use serde::{Deserialize, Serialize};

use super::lenient;

/// A platform deposit address users send funds to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAddress {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id_string")]
    pub id: String,
    #[serde(alias = "coin", alias = "symbol")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(alias = "walletAddress")]
    pub address: String,
}

/// Admin form for creating or editing a deposit address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAddressInput {
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_aliases() {
        let json = r#"{"_id": "w1", "coin": "ETH", "walletAddress": "0xabc", "network": "ERC20"}"#;
        let wallet: WalletAddress = serde_json::from_str(json).unwrap();
        assert_eq!(wallet.id, "w1");
        assert_eq!(wallet.currency, "ETH");
        assert_eq!(wallet.address, "0xabc");
        assert_eq!(wallet.network.as_deref(), Some("ERC20"));
    }
}
