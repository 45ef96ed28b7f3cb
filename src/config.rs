//! The declarative contract description consumed by the generator.
//!
//! Field names follow the camelCase JSON produced by the editing UI. Derived
//! queries (`has_allowlist`, `price_wei`, ...) live here so every generator
//! module reaches the same conclusion about which features are enabled.
//! They are pure; values that get ignored are reported once per contract by
//! the generator.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOKEN_URI: &str = "https://example.com/{tokenId}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractConfig {
    pub token_name: String,
    pub short_name: String,
    /// `None` means unlimited.
    pub supply: Option<u64>,
    pub multimint: Option<u32>,
    pub limit_per_wallet: Option<u32>,
    pub custom_max_token_id: Option<u64>,
    /// Ether as a decimal string, e.g. `"0.05"`.
    pub price: Option<String>,
    /// Royalty percentage as a decimal string; `"5"` is 500 basis points.
    pub royalty_bps: Option<String>,
    pub token_uri: String,
    pub contract_uri: Option<String>,
    pub activate_automatically: bool,
    pub enumerable: bool,
    pub only_owner_can_mint: bool,
    pub delegated_contract: bool,
    pub uses_id_parameter: bool,
    pub uses_uri_storage: bool,
    pub toggle_access_token: bool,
    pub mutable_access_token: bool,
    pub token_parameters: Vec<TokenParameter>,
    pub require_access_token: ScopedAddress,
    pub approval_proxy_address: ScopedAddress,
    pub payout_destinations: Vec<PayoutDestination>,
    pub allowlist_destinations: Vec<AllowlistDestination>,
    pub amount_allowed_for_owner: u32,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            token_name: String::new(),
            short_name: String::new(),
            supply: None,
            multimint: None,
            limit_per_wallet: None,
            custom_max_token_id: None,
            price: None,
            royalty_bps: None,
            token_uri: DEFAULT_TOKEN_URI.to_string(),
            contract_uri: None,
            activate_automatically: false,
            enumerable: false,
            only_owner_can_mint: false,
            delegated_contract: false,
            uses_id_parameter: false,
            uses_uri_storage: false,
            toggle_access_token: false,
            mutable_access_token: false,
            token_parameters: Vec::new(),
            require_access_token: ScopedAddress::default(),
            approval_proxy_address: ScopedAddress::default(),
            payout_destinations: Vec::new(),
            allowlist_destinations: Vec::new(),
            amount_allowed_for_owner: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
}

impl TokenParameter {
    pub fn new(name: impl Into<String>, parameter_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            parameter_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uint128,
    Uint256,
    Bool,
    Address,
    Bytes32,
    String,
}

impl ParameterType {
    pub fn as_str(self) -> &'static str {
        match self {
            ParameterType::Uint8 => "uint8",
            ParameterType::Uint16 => "uint16",
            ParameterType::Uint32 => "uint32",
            ParameterType::Uint64 => "uint64",
            ParameterType::Uint128 => "uint128",
            ParameterType::Uint256 => "uint256",
            ParameterType::Bool => "bool",
            ParameterType::Address => "address",
            ParameterType::Bytes32 => "bytes32",
            ParameterType::String => "string",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An address that may differ per network (`mainnet`, `rinkeby`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopedAddress(pub BTreeMap<String, String>);

impl ScopedAddress {
    pub fn is_set(&self) -> bool {
        self.0.values().any(|address| !address.trim().is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ScopedAddress {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(network, address)| (network.into(), address.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutDestination {
    pub address: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowlistDestination {
    pub address: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayoutRecipient {
    /// Position among the destinations that receive a non-zero share,
    /// starting at 1, and the destination's address.
    Destination { number: usize, address: String },
    Owner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutShare {
    pub recipient: PayoutRecipient,
    pub percentage: u32,
}

impl ContractConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&source)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("Invalid contract configuration")
    }

    pub fn has_allowlist(&self) -> bool {
        self.amount_allowed_for_owner > 0 || !self.allowlist_destinations.is_empty()
    }

    pub fn has_wallet_limit(&self) -> bool {
        self.limit_per_wallet.is_some()
    }

    pub fn requires_access_token(&self) -> bool {
        self.require_access_token.is_set()
    }

    pub fn is_multimint(&self) -> bool {
        self.multimint.map_or(false, |count| count > 1)
    }

    /// The configured price with surrounding whitespace removed, if any.
    pub fn price_text(&self) -> Option<&str> {
        self.price.as_deref().map(str::trim).filter(|price| !price.is_empty())
    }

    pub fn royalty_text(&self) -> Option<&str> {
        self.royalty_bps
            .as_deref()
            .map(str::trim)
            .filter(|royalty| !royalty.is_empty())
    }

    /// Price in wei, or `None` when minting is free or the price does not
    /// parse.
    pub fn price_wei(&self) -> Option<u128> {
        parse_ether(self.price_text()?).filter(|wei| *wei > 0)
    }

    /// Royalty in basis points, when it is a percentage in `(0, 100]` with at
    /// most two decimals.
    pub fn royalty_basis_points(&self) -> Option<u32> {
        parse_fixed_point(self.royalty_text()?, 2)
            .and_then(|bps| u32::try_from(bps).ok())
            .filter(|bps| *bps > 0 && *bps <= 10_000)
    }

    /// A custom maximum token id only matters when callers choose ids, and
    /// only when it differs from the supply.
    pub fn max_token_id_is_distinct(&self) -> bool {
        self.uses_id_parameter
            && self
                .custom_max_token_id
                .map_or(false, |max_token_id| Some(max_token_id) != self.supply)
    }

    pub fn uses_supply_counter(&self) -> bool {
        self.delegated_contract || !self.enumerable
    }

    /// Splits the withdrawn balance. Destinations are served in order and
    /// clamped so the total never exceeds 100; the owner receives whatever
    /// remains. The returned percentages always sum to 100.
    pub fn payout_shares(&self) -> Vec<PayoutShare> {
        let mut shares = Vec::new();
        let mut allocated = 0u32;

        for destination in &self.payout_destinations {
            let percentage = destination.percentage.min(100 - allocated);
            if percentage == 0 {
                continue;
            }
            allocated += percentage;
            shares.push(PayoutShare {
                recipient: PayoutRecipient::Destination {
                    number: shares.len() + 1,
                    address: destination.address.trim().to_string(),
                },
                percentage,
            });
        }

        if allocated < 100 {
            shares.push(PayoutShare {
                recipient: PayoutRecipient::Owner,
                percentage: 100 - allocated,
            });
        }

        shares
    }
}

/// Converts a decimal ether amount to wei without going through floats.
pub fn parse_ether(amount: &str) -> Option<u128> {
    parse_fixed_point(amount, 18)
}

fn parse_fixed_point(amount: &str, decimals: usize) -> Option<u128> {
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if fraction.len() > decimals
        || !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let scale = 10u128.checked_pow(u32::try_from(decimals).ok()?)?;
    let whole = if whole.is_empty() { 0 } else { whole.parse::<u128>().ok()? };
    let fraction = if fraction.is_empty() {
        0
    } else {
        let padding = 10u128.checked_pow(u32::try_from(decimals - fraction.len()).ok()?)?;
        fraction.parse::<u128>().ok()?.checked_mul(padding)?
    };

    whole.checked_mul(scale)?.checked_add(fraction)
}
