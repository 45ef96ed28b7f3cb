use proptest::prelude::*;

use crate::config::*;
use crate::generator::{attribution, generate_contract};
use crate::identifier::{get_valid_contract_name, is_valid_solidity_identifier};

const PARAMETER_TYPES: &[ParameterType] = &[
    ParameterType::Uint8,
    ParameterType::Uint16,
    ParameterType::Uint32,
    ParameterType::Uint64,
    ParameterType::Uint128,
    ParameterType::Uint256,
    ParameterType::Bool,
    ParameterType::Address,
    ParameterType::Bytes32,
    ParameterType::String,
];

const TOKEN_URIS: &[&str] = &[
    DEFAULT_TOKEN_URI,
    "ipfs://QmFixed/metadata.json",
    "https://example.com/{tokenId}{parameters}",
    "https://example.com/{tokenId}.json",
    "https://example.com/{param0}/{tokenId}",
    "https://example.com/{unknown}",
    "broken } {tokenId}",
    "unclosed {tokenId",
    "",
];

fn destinations(percentages: &[u32]) -> Vec<PayoutDestination> {
    percentages
        .iter()
        .enumerate()
        .map(|(position, percentage)| PayoutDestination {
            address: format!("0x{:040x}", position + 1),
            percentage: *percentage,
        })
        .collect()
}

fn text_option(values: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    prop::sample::select(values).prop_map(|value| match value {
        "" => None,
        value => Some(value.to_string()),
    })
}

fn flags_strategy() -> impl Strategy<Value = [bool; 8]> {
    prop::array::uniform8(any::<bool>())
}

fn limits_strategy(
) -> impl Strategy<Value = (Option<u64>, Option<u32>, Option<u32>, Option<u64>, u32)> {
    (
        prop::option::of(1u64..20_000),
        prop::option::of(1u32..12),
        prop::option::of(1u32..6),
        prop::option::of(1u64..30_000),
        0u32..4,
    )
}

fn values_strategy(
) -> impl Strategy<Value = (Option<String>, Option<String>, String, Option<String>)> {
    (
        text_option(&["", "0", "0.05", "1", "free", " 0.000000000000000001 "]),
        text_option(&["", "5", "2.5", "0.001", "100", "150"]),
        prop::sample::select(TOKEN_URIS).prop_map(str::to_string),
        text_option(&["", "ipfs://collection"]),
    )
}

fn lists_strategy(
) -> impl Strategy<Value = (Vec<ParameterType>, bool, bool, Vec<u32>, Vec<u32>)> {
    (
        prop::collection::vec(prop::sample::select(PARAMETER_TYPES), 0..4),
        any::<bool>(),
        any::<bool>(),
        prop::collection::vec(0u32..=120, 0..4),
        prop::collection::vec(1u32..5, 0..3),
    )
}

fn config_strategy() -> impl Strategy<Value = ContractConfig> {
    (
        "[A-Za-z0-9 #]{0,16}",
        flags_strategy(),
        limits_strategy(),
        values_strategy(),
        lists_strategy(),
    )
        .prop_map(|(token_name, flags, limits, values, lists)| {
            let [
                activate_automatically,
                enumerable,
                only_owner_can_mint,
                delegated_contract,
                uses_id_parameter,
                uses_uri_storage,
                toggle_access_token,
                mutable_access_token,
            ] = flags;
            let (
                supply,
                multimint,
                limit_per_wallet,
                custom_max_token_id,
                amount_allowed_for_owner,
            ) = limits;
            let (price, royalty_bps, token_uri, contract_uri) = values;
            let (parameter_types, access_token, proxy, payouts, allowances) = lists;

            ContractConfig {
                token_name,
                short_name: "PROP".to_string(),
                supply,
                multimint,
                limit_per_wallet,
                custom_max_token_id,
                price,
                royalty_bps,
                token_uri,
                contract_uri,
                activate_automatically,
                enumerable,
                only_owner_can_mint,
                delegated_contract,
                uses_id_parameter,
                uses_uri_storage,
                toggle_access_token,
                mutable_access_token,
                token_parameters: parameter_types
                    .into_iter()
                    .enumerate()
                    .map(|(position, parameter_type)| {
                        TokenParameter::new(format!("param{}", position), parameter_type)
                    })
                    .collect(),
                require_access_token: if access_token {
                    [("mainnet", "0x1111111111111111111111111111111111111111")]
                        .into_iter()
                        .collect()
                } else {
                    ScopedAddress::default()
                },
                approval_proxy_address: if proxy {
                    [("mainnet", "0x2222222222222222222222222222222222222222")]
                        .into_iter()
                        .collect()
                } else {
                    ScopedAddress::default()
                },
                payout_destinations: destinations(&payouts),
                allowlist_destinations: allowances
                    .into_iter()
                    .enumerate()
                    .map(|(position, count)| AllowlistDestination {
                        address: format!("0x{:040x}", position + 100),
                        count,
                    })
                    .collect(),
                amount_allowed_for_owner,
            }
        })
}

/// Whether every `close` matches an earlier `open`, and nothing is left open.
fn is_balanced(source: &str, open: char, close: char) -> bool {
    let mut depth = 0usize;
    for c in source.chars() {
        if c == open {
            depth += 1;
        } else if c == close {
            match depth.checked_sub(1) {
                Some(remaining) => depth = remaining,
                None => return false,
            }
        }
    }
    depth == 0
}

/// Brace depth at the start of every line that opens a contract.
fn contract_depths(source: &str) -> Vec<usize> {
    let mut depth = 0usize;
    let mut depths = Vec::new();
    for line in source.lines() {
        if line.starts_with("contract ") {
            depths.push(depth);
        }
        depth += line.matches('{').count();
        depth = depth.saturating_sub(line.matches('}').count());
    }
    depths
}

/// The arguments of the last `Address.sendValue` call in `source`.
fn last_send(source: &str) -> Option<&str> {
    let start = source.rfind("Address.sendValue(")?;
    let end = source[start..].find(';')?;
    Some(&source[start..start + end])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_contract_name_is_valid_identifier(name in any::<String>()) {
        let contract_name = get_valid_contract_name(&name);
        prop_assert!(
            is_valid_solidity_identifier(&contract_name),
            "{:?} produced {:?}",
            name,
            contract_name
        );
    }

    #[test]
    fn prop_payout_shares_sum_to_one_hundred(percentages in prop::collection::vec(0u32..=150, 0..6)) {
        let config = ContractConfig {
            payout_destinations: destinations(&percentages),
            ..super::base_config()
        };
        let shares = config.payout_shares();

        prop_assert_eq!(shares.iter().map(|share| share.percentage).sum::<u32>(), 100);
        prop_assert!(shares.iter().all(|share| share.percentage > 0));
        let numbers: Vec<usize> = shares
            .iter()
            .filter_map(|share| match share.recipient {
                PayoutRecipient::Destination { number, .. } => Some(number),
                PayoutRecipient::Owner => None,
            })
            .collect();
        let expected: Vec<usize> = (1..=numbers.len()).collect();
        prop_assert_eq!(numbers, expected);
    }

    #[test]
    fn prop_withdraw_never_strands_balance(percentages in prop::collection::vec(0u32..=150, 0..6)) {
        let config = ContractConfig {
            price: Some("0.01".to_string()),
            payout_destinations: destinations(&percentages),
            ..super::base_config()
        };
        let source = generate_contract(&config);
        let send = last_send(&source);

        prop_assert!(send.is_some());
        let send = send.unwrap_or_default();
        prop_assert!(send.ends_with("balance)"), "last payout was {:?}", send);
        prop_assert!(!send.contains("/ 100"), "last payout was {:?}", send);
    }

    #[test]
    fn prop_generated_contracts_are_well_formed(config in config_strategy()) {
        let source = generate_contract(&config);

        prop_assert_eq!(&source, &generate_contract(&config));
        prop_assert!(is_balanced(&source, '{', '}'), "unbalanced braces");
        prop_assert!(is_balanced(&source, '(', ')'));

        let depths = contract_depths(&source);
        prop_assert!(!depths.is_empty());
        prop_assert!(depths.iter().all(|depth| *depth == 0), "nested contracts: {:?}", depths);

        let name = get_valid_contract_name(&config.token_name);
        prop_assert!(source.contains(&format!("contract {} is", name)), "missing contract declaration for {}", name);
        prop_assert!(source.ends_with(&format!("}}\n\n// {}\n", attribution())), "missing trailing attribution");
    }
}
