use super::uri::UriPlan;
use crate::config::{parse_ether, ContractConfig};
use crate::solidity::ast::Expression;
use crate::solidity::builders::{call, identifier};

/// What every generator module needs to agree on, computed once per contract.
///
/// Delegated contracts reach the owner, the caller and the mint primitive
/// through the base implementation, so those resolve to different calls.
/// Configuration values that turn out to be unusable are reported here, once.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub owner: Expression,
    pub sender: Expression,
    pub delegated: bool,
    pub price_wei: Option<u128>,
    pub royalty_bps: Option<u32>,
    pub uri: UriPlan,
}

impl Context {
    pub fn new(config: &ContractConfig) -> Self {
        let (owner, sender) = if config.delegated_contract {
            (
                call(identifier("_owner"), vec![]),
                call(identifier("_msgSender"), vec![]),
            )
        } else {
            (call(identifier("owner"), vec![]), identifier("msg.sender"))
        };

        Self {
            owner,
            sender,
            delegated: config.delegated_contract,
            price_wei: price_wei(config),
            royalty_bps: royalty_bps(config),
            uri: UriPlan::new(config),
        }
    }

    pub fn mint(&self, to: Expression, token_id: Expression) -> Expression {
        let function = if self.delegated { "_mint" } else { "_safeMint" };
        call(identifier(function), vec![to, token_id])
    }

    /// Withdrawing is needed when the contract can receive ether, from sales
    /// or from royalties.
    pub fn has_withdraw(&self) -> bool {
        self.price_wei.is_some() || self.royalty_bps.is_some()
    }

    /// Royalties are implemented on the contract itself only when it is not
    /// delegated; a delegated base receives them through `ConfigSettings`.
    pub fn has_royalties(&self) -> bool {
        !self.delegated && self.royalty_bps.is_some()
    }
}

fn price_wei(config: &ContractConfig) -> Option<u128> {
    let wei = config.price_wei();
    if let Some(price) = config.price_text() {
        if parse_ether(price).is_none() {
            tracing::warn!(price, "ignoring unparsable price, minting will be free");
        }
    }
    wei
}

fn royalty_bps(config: &ContractConfig) -> Option<u32> {
    let bps = config.royalty_basis_points();
    if let (Some(royalty), None) = (config.royalty_text(), bps) {
        tracing::warn!(royalty, "ignoring invalid royalty percentage");
    }
    bps
}
