use super::banner;
use super::context::Context;
use crate::config::ContractConfig;
use crate::solidity::ast::{ContractMember, Expression, FunctionDeclaration, Statement};
use crate::solidity::builders::{
    assign_with, binary, call, identifier, if_statement, index, return_statement,
};
use crate::solidity::{parse_variable_declaration, Emitter};

pub const WALLET_LIMIT_CONSTANT: &str = "MINT_LIMIT_PER_WALLET";

/// The allowlist bookkeeping is needed as soon as anyone's mint count is
/// bounded: an owner allowance, allowlisted addresses or a per-wallet limit.
pub fn is_active(config: &ContractConfig) -> bool {
    config.has_allowlist() || config.has_wallet_limit()
}

pub fn generate(config: &ContractConfig, _context: &Context) -> Vec<ContractMember> {
    if !is_active(config) {
        return Vec::new();
    }

    let has_allowlist = config.has_allowlist();
    let mut members: Emitter<ContractMember> = Emitter::new();
    members
        .push(banner("ALLOWLIST"))
        .push(parse_variable_declaration(
            "mapping(address => uint256) private mintCountMap",
        ))
        .push(parse_variable_declaration(
            "mapping(address => uint256) private allowedMintCountMap",
        ))
        .push_some(config.limit_per_wallet.map(|limit| {
            parse_variable_declaration(&format!(
                "uint256 public constant {} = {}",
                WALLET_LIMIT_CONSTANT, limit
            ))
        }))
        .push_if(has_allowlist && config.has_wallet_limit(), max_function)
        .push(
            FunctionDeclaration::new("allowedMintCount")
                .with_arguments(["address minter"])
                .with_modifiers(["public", "view"])
                .returns("uint256")
                .with_body(allowed_mint_count_body(config)),
        )
        .push(
            FunctionDeclaration::new("updateMintCount")
                .with_arguments(["address minter", "uint256 count"])
                .with_modifiers(["private"])
                .with_body(vec![assign_with(
                    minter_entry("mintCountMap"),
                    "+=",
                    identifier("count"),
                )
                .into()]),
        );

    members.finish()
}

fn max_function() -> FunctionDeclaration {
    FunctionDeclaration::new("max")
        .with_arguments(["uint256 a", "uint256 b"])
        .with_modifiers(["private", "pure"])
        .returns("uint256")
        .with_body(vec![return_statement(Some(identifier("a >= b ? a : b")))])
}

fn minter_entry(map: &str) -> Expression {
    index(identifier(map), identifier("minter"))
}

fn remaining(allowance: Expression) -> Statement {
    return_statement(Some(binary(allowance, "-", minter_entry("mintCountMap"))))
}

fn allowed_mint_count_body(config: &ContractConfig) -> Vec<Statement> {
    match (config.has_allowlist(), config.has_wallet_limit()) {
        (true, true) => vec![
            if_statement(
                identifier("saleIsActive"),
                vec![remaining(call(
                    identifier("max"),
                    vec![
                        minter_entry("allowedMintCountMap"),
                        identifier(WALLET_LIMIT_CONSTANT),
                    ],
                ))],
                None,
            ),
            remaining(minter_entry("allowedMintCountMap")),
        ],
        (true, false) => vec![remaining(minter_entry("allowedMintCountMap"))],
        _ => vec![remaining(identifier(WALLET_LIMIT_CONSTANT))],
    }
}
