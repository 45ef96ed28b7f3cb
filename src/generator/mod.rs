//! Assembles a complete contract from a [`ContractConfig`].
//!
//! Each feature module maps the configuration to an ordered list of
//! contract members; this module wires them together with the constructor,
//! the inheritance list and the import block.

pub mod activation;
pub mod allowlist;
pub mod context;
pub mod imports;
pub mod minting;
pub mod parameters;
pub mod proxy;
pub mod royalties;
pub mod uri;
pub mod withdrawing;

use crate::config::ContractConfig;
use crate::identifier::get_valid_contract_name;
use crate::printer::print_program;
use crate::solidity::ast::*;
use crate::solidity::builders::{
    assign, boolean, call, call_named, expression_statement, identifier, index, number, string,
};
use crate::solidity::Emitter;
use context::Context;
use imports::ImportFlags;

pub const LICENSE: &str = "MIT";
pub const PRAGMA: &str = "^0.8.9";

pub fn attribution() -> String {
    format!("Contract created with sol721 v{}", env!("CARGO_PKG_VERSION"))
}

/// Generates the Solidity source for `config`. Identical configurations
/// always produce identical text.
pub fn generate_contract(config: &ContractConfig) -> String {
    print_program(&build_program(config))
}

pub fn build_program(config: &ContractConfig) -> Program {
    let context = Context::new(config);
    let name = get_valid_contract_name(&config.token_name);
    let has_withdraw = context.has_withdraw();
    let has_royalties = context.has_royalties();

    tracing::debug!(
        contract = %name,
        delegated = config.delegated_contract,
        has_withdraw,
        has_royalties,
        "assembling contract"
    );
    if config.delegated_contract && config.enumerable {
        tracing::warn!("delegated contracts cannot use the enumerable extension, ignoring it");
    }

    let proxy = proxy::generate(config, &context);

    let mut body: Emitter<ContractMember> = Emitter::new();
    body.push_if(config.uses_supply_counter(), || {
        UsingDeclaration::new("Counters", "Counters.Counter")
    })
    .push(constructor(config, &context))
    .extend(parameters::generate(config, &context))
    .extend(allowlist::generate(config, &context))
    .extend(minting::generate(config, &context))
    .extend(activation::generate(config, &context))
    .extend(uri::generate(config, &context))
    .extend(withdrawing::generate(config, &context))
    .extend(royalties::generate(config, &context))
    .extend(proxy.members);

    let contract = ContractDeclaration::new(name)
        .with_bases(contract_bases(config, has_royalties))
        .with_body(body.finish());

    let imports = imports::generate(ImportFlags {
        delegated: config.delegated_contract,
        enumerable: config.enumerable,
        supply_counter: config.uses_supply_counter(),
        access_token: config.requires_access_token(),
        royalties: has_royalties,
        strings: context.uri.needs_strings(),
        address: has_withdraw,
    });

    let mut items: Emitter<ProgramItem> = Emitter::new();
    items
        .extend(proxy.contracts)
        .push(contract)
        .push(BlockComment::line(attribution()));

    Program::new()
        .with_license(LICENSE)
        .with_pragma(PRAGMA)
        .with_imports(imports)
        .with_body(items.finish())
}

fn contract_bases(config: &ContractConfig, has_royalties: bool) -> Vec<&'static str> {
    if config.delegated_contract {
        return vec!["ERC721Delegated", "ReentrancyGuard"];
    }

    let mut bases = vec![if config.enumerable {
        "ERC721Enumerable"
    } else {
        "ERC721"
    }];
    if has_royalties {
        bases.push("IERC2981");
    }
    bases.extend(["ReentrancyGuard", "Ownable"]);
    bases
}

fn constructor(config: &ContractConfig, context: &Context) -> ConstructorDeclaration {
    let delegated = config.delegated_contract;
    let access_token = config.requires_access_token();
    let proxy_registry = proxy::is_active(config);

    let mut arguments: Emitter<String> = Emitter::new();
    arguments
        .push_if(delegated, || "address baseFactory")
        .push_if(access_token, || "address accessTokenAddress_")
        .push_if(proxy_registry, || "address proxyRegistryAddress_")
        .push("string memory customBaseURI_");

    let super_call = if delegated {
        call(
            identifier("ERC721Delegated"),
            vec![
                identifier("baseFactory"),
                string(config.token_name.as_str()),
                string(config.short_name.as_str()),
                call_named(
                    identifier("ConfigSettings"),
                    [
                        (
                            "royaltyBps",
                            number(context.royalty_bps.unwrap_or_default()),
                        ),
                        ("uriBase", identifier("customBaseURI_")),
                        ("uriExtension", string("")),
                        ("hasTransferHook", boolean(false)),
                    ],
                ),
            ],
        )
    } else {
        call(
            identifier("ERC721"),
            vec![
                string(config.token_name.as_str()),
                string(config.short_name.as_str()),
            ],
        )
    };

    let allowance = |address: Expression, count: u32| {
        expression_statement(assign(
            index(identifier("allowedMintCountMap"), address),
            number(count),
        ))
    };

    let mut body: Emitter<Statement> = Emitter::new();
    body.push_if(!delegated, || {
        assign(identifier("customBaseURI"), identifier("customBaseURI_"))
    })
    .push_if(access_token, || {
        assign(
            identifier("accessToken"),
            call(identifier("IERC721"), vec![identifier("accessTokenAddress_")]),
        )
    })
    .push_if(proxy_registry, || {
        assign(
            identifier("proxyRegistryAddress"),
            identifier("proxyRegistryAddress_"),
        )
    })
    .push_if(config.amount_allowed_for_owner > 0, || {
        allowance(context.owner.clone(), config.amount_allowed_for_owner)
    })
    .extend(
        config
            .allowlist_destinations
            .iter()
            .map(|destination| allowance(identifier(destination.address.trim()), destination.count)),
    );

    ConstructorDeclaration::new()
        .with_arguments(arguments.finish())
        .with_super_call(super_call)
        .with_body(body.finish())
}

pub(crate) fn banner(title: &str) -> BlockComment {
    BlockComment::banner(title)
}

/// `function name(argumentType variable_) external onlyOwner { variable = variable_; }`
pub(crate) fn setter(name: &str, argument_type: &str, variable: &str) -> FunctionDeclaration {
    let argument = format!("{}_", variable);
    FunctionDeclaration::new(name)
        .with_arguments([format!("{} {}", argument_type, argument)])
        .with_modifiers(["external", "onlyOwner"])
        .with_body(vec![expression_statement(assign(
            identifier(variable),
            identifier(argument),
        ))])
}
