use super::context::Context;
use super::{allowlist, banner, parameters};
use crate::config::ContractConfig;
use crate::solidity::ast::{
    ContractMember, Expression, FunctionDeclaration, Statement, VariableDeclaration,
};
use crate::solidity::builders::{
    assign, binary, call, expression_statement, for_statement, identifier, if_statement, index,
    member, method_call, number, require, return_statement,
};
use crate::solidity::{parse_variable_declaration, Emitter};

pub fn generate(config: &ContractConfig, context: &Context) -> Vec<ContractMember> {
    let mut members: Emitter<ContractMember> = Emitter::new();
    members
        .push(banner("MINTING"))
        .push_if(config.requires_access_token(), || {
            let modifiers: &[&str] = if config.mutable_access_token {
                &["public"]
            } else {
                &["public", "immutable"]
            };
            VariableDeclaration::new("IERC721", "accessToken").with_modifiers(modifiers.iter().copied())
        })
        .push_some(config.supply.map(|supply| {
            parse_variable_declaration(&format!("uint256 public constant MAX_SUPPLY = {}", supply))
        }))
        .push_if(config.max_token_id_is_distinct(), || {
            parse_variable_declaration(&format!(
                "uint256 public constant MAX_TOKEN_ID = {}",
                config.custom_max_token_id.unwrap_or_default()
            ))
        })
        .push_some(context.price_wei.map(|wei| {
            parse_variable_declaration(&format!("uint256 public constant PRICE = {}", wei))
        }))
        .push_if(config.is_multimint(), || {
            parse_variable_declaration(&format!(
                "uint256 public constant MAX_MULTIMINT = {}",
                config.multimint.unwrap_or_default()
            ))
        })
        .push_if(config.uses_supply_counter(), || {
            parse_variable_declaration("Counters.Counter private supplyCounter")
        })
        .push(mint_function(config, context))
        .push_if(config.uses_supply_counter(), || {
            FunctionDeclaration::new("totalSupply")
                .with_modifiers(["public", "view"])
                .returns("uint256")
                .with_body(vec![return_statement(Some(method_call(
                    identifier("supplyCounter"),
                    "current",
                    vec![],
                )))])
        });

    members.finish()
}

fn mint_function(config: &ContractConfig, context: &Context) -> FunctionDeclaration {
    let multimint = config.is_multimint();

    let mut arguments = Vec::new();
    match (config.uses_id_parameter, multimint) {
        (true, true) => arguments.push("uint256[] calldata ids".to_string()),
        (true, false) => arguments.push("uint256 id".to_string()),
        (false, true) => arguments.push("uint256 count".to_string()),
        (false, false) => {}
    }
    if !config.token_parameters.is_empty() {
        arguments.push(parameters::mint_argument());
    }

    let mut modifiers = vec!["public"];
    if context.price_wei.is_some() {
        modifiers.push("payable");
    }
    modifiers.push("nonReentrant");
    if config.only_owner_can_mint {
        modifiers.push("onlyOwner");
    }

    FunctionDeclaration::new("mint")
        .with_arguments(arguments)
        .with_modifiers(modifiers)
        .with_body(mint_body(config, context))
}

fn mint_count(config: &ContractConfig) -> Expression {
    if config.is_multimint() {
        identifier("count")
    } else {
        number(1)
    }
}

fn total_supply() -> Expression {
    call(identifier("totalSupply"), vec![])
}

fn mint_body(config: &ContractConfig, context: &Context) -> Vec<Statement> {
    let multimint = config.is_multimint();
    let count = mint_count(config);

    let mut body: Emitter<Statement> = Emitter::new();
    body.push_if(config.uses_id_parameter && multimint, || {
        VariableDeclaration::new("uint256", "count")
            .with_initializer(member(identifier("ids"), "length"))
    })
    .push_if(multimint, || {
        require(
            binary(identifier("count"), "<=", identifier("MAX_MULTIMINT")),
            &format!(
                "Mint at most {} at a time",
                config.multimint.unwrap_or_default()
            ),
        )
    });

    if !config.only_owner_can_mint {
        body.extend(sale_checks(config, context, &count));
    }

    body.push_if(config.requires_access_token() && !config.uses_id_parameter, || {
        access_token_gate(
            config,
            require(
                binary(
                    method_call(identifier("accessToken"), "balanceOf", vec![context.sender.clone()]),
                    ">",
                    number(0),
                ),
                "Access token not owned",
            ),
        )
    })
    .push_some(config.supply.map(|_| {
        let condition = if multimint {
            binary(
                binary(total_supply(), "+", count.clone()),
                "<=",
                identifier("MAX_SUPPLY"),
            )
        } else {
            binary(total_supply(), "<", identifier("MAX_SUPPLY"))
        };
        require(condition, "Exceeds max supply")
    }))
    .push_some(context.price_wei.map(|_| {
        let cost = if multimint {
            binary(identifier("PRICE"), "*", count.clone())
        } else {
            identifier("PRICE")
        };
        require(
            binary(identifier("msg.value"), ">=", cost),
            &format!(
                "Insufficient payment, {} ETH per item",
                config.price_text().unwrap_or_default()
            ),
        )
    }));

    let per_token = if config.uses_id_parameter {
        mint_by_id(config, context)
    } else {
        mint_next(config, context)
    };

    if multimint {
        body.push(for_statement("uint256 i = 0", "i < count", "i++", per_token));
    } else {
        body.extend(per_token);
    }

    body.finish()
}

/// Allowlisted minters may mint before the sale starts; everyone else needs
/// the sale to be active and, with a wallet limit, must stay under it.
fn sale_checks(config: &ContractConfig, context: &Context, count: &Expression) -> Vec<Statement> {
    let sender = context.sender.clone();
    let sale_active = || require(identifier("saleIsActive"), "Sale not active");
    let within_allowance = || {
        binary(
            call(identifier("allowedMintCount"), vec![sender.clone()]),
            ">=",
            count.clone(),
        )
    };
    let update_count = || {
        expression_statement(call(
            identifier("updateMintCount"),
            vec![sender.clone(), count.clone()],
        ))
    };

    if !allowlist::is_active(config) {
        return vec![sale_active()];
    }

    match (config.has_allowlist(), config.has_wallet_limit()) {
        (true, true) => vec![if_statement(
            within_allowance(),
            vec![update_count()],
            Some(vec![expression_statement(call(
                identifier("revert"),
                vec![identifier(
                    "saleIsActive ? \"Minting limit exceeded\" : \"Sale not active\"",
                )],
            ))]),
        )],
        (true, false) => vec![if_statement(
            within_allowance(),
            vec![update_count()],
            Some(vec![sale_active()]),
        )],
        _ => vec![
            sale_active(),
            require(within_allowance(), "Minting limit exceeded"),
            update_count(),
        ],
    }
}

fn access_token_gate(config: &ContractConfig, check: Statement) -> Statement {
    if config.toggle_access_token {
        if_statement(identifier("accessTokenIsActive"), vec![check], None)
    } else {
        check
    }
}

/// The constant bounding caller-chosen ids, if any.
fn token_id_bound(config: &ContractConfig) -> Option<&'static str> {
    if config.max_token_id_is_distinct() {
        Some("MAX_TOKEN_ID")
    } else if config.supply.is_some() {
        Some("MAX_SUPPLY")
    } else {
        None
    }
}

fn mint_by_id(config: &ContractConfig, context: &Context) -> Vec<Statement> {
    let id = identifier("id");

    let mut statements: Emitter<Statement> = Emitter::new();
    statements
        .push_if(config.is_multimint(), || {
            VariableDeclaration::new("uint256", "id")
                .with_initializer(index(identifier("ids"), identifier("i")))
        })
        .push_if(config.requires_access_token(), || {
            access_token_gate(
                config,
                require(
                    binary(
                        method_call(identifier("accessToken"), "ownerOf", vec![id.clone()]),
                        "==",
                        context.sender.clone(),
                    ),
                    "Access token not owned",
                ),
            )
        })
        .push_some(token_id_bound(config).map(|bound| {
            require(binary(id.clone(), "<", identifier(bound)), "Invalid token id")
        }))
        .extend(store_parameters(config, id.clone()))
        .push(context.mint(context.sender.clone(), id))
        .extend(increment_counter(config));

    statements.finish()
}

fn mint_next(config: &ContractConfig, context: &Context) -> Vec<Statement> {
    let mut statements: Emitter<Statement> = Emitter::new();
    statements
        .extend(store_parameters(config, total_supply()))
        .push(context.mint(context.sender.clone(), total_supply()))
        .extend(increment_counter(config));

    statements.finish()
}

fn store_parameters(config: &ContractConfig, token_id: Expression) -> Option<Statement> {
    if config.token_parameters.is_empty() {
        return None;
    }
    Some(expression_statement(assign(
        index(identifier(parameters::MAP_NAME), token_id),
        identifier("parameters"),
    )))
}

fn increment_counter(config: &ContractConfig) -> Option<Statement> {
    config.uses_supply_counter().then(|| {
        expression_statement(method_call(identifier("supplyCounter"), "increment", vec![]))
    })
}
