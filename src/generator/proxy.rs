use super::banner;
use super::context::Context;
use crate::config::ContractConfig;
use crate::solidity::ast::{ContractDeclaration, ContractMember, FunctionDeclaration};
use crate::solidity::builders::{
    binary, boolean, call, identifier, if_statement, method_call, return_statement,
};
use crate::solidity::{parse_variable_declaration, Emitter};

/// Output of the proxy approval module: the registry interface contracts,
/// printed ahead of the token contract, and the members of the token
/// contract itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProxyApproval {
    pub contracts: Vec<ContractDeclaration>,
    pub members: Vec<ContractMember>,
}

pub fn is_active(config: &ContractConfig) -> bool {
    !config.delegated_contract && config.approval_proxy_address.is_set()
}

pub fn generate(config: &ContractConfig, _context: &Context) -> ProxyApproval {
    if !is_active(config) {
        if config.delegated_contract && config.approval_proxy_address.is_set() {
            tracing::warn!("proxy approval is not supported by delegated contracts, skipping");
        }
        return ProxyApproval::default();
    }

    let contracts = vec![
        ContractDeclaration::new("OwnableDelegateProxy"),
        ContractDeclaration::new("ProxyRegistry").with_body(vec![parse_variable_declaration(
            "mapping(address => OwnableDelegateProxy) public proxies",
        )
        .into()]),
    ];

    let mut members: Emitter<ContractMember> = Emitter::new();
    members
        .push(banner("PROXY REGISTRY"))
        .push(parse_variable_declaration(
            "address private immutable proxyRegistryAddress",
        ))
        .push(
            FunctionDeclaration::new("isApprovedForAll")
                .with_arguments(["address owner", "address operator"])
                .with_modifiers(["public", "view", "override"])
                .returns("bool")
                .with_body(vec![
                    parse_variable_declaration(
                        "ProxyRegistry proxyRegistry = ProxyRegistry(proxyRegistryAddress)",
                    )
                    .into(),
                    if_statement(
                        binary(
                            call(
                                identifier("address"),
                                vec![method_call(
                                    identifier("proxyRegistry"),
                                    "proxies",
                                    vec![identifier("owner")],
                                )],
                            ),
                            "==",
                            identifier("operator"),
                        ),
                        vec![return_statement(Some(boolean(true)))],
                        None,
                    ),
                    return_statement(Some(method_call(
                        identifier("super"),
                        "isApprovedForAll",
                        vec![identifier("owner"), identifier("operator")],
                    ))),
                ]),
        );

    ProxyApproval {
        contracts,
        members: members.finish(),
    }
}
