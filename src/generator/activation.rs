use super::context::Context;
use super::{banner, setter};
use crate::config::ContractConfig;
use crate::solidity::ast::{ContractMember, FunctionDeclaration, VariableDeclaration};
use crate::solidity::builders::{assign, boolean, call, identifier};
use crate::solidity::Emitter;

pub fn generate(config: &ContractConfig, _context: &Context) -> Vec<ContractMember> {
    let access_token = config.requires_access_token();

    let mut members: Emitter<ContractMember> = Emitter::new();
    members
        .push(banner("ACTIVATION"))
        .push(
            VariableDeclaration::new("bool", "saleIsActive")
                .with_modifiers(["public"])
                .with_initializer(boolean(config.activate_automatically)),
        )
        .push(setter("setSaleIsActive", "bool", "saleIsActive"))
        .push_if(access_token && config.toggle_access_token, || {
            VariableDeclaration::new("bool", "accessTokenIsActive")
                .with_modifiers(["public"])
                .with_initializer(boolean(true))
        })
        .push_if(access_token && config.toggle_access_token, || {
            setter("setAccessTokenIsActive", "bool", "accessTokenIsActive")
        })
        .push_if(access_token && config.mutable_access_token, || {
            FunctionDeclaration::new("setAccessTokenAddress")
                .with_arguments(["address accessTokenAddress_"])
                .with_modifiers(["external", "onlyOwner"])
                .with_body(vec![assign(
                    identifier("accessToken"),
                    call(identifier("IERC721"), vec![identifier("accessTokenAddress_")]),
                )
                .into()])
        });

    members.finish()
}
