use super::banner;
use super::context::Context;
use crate::config::ContractConfig;
use crate::solidity::ast::{ContractMember, FunctionDeclaration};
use crate::solidity::builders::{
    binary, call, identifier, member, method_call, number, return_statement, tuple,
};
use crate::solidity::Emitter;

pub fn generate(config: &ContractConfig, context: &Context) -> Vec<ContractMember> {
    let bps = match context.royalty_bps {
        Some(bps) if context.has_royalties() => bps,
        _ => return Vec::new(),
    };
    let base = if config.enumerable {
        "ERC721Enumerable"
    } else {
        "ERC721"
    };

    let mut members: Emitter<ContractMember> = Emitter::new();
    members
        .push(banner("ROYALTIES"))
        .push(
            FunctionDeclaration::new("royaltyInfo")
                .with_arguments(["uint256", "uint256 salePrice"])
                .with_modifiers(["external", "view", "override"])
                .returns("address receiver, uint256 royaltyAmount")
                .with_body(vec![return_statement(Some(tuple(vec![
                    call(identifier("address"), vec![identifier("this")]),
                    binary(
                        binary(identifier("salePrice"), "*", number(bps)),
                        "/",
                        number(10_000),
                    ),
                ])))]),
        )
        .push(
            FunctionDeclaration::new("supportsInterface")
                .with_arguments(["bytes4 interfaceId"])
                .with_modifiers([
                    "public".to_string(),
                    "view".to_string(),
                    "virtual".to_string(),
                    format!("override({}, IERC165)", base),
                ])
                .returns("bool")
                .with_body(vec![return_statement(Some(binary(
                    binary(
                        identifier("interfaceId"),
                        "==",
                        member(
                            call(identifier("type"), vec![identifier("IERC2981")]),
                            "interfaceId",
                        ),
                    ),
                    "||",
                    method_call(identifier("super"), "supportsInterface", vec![identifier("interfaceId")]),
                )))]),
        );

    members.finish()
}
