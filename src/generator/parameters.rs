use super::banner;
use super::context::Context;
use crate::config::ContractConfig;
use crate::solidity::ast::{
    ContractMember, FunctionDeclaration, StructDeclaration, VariableDeclaration,
};
use crate::solidity::builders::{identifier, index, return_statement};
use crate::solidity::{parse_variable_declaration, Emitter};

pub const STRUCT_NAME: &str = "TokenParameters";
pub const MAP_NAME: &str = "tokenParametersMap";

pub fn generate(config: &ContractConfig, _context: &Context) -> Vec<ContractMember> {
    if config.token_parameters.is_empty() {
        return Vec::new();
    }

    let fields = config
        .token_parameters
        .iter()
        .map(|parameter| {
            VariableDeclaration::new(parameter.parameter_type.as_str(), parameter.name.as_str())
        })
        .collect();

    let mut members: Emitter<ContractMember> = Emitter::new();
    members
        .push(banner("PARAMETERS"))
        .push(StructDeclaration::new(STRUCT_NAME, fields))
        .push(parse_variable_declaration(&format!(
            "mapping(uint256 => {}) private {}",
            STRUCT_NAME, MAP_NAME
        )))
        .push(
            FunctionDeclaration::new("tokenParameters")
                .with_arguments(["uint256 tokenId"])
                .with_modifiers(["external", "view"])
                .returns(format!("{} memory", STRUCT_NAME))
                .with_body(vec![return_statement(Some(index(
                    identifier(MAP_NAME),
                    identifier("tokenId"),
                )))]),
        );

    members.finish()
}

/// The mint argument carrying the parameters of the tokens being minted.
pub fn mint_argument() -> String {
    format!("{} calldata parameters", STRUCT_NAME)
}
