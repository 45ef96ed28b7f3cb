use super::context::Context;
use super::{banner, parameters, setter};
use crate::config::{ContractConfig, ParameterType, TokenParameter};
use crate::solidity::ast::{
    ContractMember, Expression, FunctionDeclaration, Statement, VariableDeclaration,
};
use crate::solidity::builders::{
    assign, binary, call, identifier, if_statement, index, member, method_call, number,
    return_statement, string,
};
use crate::solidity::{parse_variable_declaration, Emitter};
use crate::template::{
    get_base_uri, parse_uri_template, TemplateToken, PARAMETERS_VARIABLE, TOKEN_ID_VARIABLE,
};

/// How the token URI template relates to the base URI stored on chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriShape {
    /// No placeholders: every token shares the stored URI.
    Fixed,
    /// `base{tokenId}`, optionally followed by `{parameters}`.
    Default { parameters: bool },
    /// Anything else; holds the tokens following the base prefix.
    Custom(Vec<TemplateToken>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriPlan {
    pub shape: UriShape,
    pub base: String,
    pub storage: bool,
    pub delegated: bool,
    parameters: Vec<TokenParameter>,
}

impl UriPlan {
    pub fn new(config: &ContractConfig) -> Self {
        Self {
            shape: classify(config),
            base: get_base_uri(&config.token_uri),
            storage: config.uses_uri_storage,
            delegated: config.delegated_contract,
            parameters: config.token_parameters.clone(),
        }
    }

    /// Whether the inherited `tokenURI` has to be replaced. The plain
    /// `base{tokenId}` shape is served by the base contract, delegated or
    /// not.
    pub fn needs_token_uri(&self) -> bool {
        self.storage
            || match &self.shape {
                UriShape::Fixed | UriShape::Custom(_) => true,
                UriShape::Default { parameters } => *parameters,
            }
    }

    pub fn needs_strings(&self) -> bool {
        if !self.needs_token_uri() {
            return false;
        }
        match &self.shape {
            UriShape::Fixed => false,
            // With URI storage, a delegated contract rebuilds the default
            // shape itself since it has no `super.tokenURI` to fall back on.
            UriShape::Default { parameters } => *parameters || self.delegated,
            UriShape::Custom(tokens) => tokens.iter().any(|token| match token {
                TemplateToken::Identifier(name) if name == TOKEN_ID_VARIABLE => true,
                TemplateToken::Identifier(_) => self
                    .parameters
                    .iter()
                    .any(|parameter| parameter.parameter_type != ParameterType::String),
                TemplateToken::Content(_) => false,
            }),
        }
    }

    fn uses_parameters(&self) -> bool {
        match &self.shape {
            UriShape::Fixed => false,
            UriShape::Default { parameters } => *parameters,
            UriShape::Custom(tokens) => {
                !self.parameters.is_empty()
                    && tokens.iter().any(|token| {
                        matches!(token, TemplateToken::Identifier(name) if name == PARAMETERS_VARIABLE)
                    })
            }
        }
    }

    fn base_expression(&self) -> Expression {
        if self.delegated {
            string(self.base.as_str())
        } else {
            call(identifier("_baseURI"), vec![])
        }
    }

    fn uri_expression(&self) -> Expression {
        let token_id = || to_string(identifier("tokenId"));

        let parts = match &self.shape {
            UriShape::Fixed => return self.base_expression(),
            UriShape::Default { parameters: false } if !self.delegated => {
                return method_call(identifier("super"), "tokenURI", vec![identifier("tokenId")]);
            }
            UriShape::Default { parameters } => {
                let mut parts = vec![self.base_expression(), token_id()];
                if *parameters {
                    parts.extend(self.query_parts());
                }
                parts
            }
            UriShape::Custom(tokens) => {
                let mut parts = vec![self.base_expression()];
                for token in tokens {
                    match token {
                        TemplateToken::Content(text) => parts.push(string(text.as_str())),
                        TemplateToken::Identifier(name) if name == TOKEN_ID_VARIABLE => {
                            parts.push(token_id())
                        }
                        TemplateToken::Identifier(_) => parts.extend(self.query_parts()),
                    }
                }
                parts
            }
        };

        call(
            identifier("string"),
            vec![call(member(identifier("abi"), "encodePacked"), parts)],
        )
    }

    fn query_parts(&self) -> Vec<Expression> {
        let mut parts = Vec::new();
        for (position, parameter) in self.parameters.iter().enumerate() {
            let separator = if position == 0 { '?' } else { '&' };
            parts.push(string(format!("{}{}=", separator, parameter.name)));
            parts.push(parameter_value(parameter));
        }
        parts
    }

    fn token_uri_function(&self) -> FunctionDeclaration {
        let mut body: Emitter<Statement> = Emitter::new();
        body.push_if(self.storage, || {
            VariableDeclaration::new("string memory", "storedURI")
                .with_initializer(index(identifier("tokenURIMap"), identifier("tokenId")))
        })
        .push_if(self.storage, || {
            if_statement(
                binary(
                    member(call(identifier("bytes"), vec![identifier("storedURI")]), "length"),
                    ">",
                    number(0),
                ),
                vec![return_statement(Some(identifier("storedURI")))],
                None,
            )
        })
        .push_if(self.uses_parameters(), || {
            VariableDeclaration::new(format!("{} memory", parameters::STRUCT_NAME), "parameters")
                .with_initializer(index(identifier(parameters::MAP_NAME), identifier("tokenId")))
        })
        .push(return_statement(Some(self.uri_expression())));

        let modifiers: &[&str] = if self.delegated {
            &["public", "view"]
        } else {
            &["public", "view", "override"]
        };

        FunctionDeclaration::new("tokenURI")
            .with_arguments(["uint256 tokenId"])
            .with_modifiers(modifiers.iter().copied())
            .returns("string memory")
            .with_body(body.finish())
    }
}

/// Classifies the configured template. A template that does not parse is
/// treated as the default shape with an empty base.
pub fn classify(config: &ContractConfig) -> UriShape {
    let tokens = match parse_uri_template(&config.token_uri) {
        Ok(tokens) => tokens,
        Err(error) => {
            tracing::warn!(template = %config.token_uri, %error, "falling back to the default token URI shape");
            return UriShape::Default { parameters: false };
        }
    };

    let is_identifier = |token: &TemplateToken, expected: &str| {
        matches!(token, TemplateToken::Identifier(name) if name == expected)
    };

    if !tokens
        .iter()
        .any(|token| matches!(token, TemplateToken::Identifier(_)))
    {
        return UriShape::Fixed;
    }

    let rest = match tokens.as_slice() {
        [TemplateToken::Content(_), rest @ ..] => rest,
        all => all,
    };

    match rest {
        [token_id] if is_identifier(token_id, TOKEN_ID_VARIABLE) => {
            UriShape::Default { parameters: false }
        }
        [token_id, parameters]
            if is_identifier(token_id, TOKEN_ID_VARIABLE)
                && is_identifier(parameters, PARAMETERS_VARIABLE) =>
        {
            UriShape::Default {
                parameters: !config.token_parameters.is_empty(),
            }
        }
        _ => UriShape::Custom(rest.to_vec()),
    }
}

fn to_string(value: Expression) -> Expression {
    call(member(identifier("Strings"), "toString"), vec![value])
}

fn parameter_value(parameter: &TokenParameter) -> Expression {
    let field = format!("parameters.{}", parameter.name);
    match parameter.parameter_type {
        ParameterType::String => identifier(field),
        ParameterType::Bool => identifier(format!(
            "{} ? string(\"true\") : string(\"false\")",
            field
        )),
        ParameterType::Address => call(
            member(identifier("Strings"), "toHexString"),
            vec![identifier(format!("uint256(uint160({}))", field)), number(20)],
        ),
        ParameterType::Bytes32 => call(
            member(identifier("Strings"), "toHexString"),
            vec![identifier(format!("uint256({})", field)), number(32)],
        ),
        _ => to_string(identifier(field)),
    }
}

pub fn generate(config: &ContractConfig, context: &Context) -> Vec<ContractMember> {
    let plan = &context.uri;
    let contract_uri = config
        .contract_uri
        .as_deref()
        .map(str::trim)
        .filter(|uri| !uri.is_empty());

    let mut members: Emitter<ContractMember> = Emitter::new();
    members
        .push(banner("URI HANDLING"))
        .push_if(!plan.delegated, || {
            VariableDeclaration::new("string", "customBaseURI").with_modifiers(["private"])
        })
        .push_if(!plan.delegated, || {
            setter("setBaseURI", "string memory", "customBaseURI")
        })
        .push_if(!plan.delegated, || {
            FunctionDeclaration::new("_baseURI")
                .with_modifiers(["internal", "view", "virtual", "override"])
                .returns("string memory")
                .with_body(vec![return_statement(Some(identifier("customBaseURI")))])
        })
        .push_if(plan.storage, || {
            parse_variable_declaration("mapping(uint256 => string) private tokenURIMap")
        })
        .push_if(plan.storage, || {
            FunctionDeclaration::new("setTokenURI")
                .with_arguments(["uint256 tokenId", "string memory tokenURI_"])
                .with_modifiers(["external", "onlyOwner"])
                .with_body(vec![assign(
                    index(identifier("tokenURIMap"), identifier("tokenId")),
                    identifier("tokenURI_"),
                )
                .into()])
        })
        .push_if(plan.needs_token_uri(), || plan.token_uri_function());

    if let Some(uri) = contract_uri {
        members
            .push(
                VariableDeclaration::new("string", "customContractURI")
                    .with_modifiers(["private"])
                    .with_initializer(string(uri)),
            )
            .push(setter("setContractURI", "string memory", "customContractURI"))
            .push(
                FunctionDeclaration::new("contractURI")
                    .with_modifiers(["public", "view"])
                    .returns("string memory")
                    .with_body(vec![return_statement(Some(identifier("customContractURI")))]),
            );
    }

    members.finish()
}
