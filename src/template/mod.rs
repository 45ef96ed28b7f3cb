//! Lexer for `{identifier}` string templates.
//!
//! The grammar alternates between literal runs and braced placeholders. A
//! placeholder still open at the end of the input is closed implicitly; a
//! stray `}` in literal text is reported as
//! [`TemplateError::UnmatchedBrackets`].

use std::collections::HashMap;

use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

use crate::config::TokenParameter;

#[derive(Parser)]
#[grammar = "template/template.pest"]
struct TemplateParser;

pub const TOKEN_ID_VARIABLE: &str = "tokenId";
pub const PARAMETERS_VARIABLE: &str = "parameters";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    Content(String),
    Identifier(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Brackets {{}} don't match!")]
    UnmatchedBrackets,
    #[error("Unrecognized variable {0}.")]
    UnrecognizedVariable(String),
}

pub fn parse_template(source: &str) -> Result<Vec<TemplateToken>, TemplateError> {
    let template = TemplateParser::parse(Rule::template, source)
        .map_err(|_| TemplateError::UnmatchedBrackets)?
        .next()
        .ok_or(TemplateError::UnmatchedBrackets)?;

    let mut tokens = Vec::new();
    for pair in template.into_inner() {
        match pair.as_rule() {
            Rule::content => {
                let text = pair.as_str();
                if text.contains('}') {
                    return Err(TemplateError::UnmatchedBrackets);
                }
                tokens.push(TemplateToken::Content(text.to_string()));
            }
            Rule::variable => {
                let name = pair
                    .into_inner()
                    .next()
                    .map(|identifier| identifier.as_str())
                    .unwrap_or_default();
                // `{}` names nothing and produces no token.
                if !name.is_empty() {
                    tokens.push(TemplateToken::Identifier(name.to_string()));
                }
            }
            _ => {}
        }
    }

    Ok(tokens)
}

/// Like [`parse_template`], but only `{tokenId}` and `{parameters}` are
/// accepted as placeholders.
pub fn parse_uri_template(source: &str) -> Result<Vec<TemplateToken>, TemplateError> {
    let tokens = parse_template(source)?;

    for token in &tokens {
        if let TemplateToken::Identifier(name) = token {
            if name != TOKEN_ID_VARIABLE && name != PARAMETERS_VARIABLE {
                return Err(TemplateError::UnrecognizedVariable(name.clone()));
            }
        }
    }

    Ok(tokens)
}

/// Renders the URI of one token. Parameter values are the placeholder `0`,
/// enough to show the shape of the final URI.
pub fn generate_uri(
    template: &str,
    token_id: u64,
    parameters: &[TokenParameter],
) -> Result<String, TemplateError> {
    let tokens = parse_uri_template(template)?;

    let mut uri = String::new();
    for token in &tokens {
        match token {
            TemplateToken::Content(text) => uri.push_str(text),
            TemplateToken::Identifier(name) if name == TOKEN_ID_VARIABLE => {
                uri.push_str(&token_id.to_string());
            }
            TemplateToken::Identifier(_) => uri.push_str(&parameter_query(parameters)),
        }
    }

    Ok(uri)
}

/// `?a=0&b=0`, or nothing when there are no parameters.
pub fn parameter_query(parameters: &[TokenParameter]) -> String {
    parameters
        .iter()
        .enumerate()
        .map(|(position, parameter)| {
            let separator = if position == 0 { '?' } else { '&' };
            format!("{}{}=0", separator, parameter.name)
        })
        .collect()
}

/// Substitutes display templates. Unknown placeholders become empty strings.
pub fn populate_template(
    template: &str,
    values: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let tokens = parse_template(template)?;

    Ok(tokens
        .iter()
        .map(|token| match token {
            TemplateToken::Content(text) => text.as_str(),
            TemplateToken::Identifier(name) => values.get(name).map_or("", String::as_str),
        })
        .collect())
}

/// The literal prefix preceding the first placeholder, or an empty string
/// if the template does not parse or starts with a placeholder.
pub fn get_base_uri(template: &str) -> String {
    match parse_template(template).as_deref() {
        Ok([TemplateToken::Content(base), ..]) => base.clone(),
        _ => String::new(),
    }
}
