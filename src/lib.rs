//! Declarative ERC-721 Solidity contract generator.
//!
//! A [`config::ContractConfig`] describes the desired token features;
//! [`generator::generate_contract`] turns it into formatted Solidity source
//! by way of the [`solidity`] AST and the [`printer`].

pub mod config;
pub mod generator;
pub mod identifier;
pub mod printer;
pub mod solidity;
pub mod template;

pub use config::ContractConfig;
pub use generator::generate_contract;

#[cfg(test)]
mod tests;
