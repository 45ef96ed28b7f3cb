use super::banner;
use super::context::Context;
use crate::config::{ContractConfig, PayoutRecipient, PayoutShare};
use crate::solidity::ast::{ContractMember, Expression, FunctionDeclaration, Statement, VariableDeclaration};
use crate::solidity::builders::{
    binary, call, expression_statement, identifier, member, number,
};
use crate::solidity::{parse_variable_declaration, Emitter};

pub fn payout_constant(number: usize) -> String {
    format!("payoutAddress{}", number)
}

pub fn generate(config: &ContractConfig, context: &Context) -> Vec<ContractMember> {
    if !context.has_withdraw() {
        return Vec::new();
    }

    let shares = config.payout_shares();

    let mut members: Emitter<ContractMember> = Emitter::new();
    members.push(banner("PAYOUT"));
    for share in &shares {
        if let PayoutRecipient::Destination { number, address } = &share.recipient {
            members.push(parse_variable_declaration(&format!(
                "address private constant {} = {}",
                payout_constant(*number),
                address
            )));
        }
    }

    let mut body: Emitter<Statement> = Emitter::new();
    body.push(
        VariableDeclaration::new("uint256", "balance").with_initializer(contract_balance()),
    );
    let last = shares.len().saturating_sub(1);
    body.extend(
        shares
            .iter()
            .enumerate()
            .map(|(position, share)| send_share(share, position == last, context)),
    );

    members.push(
        FunctionDeclaration::new("withdraw")
            .with_modifiers(["public", "nonReentrant"])
            .with_body(body.finish()),
    );

    members.finish()
}

fn contract_balance() -> Expression {
    member(call(identifier("address"), vec![identifier("this")]), "balance")
}

/// A full share is sent as the untruncated balance. The last recipient,
/// usually the owner, takes whatever the others left so rounding never
/// strands wei.
fn send_share(share: &PayoutShare, is_last: bool, context: &Context) -> Statement {
    let recipient = match &share.recipient {
        PayoutRecipient::Destination { number: position, .. } => {
            identifier(payout_constant(*position))
        }
        PayoutRecipient::Owner => context.owner.clone(),
    };
    let amount = if share.percentage == 100 {
        identifier("balance")
    } else if is_last {
        contract_balance()
    } else {
        binary(
            binary(identifier("balance"), "*", number(share.percentage)),
            "/",
            number(100),
        )
    };

    expression_statement(call(
        member(identifier("Address"), "sendValue"),
        vec![call(identifier("payable"), vec![recipient]), amount],
    ))
}
