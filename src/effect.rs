// 💸 Monetary effect - the amount shown beside an entity and which way it moves

use crate::amount::CanonicalAmount;
use crate::entities::{AccountRef, LedgerObject, Transaction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Value arrives at the viewer
    Incoming,
    /// Value leaves the viewer
    Outgoing,
    /// Value is at stake but not moving (offers, checks, limits)
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaryEffect {
    pub amount: CanonicalAmount,
    pub direction: Direction,
}

impl MonetaryEffect {
    fn new(amount: CanonicalAmount, direction: Direction) -> Self {
        MonetaryEffect { amount, direction }
    }

    fn neutral(amount: CanonicalAmount) -> Self {
        MonetaryEffect::new(amount, Direction::Neutral)
    }
}

/// Direction of a transfer from `source` to `destination`, seen by `viewer`
fn transfer_direction(
    source: Option<&AccountRef>,
    destination: Option<&AccountRef>,
    viewer: &str,
) -> Direction {
    let sends = source.is_some_and(|s| s.is(viewer));
    let receives = destination.is_some_and(|d| d.is(viewer));

    match (sends, receives) {
        (true, false) => Direction::Outgoing,
        (false, true) => Direction::Incoming,
        _ => Direction::Neutral,
    }
}

fn transfer(
    amount: Option<CanonicalAmount>,
    source: Option<AccountRef>,
    destination: Option<AccountRef>,
    viewer: &str,
) -> Option<MonetaryEffect> {
    let direction = transfer_direction(source.as_ref(), destination.as_ref(), viewer);
    Some(MonetaryEffect::new(amount?, direction))
}

impl Transaction {
    /// Amount moved (or put at stake) by this transaction, from `viewer`'s side
    pub fn monetary_effect(&self, viewer: &str) -> Option<MonetaryEffect> {
        match self {
            Transaction::Payment(tx) => transfer(
                tx.delivered_amount().or_else(|| tx.amount()),
                tx.account(),
                tx.destination(),
                viewer,
            ),
            Transaction::EscrowCreate(tx) => {
                transfer(tx.amount(), tx.account(), tx.destination(), viewer)
            }
            Transaction::PaymentChannelCreate(tx) => {
                transfer(tx.amount(), tx.account(), tx.destination(), viewer)
            }
            Transaction::PaymentChannelFund(tx) => {
                transfer(tx.amount(), tx.account(), None, viewer)
            }
            Transaction::CheckCash(tx) => transfer(
                tx.amount().or_else(|| tx.deliver_min()),
                tx.check_writer(),
                tx.account(),
                viewer,
            ),
            Transaction::CheckCreate(tx) => tx.send_max().map(MonetaryEffect::neutral),
            Transaction::OfferCreate(tx) => tx.taker_pays().map(MonetaryEffect::neutral),
            Transaction::NFTokenCreateOffer(tx) => tx.amount().map(MonetaryEffect::neutral),
            Transaction::OfferCancel(_)
            | Transaction::TrustSet(_)
            | Transaction::AccountSet(_)
            | Transaction::AccountDelete(_)
            | Transaction::SetRegularKey(_)
            | Transaction::SignerListSet(_)
            | Transaction::EscrowFinish(_)
            | Transaction::EscrowCancel(_)
            | Transaction::PaymentChannelClaim(_)
            | Transaction::CheckCancel(_)
            | Transaction::DepositPreauth(_)
            | Transaction::TicketCreate(_)
            | Transaction::NFTokenMint(_)
            | Transaction::NFTokenBurn(_)
            | Transaction::NFTokenCancelOffer(_)
            | Transaction::NFTokenAcceptOffer(_)
            | Transaction::Unknown(_) => None,
        }
    }
}

impl LedgerObject {
    /// Amount held or offered by this object, from `viewer`'s side
    pub fn monetary_effect(&self, viewer: &str) -> Option<MonetaryEffect> {
        match self {
            LedgerObject::Escrow(escrow) => {
                let incoming = escrow.destination().is_some_and(|d| d.is(viewer));
                let direction = if incoming { Direction::Incoming } else { Direction::Outgoing };
                Some(MonetaryEffect::new(escrow.amount()?, direction))
            }
            LedgerObject::PayChannel(channel) => {
                transfer(channel.amount(), channel.account(), channel.destination(), viewer)
            }
            LedgerObject::Check(check) => check.send_max().map(MonetaryEffect::neutral),
            LedgerObject::Offer(offer) => offer.taker_pays().map(MonetaryEffect::neutral),
            LedgerObject::NFTokenOffer(offer) => offer.amount().map(MonetaryEffect::neutral),
            LedgerObject::RippleState(line) => line.balance_for(viewer).map(MonetaryEffect::neutral),
            LedgerObject::Ticket(_)
            | LedgerObject::DepositPreauth(_)
            | LedgerObject::SignerList(_)
            | LedgerObject::Unknown(_) => None,
        }
    }
}
