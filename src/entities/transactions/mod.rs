// Concrete transaction variants, grouped by protocol family

pub mod account;
pub mod channel;
pub mod check;
pub mod escrow;
pub mod nftoken;
pub mod offer;
pub mod payment;

pub use account::{
    AccountDelete, AccountSet, DepositPreauth, SetRegularKey, SignerListSet, TicketCreate, TrustSet,
};
pub use channel::{PaymentChannelClaim, PaymentChannelCreate, PaymentChannelFund};
pub use check::{CheckCancel, CheckCash, CheckCreate};
pub use escrow::{EscrowCancel, EscrowCreate, EscrowFinish};
pub use nftoken::{
    NFTokenAcceptOffer, NFTokenBurn, NFTokenCancelOffer, NFTokenCreateOffer, NFTokenMint,
};
pub use offer::{OfferCancel, OfferCreate};
pub use payment::Payment;
