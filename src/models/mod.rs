mod envelope;
mod investment;
mod summary;
mod transaction;
mod user;

pub use envelope::{DataEnvelope, ErrorEnvelope};
pub use investment::{Investment, InvestmentCategory};
pub use summary::{CategoryTotal, Summary};
pub use transaction::{
    CategoriesByType, CreateTransaction, EntryType, Transaction, TransactionCategory,
    TransactionFilter,
};
pub use user::Me;
