pub mod pool;
pub mod investment_category_queries;
pub mod investment_queries;
pub mod session_queries;
pub mod summary_queries;
pub mod transaction_category_queries;
pub mod transaction_queries;
