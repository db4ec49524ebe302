pub mod history;
pub mod quotes;
pub mod search;
