pub mod aggregate;
pub mod history;
pub mod quotes;
pub mod search;

pub mod util;
