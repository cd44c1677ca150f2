// NBA stats API provider: player index lookup and career totals over HTTP.

pub mod career;
pub mod client;
pub mod index;
pub mod result_set;

pub use client::NbaStatsClient;
