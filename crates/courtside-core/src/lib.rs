// Library root: career stat comparison between two players.

pub mod accolades;
pub mod compare;
pub mod config;
pub mod provider;
pub mod report;
pub mod stats;
