pub mod accounts;
pub mod briefs;
pub mod expenses;
pub mod messages;
pub mod projects;
pub mod proposals;
pub mod sync;
pub mod team;
pub mod transactions;
