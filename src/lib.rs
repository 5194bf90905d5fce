//! Bookstall application library: the seller and book catalog modules.

pub mod modules;
