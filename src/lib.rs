// src/lib.rs

//! Men's college basketball season cache.
//!
//! Scraped schedule, roster and stats rows are normalized into typed records
//! and cached per team-year; see [`pipeline::SeasonCache`] and
//! [`pipeline::PairwiseGameMerge`].

pub mod error;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
