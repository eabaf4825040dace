//! # Domain Services
//!
//! 特定のエンティティに属さないビジネスルール

pub mod part_planner;
