//! Common - Shared Types and Utilities for the Custody Bridge Contracts
//!
//! This package provides the asset identity shared by the bridge contract and
//! its integration tests, together with the message builder used to move
//! custody back out of the contract.

pub mod asset;

pub use asset::AssetInfo;
