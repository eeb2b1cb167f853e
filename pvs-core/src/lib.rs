#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// Core domain models for the product variant store.
///
/// This module contains the data structures that represent the variant
/// aggregate and its child collections. They carry minimal business logic;
/// invariant enforcement and persistence live behind the ports, keeping the
/// entities independent of any particular storage backend.
pub mod models;

/// Interface traits for the product variant store.
///
/// These are the "ports" in the hexagonal architecture pattern: they define
/// the contract between the domain and a storage adapter without specifying
/// implementation details, which keeps the core testable and lets backends
/// be swapped without touching callers.
pub mod ports;
