//! Shared building blocks for the staking contract suite.
//!
//! This crate provides:
//! - [`CommonError`]: error codes shared by every contract in the suite.
//! - [`ownership`]: single owner with a two-step transfer.
//! - [`whitelist`]: an enforceable address set managed in bounded batches.
//! - [`reentrancy`]: an explicit per-instance busy flag.
//!
//! Contract-specific errors convert from [`CommonError`] and keep their own
//! code ranges, so shared failures surface with the caller's numbering.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod ownership;
pub mod reentrancy;
pub mod whitelist;

pub use ownership::*;
pub use reentrancy::*;
pub use whitelist::*;

/// TTL bump applied to persistent entries written by shared helpers.
pub const TTL_THRESHOLD: u32 = 5_184_000;
pub const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes produced by the shared helpers.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Ownership                      |
/// | 30 – 39 | Validation / input             |
/// | 40 – 49 | Contract state                 |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    /// No owner has been recorded; the contract was never initialised.
    NotInitialized = 1,

    /// An owner is already recorded.
    AlreadyInitialized = 2,

    // ── Ownership (10–19) ────────────────────────────────────
    /// The caller is not the current owner.
    NotOwner = 10,

    /// The caller is not the nominated pending owner.
    NotPendingOwner = 11,

    /// There is no ownership transfer in progress.
    NoPendingOwner = 12,

    // ── Validation (30–39) ───────────────────────────────────
    /// A whitelist batch exceeded [`whitelist::MAX_BATCH_SIZE`].
    BatchTooLarge = 30,

    /// A whitelist batch was empty.
    EmptyBatch = 31,

    // ── Contract state (40–49) ───────────────────────────────
    /// A guarded operation is already executing on this instance.
    Reentrant = 40,
}
