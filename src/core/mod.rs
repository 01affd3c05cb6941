//! # Core Module
//!
//! Fundamental shared-state primitives used throughout the sandbox.
//!
//! The whole game core is single-threaded and frame-driven, so only the
//! single-threaded container survives here:
//! - `StResource`: reference-counted handle with interior mutability
//!
//! ## Usage
//! ```rust
//! use voxel_sandbox::core::StResource;
//!
//! let placed = StResource::new(0u32);
//! *placed.get_mut() += 1;
//! assert_eq!(*placed.get(), 1);
//! ```

pub mod st_resource;

pub use st_resource::StResource;
