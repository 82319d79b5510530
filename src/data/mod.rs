//! Data layer: loading, aggregate selection, derivation and axis domains.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → EnergyTable (Vec<RawRow>)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  world rows with a finite primary value
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  derive   │  share, fossil, zero-carbon → Vec<DerivedRow>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  domain   │  per-scene y-domain, shared year domain
//!   └──────────┘
//! ```

pub mod derive;
pub mod domain;
pub mod filter;
pub mod loader;
pub mod model;
