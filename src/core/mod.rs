// snapshot -> filter -> mapping -> index -> propagate -> lifting, driven by classify
pub mod classify;
pub mod diagnostics;
pub mod filter;
pub mod index;
pub mod lifting;
pub mod mapping;
pub mod propagate;
pub mod refresh;
pub mod snapshot;
pub mod state;
pub mod types;
