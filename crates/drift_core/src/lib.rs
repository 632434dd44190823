pub mod cancellation;
pub mod convergence;
pub mod decimal;
pub mod grid;
pub mod profile;
pub mod stencil;
pub mod timing;
/// The `drift_core` crate holds the numeric models behind the Drift demonstrations.
/// Nothing here prints or plots; every function returns plain data that the CLI renders.
///
/// Key components:
/// - **Traits**: `Scalar` (numeric type abstraction), `Profile` (function with a known derivative).
/// - **Timing drift**: exact decimal ticks (`decimal`), truncated binary expansion (`truncation`)
///   and the linear error accumulation model (`timing`).
/// - **Cancellation**: `(x + dx) - x` evaluated at single and double precision.
/// - **Finite differences**: stencils, the heat profile, step sweeps and convergence orders.
pub mod traits;
pub mod truncation;
