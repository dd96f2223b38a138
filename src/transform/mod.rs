/// Numeric transforms applied to a column before it is drawn or analysed.
///
/// Fixed order for every render pass:
/// ```text
///  column ─► limit_recent ─► aggregate ─┬─► smooth? ───────────────► primary trace
///                                       └─► derivative ─► smooth? ─► derivative trace
/// ```
/// All functions are pure: borrowed input, freshly allocated output.

pub mod aggregate;
pub mod derivative;
pub mod numeric;
pub mod smooth;

pub use aggregate::aggregate;
pub use derivative::derivative;
pub use numeric::limit_recent;
pub use smooth::smooth;
