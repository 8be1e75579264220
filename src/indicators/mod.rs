// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators used by the
// enrichment engine.  Every function returns a column *aligned* with its
// input: one slot per input record, `None` while the look-back window is
// still warming up.  Alignment is what lets the engine apply a single
// any-null row filter at the end instead of juggling per-indicator offsets.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod swing;
