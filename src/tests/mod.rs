//! Cross-cutting tests exercising the public API, as opposed to the
//! module-local `#[cfg(test)]` blocks that check one component in
//! isolation. Split by concern, one file per concern: framing, geometry,
//! round trips, and end-to-end scenarios.

mod framing;
mod scenarios;
