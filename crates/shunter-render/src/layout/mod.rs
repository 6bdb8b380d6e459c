//! The layout engine: five passes over an immutable input tree.
//!
//! Lowering reduces the public algebra to canonical variants, measurement
//! computes intrinsic extents bottom-up, wrapping resolves soft line breaks
//! into stacks, optimization fuses adjacent skip rails, and emission assigns
//! absolute coordinates while driving a back-end surface.

pub(crate) mod emit;
pub(crate) mod lower;
pub(crate) mod measure;
pub(crate) mod optimize;
pub(crate) mod profile;
pub(crate) mod tree;
pub(crate) mod wrap;

use shunter_core::{Element, Result};

use self::profile::Profile;
use self::tree::LayoutNode;

/// Runs every pass up to (but excluding) emission.
///
/// Measurement re-runs after each structural rewrite; the passes are cheap
/// and re-measuring keeps each one free of incremental bookkeeping.
pub(crate) fn build(element: &Element, profile: &Profile) -> Result<LayoutNode> {
    let mut tree = lower::lower_root(element, profile)?;
    measure::measure(&mut tree, profile, true)?;
    wrap::wrap(&mut tree, profile, false);
    measure::measure(&mut tree, profile, true)?;
    optimize::optimize(&mut tree);
    measure::measure(&mut tree, profile, true)?;
    Ok(tree)
}
