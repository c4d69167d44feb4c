//! 802.2 LLC and SNAP header layouts.
//!
//! Offsets are counted from the start of the frame, so the 14 byte
//! ethernet header sits in front: the LLC header begins at offset 14,
//! the SNAP extension right behind it at offset 17.

use anyhow::Result;

use basile_api as api;

use api::layout::{FieldSpec, Layout};
use api::registry::LayoutRegistry;

/// LLC header: dsap, ssap and control, one byte each
pub fn llc() -> Result<Layout> {
    let layout = Layout::new(
        "llc",
        vec![
            FieldSpec::byte("dsap", 14),
            FieldSpec::byte("ssap", 15),
            FieldSpec::byte("control", 16),
        ],
    )?;
    Ok(layout)
}

/// SNAP extension behind the LLC header: 3 byte OUI and 2 byte protocol id
pub fn snap() -> Result<Layout> {
    let layout = Layout::new(
        "snap",
        vec![FieldSpec::new("oui", 17, 3), FieldSpec::new("pid", 20, 2)],
    )?;
    Ok(layout)
}

/// Register every layout of this set
pub fn register(registry: &mut LayoutRegistry) -> Result<()> {
    registry.register(llc()?)?;
    registry.register(snap()?)?;
    Ok(())
}
