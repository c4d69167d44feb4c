//! ARP header layout, offsets counted behind the 14 byte ethernet header.

use anyhow::Result;

use basile_api as api;

use api::layout::{FieldSpec, Layout};
use api::registry::LayoutRegistry;

/// ARP header: hardware/protocol types and sizes plus the operation code
pub fn arp() -> Result<Layout> {
    let layout = Layout::new(
        "arp",
        vec![
            FieldSpec::new("htype", 14, 2),
            FieldSpec::new("ptype", 16, 2),
            FieldSpec::byte("hlen", 18),
            FieldSpec::byte("plen", 19),
            FieldSpec::new("oper", 20, 2),
        ],
    )?;
    Ok(layout)
}

/// Register every layout of this set
pub fn register(registry: &mut LayoutRegistry) -> Result<()> {
    registry.register(arp()?)?;
    Ok(())
}
