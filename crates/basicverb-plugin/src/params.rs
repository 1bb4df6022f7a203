//! The reverb's parameter layout.
//!
//! This list is the plugin's persisted and automatable surface. String ids
//! key saved state and presets, numeric ids key host automation lanes; both
//! must stay stable across versions. Order only affects display.

use basicverb_core::{ParamDescriptor, ParamId};

/// Room size string id.
pub const ROOM_SIZE: &str = "r_size";
/// Damping string id.
pub const DAMPING: &str = "r_damping";
/// Wet level string id.
pub const WET_LEVEL: &str = "r_wet";
/// Dry level string id.
pub const DRY_LEVEL: &str = "r_dry";
/// Stereo width string id.
pub const WIDTH: &str = "r_width";
/// Freeze string id.
pub const FREEZE: &str = "r_freeze";

/// First numeric id of the reverb's block.
pub const PARAM_ID_BASE: u32 = 1500;

const fn unit_control(
    name: &'static str,
    short_name: &'static str,
    offset: u32,
    string_id: &'static str,
) -> ParamDescriptor {
    ParamDescriptor::continuous(name, short_name, 0.0, 1.0, 0.3, 0.01)
        .with_id(ParamId(PARAM_ID_BASE + offset), string_id)
}

/// Every parameter the reverb declares, in display order.
pub const REVERB_PARAMS: [ParamDescriptor; 6] = [
    unit_control("Room Size", "Size", 0, ROOM_SIZE),
    unit_control("Damping", "Damp", 1, DAMPING),
    unit_control("Wet Level", "Wet", 2, WET_LEVEL),
    unit_control("Dry Level", "Dry", 3, DRY_LEVEL),
    unit_control("Width", "Width", 4, WIDTH),
    ParamDescriptor::toggle("Freeze", "Freeze", false).with_id(ParamId(PARAM_ID_BASE + 5), FREEZE),
];
