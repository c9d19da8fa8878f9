//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet.

pub struct DebugFlags {
    /// Emit UI interaction logs (e.g., slider moves).
    pub print_ui_interactions: bool,
    /// Emit model load/save details (artifact size, timings).
    pub print_serde: bool,
    /// Emit a line per render cycle with the horizon and point count.
    pub print_render_cycle: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_ui_interactions: true,
    print_serde: false,
    print_render_cycle: false,
    print_shutdown: false,
};
