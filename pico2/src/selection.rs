//! Build-time board and variant selection.
//!
//! The firmware has no persistent settings: board wiring and behaviour are
//! picked with cargo features and resolved against the tables in
//! `cuskey-common` at boot.

use cuskey_common::{ActionTable, BoardProfile, ConfigError, Settings, Variant};

#[cfg(all(feature = "board-pinpat4", feature = "board-pinpat23"))]
compile_error!("select exactly one board-* feature");

#[cfg(any(
    all(feature = "variant-media", feature = "variant-ptt"),
    all(feature = "variant-media", feature = "variant-autosend"),
    all(feature = "variant-ptt", feature = "variant-autosend"),
))]
compile_error!("select exactly one variant-* feature");

/// Board profile identifier chosen at build time.
pub const BOARD_ID: &str = if cfg!(feature = "board-pinpat23") { "PinPat23" } else { "PinPat4" };

/// Variant name chosen at build time.
pub const VARIANT_NAME: &str = if cfg!(feature = "variant-media") {
    "media"
} else if cfg!(feature = "variant-autosend") {
    "autosend"
} else {
    "ptt"
};

/// Depth of the queue between the gesture loop and the USB HID task.
pub const HID_QUEUE_DEPTH: usize = 32;

/// Everything the main loop needs, resolved from the build selection.
pub struct Selection {
    pub board: &'static BoardProfile,
    pub variant: Variant,
    pub settings: Settings,
    pub table: ActionTable,
}

/// Resolve board and variant by name and build the matching settings and table.
pub fn resolve(
    board_id: &str,
    variant_name: &str,
) -> Result<Selection, ConfigError> {
    let board = BoardProfile::lookup(board_id)?;
    let variant = Variant::from_name(variant_name)?;

    let mut settings = variant.settings();
    board.apply_to(&mut settings);
    let table = variant.table(&settings)?;

    Ok(Selection {
        board,
        variant,
        settings,
        table,
    })
}

/// Resolve the selection compiled into this firmware image.
pub fn resolve_build() -> Result<Selection, ConfigError> { resolve(BOARD_ID, VARIANT_NAME) }
