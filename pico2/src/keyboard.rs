//! Boot-protocol keyboard report state.
//!
//! Tracks the modifier byte and up to six held keys so that `PressKey` /
//! `ReleaseKey` commands can be turned into full reports. Modifiers never
//! occupy a key slot.

use cuskey_common::KeyCode;
use heapless::Vec;

/// Key slots in a boot keyboard report.
pub const KEY_SLOTS: usize = 6;

/// Plain report contents, converted to the USB type by the HID task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardSnapshot {
    pub modifier: u8,
    pub keycodes: [u8; KEY_SLOTS],
}

/// Held keys and modifiers.
#[derive(Clone, Debug, Default)]
pub struct KeyboardState {
    modifier: u8,
    keys: Vec<u8, KEY_SLOTS>,
}

impl KeyboardState {
    pub const fn new() -> Self {
        Self {
            modifier: 0,
            keys: Vec::new(),
        }
    }

    /// Mark `key` as held. Returns `false` if nothing changed (already held or no free slot).
    pub fn press(
        &mut self,
        key: KeyCode,
    ) -> bool {
        if key.is_modifier() {
            let before = self.modifier;
            self.modifier |= key.modifier_bit();
            return self.modifier != before;
        }
        if self.keys.contains(&key.0) {
            return false;
        }
        self.keys.push(key.0).is_ok()
    }

    /// Mark `key` as released. Returns `false` if it was not held.
    pub fn release(
        &mut self,
        key: KeyCode,
    ) -> bool {
        if key.is_modifier() {
            let before = self.modifier;
            self.modifier &= !key.modifier_bit();
            return self.modifier != before;
        }
        match self.keys.iter().position(|&held| held == key.0) {
            Some(index) => {
                // Keep press order so reports stay stable
                self.keys.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.modifier = 0;
        self.keys.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool { self.modifier == 0 && self.keys.is_empty() }

    pub fn snapshot(&self) -> KeyboardSnapshot {
        let mut keycodes = [0; KEY_SLOTS];
        keycodes[..self.keys.len()].copy_from_slice(&self.keys);
        KeyboardSnapshot {
            modifier: self.modifier,
            keycodes,
        }
    }
}
