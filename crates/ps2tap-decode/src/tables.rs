//! Scan Code Set 2 lookup tables.
//!
//! Two namespaces: the base table and the `0xE0`-prefixed extended table.
//! The same byte value names different keys in each, so they never merge.

pub fn base(code: u8) -> Option<&'static str> {
    Some(match code {
        // Letters
        0x1C => "A",
        0x32 => "B",
        0x21 => "C",
        0x23 => "D",
        0x24 => "E",
        0x2B => "F",
        0x34 => "G",
        0x33 => "H",
        0x43 => "I",
        0x3B => "J",
        0x42 => "K",
        0x4B => "L",
        0x3A => "M",
        0x31 => "N",
        0x44 => "O",
        0x4D => "P",
        0x15 => "Q",
        0x2D => "R",
        0x1B => "S",
        0x2C => "T",
        0x3C => "U",
        0x2A => "V",
        0x1D => "W",
        0x22 => "X",
        0x35 => "Y",
        0x1A => "Z",

        // Numbers
        0x45 => "0",
        0x16 => "1",
        0x1E => "2",
        0x26 => "3",
        0x25 => "4",
        0x2E => "5",
        0x36 => "6",
        0x3D => "7",
        0x3E => "8",
        0x46 => "9",

        // Function keys
        0x05 => "F1",
        0x06 => "F2",
        0x04 => "F3",
        0x0C => "F4",
        0x03 => "F5",
        0x0B => "F6",
        0x83 => "F7",
        0x0A => "F8",
        0x01 => "F9",
        0x09 => "F10",
        0x78 => "F11",
        0x07 => "F12",

        // Control keys
        0x5A => "ENTER",
        0x76 => "ESC",
        0x66 => "BACKSPACE",
        0x0D => "TAB",
        0x29 => "SPACE",
        0x0E => "GRAVE",
        0x4E => "MINUS",
        0x55 => "EQUAL",
        0x54 => "LBRACKET",
        0x5B => "RBRACKET",
        0x5D => "BSLASH",
        0x4C => "SEMICOLON",
        0x52 => "QUOTE",
        0x41 => "COMMA",
        0x49 => "DOT",
        0x4A => "SLASH",
        0x58 => "CAPSLOCK",

        // Modifiers
        0x12 => "LSHIFT",
        0x59 => "RSHIFT",
        0x14 => "LCTRL",
        0x11 => "LALT",

        // Keypad
        0x70 => "KP_0",
        0x69 => "KP_1",
        0x72 => "KP_2",
        0x7A => "KP_3",
        0x6B => "KP_4",
        0x73 => "KP_5",
        0x74 => "KP_6",
        0x6C => "KP_7",
        0x75 => "KP_8",
        0x7D => "KP_9",
        0x7C => "KP_ASTERISK",
        0x7B => "KP_MINUS",
        0x79 => "KP_PLUS",
        0x71 => "KP_DOT",
        0x77 => "NUMLOCK",
        0x7E => "SCROLLLOCK",

        _ => return None,
    })
}

pub fn extended(code: u8) -> Option<&'static str> {
    Some(match code {
        // Navigation cluster
        0x70 => "INSERT",
        0x6C => "HOME",
        0x7D => "PGUP",
        0x71 => "DELETE",
        0x69 => "END",
        0x7A => "PGDN",

        // Arrow keys
        0x75 => "UP",
        0x72 => "DOWN",
        0x6B => "LEFT",
        0x74 => "RIGHT",

        // Modifiers
        0x14 => "RCTRL",
        0x11 => "RALT",
        0x1F => "LGUI",
        0x27 => "RGUI",
        0x2F => "APP",

        // Keypad
        0x5A => "KP_ENTER",
        0x4A => "KP_SLASH",

        // ACPI
        0x37 => "POWER",
        0x3F => "SLEEP",
        0x5E => "WAKE",

        // Media keys
        0x10 => "WWW_SEARCH",
        0x18 => "WWW_FAVORITES",
        0x20 => "WWW_REFRESH",
        0x21 => "VOLUME_DOWN",
        0x23 => "MUTE",
        0x28 => "WWW_STOP",
        0x2B => "CALCULATOR",
        0x30 => "WWW_FORWARD",
        0x32 => "VOLUME_UP",
        0x34 => "PLAY_PAUSE",
        0x38 => "WWW_BACK",
        0x3A => "WWW_HOME",
        0x3B => "MEDIA_STOP",
        0x40 => "MY_COMPUTER",
        0x48 => "EMAIL",
        0x4D => "NEXT_TRACK",
        0x15 => "PREV_TRACK",
        0x50 => "MEDIA_SELECT",

        // Print screen halves
        0x12 => "PRTSC_PART",
        0x7C => "PRTSC",

        _ => return None,
    })
}

/// Resolves a scan code to a key name, synthesizing a fallback label for
/// codes missing from the table.
pub fn lookup(code: u8, is_extended: bool) -> String {
    if is_extended {
        match extended(code) {
            Some(name) => name.to_string(),
            None => format!("UNKNOWN_E0_{code:02X}"),
        }
    } else {
        match base(code) {
            Some(name) => name.to_string(),
            None => format!("UNKNOWN_{code:02X}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaces_stay_distinct() {
        // 0x75 is KP_8 in the base set but the up arrow once extended.
        assert_eq!(base(0x75), Some("KP_8"));
        assert_eq!(extended(0x75), Some("UP"));
        assert_eq!(base(0x14), Some("LCTRL"));
        assert_eq!(extended(0x14), Some("RCTRL"));
    }

    #[test]
    fn unmapped_codes_get_fallback_labels() {
        assert_eq!(lookup(0x02, false), "UNKNOWN_02");
        assert_eq!(lookup(0x02, true), "UNKNOWN_E0_02");
    }

    #[test]
    fn spot_checks_across_key_groups() {
        assert_eq!(lookup(0x1C, false), "A");
        assert_eq!(lookup(0x5A, false), "ENTER");
        assert_eq!(lookup(0x83, false), "F7");
        assert_eq!(lookup(0x32, true), "VOLUME_UP");
        assert_eq!(lookup(0x7C, true), "PRTSC");
    }
}
