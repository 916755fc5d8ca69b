//! Keystroke filtering for numeric inputs (amounts, counts).

/// Editing keys allowed in numeric fields besides digits.
const EDITING_KEYS: [&str; 5] = ["Backspace", "Delete", "ArrowLeft", "ArrowRight", "Tab"];

/// Whether a key event named `key` may reach a numeric input.
pub fn is_numeric_input_key(key: &str) -> bool {
    (!key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())) || EDITING_KEYS.contains(&key)
}
