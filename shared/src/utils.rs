//! # Shared Display Helpers
//!
//! Formatting used by front ends when printing wallet addresses and amounts.
//!
//! ```rust
//! use shared::utils::{format_address, format_amount};
//!
//! assert_eq!(format_address("0x52908400098527886E0F7030069857D2E4169EE7", 6, 4), "0x5290...9EE7");
//! assert_eq!(format_amount(1234.5, "USDT"), "1234.50 USDT");
//! ```

/// Shorten a wallet address to its first `prefix_len` and last `suffix_len` characters.
///
/// Addresses too short to shorten are returned unchanged. Works on characters,
/// not bytes, so user-entered labels with non-ASCII text never split a code point.
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= prefix_len + suffix_len {
        return address.to_string();
    }

    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[chars.len() - suffix_len..].iter().collect();
    format!("{}...{}", prefix, suffix)
}

/// [`format_address`] with a 6-character prefix and 4-character suffix.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Two-decimal amount followed by its currency code.
pub fn format_amount(amount: f64, currency: &str) -> String {
    if currency.is_empty() {
        format!("{:.2}", amount)
    } else {
        format!("{:.2} {}", amount, currency)
    }
}
