//! Base62 codec
//!
//! Encodes arbitrary byte strings into the 62-character alphanumeric
//! alphabet. Two alphabets are supported: GMP order (`0-9A-Za-z`) and
//! inverted order (`0-9a-zA-Z`). Leading zero bytes are preserved — each
//! maps to one leading zero character — so round-trips are exact for any
//! input, including all-zero buffers.
//!
//! ```
//! use keystone_common::convert::Base62;
//!
//! let codec = Base62::gmp();
//! let encoded = codec.encode_str("hello");
//! assert_eq!(codec.decode_str(&encoded).unwrap(), "hello");
//! ```

use thiserror::Error;

/// GMP-style alphabet: digits, uppercase, lowercase.
pub const GMP_ALPHABET: [u8; 62] =
    *b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Inverted alphabet: digits, lowercase, uppercase.
pub const INVERTED_ALPHABET: [u8; 62] =
    *b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u32 = 62;

/// Errors produced while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base62Error {
    /// The input contained a byte outside the active alphabet.
    #[error("invalid base62 character {ch:?} at index {index}")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// Its position in the input.
        index: usize,
    },

    /// The decoded bytes were not valid UTF-8 (string API only).
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// A Base62 codec bound to one alphabet.
///
/// Construction precomputes a reverse-lookup table, so per-character
/// validation during decode is a single array index.
#[derive(Debug, Clone)]
pub struct Base62 {
    alphabet: [u8; 62],
    lookup: [Option<u8>; 256],
}

impl Default for Base62 {
    fn default() -> Self {
        Self::gmp()
    }
}

impl Base62 {
    /// Codec using the GMP alphabet (`0-9A-Za-z`). The recommended default.
    pub fn gmp() -> Self {
        Self::with_alphabet(GMP_ALPHABET)
    }

    /// Codec using the inverted alphabet (`0-9a-zA-Z`).
    pub fn inverted() -> Self {
        Self::with_alphabet(INVERTED_ALPHABET)
    }

    fn with_alphabet(alphabet: [u8; 62]) -> Self {
        let mut lookup = [None; 256];
        for (value, &ch) in alphabet.iter().enumerate() {
            lookup[ch as usize] = Some(value as u8);
        }
        Self { alphabet, lookup }
    }

    /// Encode a byte string.
    ///
    /// Every leading zero byte becomes one leading zero character; the rest
    /// is repeated short division of the base-256 number by 62.
    pub fn encode_bytes(&self, input: &[u8]) -> Vec<u8> {
        if input.is_empty() {
            return Vec::new();
        }

        let leading_zeros = input.iter().take_while(|&&byte| byte == 0).count();
        let mut output = vec![self.alphabet[0]; leading_zeros];

        // Base-62 digits of the remaining value, least significant first.
        let mut digits: Vec<u8> = Vec::new();
        let mut number: Vec<u8> = input[leading_zeros..].to_vec();
        while !number.is_empty() {
            let mut remainder: u32 = 0;
            let mut quotient: Vec<u8> = Vec::with_capacity(number.len());
            for &byte in &number {
                let acc = remainder * 256 + u32::from(byte);
                let digit = (acc / BASE) as u8;
                remainder = acc % BASE;
                if !(quotient.is_empty() && digit == 0) {
                    quotient.push(digit);
                }
            }
            digits.push(remainder as u8);
            number = quotient;
        }

        output.extend(digits.iter().rev().map(|&digit| self.alphabet[digit as usize]));
        output
    }

    /// Encode a UTF-8 string into its Base62 (ASCII) form.
    pub fn encode_str(&self, input: &str) -> String {
        self.encode_bytes(input.as_bytes()).into_iter().map(char::from).collect()
    }

    /// Decode a Base62 byte string back into the original bytes.
    ///
    /// # Errors
    /// `InvalidCharacter` for any byte outside the active alphabet.
    pub fn decode_bytes(&self, encoded: &[u8]) -> Result<Vec<u8>, Base62Error> {
        if encoded.is_empty() {
            return Ok(Vec::new());
        }

        // Validate everything up front so errors point at the first bad byte.
        for (index, &ch) in encoded.iter().enumerate() {
            if self.lookup[ch as usize].is_none() {
                return Err(Base62Error::InvalidCharacter { ch: char::from(ch), index });
            }
        }

        let leading_zeros = encoded.iter().take_while(|&&ch| ch == self.alphabet[0]).count();
        let mut number: Vec<u8> = Vec::new(); // base-256, most significant first
        for &ch in &encoded[leading_zeros..] {
            let digit = u32::from(self.lookup[ch as usize].unwrap_or(0));
            // number = number * 62 + digit
            let mut carry = digit;
            for byte in number.iter_mut().rev() {
                let acc = u32::from(*byte) * BASE + carry;
                *byte = (acc & 0xFF) as u8;
                carry = acc >> 8;
            }
            while carry > 0 {
                number.insert(0, (carry & 0xFF) as u8);
                carry >>= 8;
            }
        }

        let mut output = vec![0u8; leading_zeros];
        output.extend_from_slice(&number);
        Ok(output)
    }

    /// Decode a Base62 string back into a UTF-8 string.
    ///
    /// # Errors
    /// `InvalidCharacter` for bytes outside the alphabet, `InvalidUtf8` when
    /// the decoded bytes do not form a valid string.
    pub fn decode_str(&self, encoded: &str) -> Result<String, Base62Error> {
        let bytes = self.decode_bytes(encoded.as_bytes())?;
        String::from_utf8(bytes).map_err(|_| Base62Error::InvalidUtf8)
    }
}
