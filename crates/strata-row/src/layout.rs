// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Shared offset arithmetic for binary rows and binary arrays.

/// Round `n` up to the nearest multiple of `word`.
pub fn round_up(n: usize, word: usize) -> usize {
    n.div_ceil(word) * word
}

/// Null-bitset width in bytes for a row of the given arity: an 8-bit
/// header reservation plus one bit per field, rounded up to the next
/// full 8-byte word (`⌈(arity + 8)/64⌉ · 8`), so the fixed part always
/// starts on a word boundary. See DESIGN.md's "null bitset width" entry
/// for why this formula, and not a byte-granular one, is the one that
/// keeps the empty row's bitset at exactly one qword.
pub fn row_bitset_width_bytes(arity: usize) -> usize {
    round_up(arity + 8, 64) / 8
}

/// Offset of fixed slot `i` within a binary row, relative to the row's
/// own offset.
pub fn row_field_offset(arity: usize, i: usize) -> usize {
    row_bitset_width_bytes(arity) + i * 8
}

/// Size of the fixed part (bitset + slots) of a binary row of the given
/// arity.
pub fn row_fixed_part_size(arity: usize) -> usize {
    row_bitset_width_bytes(arity) + arity * 8
}

/// Null-bitset width in bytes for a binary array of `num_elements`,
/// padded to 4-byte words.
pub fn array_bitset_width_bytes(num_elements: usize) -> usize {
    round_up(num_elements, 32) / 8
}

/// Offset of the null bitset within a binary array (fixed at 4, past the
/// `int32 num_elements` header).
pub const ARRAY_BITSET_OFFSET: usize = 4;

/// Offset of element `i` within a binary array, relative to the array's
/// own offset.
pub fn array_element_offset(num_elements: usize, element_size: usize, i: usize) -> usize {
    ARRAY_BITSET_OFFSET + array_bitset_width_bytes(num_elements) + i * element_size
}

/// Size of the fixed part of a binary array (header + bitset + elements).
pub fn array_fixed_part_size(num_elements: usize, element_size: usize) -> usize {
    ARRAY_BITSET_OFFSET + array_bitset_width_bytes(num_elements) + num_elements * element_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_row_has_one_qword_bitset() {
        assert_eq!(row_bitset_width_bytes(0), 8);
    }

    #[test]
    fn bitset_grows_by_word_every_56_fields() {
        assert_eq!(row_bitset_width_bytes(56), 8);
        assert_eq!(row_bitset_width_bytes(57), 16);
    }

    #[test]
    fn round_up_is_idempotent_on_aligned_input() {
        assert_eq!(round_up(16, 8), 16);
        assert_eq!(round_up(17, 8), 24);
    }

    #[test]
    fn array_bitset_width_matches_four_byte_words() {
        assert_eq!(array_bitset_width_bytes(0), 0);
        assert_eq!(array_bitset_width_bytes(1), 4);
        assert_eq!(array_bitset_width_bytes(32), 4);
        assert_eq!(array_bitset_width_bytes(33), 8);
    }
}
