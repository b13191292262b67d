//! Fixed-width bit fields packed into a 32-bit word.
//!
//! Fields are listed from the least significant end of the word upward. Unpacking peels fields
//! off the low end one at a time; packing walks the fields in reverse, shifting the word left to
//! make room before OR-ing each field in, so the first field listed ends up in the lowest bits.

/// Ordered widths of `N` bit fields, lowest field first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitLayout<const N: usize> {
    widths: [u32; N],
}

impl<const N: usize> BitLayout<N> {
    pub const fn new(widths: [u32; N]) -> Self {
        Self { widths }
    }

    pub fn widths(&self) -> &[u32; N] {
        &self.widths
    }

    /// Total number of bits covered by the layout.
    pub fn total_bits(&self) -> u32 {
        self.widths.iter().sum()
    }

    /// Split `word` into its fields, lowest field first.
    pub fn unpack(&self, word: u32) -> [u32; N] {
        let mut rest = word;
        let mut fields = [0u32; N];
        for (field, &width) in fields.iter_mut().zip(self.widths.iter()) {
            *field = rest & mask(width);
            rest = rest.checked_shr(width).unwrap_or(0);
        }
        fields
    }

    /// Build a word from `fields`, lowest field first. Each field is masked to its width, so
    /// out-of-range values wrap instead of bleeding into their neighbours.
    pub fn pack(&self, fields: [u32; N]) -> u32 {
        self.widths
            .iter()
            .zip(fields.iter())
            .rev()
            .fold(0u32, |word, (&width, &field)| {
                word.checked_shl(width).unwrap_or(0) | (field & mask(width))
            })
    }
}

fn mask(width: u32) -> u32 {
    match width {
        0 => 0,
        w if w >= u32::BITS => u32::MAX,
        w => (1 << w) - 1,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lazy_init_tracing;

    const NIBBLES: BitLayout<3> = BitLayout::new([4, 4, 8]);

    #[test]
    fn test_unpack_low_field_first() {
        lazy_init_tracing();
        let fields = NIBBLES.unpack(0xab_cde1);
        assert_eq!(fields, [0x1, 0xe, 0xcd]);
        assert_eq!(NIBBLES.total_bits(), 16);
    }

    #[test]
    fn test_pack_mirrors_unpack() {
        lazy_init_tracing();
        let test_cases = [
            ([0x1, 0xe, 0xcd], 0xcde1),
            ([0x0, 0x0, 0x0], 0x0),
            ([0xf, 0xf, 0xff], 0xffff),
            ([0x5, 0x0, 0x01], 0x0105),
        ];
        for (fields, word) in test_cases.iter() {
            assert_eq!(NIBBLES.pack(*fields), *word, "pack({:?})", fields);
            assert_eq!(NIBBLES.unpack(*word), *fields, "unpack({:#x})", word);
        }
    }

    #[test]
    fn test_pack_masks_out_of_range_fields() {
        lazy_init_tracing();
        // 0x13 only keeps its low nibble in a 4-bit field.
        assert_eq!(NIBBLES.pack([0x13, 0x0, 0x0]), 0x3);
        assert_eq!(NIBBLES.pack([0x0, 0x1f, 0x1ff]), 0xfff0);
    }

    #[test]
    fn test_full_width_field() {
        lazy_init_tracing();
        let whole = BitLayout::new([32]);
        assert_eq!(whole.unpack(0xdead_beef), [0xdead_beef]);
        assert_eq!(whole.pack([0xdead_beef]), 0xdead_beef);
    }
}
