use crate::bit_source::BitReader;

/// Growable bit buffer, packed most significant bit first.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    /// Wraps packed bytes of which only the first `bit_count` bits are meaningful.
    ///
    /// `bit_count` is clamped to the number of bits `bits` can hold.
    pub fn from_bytes(bits: Vec<u8>, bit_count: usize) -> Self {
        let bit_count = bit_count.min(bits.len() * 8);
        BitVec { bits, bit_count }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8; // which byte is target?
        let bit_offset = self.bit_count % 8; // which bit position is target?

        // make a new byte if needed
        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }

        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    /// Appends a path string; callers guarantee it holds only `'0'` and `'1'`.
    pub fn push_path(&mut self, path: &str) {
        for c in path.bytes() {
            self.push_bit(c == b'1');
        }
    }

    pub fn reader(&self) -> BitReader<'_> {
        BitReader::new(&self.bits, self.bit_count)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_push_packs_msb_first() {
        let mut bv = BitVec::new();
        bv.push_path("101");
        bv.push_path("00001");
        bv.push_bit(true);

        assert_eq!(bv.bit_count(), 9);
        assert_eq!(bv.as_bytes(), &[0b1010_0001, 0b1000_0000]);
    }

    #[test]
    fn test_from_bytes_clamps_count() {
        let bv = BitVec::from_bytes(vec![0xff], 20);
        assert_eq!(bv.bit_count(), 8);
        assert!(!bv.is_empty());
        assert!(BitVec::new().is_empty());
    }
}
