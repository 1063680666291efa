//! Sequential bit input consumed by the decoder.

/// A strictly sequential source of bits. `true` stands for 1.
pub trait BitSource {
    fn has_next_bit(&self) -> bool;

    /// Reads the next bit, or `None` once the source is exhausted.
    fn next_bit(&mut self) -> Option<bool>;
}

impl<B: BitSource + ?Sized> BitSource for &mut B {
    fn has_next_bit(&self) -> bool {
        (**self).has_next_bit()
    }

    fn next_bit(&mut self) -> Option<bool> {
        (**self).next_bit()
    }
}

/// Reads the first `bit_count` bits of a byte slice, most significant bit first.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    bit_count: usize,
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8], bit_count: usize) -> Self {
        BitReader {
            bytes,
            bit_count: bit_count.min(bytes.len() * 8),
            position: 0,
        }
    }

    /// Reads every bit of `bytes`.
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        BitReader::new(bytes, bytes.len() * 8)
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl BitSource for BitReader<'_> {
    fn has_next_bit(&self) -> bool {
        self.position < self.bit_count
    }

    fn next_bit(&mut self) -> Option<bool> {
        if !self.has_next_bit() {
            return None;
        }
        let byte = self.bytes[self.position / 8];
        let bit = (byte >> (7 - self.position % 8)) & 1 == 1;
        self.position += 1;
        Some(bit)
    }
}

/// Adapts any iterator of booleans into a [`BitSource`].
///
/// One bit is pulled ahead so that `has_next_bit` is exact.
#[derive(Debug, Clone)]
pub struct IterBits<I> {
    inner: I,
    lookahead: Option<bool>,
}

impl<I: Iterator<Item = bool>> IterBits<I> {
    pub fn new<T>(bits: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        let mut inner = bits.into_iter();
        let lookahead = inner.next();
        IterBits { inner, lookahead }
    }
}

impl<I: Iterator<Item = bool>> BitSource for IterBits<I> {
    fn has_next_bit(&self) -> bool {
        self.lookahead.is_some()
    }

    fn next_bit(&mut self) -> Option<bool> {
        let bit = self.lookahead.take()?;
        self.lookahead = self.inner.next();
        Some(bit)
    }
}
