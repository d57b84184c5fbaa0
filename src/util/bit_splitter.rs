/// A structure for splitting an opcode into the fields
/// used by the instruction set.
///
/// - X: bits 8-11
/// - Y: bits 4-7
/// - N: bits 0-3
/// - NN: bits 0-7
/// - NNN: bits 0-11
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSplitter(u8, u8);

impl BitSplitter {
    pub fn from_u16(value: u16) -> BitSplitter {
        BitSplitter((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    pub fn new(left: u8, right: u8) -> BitSplitter {
        BitSplitter(left, right)
    }

    /// Left-shift the first u8-component 8 bits,
    /// then take bitwise or with the second component
    /// in order to store the components in a u16.
    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    /// Return the two u8-components as a tuple
    pub fn as_two_u8(&self) -> (u8, u8) {
        (self.0, self.1)
    }

    /// The four nibbles, most significant first.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        (self.0 >> 4, self.x(), self.y(), self.n())
    }

    pub fn x(&self) -> u8 {
        self.0 & 0x0F
    }

    pub fn y(&self) -> u8 {
        self.1 >> 4
    }

    pub fn n(&self) -> u8 {
        self.1 & 0x0F
    }

    pub fn nn(&self) -> u8 {
        self.1
    }

    pub fn nnn(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn as_u16_is_big_endian() {
        assert_eq!(0x1234, BitSplitter::new(0x12, 0x34).as_u16());
        assert_eq!((0x12, 0x34), BitSplitter::from_u16(0x1234).as_two_u8());
    }

    #[test]
    fn get_components() {
        let op = BitSplitter::from_u16(0xABCD);
        assert_eq!((0xA, 0xB, 0xC, 0xD), op.as_four_u8());
        assert_eq!(0xB, op.x());
        assert_eq!(0xC, op.y());
        assert_eq!(0xD, op.n());
        assert_eq!(0xCD, op.nn());
        assert_eq!(0xBCD, op.nnn());
    }

    #[test]
    fn nnn_drops_the_top_nibble() {
        assert_eq!(0xFFF, BitSplitter::from_u16(0xFFFF).nnn());
        assert_eq!(0x000, BitSplitter::from_u16(0xF000).nnn());
    }
}
