//! CRC-8 checksum used by the SHT1x.
//!
//! Polynomial `x^8 + x^5 + x^4 + 1` (`0x31`), fed MSB-first. The sensor
//! transmits its CRC bit-reversed and seeds the register with the
//! bit-reversed low nibble of the status register, so both ends of the
//! calculation go through [`mirror`].

/// CRC-8 generator polynomial.
pub const POLYNOMIAL: u8 = 0x31;

/// Reverses the bit order of a byte (bit 7 becomes bit 0).
pub const fn mirror(value: u8) -> u8 {
    value.reverse_bits()
}

/// Folds one byte into a CRC-8 register, most significant bit first.
pub const fn fold(mut crc: u8, mut byte: u8) -> u8 {
    let mut i = 0;
    while i < 8 {
        if (crc ^ byte) & 0x80 != 0 {
            crc = (crc << 1) ^ POLYNOMIAL;
        } else {
            crc <<= 1;
        }
        byte <<= 1;
        i += 1;
    }
    crc
}

/// Running checksum for one command/response exchange.
///
/// Created at the start of every exchange and dropped at its end, so no
/// state carries over between exchanges or driver instances.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc8 {
    value: u8,
}

impl Crc8 {
    /// Starts an exchange seeded from the current status register.
    pub const fn seeded(status_register: u8) -> Self {
        Crc8 {
            value: mirror(status_register & 0x0F),
        }
    }

    /// Adds a transmitted or received byte, in wire order.
    pub fn update(&mut self, byte: u8) {
        self.value = fold(self.value, byte);
    }

    /// Raw register value.
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Checks the CRC byte as the sensor sent it on the wire.
    pub const fn verify(&self, received: u8) -> bool {
        mirror(self.value) == received
    }
}
