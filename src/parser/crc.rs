//! This module exposes the CRC algorithm used by 7zip.

use crc::{Crc, CRC_32_ISO_HDLC};

/// 7zip uses the plain zlib/PKZIP CRC32.
static CRC_7Z: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

pub fn sevenz_crc(input: &[u8]) -> u32 {
    return CRC_7Z.checksum(input);
}

#[cfg(test)]
mod test {
    #[test]
    fn check_value() {
        assert_eq!(super::sevenz_crc(b"123456789"), 0xcbf4_3926);
    }
}
