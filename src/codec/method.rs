use super::*;

use crate::parser::types::Coder;

/// Every coder method this crate knows by ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Copy,
    Delta,
    Bcj(BcjArch),
    Bcj2,
    Lzma,
    Lzma2,
    Deflate,
    BZip2,
    Aes,
}

/// Branch converters, which make machine code of one architecture compress better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BcjArch {
    X86,
    PowerPc,
    Ia64,
    Arm,
    ArmThumb,
    Sparc,
}

impl Method {
    pub fn from_id(id: &[u8]) -> Option<Method> {
        return match id {
            [0x00] => Some(Method::Copy),
            [0x03] => Some(Method::Delta),
            [0x21] => Some(Method::Lzma2),
            [0x03, 0x01, 0x01] => Some(Method::Lzma),
            [0x03, 0x03, 0x01, 0x03] => Some(Method::Bcj(BcjArch::X86)),
            [0x03, 0x03, 0x01, 0x1b] => Some(Method::Bcj2),
            [0x03, 0x03, 0x02, 0x05] => Some(Method::Bcj(BcjArch::PowerPc)),
            [0x03, 0x03, 0x04, 0x01] => Some(Method::Bcj(BcjArch::Ia64)),
            [0x03, 0x03, 0x05, 0x01] => Some(Method::Bcj(BcjArch::Arm)),
            [0x03, 0x03, 0x07, 0x01] => Some(Method::Bcj(BcjArch::ArmThumb)),
            [0x03, 0x03, 0x08, 0x05] => Some(Method::Bcj(BcjArch::Sparc)),
            [0x04, 0x01, 0x08] => Some(Method::Deflate),
            [0x04, 0x02, 0x02] => Some(Method::BZip2),
            [0x06, 0xf1, 0x07, 0x01] => Some(Method::Aes),
            _ => None,
        };
    }

    pub fn id(&self) -> &'static [u8] {
        return match self {
            Method::Copy => &[0x00],
            Method::Delta => &[0x03],
            Method::Lzma2 => &[0x21],
            Method::Lzma => &[0x03, 0x01, 0x01],
            Method::Bcj(arch) => arch.id(),
            Method::Bcj2 => &[0x03, 0x03, 0x01, 0x1b],
            Method::Deflate => &[0x04, 0x01, 0x08],
            Method::BZip2 => &[0x04, 0x02, 0x02],
            Method::Aes => &[0x06, 0xf1, 0x07, 0x01],
        };
    }

    /// Whether liblzma has a raw filter for this method.
    pub fn is_supported(&self) -> bool {
        return matches!(
            self,
            Method::Copy | Method::Bcj(_) | Method::Lzma | Method::Lzma2
        );
    }
}

impl BcjArch {
    pub fn id(&self) -> &'static [u8] {
        return match self {
            BcjArch::X86 => &[0x03, 0x03, 0x01, 0x03],
            BcjArch::PowerPc => &[0x03, 0x03, 0x02, 0x05],
            BcjArch::Ia64 => &[0x03, 0x03, 0x04, 0x01],
            BcjArch::Arm => &[0x03, 0x03, 0x05, 0x01],
            BcjArch::ArmThumb => &[0x03, 0x03, 0x07, 0x01],
            BcjArch::Sparc => &[0x03, 0x03, 0x08, 0x05],
        };
    }
}

impl TryFrom<&Coder> for Method {
    type Error = CodecError;
    /// Resolve a coder's method, failing for IDs that can't be decoded.
    fn try_from(coder: &Coder) -> Result<Self, Self::Error> {
        return match Method::from_id(&coder.id) {
            Some(m) if m.is_supported() => Ok(m),
            _ => Err(CodecError::UnsupportedCoder {
                id: coder.id.clone(),
            }),
        };
    }
}

/// Parameters of an LZMA coder, stored as `[lc/lp/pb byte, dictionary size u32 LE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzmaProperties {
    pub lc: u32,
    pub lp: u32,
    pub pb: u32,
    pub dict_size: u32,
}

impl Default for LzmaProperties {
    fn default() -> Self {
        return LzmaProperties {
            lc: 3,
            lp: 0,
            pb: 2,
            dict_size: DEFAULT_DICT_SIZE,
        };
    }
}

impl LzmaProperties {
    pub fn decode(attrs: &[u8]) -> Option<LzmaProperties> {
        let (&d, dict) = attrs.split_first()?;
        if d >= 9 * 5 * 5 {
            return None;
        }
        let dict: [u8; 4] = dict.try_into().ok()?;
        let d = d as u32;
        return Some(LzmaProperties {
            lc: d % 9,
            lp: (d / 9) % 5,
            pb: d / 45,
            dict_size: u32::from_le_bytes(dict),
        });
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut res = vec![((self.pb * 5 + self.lp) * 9 + self.lc) as u8];
        res.extend_from_slice(&self.dict_size.to_le_bytes());
        return res;
    }
}

/// Dictionary size for an LZMA2 property byte.
pub fn lzma2_dict_size(prop: u8) -> Option<u32> {
    return match prop {
        40 => Some(u32::MAX),
        0..=39 => Some((2 | (prop as u32 & 1)) << (prop / 2 + 11)),
        _ => None,
    };
}

/// Smallest LZMA2 property byte whose dictionary holds `dict_size` bytes.
pub fn lzma2_dict_prop(dict_size: u32) -> u8 {
    return (0..40u8)
        .find(|&p| lzma2_dict_size(p).map_or(false, |d| d >= dict_size))
        .unwrap_or(40);
}
