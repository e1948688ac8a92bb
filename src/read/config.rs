/// Allows for the customization of how archives are read.
///```
/// use sevenz::read::ReaderConfig;
///
/// let config = ReaderConfig::default().verify_crc(false);
///```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Check file and folder contents against their stored CRCs.
    /// The signature header and trailer CRCs are always checked.
    pub verify_crc: bool,
}

impl Default for ReaderConfig {
    fn default() -> ReaderConfig {
        ReaderConfig { verify_crc: true }
    }
}

impl ReaderConfig {
    /// Setter for the `verify_crc` field
    pub fn verify_crc(mut self, verify_crc: bool) -> Self {
        self.verify_crc = verify_crc;
        self
    }
}
