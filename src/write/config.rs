use crate::codec::{CompressionConfig, EntropyMethod};

/// Allows for the customization of written archives.
///```
/// use sevenz::codec::{BcjArch, CompressionConfig};
/// use sevenz::write::WriterConfig;
///
/// let config = WriterConfig::default()
///     .compression(CompressionConfig::default().bcj(BcjArch::X86))
///     .encode_header(false);
///```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterConfig {
    /// How file contents are compressed.
    pub compression: CompressionConfig,
    /// Pack the header into its own stream and reference it with an encoded header.
    pub encode_header: bool,
    /// How the header is compressed if `encode_header` is set.
    pub header_compression: CompressionConfig,
}

impl Default for WriterConfig {
    fn default() -> WriterConfig {
        WriterConfig {
            compression: CompressionConfig::default(),
            encode_header: true,
            header_compression: CompressionConfig::default()
                .method(EntropyMethod::Lzma)
                .dict_size(1 << 20),
        }
    }
}

impl WriterConfig {
    /// Setter for the `compression` field
    pub fn compression(mut self, compression: CompressionConfig) -> Self {
        self.compression = compression;
        self
    }

    /// Setter for the `encode_header` field
    pub fn encode_header(mut self, encode_header: bool) -> Self {
        self.encode_header = encode_header;
        self
    }

    /// Setter for the `header_compression` field
    pub fn header_compression(mut self, header_compression: CompressionConfig) -> Self {
        self.header_compression = header_compression;
        self
    }
}
