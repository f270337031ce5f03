pub const DEFAULT_QUALITY: u8 = 80;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Default compression strategy set, applied in this order.
pub const DEFAULT_STRATEGIES: &[&str] = &["gifsicle", "jpegtran", "optipng", "svgo"];

/// How many leading bytes format sniffing is allowed to look at.
pub const SNIFF_LEN: usize = 12;

pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

pub const OXIPNG_PRESET: u8 = 4;
pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;

pub const GIF_ENCODE_SPEED: i32 = 10;

/// Upper bound on concurrently processed items, regardless of core count.
/// Each in-flight item holds an open input and an open output descriptor.
pub const MAX_PARALLEL_ITEMS: usize = 16;
pub const MIN_AVAILABLE_MEMORY_MIB: u64 = 256;

/// Decoded images typically take several times their on-disk size.
pub const MEMORY_ESTIMATE_MULTIPLIER: u64 = 4;

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "svg", "psd",
];
