/// Image decoding into premultiplied RGBA8.
pub mod decode;

pub use decode::{PreparedImage, decode_image};
