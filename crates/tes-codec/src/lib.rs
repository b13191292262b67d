/// Codec for the `.TES` binary track logs written by Wintec GPS loggers.
///
/// A `.TES` file is a headerless run of fixed 16-byte records. [`codec::decode_all`] turns a
/// byte source into a `Vec` of [`fix::GpsFix`], and [`codec::encode_all`] writes them back.
/// The packed date word is handled by [`date`], on top of the generic [`bits::BitLayout`].
use std::sync::Once;

use thiserror::Error;

pub mod bits;
pub mod codec;
pub mod date;
pub mod fix;

pub use codec::{decode_all, encode_all, RECORD_LEN};
pub use fix::GpsFix;

/// Result type for this library
pub type TesResult<T> = std::result::Result<T, Error>;

/// Error type for this library
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<nom::error::Error<&[u8]>> for Error {
    fn from(err: nom::error::Error<&[u8]>) -> Self {
        Error::ParseError(format!("{:?}", err))
    }
}

/// Test binary helper to init tracing. This is usually the responsibility of the consumer of the
/// library crate.
pub fn lazy_init_tracing() {
    {
        static INIT: Once = Once::new();
        &INIT
    }
    .call_once(|| {
        tracing_subscriber::fmt::init();
    });
}
