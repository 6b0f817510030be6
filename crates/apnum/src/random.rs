//! Injectable randomness for [`BigInteger`](crate::BigInteger) generation.

use apnum_calc::{Error, Result};
use rand::rngs::OsRng;
use rand::RngCore;

/// A source of random bytes. The default is the operating system's
/// cryptographic generator; tests inject deterministic sources.
pub trait RandomSource {
    /// Produce exactly `count` bytes.
    fn draw(&mut self, count: usize) -> Result<Vec<u8>>;
}

/// Cryptographic default source backed by `OsRng`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn draw(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; count];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| Error::RandomSource(e.to_string()))?;
        Ok(buf)
    }
}

/// Adapt a `(byte_count) → bytes` callback into a source.
pub struct FnSource<F>(pub F);

impl<F> RandomSource for FnSource<F>
where
    F: FnMut(usize) -> Result<Vec<u8>>,
{
    fn draw(&mut self, count: usize) -> Result<Vec<u8>> {
        (self.0)(count)
    }
}

/// Draw from a source and insist on the requested length.
pub(crate) fn draw_exact(source: &mut dyn RandomSource, count: usize) -> Result<Vec<u8>> {
    let bytes = source.draw(count)?;
    if bytes.len() != count {
        return Err(Error::RandomSource(format!(
            "requested {count} bytes, source returned {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}
