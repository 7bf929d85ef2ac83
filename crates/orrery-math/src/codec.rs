// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Text and binary persistence for the math value types.
//!
//! Every persisted type is a fixed sequence of `f32` fields:
//! - text: fields in order, rendered with `Display` (shortest round-trip
//!   form) and joined with `", "`;
//! - binary: the same fields as big-endian IEEE-754 words.
//!
//! Both forms decode back to bit-identical values, including `±0`,
//! infinities and subnormals.

use bytes::{Buf, BufMut};

use crate::{CodecError, Mat3, Mat4, Quat, Vec2, Vec3};

/// A value that persists as a fixed number of `f32` fields.
pub trait FloatCodec: Sized {
    /// Number of fields in the encoding.
    const FIELDS: usize;

    /// Appends the fields in encoding order.
    fn write_fields(&self, out: &mut Vec<f32>);

    /// Rebuilds a value from exactly [`FloatCodec::FIELDS`] fields.
    fn from_fields(fields: &[f32]) -> Self;
}

/// Text and binary persistence.
///
/// Implemented for every [`FloatCodec`] type; tagged values implement it
/// directly.
pub trait Persist: Sized {
    /// Comma-separated text form.
    fn encode_text(&self) -> String;

    /// Parses the text form.
    fn decode_text(text: &str) -> Result<Self, CodecError>;

    /// Writes the binary form.
    fn encode_binary<B: BufMut>(&self, out: &mut B);

    /// Reads the binary form, consuming exactly the bytes it needs.
    fn decode_binary<B: Buf>(input: &mut B) -> Result<Self, CodecError>;
}

/// Renders fields as `"a, b, c"`.
pub fn join_fields(fields: &[f32]) -> String {
    fields
        .iter()
        .map(f32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Splits and parses comma-separated `f32` fields.
///
/// Whitespace around each field is ignored; an empty input has zero
/// fields.
pub fn parse_fields(text: &str) -> Result<Vec<f32>, CodecError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .enumerate()
        .map(|(index, raw)| {
            let trimmed = raw.trim();
            trimmed.parse::<f32>().map_err(|_| {
                tracing::debug!(index, text = trimmed, "rejecting non-numeric field");
                CodecError::InvalidNumber {
                    index,
                    text: trimmed.to_owned(),
                }
            })
        })
        .collect()
}

/// Checks that `found` fields satisfy a type needing `expected`.
pub fn expect_fields(expected: usize, found: usize) -> Result<(), CodecError> {
    if expected != found {
        tracing::debug!(expected, found, "field count mismatch");
        return Err(CodecError::FieldCount { expected, found });
    }
    Ok(())
}

/// Reads `count` big-endian `f32` words after checking enough bytes remain.
pub fn read_fields<B: Buf>(input: &mut B, count: usize) -> Result<Vec<f32>, CodecError> {
    let needed = count * 4;
    let remaining = input.remaining();
    if remaining < needed {
        tracing::debug!(needed, remaining, "binary input truncated");
        return Err(CodecError::Truncated { needed, remaining });
    }
    Ok((0..count).map(|_| input.get_f32()).collect())
}

impl<T: FloatCodec> Persist for T {
    fn encode_text(&self) -> String {
        let mut fields = Vec::with_capacity(T::FIELDS);
        self.write_fields(&mut fields);
        join_fields(&fields)
    }

    fn decode_text(text: &str) -> Result<Self, CodecError> {
        let fields = parse_fields(text)?;
        expect_fields(T::FIELDS, fields.len())?;
        Ok(T::from_fields(&fields))
    }

    fn encode_binary<B: BufMut>(&self, out: &mut B) {
        let mut fields = Vec::with_capacity(T::FIELDS);
        self.write_fields(&mut fields);
        for f in fields {
            out.put_f32(f);
        }
    }

    fn decode_binary<B: Buf>(input: &mut B) -> Result<Self, CodecError> {
        let fields = read_fields(input, T::FIELDS)?;
        Ok(T::from_fields(&fields))
    }
}

impl FloatCodec for Vec2 {
    const FIELDS: usize = 2;

    fn write_fields(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&self.to_array());
    }

    fn from_fields(fields: &[f32]) -> Self {
        Self::new(fields[0], fields[1])
    }
}

impl FloatCodec for Vec3 {
    const FIELDS: usize = 3;

    fn write_fields(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&self.to_array());
    }

    fn from_fields(fields: &[f32]) -> Self {
        Self::new(fields[0], fields[1], fields[2])
    }
}

impl FloatCodec for Quat {
    const FIELDS: usize = 4;

    fn write_fields(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&self.to_array());
    }

    fn from_fields(fields: &[f32]) -> Self {
        Self::new(fields[0], fields[1], fields[2], fields[3])
    }
}

/// Column-major, like the in-memory layout.
impl FloatCodec for Mat3 {
    const FIELDS: usize = 9;

    fn write_fields(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&self.to_array());
    }

    fn from_fields(fields: &[f32]) -> Self {
        let mut data = [0.0; 9];
        data.copy_from_slice(&fields[..9]);
        Self::new(data)
    }
}

/// Column-major, like the in-memory layout.
impl FloatCodec for Mat4 {
    const FIELDS: usize = 16;

    fn write_fields(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&self.to_array());
    }

    fn from_fields(fields: &[f32]) -> Self {
        let mut data = [0.0; 16];
        data.copy_from_slice(&fields[..16]);
        Self::new(data)
    }
}
