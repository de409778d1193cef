//! Binary snapshot frame (panic-free decode).
//!
//! Layout, integers little-endian:
//! - magic `b"VS"`, format version u8
//! - u32 metric count, then per metric:
//!   - u32 name length + UTF-8 name bytes
//!   - u32 sample count, then per sample: i64 timestamp, u8 kind tag, body
//!
//! Kind tags: 0 null (no body), 1 integer (i64), 2 float (f64 bits),
//! 3 text (u32 length + UTF-8), 4 structured (u32 length + JSON bytes).
//! Null values and values with no wire form encode as tag 0.
//!
//! Parsing rules:
//! - Never index the buffer; always check `remaining()` first.
//! - Claimed counts are sanity-checked against the bytes left before looping.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, VitalsError};
use crate::model::{Sample, Variant};
use crate::snapshot::{MetricSnapshot, RegistrySnapshot};

/// Frame magic, `b"VS"`.
pub const WIRE_MAGIC: [u8; 2] = *b"VS";
/// Current frame format version.
pub const WIRE_VERSION: u8 = 1;

const TAG_NULL: u8 = 0;
const TAG_INTEGER: u8 = 1;
const TAG_FLOAT: u8 = 2;
const TAG_TEXT: u8 = 3;
const TAG_STRUCTURED: u8 = 4;

// Smallest possible sample on the wire: timestamp + kind tag.
const MIN_SAMPLE_BYTES: usize = 8 + 1;
// Smallest possible metric: name length + sample count.
const MIN_METRIC_BYTES: usize = 4 + 4;

/// Encode a snapshot as one self-contained frame.
pub fn encode_snapshot(snap: &RegistrySnapshot) -> Bytes {
    let mut buf = BytesMut::with_capacity(64);
    buf.put_slice(&WIRE_MAGIC);
    buf.put_u8(WIRE_VERSION);
    buf.put_u32_le(snap.metrics.len() as u32);
    for (name, metric) in &snap.metrics {
        buf.put_u32_le(name.len() as u32);
        buf.put_slice(name.as_bytes());
        buf.put_u32_le(metric.stats.len() as u32);
        for sample in &metric.stats {
            buf.put_i64_le(sample.timestamp);
            encode_value(&mut buf, &sample.value);
        }
    }
    buf.freeze()
}

fn encode_value(buf: &mut BytesMut, value: &Variant) {
    match value {
        Variant::Integer(v) => {
            buf.put_u8(TAG_INTEGER);
            buf.put_i64_le(*v);
        }
        Variant::Float(v) => {
            buf.put_u8(TAG_FLOAT);
            buf.put_f64_le(*v);
        }
        Variant::Text(s) => {
            buf.put_u8(TAG_TEXT);
            buf.put_u32_le(s.len() as u32);
            buf.put_slice(s.as_bytes());
        }
        Variant::Structured(serde_json::Value::Null) => buf.put_u8(TAG_NULL),
        Variant::Structured(v) => match serde_json::to_vec(v) {
            Ok(body) => {
                buf.put_u8(TAG_STRUCTURED);
                buf.put_u32_le(body.len() as u32);
                buf.put_slice(&body);
            }
            Err(_) => buf.put_u8(TAG_NULL),
        },
        // No wire form; decoders read this back as a structured null.
        Variant::Opaque(_) => buf.put_u8(TAG_NULL),
    }
}

/// Decode a snapshot frame. Trailing bytes after the frame are an error.
pub fn decode_snapshot(mut buf: Bytes) -> Result<RegistrySnapshot> {
    if buf.remaining() < 3 {
        return Err(VitalsError::Decode("frame too short".into()));
    }
    let mut magic = [0u8; 2];
    buf.copy_to_slice(&mut magic);
    if magic != WIRE_MAGIC {
        return Err(VitalsError::Decode("bad magic".into()));
    }
    let version = buf.get_u8();
    if version != WIRE_VERSION {
        return Err(VitalsError::UnsupportedVersion(version));
    }

    if buf.remaining() < 4 {
        return Err(VitalsError::Decode("metric count missing".into()));
    }
    let metric_count = buf.get_u32_le() as usize;
    if metric_count.saturating_mul(MIN_METRIC_BYTES) > buf.remaining() {
        return Err(VitalsError::Decode("metric count exceeds frame".into()));
    }

    let mut snap = RegistrySnapshot::new();
    for _ in 0..metric_count {
        let name_bytes = read_block(&mut buf, "metric name")?;
        let name = String::from_utf8(name_bytes.to_vec())
            .map_err(|_| VitalsError::Decode("metric name is not utf-8".into()))?;

        if buf.remaining() < 4 {
            return Err(VitalsError::Decode("sample count missing".into()));
        }
        let sample_count = buf.get_u32_le() as usize;
        if sample_count.saturating_mul(MIN_SAMPLE_BYTES) > buf.remaining() {
            return Err(VitalsError::Decode("sample count exceeds frame".into()));
        }

        let mut stats = Vec::with_capacity(sample_count);
        for _ in 0..sample_count {
            if buf.remaining() < MIN_SAMPLE_BYTES {
                return Err(VitalsError::Decode("sample truncated".into()));
            }
            let timestamp = buf.get_i64_le();
            let value = decode_value(&mut buf)?;
            stats.push(Sample::new(timestamp, value));
        }

        if snap.metrics.insert(name, MetricSnapshot { stats }).is_some() {
            return Err(VitalsError::Decode("duplicate metric name in frame".into()));
        }
    }

    if buf.has_remaining() {
        return Err(VitalsError::Decode("trailing bytes after frame".into()));
    }
    Ok(snap)
}

fn decode_value(buf: &mut Bytes) -> Result<Variant> {
    // The caller already checked the tag byte is present.
    let tag = buf.get_u8();
    match tag {
        TAG_NULL => Ok(Variant::Structured(serde_json::Value::Null)),
        TAG_INTEGER => {
            if buf.remaining() < 8 {
                return Err(VitalsError::Decode("integer value truncated".into()));
            }
            Ok(Variant::Integer(buf.get_i64_le()))
        }
        TAG_FLOAT => {
            if buf.remaining() < 8 {
                return Err(VitalsError::Decode("float value truncated".into()));
            }
            Ok(Variant::Float(buf.get_f64_le()))
        }
        TAG_TEXT => {
            let body = read_block(buf, "text value")?;
            let s = String::from_utf8(body.to_vec())
                .map_err(|_| VitalsError::Decode("text value is not utf-8".into()))?;
            Ok(Variant::Text(s))
        }
        TAG_STRUCTURED => {
            let body = read_block(buf, "structured value")?;
            let v = serde_json::from_slice(&body)
                .map_err(|e| VitalsError::Decode(format!("structured value: {e}")))?;
            Ok(Variant::Structured(v))
        }
        other => Err(VitalsError::Decode(format!("unknown value tag {other}"))),
    }
}

fn read_block(buf: &mut Bytes, what: &str) -> Result<Bytes> {
    if buf.remaining() < 4 {
        return Err(VitalsError::Decode(format!("{what} length missing")));
    }
    let len = buf.get_u32_le() as usize;
    if buf.remaining() < len {
        return Err(VitalsError::Decode(format!("{what} exceeds frame")));
    }
    Ok(buf.copy_to_bytes(len))
}
