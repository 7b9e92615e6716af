//! NVTX event attribute records.
//!
//! [`EventAttributes`] mirrors `nvtxEventAttributes_v1` byte for byte and is
//! only ever handed to the native `*Ex` entry points. Everything callers build
//! or read goes through the tagged views ([`Payload`], [`Message`]) so the raw
//! unions are never read through the wrong discriminant.

use std::borrow::Cow;
use std::ffi::{c_char, CStr, CString};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr;
use std::slice;

use plain::Plain;

pub const EVENT_ATTRIBUTES_VERSION: u16 = 1;
pub const EVENT_ATTRIBUTES_SIZE: u16 = mem::size_of::<EventAttributes<'static>>() as u16;

pub const NVTX_COLOR_UNKNOWN: i32 = 0;
pub const NVTX_COLOR_ARGB: i32 = 1;

pub const NVTX_PAYLOAD_UNKNOWN: i32 = 0;
pub const NVTX_PAYLOAD_TYPE_UNSIGNED_INT64: i32 = 1;
pub const NVTX_PAYLOAD_TYPE_INT64: i32 = 2;
pub const NVTX_PAYLOAD_TYPE_DOUBLE: i32 = 3;

pub const NVTX_MESSAGE_UNKNOWN: i32 = 0;
pub const NVTX_MESSAGE_TYPE_ASCII: i32 = 1;
pub const NVTX_MESSAGE_TYPE_UNICODE: i32 = 2;

#[repr(C)]
#[derive(Clone, Copy)]
#[allow(non_camel_case_types)]
pub union payload_un {
    pub ull_value: u64,
    pub ll_value: i64,
    pub d_value: f64,
}

#[repr(C)]
#[derive(Clone, Copy)]
#[allow(non_camel_case_types)]
pub union message_un {
    pub ascii: *const c_char,
    pub unicode: *const libc::wchar_t,
}

/// Native `nvtxEventAttributes_v1` layout.
///
/// The record borrows its message text for `'a`, so a record can never
/// outlive the string it points at. Records with a message can only come from
/// [`EventAttributes::encode`] or the unsafe [`EventAttributes::from_bytes`];
/// the type cannot be filled from raw bytes by safe code:
///
/// ```compile_fail
/// let mut event = nvtx_ranges::EventAttributes::new();
/// plain::copy_from_bytes(&mut event, &[0u8; 48]).unwrap();
/// ```
#[repr(C)]
#[derive(Clone, Copy)]
pub struct EventAttributes<'a> {
    version: u16,
    size: u16,
    category: u32,
    color_type: i32,
    color: u32,
    payload_type: i32,
    reserved0: i32,
    payload: payload_un,
    message_type: i32,
    message: message_un,
    _message: PhantomData<&'a CStr>,
}

// Byte-copy target for `from_bytes`. Kept private so only the unsafe
// constructor can produce a record whose message pointer came from bytes.
#[repr(transparent)]
#[derive(Clone, Copy)]
struct RawEventAttributes(EventAttributes<'static>);

unsafe impl Plain for RawEventAttributes {}

/// Numeric payload as read back from a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload {
    U64(u64),
    I64(i64),
    F64(f64),
}

/// Numeric payload supplied by callers.
///
/// Integers are carried as signed 64-bit values and everything else as a
/// double, so encoding never produces an unsigned payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayloadValue {
    Int(i64),
    Float(f64),
}

/// Text carried by an event, in whichever encoding the record declares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message<'a> {
    Ascii(&'a CStr),
    Unicode(&'a [libc::wchar_t]),
}

/// Optional attributes attached to a mark or range.
///
/// An empty set selects the cheap `nvtxMarkA`/`nvtxRangePushA` entry points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EventAttrs {
    /// Packed ARGB color.
    pub color: Option<u32>,
    pub payload: Option<PayloadValue>,
    /// Opaque grouping id; absent means category 0.
    pub category: Option<u32>,
}

/// Errors reading an [`EventAttributes`] record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A discriminant outside the known enumeration, usually a newer
    /// native library writing a layout this crate does not know.
    UnknownDiscriminant { field: &'static str, value: i32 },
    /// Message type is set but the pointer is null.
    NullMessage,
    /// Buffer is smaller than one record.
    TooShort { len: usize, expected: usize },
    UnsupportedVersion(u16),
    SizeMismatch { size: u16, expected: u16 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnknownDiscriminant { field, value } => {
                write!(f, "{field} of unknown type {value}")
            }
            DecodeError::NullMessage => write!(f, "message type is set but message is null"),
            DecodeError::TooShort { len, expected } => {
                write!(f, "record buffer too short: {len} bytes, expected {expected}")
            }
            DecodeError::UnsupportedVersion(version) => {
                write!(f, "unsupported event attributes version {version}")
            }
            DecodeError::SizeMismatch { size, expected } => {
                write!(f, "record declares size {size}, expected {expected}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Errors converting caller values into event attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Unsigned integer too large to be carried as a signed 64-bit payload.
    PayloadOutOfRange(u64),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::PayloadOutOfRange(value) => {
                write!(f, "payload {value} does not fit in a signed 64-bit integer")
            }
        }
    }
}

impl std::error::Error for EncodeError {}

macro_rules! payload_from {
    ($variant:ident, $target:ty, $($source:ty),+) => {
        $(
            impl From<$source> for PayloadValue {
                fn from(value: $source) -> Self {
                    PayloadValue::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

payload_from!(Int, i64, i8, i16, i32, i64, u8, u16, u32);
payload_from!(Float, f64, f32, f64);

impl TryFrom<u64> for PayloadValue {
    type Error = EncodeError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        i64::try_from(value)
            .map(PayloadValue::Int)
            .map_err(|_| EncodeError::PayloadOutOfRange(value))
    }
}

impl TryFrom<usize> for PayloadValue {
    type Error = EncodeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PayloadValue::try_from(value as u64)
    }
}

impl From<PayloadValue> for Payload {
    fn from(value: PayloadValue) -> Self {
        match value {
            PayloadValue::Int(v) => Payload::I64(v),
            PayloadValue::Float(v) => Payload::F64(v),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::U64(v) => write!(f, "{v}"),
            Payload::I64(v) => write!(f, "{v}"),
            Payload::F64(v) => write!(f, "{v}"),
        }
    }
}

impl Message<'_> {
    pub fn to_string_lossy(&self) -> String {
        match self {
            Message::Ascii(text) => text.to_string_lossy().into_owned(),
            Message::Unicode(text) => decode_wide(text),
        }
    }
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

#[cfg(windows)]
fn decode_wide(text: &[libc::wchar_t]) -> String {
    String::from_utf16_lossy(text)
}

#[cfg(not(windows))]
fn decode_wide(text: &[libc::wchar_t]) -> String {
    text.iter()
        .map(|&c| char::from_u32(c as u32).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

impl EventAttrs {
    pub const fn new() -> Self {
        Self {
            color: None,
            payload: None,
            category: None,
        }
    }

    pub fn with_color(mut self, argb: u32) -> Self {
        self.color = Some(argb);
        self
    }

    pub fn with_payload(mut self, payload: impl Into<PayloadValue>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_category(mut self, category: u32) -> Self {
        self.category = Some(category);
        self
    }

    /// True when no attribute is set and the simple entry points apply.
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.payload.is_none() && self.category.is_none()
    }
}

/// Convert caller text to the C string handed to NVTX.
///
/// Text after an interior NUL is dropped instead of failing, since a failed
/// push would leave the matching pop unbalanced.
pub fn message_cstring(text: &str) -> Cow<'static, CStr> {
    let bytes = text.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    match CString::new(&bytes[..end]) {
        Ok(message) => Cow::Owned(message),
        Err(_) => Cow::Borrowed(c""),
    }
}

impl<'a> EventAttributes<'a> {
    /// An empty v1 record: every discriminant unknown and every value zero.
    pub fn new() -> Self {
        Self {
            version: EVENT_ATTRIBUTES_VERSION,
            size: EVENT_ATTRIBUTES_SIZE,
            category: 0,
            color_type: NVTX_COLOR_UNKNOWN,
            color: 0,
            payload_type: NVTX_PAYLOAD_UNKNOWN,
            reserved0: 0,
            payload: payload_un { ull_value: 0 },
            message_type: NVTX_MESSAGE_UNKNOWN,
            message: message_un { ascii: ptr::null() },
            _message: PhantomData,
        }
    }

    /// Build the record for a `*Ex` call.
    ///
    /// A present color is tagged ARGB and a present message ASCII. Integer
    /// payloads are tagged INT64 and floating ones DOUBLE.
    pub fn encode(message: Option<&'a CStr>, attrs: &EventAttrs) -> Self {
        let mut event = Self::new();

        if let Some(category) = attrs.category {
            event.category = category;
        }

        if let Some(argb) = attrs.color {
            event.color_type = NVTX_COLOR_ARGB;
            event.color = argb;
        }

        match attrs.payload {
            Some(PayloadValue::Int(v)) => {
                event.payload_type = NVTX_PAYLOAD_TYPE_INT64;
                event.payload = payload_un { ll_value: v };
            }
            Some(PayloadValue::Float(v)) => {
                event.payload_type = NVTX_PAYLOAD_TYPE_DOUBLE;
                event.payload = payload_un { d_value: v };
            }
            None => {}
        }

        if let Some(text) = message {
            event.message_type = NVTX_MESSAGE_TYPE_ASCII;
            event.message = message_un {
                ascii: text.as_ptr(),
            };
        }

        event
    }

    /// Reconstruct a record from raw bytes written by the native side.
    ///
    /// # Safety
    ///
    /// A non-null message pointer in `bytes` must reference a NUL-terminated
    /// string that stays valid for `'a`.
    pub unsafe fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut raw = RawEventAttributes(EventAttributes::new());
        plain::copy_from_bytes(&mut raw, bytes).map_err(|_| DecodeError::TooShort {
            len: bytes.len(),
            expected: mem::size_of::<Self>(),
        })?;
        let event = raw.0.rebind();
        if event.version != EVENT_ATTRIBUTES_VERSION {
            return Err(DecodeError::UnsupportedVersion(event.version));
        }
        if event.size != EVENT_ATTRIBUTES_SIZE {
            return Err(DecodeError::SizeMismatch {
                size: event.size,
                expected: EVENT_ATTRIBUTES_SIZE,
            });
        }
        Ok(event)
    }

    // Same record with the message borrowed for a different lifetime.
    fn rebind<'b>(self) -> EventAttributes<'b> {
        EventAttributes {
            version: self.version,
            size: self.size,
            category: self.category,
            color_type: self.color_type,
            color: self.color,
            payload_type: self.payload_type,
            reserved0: self.reserved0,
            payload: self.payload,
            message_type: self.message_type,
            message: self.message,
            _message: PhantomData,
        }
    }

    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn category(&self) -> u32 {
        self.category
    }

    pub fn color(&self) -> Result<Option<u32>, DecodeError> {
        match self.color_type {
            NVTX_COLOR_UNKNOWN => Ok(None),
            NVTX_COLOR_ARGB => Ok(Some(self.color)),
            value => Err(DecodeError::UnknownDiscriminant {
                field: "color",
                value,
            }),
        }
    }

    pub fn payload(&self) -> Result<Option<Payload>, DecodeError> {
        // SAFETY: each arm reads the union member its discriminant names, and
        // every member is a plain 64-bit value.
        unsafe {
            match self.payload_type {
                NVTX_PAYLOAD_UNKNOWN => Ok(None),
                NVTX_PAYLOAD_TYPE_UNSIGNED_INT64 => Ok(Some(Payload::U64(self.payload.ull_value))),
                NVTX_PAYLOAD_TYPE_INT64 => Ok(Some(Payload::I64(self.payload.ll_value))),
                NVTX_PAYLOAD_TYPE_DOUBLE => Ok(Some(Payload::F64(self.payload.d_value))),
                value => Err(DecodeError::UnknownDiscriminant {
                    field: "payload",
                    value,
                }),
            }
        }
    }

    pub fn message(&self) -> Result<Option<Message<'a>>, DecodeError> {
        match self.message_type {
            NVTX_MESSAGE_UNKNOWN => Ok(None),
            NVTX_MESSAGE_TYPE_ASCII => {
                let text = unsafe { self.message.ascii };
                if text.is_null() {
                    return Err(DecodeError::NullMessage);
                }
                // SAFETY: the pointer came from a `&'a CStr` in `encode` or was
                // vouched for by the caller of `from_bytes`.
                Ok(Some(Message::Ascii(unsafe { CStr::from_ptr(text) })))
            }
            NVTX_MESSAGE_TYPE_UNICODE => {
                let text = unsafe { self.message.unicode };
                if text.is_null() {
                    return Err(DecodeError::NullMessage);
                }
                // SAFETY: same contract as the ASCII arm, with a wide NUL.
                let text = unsafe {
                    let mut len = 0;
                    while *text.add(len) != 0 {
                        len += 1;
                    }
                    slice::from_raw_parts(text, len)
                };
                Ok(Some(Message::Unicode(text)))
            }
            value => Err(DecodeError::UnknownDiscriminant {
                field: "message",
                value,
            }),
        }
    }
}

impl Default for EventAttributes<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn display_field<T: fmt::Display>(value: Result<Option<T>, DecodeError>) -> String {
    match value {
        Ok(Some(value)) => value.to_string(),
        Ok(None) => "None".to_string(),
        Err(e) => format!("<invalid: {e}>"),
    }
}

impl fmt::Display for EventAttributes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EventAttributes_v1:")?;
        writeln!(f, "\tversion: {}", self.version)?;
        writeln!(f, "\tsize: {}", self.size)?;
        writeln!(f, "\tcategory: {}", self.category)?;
        writeln!(f, "\tmessage: {}", display_field(self.message()))?;
        let color = self.color().map(|c| c.map(|argb| format!("{argb:#x}")));
        writeln!(f, "\tcolor: {}", display_field(color))?;
        write!(f, "\tpayload: {}", display_field(self.payload()))
    }
}

impl fmt::Debug for EventAttributes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventAttributes")
            .field("version", &self.version)
            .field("size", &self.size)
            .field("category", &self.category)
            .field("color", &self.color())
            .field("payload", &self.payload())
            .field("message", &self.message())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_all_fields() {
        let attrs = EventAttrs::new()
            .with_color(0xffff0000)
            .with_payload(42)
            .with_category(7);
        let event = EventAttributes::encode(Some(c"hi"), &attrs);

        assert_eq!(event.version(), 1);
        assert_eq!(event.size() as usize, mem::size_of::<EventAttributes>());
        assert_eq!(event.category(), 7);
        assert_eq!(event.color().unwrap(), Some(0xffff0000));
        assert_eq!(event.payload().unwrap(), Some(Payload::I64(42)));
        assert_eq!(event.message().unwrap(), Some(Message::Ascii(c"hi")));
    }

    #[test]
    fn test_encode_absent_fields_stay_unknown() {
        let event = EventAttributes::encode(None, &EventAttrs::new());
        assert_eq!(event.category(), 0);
        assert_eq!(event.color().unwrap(), None);
        assert_eq!(event.payload().unwrap(), None);
        assert_eq!(event.message().unwrap(), None);
        assert_eq!(event.color, 0);
        assert_eq!(unsafe { event.payload.ull_value }, 0);
    }

    #[test]
    fn test_float_payload_is_double() {
        let event = EventAttributes::encode(None, &EventAttrs::new().with_payload(1.5));
        assert_eq!(event.payload_type, NVTX_PAYLOAD_TYPE_DOUBLE);
        assert_eq!(event.payload().unwrap(), Some(Payload::F64(1.5)));
    }

    #[test]
    fn test_integer_conversions_are_signed() {
        assert_eq!(PayloadValue::from(7u32), PayloadValue::Int(7));
        assert_eq!(PayloadValue::from(-3i8), PayloadValue::Int(-3));
        assert_eq!(PayloadValue::try_from(5u64), Ok(PayloadValue::Int(5)));
        assert_eq!(
            PayloadValue::try_from(u64::MAX),
            Err(EncodeError::PayloadOutOfRange(u64::MAX))
        );
        assert_eq!(Payload::from(PayloadValue::Float(0.5)), Payload::F64(0.5));
    }

    #[test]
    fn test_encode_never_writes_unsigned_payload() {
        let values = [
            PayloadValue::from(0u8),
            PayloadValue::from(u32::MAX),
            PayloadValue::from(i64::MIN),
            PayloadValue::try_from(i64::MAX as u64).unwrap(),
            PayloadValue::from(-0.25f32),
        ];
        for value in values {
            let event = EventAttributes::encode(None, &EventAttrs::new().with_payload(value));
            assert_ne!(event.payload_type, NVTX_PAYLOAD_TYPE_UNSIGNED_INT64);
            assert_eq!(event.payload().unwrap(), Some(Payload::from(value)));
        }
    }

    #[test]
    fn test_unknown_discriminants() {
        let mut event = EventAttributes::encode(Some(c"x"), &EventAttrs::new().with_color(1));
        event.color_type = 9;
        event.payload_type = -1;
        event.message_type = 3;
        assert_eq!(
            event.color(),
            Err(DecodeError::UnknownDiscriminant {
                field: "color",
                value: 9
            })
        );
        assert_eq!(
            event.payload(),
            Err(DecodeError::UnknownDiscriminant {
                field: "payload",
                value: -1
            })
        );
        assert_eq!(
            event.message(),
            Err(DecodeError::UnknownDiscriminant {
                field: "message",
                value: 3
            })
        );
        assert!(event.to_string().contains("<invalid: color of unknown type 9>"));
    }

    #[test]
    fn test_null_message() {
        let mut event = EventAttributes::new();
        event.message_type = NVTX_MESSAGE_TYPE_ASCII;
        assert_eq!(event.message(), Err(DecodeError::NullMessage));
    }

    #[test]
    fn test_unicode_message() {
        let wide: Vec<libc::wchar_t> = "héllo\0"
            .chars()
            .map(|c| c as u32 as libc::wchar_t)
            .collect();
        let mut event = EventAttributes::new();
        event.message_type = NVTX_MESSAGE_TYPE_UNICODE;
        event.message = message_un {
            unicode: wide.as_ptr(),
        };
        let message = event.message().unwrap().unwrap();
        assert!(matches!(message, Message::Unicode(text) if text.len() == 5));
        assert_eq!(message.to_string_lossy(), "héllo");
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_v1_layout() {
        assert_eq!(mem::size_of::<EventAttributes>(), 48);
        assert_eq!(mem::align_of::<EventAttributes>(), 8);
        assert_eq!(mem::offset_of!(EventAttributes, version), 0);
        assert_eq!(mem::offset_of!(EventAttributes, size), 2);
        assert_eq!(mem::offset_of!(EventAttributes, category), 4);
        assert_eq!(mem::offset_of!(EventAttributes, color_type), 8);
        assert_eq!(mem::offset_of!(EventAttributes, color), 12);
        assert_eq!(mem::offset_of!(EventAttributes, payload_type), 16);
        assert_eq!(mem::offset_of!(EventAttributes, reserved0), 20);
        assert_eq!(mem::offset_of!(EventAttributes, payload), 24);
        assert_eq!(mem::offset_of!(EventAttributes, message_type), 32);
        assert_eq!(mem::offset_of!(EventAttributes, message), 40);
    }

    fn raw_record(color_type: i32, payload_type: i32, payload: u64) -> Vec<u8> {
        let mut bytes = vec![0u8; mem::size_of::<EventAttributes>()];
        bytes[0..2].copy_from_slice(&EVENT_ATTRIBUTES_VERSION.to_ne_bytes());
        bytes[2..4].copy_from_slice(&EVENT_ATTRIBUTES_SIZE.to_ne_bytes());
        bytes[4..8].copy_from_slice(&3u32.to_ne_bytes());
        bytes[8..12].copy_from_slice(&color_type.to_ne_bytes());
        bytes[12..16].copy_from_slice(&0xff00ff00u32.to_ne_bytes());
        bytes[16..20].copy_from_slice(&payload_type.to_ne_bytes());
        let payload_at = mem::offset_of!(EventAttributes, payload);
        bytes[payload_at..payload_at + 8].copy_from_slice(&payload.to_ne_bytes());
        bytes
    }

    #[test]
    fn test_from_bytes() {
        let bytes = raw_record(NVTX_COLOR_ARGB, NVTX_PAYLOAD_TYPE_UNSIGNED_INT64, 99);
        let event = unsafe { EventAttributes::from_bytes(&bytes) }.unwrap();
        assert_eq!(event.category(), 3);
        assert_eq!(event.color().unwrap(), Some(0xff00ff00));
        assert_eq!(event.payload().unwrap(), Some(Payload::U64(99)));
        assert_eq!(event.message().unwrap(), None);
    }

    #[test]
    fn test_from_bytes_outlives_source_buffer() {
        let event = {
            let bytes = raw_record(NVTX_COLOR_UNKNOWN, NVTX_PAYLOAD_TYPE_INT64, 5);
            unsafe { EventAttributes::from_bytes(&bytes) }.unwrap()
        };
        assert_eq!(event.color().unwrap(), None);
        assert_eq!(event.payload().unwrap(), Some(Payload::I64(5)));
        assert_eq!(event.category(), 3);
    }

    #[test]
    fn test_from_bytes_rejects_bad_records() {
        let bytes = raw_record(NVTX_COLOR_ARGB, NVTX_PAYLOAD_UNKNOWN, 0);
        assert!(matches!(
            unsafe { EventAttributes::from_bytes(&bytes[..10]) },
            Err(DecodeError::TooShort { len: 10, .. })
        ));

        let mut wrong_version = bytes.clone();
        wrong_version[0..2].copy_from_slice(&2u16.to_ne_bytes());
        assert!(matches!(
            unsafe { EventAttributes::from_bytes(&wrong_version) },
            Err(DecodeError::UnsupportedVersion(2))
        ));

        let mut wrong_size = bytes;
        wrong_size[2..4].copy_from_slice(&12u16.to_ne_bytes());
        assert!(matches!(
            unsafe { EventAttributes::from_bytes(&wrong_size) },
            Err(DecodeError::SizeMismatch { size: 12, .. })
        ));
    }

    #[test]
    fn test_display() {
        let attrs = EventAttrs::new().with_color(0xffff0000).with_payload(42);
        let event = EventAttributes::encode(Some(c"hi"), &attrs);
        let rendered = event.to_string();
        assert!(rendered.starts_with("EventAttributes_v1:"));
        assert!(rendered.contains("\tmessage: hi"));
        assert!(rendered.contains("\tcolor: 0xffff0000"));
        assert!(rendered.contains("\tpayload: 42"));
        assert!(rendered.contains("\tcategory: 0"));
    }

    #[test]
    fn test_message_cstring_truncates_at_nul() {
        assert_eq!(message_cstring("range").as_ref(), c"range");
        assert_eq!(message_cstring("abc\0def").as_ref(), c"abc");
        assert_eq!(message_cstring("").as_ref(), c"");
    }

    #[test]
    fn test_attrs_is_empty() {
        assert!(EventAttrs::new().is_empty());
        assert!(EventAttrs::default().is_empty());
        assert!(!EventAttrs::new().with_category(0).is_empty());
    }
}
