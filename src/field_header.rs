//! Field header codec
//!
//! Every field on the wire is introduced by a compact (type code, field code)
//! header. Codes below 16 pack into nibbles of a single byte; larger codes
//! spill into follow-up bytes:
//!
//! ```text
//! type < 16, field < 16   [type << 4 | field]
//! type < 16, field >= 16  [type << 4] [field]
//! type >= 16, field < 16  [field] [type]
//! both >= 16              [0x00] [type] [field]
//! ```
//!
//! A follow-up byte that is zero, or that would have fit in the compact
//! nibble, makes the header non-canonical and is rejected.

use crate::error::{CodecError, CodecResult};
use crate::parser::BinaryParser;

/// Upper bound (exclusive) for header-encodable type and field codes.
const CODE_LIMIT: i32 = 256;
/// Codes below this fit in a header nibble.
const NIBBLE_LIMIT: i32 = 16;

/// Encode a (type code, field code) pair into its 1-3 byte wire header.
pub fn encode_header(type_code: i32, field_code: i32) -> CodecResult<Vec<u8>> {
    if !(1..CODE_LIMIT).contains(&type_code) || !(1..CODE_LIMIT).contains(&field_code) {
        return Err(CodecError::MalformedHeader { offset: 0 });
    }
    let (t, f) = (type_code as u8, field_code as u8);
    let header = match (type_code < NIBBLE_LIMIT, field_code < NIBBLE_LIMIT) {
        (true, true) => vec![(t << 4) | f],
        (true, false) => vec![t << 4, f],
        (false, true) => vec![f, t],
        (false, false) => vec![0x00, t, f],
    };
    Ok(header)
}

/// Decode a wire header at the parser's cursor.
pub fn decode_header(parser: &mut BinaryParser<'_>) -> CodecResult<(i32, i32)> {
    let start = parser.offset();
    let first = parser.read_u8()?;
    let type_nibble = i32::from(first >> 4);
    let field_nibble = i32::from(first & 0x0F);

    match (type_nibble, field_nibble) {
        (0, 0) => {
            // Both codes extended; each must be too large for its nibble.
            let type_code = i32::from(parser.read_u8()?);
            let field_code = i32::from(parser.read_u8()?);
            if type_code < NIBBLE_LIMIT || field_code < NIBBLE_LIMIT {
                return Err(CodecError::MalformedHeader { offset: start });
            }
            Ok((type_code, field_code))
        }
        (0, f) => {
            // Low nibble is the field code; the type code follows.
            let type_code = i32::from(parser.read_u8()?);
            if type_code < NIBBLE_LIMIT {
                return Err(CodecError::MalformedHeader { offset: start });
            }
            Ok((type_code, f))
        }
        (t, 0) => {
            let field_code = i32::from(parser.read_u8()?);
            if field_code < NIBBLE_LIMIT {
                return Err(CodecError::MalformedHeader { offset: start });
            }
            Ok((t, field_code))
        }
        (t, f) => Ok((t, f)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(type_code: i32, field_code: i32) -> (i32, i32) {
        let bytes = encode_header(type_code, field_code).unwrap();
        let mut parser = BinaryParser::new(&bytes);
        let decoded = decode_header(&mut parser).unwrap();
        assert!(parser.end(), "header fully consumed");
        decoded
    }

    #[test]
    fn compact_form() {
        assert_eq!(encode_header(2, 4).unwrap(), vec![0x24]);
        assert_eq!(encode_header(8, 1).unwrap(), vec![0x81]);
    }

    #[test]
    fn extended_forms() {
        assert_eq!(encode_header(2, 27).unwrap(), vec![0x20, 27]);
        assert_eq!(encode_header(17, 4).unwrap(), vec![0x04, 17]);
        assert_eq!(encode_header(24, 200).unwrap(), vec![0x00, 24, 200]);
    }

    #[test]
    fn roundtrip_all_encodable_codes() {
        for type_code in 1..256 {
            for field_code in 1..256 {
                assert_eq!(roundtrip(type_code, field_code), (type_code, field_code));
            }
        }
    }

    #[test]
    fn out_of_range_codes_rejected() {
        assert!(encode_header(0, 1).is_err());
        assert!(encode_header(1, 0).is_err());
        assert!(encode_header(256, 1).is_err());
        assert!(encode_header(1, 256).is_err());
    }

    #[test]
    fn inconsistent_zero_nibbles_rejected() {
        // Follow-up byte would have fit in the compact nibble.
        for bytes in [
            vec![0x20, 0x05],
            vec![0x04, 0x05],
            vec![0x00, 0x05, 0x20],
            vec![0x00, 0x20, 0x05],
            // Trailing zero bytes.
            vec![0x20, 0x00],
            vec![0x04, 0x00],
            vec![0x00, 0x00, 0x00],
        ] {
            let mut parser = BinaryParser::new(&bytes);
            assert!(
                matches!(
                    decode_header(&mut parser),
                    Err(CodecError::MalformedHeader { offset: 0 })
                ),
                "bytes {bytes:02X?} must be rejected"
            );
        }
    }

    #[test]
    fn truncated_header_reports_end() {
        let mut parser = BinaryParser::new(&[0x00, 0x20]);
        assert!(matches!(
            decode_header(&mut parser),
            Err(CodecError::UnexpectedEnd { .. })
        ));
    }
}
