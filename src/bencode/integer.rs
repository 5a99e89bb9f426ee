use std::io::{Read, Seek};

use bytes::BufMut;

use super::error::BencodeError;
use super::reader::PeekReader;
use super::traits::Bencode;
use crate::constants::{END, INT_START, MINUS};

/// Integers encode as `i<digits>e` with no leading zeros and no `-0`.
///
/// Decoding rejects every non-canonical form (`ie`, `i-e`, `i-0e`, `i03e`)
/// and magnitudes outside the `i64` range.
impl Bencode for i64 {
    fn length_in_bytes(&self) -> usize {
        let sign = usize::from(*self < 0);
        2 + sign + decimal_len(self.unsigned_abs())
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(INT_START);
        if *self < 0 {
            buf.put_u8(MINUS);
        }
        put_decimal(buf, self.unsigned_abs());
        buf.put_u8(END);
    }

    fn decode_from<R: Read + Seek>(reader: &mut PeekReader<R>) -> Result<Self, BencodeError> {
        reader.expect_byte(INT_START, "'i'")?;

        let negative = reader.peek()? == Some(MINUS);
        if negative {
            reader.next_byte()?;
        }

        let mut value: i64 = 0;
        let mut digits = 0usize;
        loop {
            match reader.next_byte()? {
                END => break,
                byte @ b'0'..=b'9' => {
                    if digits == 1 && value == 0 {
                        return Err(BencodeError::InvalidInteger("leading zeros".into()));
                    }
                    // Accumulate towards the sign so i64::MIN stays representable.
                    let digit = i64::from(byte - b'0');
                    value = value
                        .checked_mul(10)
                        .and_then(|v| {
                            if negative {
                                v.checked_sub(digit)
                            } else {
                                v.checked_add(digit)
                            }
                        })
                        .ok_or(BencodeError::IntegerOverflow)?;
                    digits += 1;
                }
                byte => return Err(BencodeError::unexpected("digit or 'e'", byte)),
            }
        }

        if digits == 0 {
            return Err(BencodeError::InvalidInteger("empty".into()));
        }
        if negative && value == 0 {
            return Err(BencodeError::InvalidInteger("negative zero".into()));
        }

        Ok(value)
    }
}

/// Number of decimal digits in `n` (`0` has one).
pub(crate) fn decimal_len(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}

/// Writes `n` in decimal without leading zeros.
pub(crate) fn put_decimal<B: BufMut>(buf: &mut B, mut n: u64) {
    let mut digits = [0u8; 20];
    let mut start = digits.len();
    loop {
        start -= 1;
        digits[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    buf.put_slice(&digits[start..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_len() {
        assert_eq!(decimal_len(0), 1);
        assert_eq!(decimal_len(9), 1);
        assert_eq!(decimal_len(10), 2);
        assert_eq!(decimal_len(1_000_000), 7);
        assert_eq!(decimal_len(u64::MAX), 20);
    }

    #[test]
    fn test_length_matches_encoding() {
        for n in [0, 1, -1, 9, 10, -10, 100, 12345, -42, i64::MAX, i64::MIN] {
            assert_eq!(n.length_in_bytes(), n.to_bencode().len(), "value {n}");
        }
    }

    #[test]
    fn test_extremes() {
        assert_eq!(i64::MIN.to_bencode(), b"i-9223372036854775808e");
        assert_eq!(i64::MAX.to_bencode(), b"i9223372036854775807e");
    }
}
