/// Packed `.TES` date word.
///
/// The logger stores each timestamp in a single little-endian `u32`, from the low bits upward:
/// seconds (6), minutes (6), hours (5), day of month (5), month (4), years since 2000 (6). There is
/// no time zone on the wire; timestamps are UTC.
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc};

use crate::bits::BitLayout;

/// Stored year values are offsets from this year.
pub const YEAR_EPOCH: i32 = 2000;

/// Field widths of the packed date: second, minute, hour, day, month, year offset.
pub const TES_DATE_LAYOUT: BitLayout<6> = BitLayout::new([6, 6, 5, 5, 4, 6]);

/// Decode a packed date word.
///
/// Fields are not calendar checked. A component past its range carries into the next unit up,
/// e.g. second 60 becomes the following minute, month 0 is December of the prior year and
/// February 30 lands in March. Any `u32` therefore yields a timestamp.
pub fn decode_date(word: u32) -> DateTime<Utc> {
    let [second, minute, hour, day, month, year_offset] = TES_DATE_LAYOUT.unpack(word);

    let months = (YEAR_EPOCH + year_offset as i32) * 12 + month as i32 - 1;
    let (year, month0) = (months.div_euclid(12), months.rem_euclid(12) as u32);
    let month_start = NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("normalised month of a year between 1999 and 2064");

    let offset = Duration::days(day as i64 - 1)
        + Duration::seconds(hour as i64 * 3600 + minute as i64 * 60 + second as i64);
    Utc.from_utc_datetime(&(month_start + offset))
}

/// Encode a timestamp as a packed date word. Years outside 2000..=2063 wrap modulo 64.
pub fn encode_date(timestamp: &DateTime<Utc>) -> u32 {
    TES_DATE_LAYOUT.pack([
        timestamp.second(),
        timestamp.minute(),
        timestamp.hour(),
        timestamp.day(),
        timestamp.month(),
        (timestamp.year() - YEAR_EPOCH) as u32,
    ])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lazy_init_tracing;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).single().unwrap()
    }

    // Bytes E3 C2 CC 46 from a device log, read little-endian.
    const SAMPLE_WORD: u32 = 0x46cc_c2e3;

    #[test]
    fn test_layout_fills_word() {
        assert_eq!(TES_DATE_LAYOUT.total_bits(), 32);
    }

    #[test]
    fn test_decode_sample() {
        lazy_init_tracing();
        assert_eq!(decode_date(SAMPLE_WORD), utc(2017, 11, 6, 12, 11, 35));
    }

    #[test]
    fn test_encode_sample() {
        lazy_init_tracing();
        assert_eq!(encode_date(&utc(2017, 11, 6, 12, 11, 35)), SAMPLE_WORD);
    }

    #[test]
    fn test_date_range_edges() {
        lazy_init_tracing();
        let test_cases = [
            utc(2000, 1, 1, 0, 0, 0),
            utc(2063, 12, 31, 23, 59, 59),
            utc(2024, 2, 29, 6, 30, 0),
        ];
        for ts in test_cases.iter() {
            let word = encode_date(ts);
            assert_eq!(decode_date(word), *ts, "word {:#010x}", word);
        }
        assert_eq!(encode_date(&utc(2000, 1, 1, 0, 0, 0)), 1 << 17 | 1 << 22);
    }

    #[test]
    fn test_decode_normalises_out_of_range_fields() {
        lazy_init_tracing();
        let test_cases = [
            // [sec, min, hour, day, month, year offset]
            ([60, 59, 23, 31, 12, 17], utc(2018, 1, 1, 0, 0, 0)),
            ([0, 0, 0, 1, 0, 18], utc(2017, 12, 1, 0, 0, 0)),
            ([0, 0, 0, 0, 3, 20], utc(2020, 2, 29, 0, 0, 0)),
            ([0, 0, 0, 31, 2, 21], utc(2021, 3, 3, 0, 0, 0)),
            ([0, 0, 24, 1, 1, 5], utc(2005, 1, 2, 0, 0, 0)),
            ([0, 0, 0, 1, 13, 63], utc(2064, 1, 1, 0, 0, 0)),
            ([0, 0, 0, 0, 0, 0], utc(1999, 11, 30, 0, 0, 0)),
        ];
        for (fields, expected) in test_cases.iter() {
            let word = TES_DATE_LAYOUT.pack(*fields);
            assert_eq!(decode_date(word), *expected, "fields {:?}", fields);
        }
    }

    #[test]
    fn test_encode_wraps_year() {
        lazy_init_tracing();
        let test_cases = [
            (utc(2064, 5, 1, 0, 0, 0), utc(2000, 5, 1, 0, 0, 0)),
            (utc(1999, 5, 1, 0, 0, 0), utc(2063, 5, 1, 0, 0, 0)),
        ];
        for (ts, expected) in test_cases.iter() {
            assert_eq!(decode_date(encode_date(ts)), *expected);
        }
    }
}
