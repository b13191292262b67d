/// `.TES` record codec.
///
/// Every record is 16 bytes, little-endian, with no file header, footer or separator:
///
/// | offset | width | field                                  |
/// |--------|-------|----------------------------------------|
/// | 0      | 2     | flags (bit 1 = marker)                 |
/// | 2      | 4     | packed date, see [`crate::date`]       |
/// | 6      | 4     | latitude, signed, 1e-7 degrees         |
/// | 10     | 4     | longitude, signed, 1e-7 degrees        |
/// | 14     | 2     | altitude, unsigned, units unknown      |
///
/// Decoding stops at the first record that doesn't fit in the remaining bytes. Whatever is left
/// over is dropped without error.
use std::io::{Read, Write};

use nom::{
    multi::many0,
    number::complete::{le_i32, le_u16, le_u32},
    Finish, IResult,
};
use tracing::{debug, trace};

use crate::{
    date::{decode_date, encode_date},
    fix::{degrees_from_fixed, degrees_to_fixed, GpsFix},
    TesResult,
};

/// Size of one record on the wire.
pub const RECORD_LEN: usize = 16;

/// Read `input` to the end and decode every complete record in it.
///
/// Only a failing reader is an error. Empty input gives an empty `Vec`, and a trailing partial
/// record is ignored.
pub fn decode_all<R: Read>(mut input: R) -> TesResult<Vec<GpsFix>> {
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;
    parse(&data)
}

/// Encode `fixes` in order and hand the whole buffer to `output` in one write.
pub fn encode_all<W: Write>(mut output: W, fixes: &[GpsFix]) -> TesResult<()> {
    let bytes = to_bytes(fixes);
    output.write_all(&bytes)?;
    debug!("wrote {} TES records ({} bytes)", fixes.len(), bytes.len());
    Ok(())
}

/// Decode every complete record in `bytes`.
pub fn parse(bytes: &[u8]) -> TesResult<Vec<GpsFix>> {
    let (rest, fixes) = many0(nom_record)(bytes).finish()?;
    debug!("decoded {} TES records", fixes.len());
    if !rest.is_empty() {
        debug!("ignoring {} trailing bytes after last record", rest.len());
    }
    Ok(fixes)
}

pub fn to_bytes(fixes: &[GpsFix]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(fixes.len() * RECORD_LEN);
    for fix in fixes {
        trace!("encoding {:?}", fix);
        bytes.extend_from_slice(&encode_record(fix));
    }
    bytes
}

pub fn decode_record(bytes: &[u8; RECORD_LEN]) -> GpsFix {
    let (_, fix) = nom_record(bytes).expect("record parser reads exactly RECORD_LEN bytes");
    fix
}

/// Marker bit of the written flags comes from `fix.marker`; every other flag bit is copied from
/// `fix.raw_flags`.
pub fn encode_record(fix: &GpsFix) -> [u8; RECORD_LEN] {
    let mut record = [0u8; RECORD_LEN];
    record[0..2].copy_from_slice(&fix.wire_flags().to_le_bytes());
    record[2..6].copy_from_slice(&encode_date(&fix.timestamp).to_le_bytes());
    record[6..10].copy_from_slice(&degrees_to_fixed(fix.latitude).to_le_bytes());
    record[10..14].copy_from_slice(&degrees_to_fixed(fix.longitude).to_le_bytes());
    record[14..16].copy_from_slice(&fix.altitude.to_le_bytes());
    record
}

fn nom_record(bytes: &[u8]) -> IResult<&[u8], GpsFix> {
    let (rest, raw_flags) = le_u16(bytes)?;
    let (rest, date) = le_u32(rest)?;
    let (rest, lat) = le_i32(rest)?;
    let (rest, lon) = le_i32(rest)?;
    let (rest, altitude) = le_u16(rest)?;
    let fix = GpsFix::from_wire(
        raw_flags,
        decode_date(date),
        degrees_from_fixed(lat),
        degrees_from_fixed(lon),
        altitude,
    );
    trace!("decoded {:?}", fix);
    Ok((rest, fix))
}
