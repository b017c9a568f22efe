//! Token envelope encoding: zlib compression and the UserSig base64 alphabet
//!
//! The alphabet is standard base64 with `+`, `/` and `=` replaced after
//! encoding so tokens survive URLs and form fields unescaped.

use std::io::{Read, Write};

use base64::{engine::general_purpose::STANDARD, Engine};
use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

use crate::error::{Error, Result};

/// Standard base64 character → UserSig character
pub const SUBSTITUTIONS: [(char, char); 3] = [('+', '*'), ('/', '-'), ('=', '_')];

/// Base64-encode with the UserSig alphabet
pub fn base64_encode(data: &[u8]) -> String {
    STANDARD.encode(data).chars().map(to_usersig_char).collect()
}

/// Decode a UserSig-alphabet base64 string
pub fn base64_decode(data: &str) -> Result<Vec<u8>> {
    let standard: String = data.chars().map(to_standard_char).collect();
    STANDARD
        .decode(standard)
        .map_err(|e| Error::MalformedToken(format!("Invalid base64: {}", e)))
}

fn to_usersig_char(c: char) -> char {
    SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map_or(c, |(_, to)| *to)
}

fn to_standard_char(c: char) -> char {
    SUBSTITUTIONS
        .iter()
        .find(|(_, to)| *to == c)
        .map_or(c, |(from, _)| *from)
}

/// zlib-compress a payload
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| Error::Signing(format!("Compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| Error::Signing(format!("Compression failed: {}", e)))
}

/// Inflate a zlib stream
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::MalformedToken(format!("Invalid zlib stream: {}", e)))?;
    Ok(out)
}

/// Compress then base64-encode
pub fn encode_envelope(payload: &[u8]) -> Result<String> {
    Ok(base64_encode(&compress(payload)?))
}

/// Base64-decode then decompress
pub fn decode_envelope(token: &str) -> Result<Vec<u8>> {
    decompress(&base64_decode(token)?)
}
