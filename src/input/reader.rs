use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::input::InputError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reads the whole input, inflating `.gz` files.
pub fn read_input_bytes(path: &Path) -> Result<Vec<u8>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidInput || e.kind() == std::io::ErrorKind::InvalidData {
            InputError::InvalidInput(format!("failed to decompress {}: {e}", path.display()))
        } else {
            InputError::Io(e)
        }
    })?;
    Ok(buf)
}

/// Drops a leading UTF-8 byte order mark.
pub fn strip_bom(mut bytes: Vec<u8>) -> Vec<u8> {
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    bytes
}
