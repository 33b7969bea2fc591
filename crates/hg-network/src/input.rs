//! Opening network files, transparently gunzipping `*.gz`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::NetworkResult;

pub(crate) fn open(path: &Path) -> NetworkResult<Box<dyn Read>> {
    let file = BufReader::new(File::open(path)?);
    let gzipped = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
    if gzipped {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}
