use std::ffi::OsStr;
use std::fs::File;
use std::io::{stderr, stdout, BufRead, BufReader, Error, Write};
use std::path::Path;

use flate2::read;

/// Opens a file for reading.
///
/// This function can open a regular file or a gzipped one, as determined by the extension
/// of the input file name. A boxed reader to the content is returned.
pub fn open_file(filename: &str) -> Result<Box<dyn BufRead>, Error> {
    let path = Path::new(filename);
    let file = File::open(path)?;

    if path.extension() == Some(OsStr::new("gz")) {
        Ok(Box::new(BufReader::new(read::GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Creates a `Writer` object.
///
/// Attempts to create a file under a given name. However, if the name is `"stdout"` or
/// `"stderr"`, the returned `Writer` will be connected to either `stdout` or `stderr`
/// stream, respectively. An empty file name also results in writing to `stdout`.
pub fn out_writer(out_fname: &str) -> Result<Box<dyn Write>, Error> {
    match out_fname {
        "" | "stdout" => Ok(Box::new(stdout()) as Box<dyn Write>),
        "stderr" => Ok(Box::new(stderr()) as Box<dyn Write>),
        _ => {
            let file = File::create(Path::new(out_fname))?;
            Ok(Box::new(file) as Box<dyn Write>)
        }
    }
}
