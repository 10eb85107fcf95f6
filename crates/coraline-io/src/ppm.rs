//! Binary PPM (P6) image I/O.
//!
//! Only the binary P6 variant is supported (the original loader never wrote
//! anything else); a whitespace- and comment-aware header scanner avoids
//! assuming a fixed three-line layout. ASCII PPM (P3) is out of scope.

use std::io::{Read, Write};

use coraline_core::{DepthMap, RgbImage};

use crate::error::{IoError, IoResult};

/// A single-byte-lookahead reader used only to parse the PPM header; pixel
/// data is read directly afterward with no buffering overhead.
struct HeaderReader<'a, R: Read> {
    reader: &'a mut R,
    peeked: Option<u8>,
}

impl<'a, R: Read> HeaderReader<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        Self { reader, peeked: None }
    }

    fn read_byte(&mut self) -> IoResult<u8> {
        if let Some(b) = self.peeked.take() {
            return Ok(b);
        }
        let mut buf = [0u8; 1];
        self.reader.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn unread(&mut self, b: u8) {
        self.peeked = Some(b);
    }

    fn skip_whitespace_and_comments(&mut self) -> IoResult<()> {
        loop {
            let b = self.read_byte()?;
            if b == b'#' {
                loop {
                    if self.read_byte()? == b'\n' {
                        break;
                    }
                }
                continue;
            }
            if b.is_ascii_whitespace() {
                continue;
            }
            self.unread(b);
            return Ok(());
        }
    }

    fn read_uint(&mut self) -> IoResult<u32> {
        self.skip_whitespace_and_comments()?;
        let mut digits = Vec::new();
        loop {
            let b = self.read_byte()?;
            if b.is_ascii_digit() {
                digits.push(b);
            } else {
                self.unread(b);
                break;
            }
        }
        if digits.is_empty() {
            return Err(IoError::InvalidData("expected an integer in PPM header".to_string()));
        }
        let s = std::str::from_utf8(&digits).expect("ascii digits are valid utf-8");
        s.parse()
            .map_err(|_| IoError::InvalidData(format!("invalid integer in PPM header: {s}")))
    }
}

/// Read a binary PPM (P6) image.
pub fn read_ppm<R: Read>(mut reader: R) -> IoResult<RgbImage> {
    let (width, height) = {
        let mut header = HeaderReader::new(&mut reader);
        let m0 = header.read_byte()?;
        let m1 = header.read_byte()?;
        if m0 != b'P' || m1 != b'6' {
            return Err(IoError::InvalidData("not a binary PPM (P6) file".to_string()));
        }
        let width = header.read_uint()?;
        let height = header.read_uint()?;
        let maxval = header.read_uint()?;
        if maxval != 255 {
            return Err(IoError::InvalidData(format!("unsupported PPM maxval: {maxval}")));
        }
        let separator = header.read_byte()?;
        if !separator.is_ascii_whitespace() {
            return Err(IoError::InvalidData("malformed PPM header".to_string()));
        }
        (width, height)
    };

    let mut data = vec![0u8; width as usize * height as usize * 3];
    reader.read_exact(&mut data)?;
    RgbImage::new(width, height, data).map_err(IoError::from)
}

/// Read a binary PPM as a single-channel depth map, taking the red channel
/// of each pixel (the source's depth loader reused the RGB PPM path and
/// only ever read `depth[i*3]`).
pub fn read_ppm_as_depth<R: Read>(reader: R) -> IoResult<DepthMap> {
    let image = read_ppm(reader)?;
    let data: Vec<u8> = (0..image.dims().pixel_count()).map(|i| image.pixel(i)[0]).collect();
    DepthMap::new(image.width(), image.height(), data).map_err(IoError::from)
}

/// Write an [`RgbImage`] as a binary PPM (P6).
pub fn write_ppm<W: Write>(image: &RgbImage, mut writer: W) -> IoResult<()> {
    writer.write_all(format!("P6\n{} {}\n255\n", image.width(), image.height()).as_bytes())?;
    writer.write_all(image.as_bytes())?;
    Ok(())
}
