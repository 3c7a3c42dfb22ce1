// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Endian-aware typed read/write over byte buffers (C2).
//!
//! Wire and file operations default to big-endian, for cross-language
//! compatibility with the reference implementation; a stream that only
//! ever talks to itself can opt into little-endian via
//! [`ByteWriter::set_little_endian`] / [`ByteReader::set_little_endian`]
//! to skip the byte-swap on a host that is already little-endian.

use strata_type::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    BigEndian,
    LittleEndian,
}

impl Default for ByteOrder {
    fn default() -> Self {
        ByteOrder::BigEndian
    }
}

/// Absolute/relative seek target: start-relative, current-relative, or
/// end-relative, mirroring the usual "set/cur/end" seek modes.
#[derive(Debug, Clone, Copy)]
pub enum SeekFrom {
    Start(usize),
    Current(i64),
    End(i64),
}

pub struct ByteWriter {
    buf: Vec<u8>,
    order: ByteOrder,
}

impl ByteWriter {
    pub fn new() -> Self {
        ByteWriter { buf: Vec::new(), order: ByteOrder::BigEndian }
    }

    pub fn set_little_endian(&mut self) {
        self.order = ByteOrder::LittleEndian;
    }

    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    fn push(&mut self, bytes: &[u8], le_bytes: &[u8]) {
        match self.order {
            ByteOrder::BigEndian => self.buf.extend_from_slice(bytes),
            ByteOrder::LittleEndian => self.buf.extend_from_slice(le_bytes),
        }
    }

    pub fn write_bool(&mut self, v: bool) {
        self.buf.push(v as u8);
    }

    pub fn write_i8(&mut self, v: i8) {
        self.buf.push(v as u8);
    }

    pub fn write_i16(&mut self, v: i16) {
        self.push(&v.to_be_bytes(), &v.to_le_bytes());
    }

    pub fn write_u16(&mut self, v: u16) {
        self.push(&v.to_be_bytes(), &v.to_le_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.push(&v.to_be_bytes(), &v.to_le_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.push(&v.to_be_bytes(), &v.to_le_bytes());
    }

    /// u16 length prefix followed by UTF-8 bytes.
    pub fn write_string(&mut self, s: &str) -> Result<()> {
        let len = u16::try_from(s.len())
            .map_err(|_| Error::invalid(format!("string of {} bytes exceeds u16 length prefix", s.len())))?;
        self.write_u16(len);
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0, order: ByteOrder::BigEndian }
    }

    pub fn set_little_endian(&mut self) {
        self.order = ByteOrder::LittleEndian;
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn seek(&mut self, from: SeekFrom) -> Result<()> {
        let new_pos = match from {
            SeekFrom::Start(p) => p as i64,
            SeekFrom::Current(delta) => self.pos as i64 + delta,
            SeekFrom::End(delta) => self.data.len() as i64 + delta,
        };
        if new_pos < 0 || new_pos as usize > self.data.len() {
            return Err(Error::invalid(format!(
                "seek target {new_pos} out of bounds for stream of length {}",
                self.data.len()
            )));
        }
        self.pos = new_pos as usize;
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::end_of_stream(n, self.remaining()));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.take(1)?[0] != 0)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    fn read_2(&mut self) -> Result<[u8; 2]> {
        Ok(self.take(2)?.try_into().unwrap())
    }

    fn read_4(&mut self) -> Result<[u8; 4]> {
        Ok(self.take(4)?.try_into().unwrap())
    }

    fn read_8(&mut self) -> Result<[u8; 8]> {
        Ok(self.take(8)?.try_into().unwrap())
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let b = self.read_2()?;
        Ok(match self.order {
            ByteOrder::BigEndian => i16::from_be_bytes(b),
            ByteOrder::LittleEndian => i16::from_le_bytes(b),
        })
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let b = self.read_2()?;
        Ok(match self.order {
            ByteOrder::BigEndian => u16::from_be_bytes(b),
            ByteOrder::LittleEndian => u16::from_le_bytes(b),
        })
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let b = self.read_4()?;
        Ok(match self.order {
            ByteOrder::BigEndian => i32::from_be_bytes(b),
            ByteOrder::LittleEndian => i32::from_le_bytes(b),
        })
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let b = self.read_8()?;
        Ok(match self.order {
            ByteOrder::BigEndian => i64::from_be_bytes(b),
            ByteOrder::LittleEndian => i64::from_le_bytes(b),
        })
    }

    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::invalid(format!("invalid utf-8 in length-prefixed string: {e}")))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }
}
