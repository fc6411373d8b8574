use crate::{IoError, IoResult};

/// Reader over an in-memory byte slice.
///
/// Every read checks the remaining length first, so a truncated buffer or a
/// length prefix pointing past the end surfaces as an error instead of a panic.
pub struct MemoryReader<'a> {
    memory: &'a [u8],
    pos: usize,
}

impl<'a> MemoryReader<'a> {
    pub fn new(memory: &'a [u8]) -> Self {
        Self { memory, pos: 0 }
    }

    #[inline(always)]
    fn ensure_position(&self, move_by: usize) -> IoResult<()> {
        if move_by > self.remaining() {
            Err(IoError::UnexpectedEof {
                needed: move_by,
                remaining: self.remaining(),
            })
        } else {
            Ok(())
        }
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.memory.len() - self.pos
    }

    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.pos == self.memory.len()
    }

    pub fn read_bool(&mut self) -> IoResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(IoError::InvalidValue("bool")),
        }
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> IoResult<u8> {
        self.ensure_position(1)?;
        let value = self.memory[self.pos];
        self.pos += 1;
        Ok(value)
    }

    #[inline(always)]
    pub fn read_u16(&mut self) -> IoResult<u16> {
        Ok(u16::from_le_bytes(self.read_array::<2>()?))
    }

    #[inline(always)]
    pub fn read_u32(&mut self) -> IoResult<u32> {
        Ok(u32::from_le_bytes(self.read_array::<4>()?))
    }

    #[inline(always)]
    pub fn read_u64(&mut self) -> IoResult<u64> {
        Ok(u64::from_le_bytes(self.read_array::<8>()?))
    }

    #[inline(always)]
    pub fn read_array<const N: usize>(&mut self) -> IoResult<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_memory(N)?);
        Ok(buf)
    }

    /// Reads a NEO var-int and rejects values above `max` or encoded in more
    /// bytes than necessary.
    pub fn read_var_int(&mut self, max: u64) -> IoResult<u64> {
        let tag = self.read_u8()?;
        let value = match tag {
            0xFD => {
                let value = self.read_u16()? as u64;
                if value < 0xFD {
                    return Err(IoError::InvalidVarInt(tag));
                }
                value
            }
            0xFE => {
                let value = self.read_u32()? as u64;
                if value <= 0xFFFF {
                    return Err(IoError::InvalidVarInt(tag));
                }
                value
            }
            0xFF => {
                let value = self.read_u64()?;
                if value <= 0xFFFF_FFFF {
                    return Err(IoError::InvalidVarInt(tag));
                }
                value
            }
            _ => tag as u64,
        };
        if value > max {
            return Err(IoError::LengthOutOfRange { len: value, max });
        }
        Ok(value)
    }

    /// Reads a null-padded string occupying exactly `length` bytes.
    pub fn read_fixed_string(&mut self, length: usize, field: &'static str) -> IoResult<String> {
        let data = self.read_memory(length)?;
        let end = data.iter().position(|b| *b == 0).unwrap_or(length);
        if data[end..].iter().any(|b| *b != 0) {
            return Err(IoError::InvalidValue(field));
        }
        String::from_utf8(data[..end].to_vec()).map_err(|_| IoError::InvalidUtf8(field))
    }

    #[inline(always)]
    pub fn read_memory(&mut self, count: usize) -> IoResult<&'a [u8]> {
        self.ensure_position(count)?;
        let result = &self.memory[self.pos..self.pos + count];
        self.pos += count;
        Ok(result)
    }

    #[inline(always)]
    pub fn read_var_memory(&mut self, max: usize) -> IoResult<&'a [u8]> {
        let length = self.read_var_int(max as u64)? as usize;
        self.read_memory(length)
    }

    /// Reads a var-int length prefix and copies that many bytes into an owned buffer.
    pub fn read_var_bytes(&mut self, max: usize) -> IoResult<Vec<u8>> {
        let data = self.read_var_memory(max)?;
        let mut buf = Vec::new();
        buf.try_reserve_exact(data.len())
            .map_err(|_| IoError::OutOfMemory(data.len()))?;
        buf.extend_from_slice(data);
        Ok(buf)
    }
}
