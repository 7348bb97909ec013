use crate::error::{Error, Result};
use crate::mem::Device;

/// Plain read/write storage.
#[derive(Debug)]
pub struct Ram {
  data: Vec<u8>,
}

impl Ram {
  pub fn new(size: usize) -> Ram {
    Ram { data: vec![0; size] }
  }

  /// A `size`-byte RAM with `image` copied to its start.
  pub fn from_image(image: &[u8], size: usize) -> Result<Ram> {
    if image.len() > size {
      return Err(Error::ImageTooLarge {
        len: image.len(),
        size: size,
      });
    }
    let mut ram = Ram::new(size);
    ram.data[..image.len()].copy_from_slice(image);
    Ok(ram)
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  fn index(&self, addr: u16, width: usize) -> Result<usize> {
    let idx = addr as usize;
    if idx + width > self.data.len() {
      Err(Error::OutOfBounds {
        addr: addr,
        size: self.data.len(),
      })
    } else {
      Ok(idx)
    }
  }
}

impl Device for Ram {
  fn rb(&self, addr: u16) -> Result<u8> {
    let idx = self.index(addr, 1)?;
    Ok(self.data[idx])
  }

  fn rw(&self, addr: u16) -> Result<u16> {
    let idx = self.index(addr, 2)?;
    Ok((u16::from(self.data[idx]) << 8) | u16::from(self.data[idx + 1]))
  }

  fn wb(&mut self, addr: u16, value: u8) -> Result<()> {
    let idx = self.index(addr, 1)?;
    self.data[idx] = value;
    Ok(())
  }

  fn ww(&mut self, addr: u16, value: u16) -> Result<()> {
    let idx = self.index(addr, 2)?;
    self.data[idx] = (value >> 8) as u8;
    self.data[idx + 1] = (value & 0xff) as u8;
    Ok(())
  }
}
