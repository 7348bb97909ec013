use std::io::Write;

use crate::error::{Error, Result};
use crate::mem::Device;

/// Characters per row.
const COLUMNS: u16 = 16;

const BOLD: u8 = 0x01;
const REGULAR: u8 = 0x02;
const CLEAR: u8 = 0xff;

/// A character terminal driven through ANSI escapes.
///
/// Each word written is `command << 8 | character`. The address picks the
/// cell: column `addr % 16`, row `addr / 16`. Nothing is readable.
pub struct Screen {
  out: Box<dyn Write>,
}

impl Screen {
  pub fn new(out: Box<dyn Write>) -> Screen {
    Screen { out: out }
  }

  pub fn stdout() -> Screen {
    Screen::new(Box::new(std::io::stdout()))
  }

  fn emit(&mut self, addr: u16, value: u16) -> std::io::Result<()> {
    let command = (value >> 8) as u8;
    let ch = (value & 0xff) as u8;

    match command {
      BOLD => write!(self.out, "\x1b[1m")?,
      REGULAR => write!(self.out, "\x1b[0m")?,
      CLEAR => write!(self.out, "\x1b[2J")?,
      _ => (),
    }

    let x = (addr % COLUMNS) + 1;
    let y = (addr / COLUMNS) + 1;
    write!(self.out, "\x1b[{};{}H{}", y, x * 2, ch as char)?;
    self.out.flush()
  }
}

impl Device for Screen {
  fn rb(&self, _: u16) -> Result<u8> {
    Ok(0)
  }

  fn rw(&self, _: u16) -> Result<u16> {
    Ok(0)
  }

  fn wb(&mut self, _: u16, _: u8) -> Result<()> {
    Ok(())
  }

  fn ww(&mut self, addr: u16, value: u16) -> Result<()> {
    self
      .emit(addr, value)
      .map_err(|e| Error::DeviceIo(e.to_string()))
  }
}
