//! The address space seen by the CPU.
//!
//! Devices are mapped over inclusive address ranges. A lookup scans the
//! regions newest first, so a later mapping shadows an older one wherever
//! the two overlap. Words are big-endian everywhere.

mod ram;
mod screen;

pub use self::ram::Ram;
pub use self::screen::Screen;

use crate::error::{Error, Result};

/// Anything that can sit on the bus.
pub trait Device {
  /// Read a byte at `addr`.
  fn rb(&self, addr: u16) -> Result<u8>;

  /// Read a big-endian word at `addr`.
  fn rw(&self, addr: u16) -> Result<u16>;

  /// Write `value` at `addr`.
  fn wb(&mut self, addr: u16, value: u8) -> Result<()>;

  /// Write a big-endian word at `addr`.
  fn ww(&mut self, addr: u16, value: u16) -> Result<()>;
}

/// Handle returned by `Memory::map`, used to remove that one region again.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Mapping(u64);

struct Region {
  id: u64,
  device: Box<dyn Device>,
  start: u16,
  end: u16,
  remap: bool,
}

impl Region {
  fn contains(&self, addr: u16) -> bool {
    addr >= self.start && addr <= self.end
  }

  /// Address as the device should see it.
  fn translate(&self, addr: u16) -> u16 {
    if self.remap {
      addr - self.start
    } else {
      addr
    }
  }
}

pub struct Memory {
  /// Oldest first; lookups walk this in reverse.
  regions: Vec<Region>,
  next_id: u64,
}

impl Memory {
  pub fn new() -> Memory {
    Memory {
      regions: Vec::new(),
      next_id: 0,
    }
  }

  /// Map `device` over `start..=end`. With `remap` set the device receives
  /// `addr - start`, otherwise the global address unchanged.
  pub fn map(
    &mut self,
    device: Box<dyn Device>,
    start: u16,
    end: u16,
    remap: bool,
  ) -> Mapping {
    let id = self.next_id;
    self.next_id += 1;
    debug!(
      "map #{} 0x{:04x}..=0x{:04x} remap={}",
      id,
      start,
      end,
      remap
    );
    self.regions.push(Region {
      id: id,
      device: device,
      start: start,
      end: end,
      remap: remap,
    });
    Mapping(id)
  }

  /// Remove the region created by `mapping` and hand its device back.
  /// Returns `None` if it was already unmapped.
  pub fn unmap(&mut self, mapping: Mapping) -> Option<Box<dyn Device>> {
    let idx = self.regions.iter().position(|r| r.id == mapping.0)?;
    debug!("unmap #{}", mapping.0);
    Some(self.regions.remove(idx).device)
  }

  fn region(&self, addr: u16) -> Result<&Region> {
    self
      .regions
      .iter()
      .rev()
      .find(|r| r.contains(addr))
      .ok_or(Error::Unmapped(addr))
  }

  fn region_mut(&mut self, addr: u16) -> Result<&mut Region> {
    self
      .regions
      .iter_mut()
      .rev()
      .find(|r| r.contains(addr))
      .ok_or(Error::Unmapped(addr))
  }

  /// Read a byte at address `addr`.
  pub fn rb(&self, addr: u16) -> Result<u8> {
    let region = self.region(addr)?;
    region.device.rb(region.translate(addr))
  }

  /// Read a 2-byte big-endian word from `addr`.
  pub fn rw(&self, addr: u16) -> Result<u16> {
    let region = self.region(addr)?;
    region.device.rw(region.translate(addr))
  }

  /// Write `value` at address `addr`.
  pub fn wb(&mut self, addr: u16, value: u8) -> Result<()> {
    let region = self.region_mut(addr)?;
    let local = region.translate(addr);
    region.device.wb(local, value)
  }

  /// Write a 2-byte big-endian word to `addr`.
  pub fn ww(&mut self, addr: u16, value: u16) -> Result<()> {
    let region = self.region_mut(addr)?;
    let local = region.translate(addr);
    region.device.ww(local, value)
  }

  /// Write an arbitrary number of bytes to memory.
  /// Nothing is written if the bytes would run past 0xffff.
  pub fn write(&mut self, addr: u16, values: &[u8]) -> Result<()> {
    let end = addr as usize + values.len();
    if end > 0x10000 {
      return Err(Error::AddressOverflow(0x10000));
    }
    for (i, v) in values.iter().enumerate() {
      self.wb(addr + i as u16, *v)?;
    }
    Ok(())
  }
}

impl Default for Memory {
  fn default() -> Memory {
    Memory::new()
  }
}
