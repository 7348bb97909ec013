use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions that stop the machine.
/// An unknown opcode is not one of them; it executes as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("no such register '{0}'")]
  UnknownRegister(String),

  #[error("no device mapped at address 0x{0:04x}")]
  Unmapped(u16),

  #[error("address 0x{0:x} is past the end of the address space")]
  AddressOverflow(u32),

  #[error("address 0x{addr:04x} is outside a device of {size} bytes")]
  OutOfBounds { addr: u16, size: usize },

  #[error("device i/o failed: {0}")]
  DeviceIo(String),

  #[error("memory image of {len} bytes does not fit in {size} bytes")]
  ImageTooLarge { len: usize, size: usize },
}
