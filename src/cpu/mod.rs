mod cpu;
pub mod opcode;
mod reg;

pub use self::opcode::Opcode;
pub use self::reg::{Register, STACK_TOP};

use crate::mem::Memory;

/// Bytes in the register file: twelve 16-bit registers.
const REGISTER_BYTES: usize = Register::COUNT * 2;

pub struct Cpu {
  pub regs: Registers,
  pub mem: Memory,

  /// Bytes pushed since the current frame was entered.
  stack_frame_size: u16,

  halted: bool,
}


/// The register file, stored big-endian two bytes per register in the
/// order of `Register::ALL`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Registers {
  bytes: [u8; REGISTER_BYTES],
}
