use std::fmt;
use std::str::FromStr;

use crate::cpu::Registers;
use crate::error::Error;

/// Initial stack and frame pointer: the last word of a 64 KiB space.
pub const STACK_TOP: u16 = 0xffff - 1;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Register {
  Ip,
  Acc,
  R1,
  R2,
  R3,
  R4,
  R5,
  R6,
  R7,
  R8,
  Sp,
  Fp,
}

impl Register {
  pub const COUNT: usize = 12;

  /// File order. An operand byte `n` names `ALL[n % COUNT]`.
  pub const ALL: [Register; Register::COUNT] = [
    Register::Ip,
    Register::Acc,
    Register::R1,
    Register::R2,
    Register::R3,
    Register::R4,
    Register::R5,
    Register::R6,
    Register::R7,
    Register::R8,
    Register::Sp,
    Register::Fp,
  ];

  /// Saved and restored by every call, in push order.
  pub const GENERAL: [Register; 8] = [
    Register::R1,
    Register::R2,
    Register::R3,
    Register::R4,
    Register::R5,
    Register::R6,
    Register::R7,
    Register::R8,
  ];

  /// Decode a register operand byte. Out of range bytes wrap around.
  pub fn from_index(index: u8) -> Register {
    Register::ALL[index as usize % Register::COUNT]
  }

  /// Byte offset into the register file.
  pub fn offset(self) -> usize {
    self as usize * 2
  }

  pub fn name(self) -> &'static str {
    match self {
      Register::Ip => "ip",
      Register::Acc => "acc",
      Register::R1 => "r1",
      Register::R2 => "r2",
      Register::R3 => "r3",
      Register::R4 => "r4",
      Register::R5 => "r5",
      Register::R6 => "r6",
      Register::R7 => "r7",
      Register::R8 => "r8",
      Register::Sp => "sp",
      Register::Fp => "fp",
    }
  }
}

impl FromStr for Register {
  type Err = Error;

  fn from_str(name: &str) -> Result<Register, Error> {
    Register::ALL
      .iter()
      .find(|r| r.name() == name)
      .cloned()
      .ok_or_else(|| Error::UnknownRegister(name.to_string()))
  }
}

impl fmt::Display for Register {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl Registers {
  pub fn new() -> Registers {
    let mut regs = Registers {
      bytes: [0; super::REGISTER_BYTES],
    };
    regs.set(Register::Sp, STACK_TOP);
    regs.set(Register::Fp, STACK_TOP);
    regs
  }

  pub fn get(&self, reg: Register) -> u16 {
    let i = reg.offset();
    (u16::from(self.bytes[i]) << 8) | u16::from(self.bytes[i + 1])
  }

  pub fn set(&mut self, reg: Register, value: u16) {
    let i = reg.offset();
    self.bytes[i] = (value >> 8) as u8;
    self.bytes[i + 1] = (value & 0xff) as u8;
  }

  pub fn ip(&self) -> u16 {
    self.get(Register::Ip)
  }
  pub fn acc(&self) -> u16 {
    self.get(Register::Acc)
  }
  pub fn sp(&self) -> u16 {
    self.get(Register::Sp)
  }
  pub fn fp(&self) -> u16 {
    self.get(Register::Fp)
  }
}

impl Default for Registers {
  fn default() -> Registers {
    Registers::new()
  }
}

impl fmt::Display for Registers {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for reg in Register::ALL.iter() {
      writeln!(f, "{}: 0x{:04x}", reg, self.get(*reg))?;
    }
    Ok(())
  }
}
