//! The instruction table.
//!
//! Operand layout per form: `*_LIT_REG` is a 16-bit literal then a register
//! byte, `*_REG_REG` two register bytes, `J*_LIT` a literal then the target
//! address, `J*_REG` a register byte then the target address. Shifts by a
//! literal take a single byte. All 16-bit operands are big-endian.

// Moves
pub const MOV_LIT_REG: u8 = 0x10;
pub const MOV_REG_REG: u8 = 0x11;
pub const MOV_REG_MEM: u8 = 0x12;
pub const MOV_MEM_REG: u8 = 0x13;
pub const MOV_LIT_MEM: u8 = 0x1b;
pub const MOV_REG_PTR_REG: u8 = 0x1c;
pub const MOV_LIT_OFF_REG: u8 = 0x1d;

// Arithmetic, result in acc
pub const ADD_REG_REG: u8 = 0x14;
pub const ADD_LIT_REG: u8 = 0x3f;
pub const SUB_LIT_REG: u8 = 0x16;
pub const SUB_REG_LIT: u8 = 0x1e;
pub const SUB_REG_REG: u8 = 0x1f;
pub const MUL_LIT_REG: u8 = 0x20;
pub const MUL_REG_REG: u8 = 0x21;

// In place on one register
pub const INC_REG: u8 = 0x35;
pub const DEC_REG: u8 = 0x36;

// Shifts and bitwise ops, in place on the first register
pub const LSF_REG_LIT: u8 = 0x26;
pub const LSF_REG_REG: u8 = 0x27;
pub const RSF_REG_LIT: u8 = 0x2a;
pub const RSF_REG_REG: u8 = 0x2b;
pub const AND_REG_LIT: u8 = 0x2e;
pub const AND_REG_REG: u8 = 0x2f;
pub const OR_REG_LIT: u8 = 0x30;
pub const OR_REG_REG: u8 = 0x31;
pub const XOR_REG_LIT: u8 = 0x32;
pub const XOR_REG_REG: u8 = 0x33;
pub const NOT: u8 = 0x34;

// Conditional jumps against acc
pub const JNE_LIT: u8 = 0x15;
pub const JNE_REG: u8 = 0x40;
pub const JEQ_LIT: u8 = 0x41;
pub const JEQ_REG: u8 = 0x3e;
pub const JLT_LIT: u8 = 0x43;
pub const JLT_REG: u8 = 0x42;
pub const JGT_LIT: u8 = 0x45;
pub const JGT_REG: u8 = 0x44;
pub const JLE_LIT: u8 = 0x47;
pub const JLE_REG: u8 = 0x46;
pub const JGE_LIT: u8 = 0x49;
pub const JGE_REG: u8 = 0x48;

// Stack
pub const PSH_LIT: u8 = 0x17;
pub const PSH_REG: u8 = 0x18;
pub const POP: u8 = 0x1a;

// Subroutines
pub const CAL_LIT: u8 = 0x5e;
pub const CAL_REG: u8 = 0x5f;
pub const RET: u8 = 0x60;
pub const HLT: u8 = 0xff;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Opcode {
  MovLitReg,
  MovRegReg,
  MovRegMem,
  MovMemReg,
  MovLitMem,
  MovRegPtrReg,
  MovLitOffReg,
  AddRegReg,
  AddLitReg,
  SubLitReg,
  SubRegLit,
  SubRegReg,
  MulLitReg,
  MulRegReg,
  IncReg,
  DecReg,
  LsfRegLit,
  LsfRegReg,
  RsfRegLit,
  RsfRegReg,
  AndRegLit,
  AndRegReg,
  OrRegLit,
  OrRegReg,
  XorRegLit,
  XorRegReg,
  Not,
  JneLit,
  JneReg,
  JeqLit,
  JeqReg,
  JltLit,
  JltReg,
  JgtLit,
  JgtReg,
  JleLit,
  JleReg,
  JgeLit,
  JgeReg,
  PshLit,
  PshReg,
  Pop,
  CalLit,
  CalReg,
  Ret,
  Hlt,
  /// Not in the table. Executes as a no-op.
  Unknown(u8),
}

impl Opcode {
  pub fn from_byte(byte: u8) -> Opcode {
    match byte {
      MOV_LIT_REG => Opcode::MovLitReg,
      MOV_REG_REG => Opcode::MovRegReg,
      MOV_REG_MEM => Opcode::MovRegMem,
      MOV_MEM_REG => Opcode::MovMemReg,
      MOV_LIT_MEM => Opcode::MovLitMem,
      MOV_REG_PTR_REG => Opcode::MovRegPtrReg,
      MOV_LIT_OFF_REG => Opcode::MovLitOffReg,
      ADD_REG_REG => Opcode::AddRegReg,
      ADD_LIT_REG => Opcode::AddLitReg,
      SUB_LIT_REG => Opcode::SubLitReg,
      SUB_REG_LIT => Opcode::SubRegLit,
      SUB_REG_REG => Opcode::SubRegReg,
      MUL_LIT_REG => Opcode::MulLitReg,
      MUL_REG_REG => Opcode::MulRegReg,
      INC_REG => Opcode::IncReg,
      DEC_REG => Opcode::DecReg,
      LSF_REG_LIT => Opcode::LsfRegLit,
      LSF_REG_REG => Opcode::LsfRegReg,
      RSF_REG_LIT => Opcode::RsfRegLit,
      RSF_REG_REG => Opcode::RsfRegReg,
      AND_REG_LIT => Opcode::AndRegLit,
      AND_REG_REG => Opcode::AndRegReg,
      OR_REG_LIT => Opcode::OrRegLit,
      OR_REG_REG => Opcode::OrRegReg,
      XOR_REG_LIT => Opcode::XorRegLit,
      XOR_REG_REG => Opcode::XorRegReg,
      NOT => Opcode::Not,
      JNE_LIT => Opcode::JneLit,
      JNE_REG => Opcode::JneReg,
      JEQ_LIT => Opcode::JeqLit,
      JEQ_REG => Opcode::JeqReg,
      JLT_LIT => Opcode::JltLit,
      JLT_REG => Opcode::JltReg,
      JGT_LIT => Opcode::JgtLit,
      JGT_REG => Opcode::JgtReg,
      JLE_LIT => Opcode::JleLit,
      JLE_REG => Opcode::JleReg,
      JGE_LIT => Opcode::JgeLit,
      JGE_REG => Opcode::JgeReg,
      PSH_LIT => Opcode::PshLit,
      PSH_REG => Opcode::PshReg,
      POP => Opcode::Pop,
      CAL_LIT => Opcode::CalLit,
      CAL_REG => Opcode::CalReg,
      RET => Opcode::Ret,
      HLT => Opcode::Hlt,
      other => Opcode::Unknown(other),
    }
  }

  pub fn byte(self) -> u8 {
    match self {
      Opcode::MovLitReg => MOV_LIT_REG,
      Opcode::MovRegReg => MOV_REG_REG,
      Opcode::MovRegMem => MOV_REG_MEM,
      Opcode::MovMemReg => MOV_MEM_REG,
      Opcode::MovLitMem => MOV_LIT_MEM,
      Opcode::MovRegPtrReg => MOV_REG_PTR_REG,
      Opcode::MovLitOffReg => MOV_LIT_OFF_REG,
      Opcode::AddRegReg => ADD_REG_REG,
      Opcode::AddLitReg => ADD_LIT_REG,
      Opcode::SubLitReg => SUB_LIT_REG,
      Opcode::SubRegLit => SUB_REG_LIT,
      Opcode::SubRegReg => SUB_REG_REG,
      Opcode::MulLitReg => MUL_LIT_REG,
      Opcode::MulRegReg => MUL_REG_REG,
      Opcode::IncReg => INC_REG,
      Opcode::DecReg => DEC_REG,
      Opcode::LsfRegLit => LSF_REG_LIT,
      Opcode::LsfRegReg => LSF_REG_REG,
      Opcode::RsfRegLit => RSF_REG_LIT,
      Opcode::RsfRegReg => RSF_REG_REG,
      Opcode::AndRegLit => AND_REG_LIT,
      Opcode::AndRegReg => AND_REG_REG,
      Opcode::OrRegLit => OR_REG_LIT,
      Opcode::OrRegReg => OR_REG_REG,
      Opcode::XorRegLit => XOR_REG_LIT,
      Opcode::XorRegReg => XOR_REG_REG,
      Opcode::Not => NOT,
      Opcode::JneLit => JNE_LIT,
      Opcode::JneReg => JNE_REG,
      Opcode::JeqLit => JEQ_LIT,
      Opcode::JeqReg => JEQ_REG,
      Opcode::JltLit => JLT_LIT,
      Opcode::JltReg => JLT_REG,
      Opcode::JgtLit => JGT_LIT,
      Opcode::JgtReg => JGT_REG,
      Opcode::JleLit => JLE_LIT,
      Opcode::JleReg => JLE_REG,
      Opcode::JgeLit => JGE_LIT,
      Opcode::JgeReg => JGE_REG,
      Opcode::PshLit => PSH_LIT,
      Opcode::PshReg => PSH_REG,
      Opcode::Pop => POP,
      Opcode::CalLit => CAL_LIT,
      Opcode::CalReg => CAL_REG,
      Opcode::Ret => RET,
      Opcode::Hlt => HLT,
      Opcode::Unknown(byte) => byte,
    }
  }
}

impl From<u8> for Opcode {
  fn from(byte: u8) -> Opcode {
    Opcode::from_byte(byte)
  }
}
