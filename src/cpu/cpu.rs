use crate::cpu::Cpu;
use crate::cpu::Opcode;
use crate::cpu::Register;
use crate::cpu::Registers;
use crate::error::{Error, Result};
use crate::mem::Memory;

/// Words written by a call: r1..r8, return address, frame size marker.
const FRAME_WORDS: usize = 10;

/// `base + offset` as a bus address. Running past 0xffff is a fault.
fn effective(base: u16, offset: u16) -> Result<u16> {
  base
    .checked_add(offset)
    .ok_or_else(|| Error::AddressOverflow(u32::from(base) + u32::from(offset)))
}

/// Logical shift left by the low five bits of `by`.
fn shl(value: u16, by: u16) -> u16 {
  ((u32::from(value) << (by & 0x1f)) & 0xffff) as u16
}

/// Logical shift right by the low five bits of `by`.
fn shr(value: u16, by: u16) -> u16 {
  (u32::from(value) >> (by & 0x1f)) as u16
}

impl Cpu {
  pub fn new(mem: Memory) -> Cpu {
    Cpu {
      regs: Registers::new(),
      mem: mem,
      stack_frame_size: 0,
      halted: false,
    }
  }

  /// Read a register by name, e.g. `"r1"` or `"sp"`.
  pub fn register(&self, name: &str) -> Result<u16> {
    Ok(self.regs.get(name.parse()?))
  }

  pub fn set_register(&mut self, name: &str, value: u16) -> Result<()> {
    self.regs.set(name.parse()?, value);
    Ok(())
  }

  pub fn stack_frame_size(&self) -> u16 {
    self.stack_frame_size
  }

  pub fn halted(&self) -> bool {
    self.halted
  }

  /// Format `n` bytes starting at `addr`, e.g. `0x0100: 0x12 0x34`.
  pub fn view_memory_at(&self, addr: u16, n: u16) -> Result<String> {
    let mut bytes = Vec::with_capacity(n as usize);
    for i in 0..n {
      bytes.push(format!("0x{:02x}", self.mem.rb(addr.wrapping_add(i))?));
    }
    Ok(format!("0x{:04x}: {}", addr, bytes.join(" ")))
  }

  /// Return the next byte at the instruction pointer,
  /// and increment the instruction pointer.
  fn bump(&mut self) -> Result<u8> {
    let ip = self.regs.ip();
    let result = self.mem.rb(ip)?;
    self.regs.set(Register::Ip, ip.wrapping_add(1));
    Ok(result)
  }

  fn bump16(&mut self) -> Result<u16> {
    let ip = self.regs.ip();
    let result = self.mem.rw(ip)?;
    self.regs.set(Register::Ip, ip.wrapping_add(2));
    Ok(result)
  }

  fn bump_reg(&mut self) -> Result<Register> {
    Ok(Register::from_index(self.bump()?))
  }

  pub fn push(&mut self, value: u16) -> Result<()> {
    let sp = self.regs.sp();
    self.mem.ww(sp, value)?;
    self.regs.set(Register::Sp, sp.wrapping_sub(2));
    self.stack_frame_size = self.stack_frame_size.wrapping_add(2);
    Ok(())
  }

  pub fn pop(&mut self) -> Result<u16> {
    let sp = effective(self.regs.sp(), 2)?;
    self.regs.set(Register::Sp, sp);
    self.stack_frame_size = self.stack_frame_size.wrapping_sub(2);
    self.mem.rw(sp)
  }

  /// Every word of the frame `push_state` is about to write must be
  /// reachable, so a failing call leaves memory untouched.
  fn check_frame(&self) -> Result<()> {
    let mut addr = self.regs.sp();
    for _ in 0..FRAME_WORDS {
      self.mem.rw(addr)?;
      addr = addr.wrapping_sub(2);
    }
    Ok(())
  }

  /// Build a call frame: r1..r8, the return address, then the frame size
  /// marker. Every call saves all ten words.
  fn push_state(&mut self) -> Result<()> {
    self.check_frame()?;
    for reg in Register::GENERAL.iter() {
      let value = self.regs.get(*reg);
      self.push(value)?;
    }
    let ip = self.regs.ip();
    self.push(ip)?;
    let size = self.stack_frame_size.wrapping_add(2);
    self.push(size)?;

    let sp = self.regs.sp();
    self.regs.set(Register::Fp, sp);
    self.stack_frame_size = 0;
    Ok(())
  }

  /// Tear down the frame at `fp`, then drop as many further words as the
  /// word sitting above the saved r1 says.
  fn pop_state(&mut self) -> Result<()> {
    let fp = self.regs.fp();
    self.regs.set(Register::Sp, fp);

    let frame_size = self.pop()?;
    self.stack_frame_size = frame_size;

    let ip = self.pop()?;
    self.regs.set(Register::Ip, ip);
    for reg in Register::GENERAL.iter().rev() {
      let value = self.pop()?;
      self.regs.set(*reg, value);
    }

    let n_args = self.pop()?;
    for _ in 0..n_args {
      self.pop()?;
    }

    self.regs.set(Register::Fp, fp.wrapping_add(frame_size));
    Ok(())
  }

  /// Run one instruction. Returns true once the machine has halted.
  ///
  /// An error leaves the registers as they were before the instruction.
  /// Memory is untouched too, unless a device fails partway through a
  /// write it accepted.
  pub fn step(&mut self) -> Result<bool> {
    if self.halted {
      return Ok(true);
    }

    let regs = self.regs;
    let stack_frame_size = self.stack_frame_size;
    match self.exec() {
      Ok(halt) => {
        if halt {
          info!("halted at 0x{:04x}", self.regs.ip());
          self.halted = true;
        }
        Ok(halt)
      }
      Err(e) => {
        self.regs = regs;
        self.stack_frame_size = stack_frame_size;
        Err(e)
      }
    }
  }

  /// Step until `HLT`.
  pub fn run(&mut self) -> Result<()> {
    while !self.step()? {}
    Ok(())
  }

  /// Step at most `max_steps` times. Returns whether the machine halted.
  pub fn run_for(&mut self, max_steps: u64) -> Result<bool> {
    for _ in 0..max_steps {
      if self.step()? {
        return Ok(true);
      }
    }
    Ok(self.halted)
  }

  /// Fetch and execute the next opcode.
  /// Return true if it was `HLT`.
  fn exec(&mut self) -> Result<bool> {
    macro_rules! acc_reg_reg {
      ($op:ident) => {{
        let r1 = self.bump_reg()?;
        let r2 = self.bump_reg()?;
        let result = self.regs.get(r1).$op(self.regs.get(r2));
        self.regs.set(Register::Acc, result);
      }};
    }
    macro_rules! acc_lit_reg {
      ($op:ident) => {{
        let literal = self.bump16()?;
        let r1 = self.bump_reg()?;
        let result = literal.$op(self.regs.get(r1));
        self.regs.set(Register::Acc, result);
      }};
    }

    macro_rules! reg_lit {
      ($op:tt) => {{
        let r1 = self.bump_reg()?;
        let literal = self.bump16()?;
        let result = self.regs.get(r1) $op literal;
        self.regs.set(r1, result);
      }};
    }
    macro_rules! reg_reg {
      ($op:tt) => {{
        let r1 = self.bump_reg()?;
        let r2 = self.bump_reg()?;
        let result = self.regs.get(r1) $op self.regs.get(r2);
        self.regs.set(r1, result);
      }};
    }

    macro_rules! shift_lit {
      ($f:ident) => {{
        let r1 = self.bump_reg()?;
        let by = self.bump()?;
        let result = $f(self.regs.get(r1), u16::from(by));
        self.regs.set(r1, result);
      }};
    }
    macro_rules! shift_reg {
      ($f:ident) => {{
        let r1 = self.bump_reg()?;
        let r2 = self.bump_reg()?;
        let result = $f(self.regs.get(r1), self.regs.get(r2));
        self.regs.set(r1, result);
      }};
    }

    // Compare `value` against acc and jump to the address that follows.
    macro_rules! jump_if {
      ($value:expr, $cmp:tt) => {{
        let value = $value;
        let target = self.bump16()?;
        if value $cmp self.regs.acc() {
          self.regs.set(Register::Ip, target);
        }
      }};
    }
    macro_rules! jump_lit {
      ($cmp:tt) => {{
        jump_if!(self.bump16()?, $cmp)
      }};
    }
    macro_rules! jump_reg {
      ($cmp:tt) => {{
        let r1 = self.bump_reg()?;
        jump_if!(self.regs.get(r1), $cmp)
      }};
    }

    let ip = self.regs.ip();
    let opcode = Opcode::from_byte(self.bump()?);
    trace!("0x{:04x}: {:?}", ip, opcode);

    match opcode {
      Opcode::MovLitReg => {
        let literal = self.bump16()?;
        let r1 = self.bump_reg()?;
        self.regs.set(r1, literal);
      }
      Opcode::MovRegReg => {
        let from = self.bump_reg()?;
        let to = self.bump_reg()?;
        let value = self.regs.get(from);
        self.regs.set(to, value);
      }
      Opcode::MovRegMem => {
        let r1 = self.bump_reg()?;
        let addr = self.bump16()?;
        let value = self.regs.get(r1);
        self.mem.ww(addr, value)?;
      }
      Opcode::MovMemReg => {
        let addr = self.bump16()?;
        let r1 = self.bump_reg()?;
        let value = self.mem.rw(addr)?;
        self.regs.set(r1, value);
      }
      Opcode::MovLitMem => {
        let value = self.bump16()?;
        let addr = self.bump16()?;
        self.mem.ww(addr, value)?;
      }
      Opcode::MovRegPtrReg => {
        let ptr = self.bump_reg()?;
        let to = self.bump_reg()?;
        let value = self.mem.rw(self.regs.get(ptr))?;
        self.regs.set(to, value);
      }
      Opcode::MovLitOffReg => {
        let base = self.bump16()?;
        let offset = self.bump_reg()?;
        let to = self.bump_reg()?;
        let addr = effective(base, self.regs.get(offset))?;
        let value = self.mem.rw(addr)?;
        self.regs.set(to, value);
      }

      Opcode::AddRegReg => acc_reg_reg!(wrapping_add),
      Opcode::AddLitReg => acc_lit_reg!(wrapping_add),
      Opcode::SubLitReg => acc_lit_reg!(wrapping_sub),
      Opcode::SubRegLit => {
        // Same result as SubLitReg; only the operand order differs.
        let r1 = self.bump_reg()?;
        let literal = self.bump16()?;
        let result = literal.wrapping_sub(self.regs.get(r1));
        self.regs.set(Register::Acc, result);
      }
      Opcode::SubRegReg => acc_reg_reg!(wrapping_sub),
      Opcode::MulLitReg => acc_lit_reg!(wrapping_mul),
      Opcode::MulRegReg => acc_reg_reg!(wrapping_mul),

      Opcode::IncReg => {
        let r1 = self.bump_reg()?;
        let value = self.regs.get(r1).wrapping_add(1);
        self.regs.set(r1, value);
      }
      Opcode::DecReg => {
        let r1 = self.bump_reg()?;
        let value = self.regs.get(r1).wrapping_sub(1);
        self.regs.set(r1, value);
      }

      Opcode::LsfRegLit => shift_lit!(shl),
      Opcode::LsfRegReg => shift_reg!(shl),
      Opcode::RsfRegLit => shift_lit!(shr),
      Opcode::RsfRegReg => shift_reg!(shr),
      Opcode::AndRegLit => reg_lit!(&),
      Opcode::AndRegReg => reg_reg!(&),
      Opcode::OrRegLit => reg_lit!(|),
      Opcode::OrRegReg => reg_reg!(|),
      Opcode::XorRegLit => reg_lit!(^),
      Opcode::XorRegReg => reg_reg!(^),
      Opcode::Not => {
        let r1 = self.bump_reg()?;
        let value = !self.regs.get(r1);
        self.regs.set(r1, value);
      }

      Opcode::JneLit => jump_lit!(!=),
      Opcode::JneReg => jump_reg!(!=),
      Opcode::JeqLit => jump_lit!(==),
      Opcode::JeqReg => jump_reg!(==),
      Opcode::JltLit => jump_lit!(<),
      Opcode::JltReg => jump_reg!(<),
      Opcode::JgtLit => jump_lit!(>),
      Opcode::JgtReg => jump_reg!(>),
      Opcode::JleLit => jump_lit!(<=),
      Opcode::JleReg => jump_reg!(<=),
      Opcode::JgeLit => jump_lit!(>=),
      Opcode::JgeReg => jump_reg!(>=),

      Opcode::PshLit => {
        let value = self.bump16()?;
        self.push(value)?;
      }
      Opcode::PshReg => {
        let r1 = self.bump_reg()?;
        let value = self.regs.get(r1);
        self.push(value)?;
      }
      Opcode::Pop => {
        let r1 = self.bump_reg()?;
        let value = self.pop()?;
        self.regs.set(r1, value);
      }

      Opcode::CalLit => {
        let addr = self.bump16()?;
        debug!("call 0x{:04x} from 0x{:04x}", addr, ip);
        self.push_state()?;
        self.regs.set(Register::Ip, addr);
      }
      Opcode::CalReg => {
        let r1 = self.bump_reg()?;
        let addr = self.regs.get(r1);
        debug!("call 0x{:04x} ({}) from 0x{:04x}", addr, r1, ip);
        self.push_state()?;
        self.regs.set(Register::Ip, addr);
      }
      Opcode::Ret => {
        self.pop_state()?;
        debug!("return to 0x{:04x}", self.regs.ip());
      }

      Opcode::Hlt => return Ok(true),

      Opcode::Unknown(byte) => {
        debug!("unknown opcode 0x{:02x} at 0x{:04x}, skipping", byte, ip);
      }
    }

    Ok(false)
  }
}
