//! A 16-bit virtual machine: twelve word registers, a byte-addressed bus of
//! mapped devices, and a small fixed instruction set.

#[macro_use]
extern crate log;

pub mod cpu;
pub mod error;
pub mod mem;

pub use crate::cpu::{Cpu, Opcode, Register, Registers};
pub use crate::error::{Error, Result};
pub use crate::mem::{Device, Mapping, Memory, Ram, Screen};
